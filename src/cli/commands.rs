//! Command implementations

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::PipelineConfig;
use crate::app::{AppContainer, BatchReport, DefaultAppContainer};
use crate::cli::args::{BurnAllArgs, BurnArgs, ClipArgs, InspectArgs, RunArgs, WaitArgs};
use crate::cli::{Cli, Commands};
use crate::config_initialization::{initialize_configuration, ConfigOverrides};
use crate::domain::model::CropMode;
use crate::utils::path::discover_files;
use crate::utils::readiness::{FileReadinessCoordinator, Readiness};

/// Exit status of `wait` when the file never became ready
pub const WAIT_TIMEOUT_EXIT: u8 = 2;

/// Resolve configuration and run the selected command
pub async fn execute(cli: Cli) -> Result<ExitCode> {
    let overrides = overrides_for(&cli.command)?;
    let config = initialize_configuration(cli.config.as_deref(), &overrides)
        .context("Failed to initialize configuration")?;

    match cli.command {
        Commands::Clip(args) => clip(args, &config).await,
        Commands::Burn(args) => burn(args, &config).await,
        Commands::Inspect(args) => inspect(args, &config),
        Commands::Run(args) => run(args, &config).await,
        Commands::BurnAll(args) => burn_all(args, &config).await,
        Commands::Wait(args) => wait(args, &config).await,
    }
}

fn overrides_for(command: &Commands) -> Result<ConfigOverrides> {
    let (crop, gate) = match command {
        Commands::Clip(args) => (args.crop.as_deref(), Some(&args.gate)),
        Commands::Run(args) => (args.crop.as_deref(), Some(&args.gate)),
        Commands::Inspect(args) => (None, Some(&args.gate)),
        _ => (None, None),
    };
    let gate = gate.cloned().unwrap_or_default();

    Ok(ConfigOverrides {
        crop: crop
            .map(CropMode::parse)
            .transpose()
            .context("Invalid crop mode")?,
        min_clip_secs: gate.min_secs,
        max_clip_secs: gate.max_secs,
    })
}

/// Execute the clip command
async fn clip(args: ClipArgs, config: &PipelineConfig) -> Result<ExitCode> {
    info!("Starting clip operation");
    let container = DefaultAppContainer::new(config)?;
    let artifact = container
        .pipeline_interactor()
        .extractor()
        .extract(&args.video, &args.subtitles, &args.output_dir, config.output.crop)
        .await
        .with_context(|| format!("Failed to extract clip for {}", args.subtitles.display()))?;

    println!("{}", artifact.path.display());
    Ok(ExitCode::SUCCESS)
}

/// Execute the burn command
async fn burn(args: BurnArgs, config: &PipelineConfig) -> Result<ExitCode> {
    info!("Starting burn operation");
    let container = DefaultAppContainer::new(config)?;
    let artifact = container
        .pipeline_interactor()
        .burner()
        .burn(&args.video, &args.subtitles, &args.output_dir)
        .await
        .with_context(|| format!("Failed to burn subtitles into {}", args.video.display()))?;

    println!("{}", artifact.path.display());
    Ok(ExitCode::SUCCESS)
}

/// Execute the inspect command
fn inspect(args: InspectArgs, config: &PipelineConfig) -> Result<ExitCode> {
    let container = DefaultAppContainer::new(config)?;
    let inspection = container
        .inspect_interactor()
        .inspect(&args.subtitles)
        .with_context(|| format!("Failed to inspect {}", args.subtitles.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
    } else {
        print!("{}", inspection.summary());
    }
    Ok(ExitCode::SUCCESS)
}

/// Execute the run command
async fn run(args: RunArgs, config: &PipelineConfig) -> Result<ExitCode> {
    let videos = discover_files(&args.videos_dir, &args.video_ext)
        .with_context(|| format!("Failed to list videos in {}", args.videos_dir.display()))?;
    let subtitles = list_subtitles(&args.subtitles_dir)?;

    let container = DefaultAppContainer::new(config)?;
    let report = container
        .pipeline_interactor()
        .run_batch(
            &videos,
            &subtitles,
            &args.clips_dir,
            &args.output_dir,
            config.output.crop,
        )
        .await;

    print_report(&report, args.json)?;
    Ok(ExitCode::SUCCESS)
}

/// Execute the burn-all command
async fn burn_all(args: BurnAllArgs, config: &PipelineConfig) -> Result<ExitCode> {
    let subtitles = list_subtitles(&args.subtitles_dir)?;

    let container = DefaultAppContainer::new(config)?;
    let report = container
        .pipeline_interactor()
        .burn_batch(&args.clips_dir, &subtitles, &args.output_dir)
        .await
        .with_context(|| format!("Failed to list clips in {}", args.clips_dir.display()))?;

    print_report(&report, args.json)?;
    Ok(ExitCode::SUCCESS)
}

/// Execute the wait command
async fn wait(args: WaitArgs, config: &PipelineConfig) -> Result<ExitCode> {
    let timeout = args
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.readiness.input_timeout());
    let coordinator = FileReadinessCoordinator::new(config.readiness.poll_interval());

    match coordinator.await_ready(&args.path, timeout).await {
        Readiness::Ready => {
            println!("ready: {}", args.path.display());
            Ok(ExitCode::SUCCESS)
        }
        Readiness::TimedOut => {
            eprintln!("timed out waiting for {}", args.path.display());
            Ok(ExitCode::from(WAIT_TIMEOUT_EXIT))
        }
    }
}

fn list_subtitles(dir: &std::path::Path) -> Result<Vec<PathBuf>> {
    discover_files(dir, "srt")
        .with_context(|| format!("Failed to list subtitle files in {}", dir.display()))
}

fn print_report(report: &BatchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for artifact in &report.produced {
        println!("produced {}", artifact.path.display());
    }
    for unit in &report.skipped {
        println!("skipped  {} [{}] {}", unit.path.display(), unit.kind, unit.reason);
    }
    println!(
        "{} produced, {} skipped",
        report.produced.len(),
        report.skipped.len()
    );
    Ok(())
}
