//! clipsub CLI
//!
//! Subtitle-driven clip extraction and subtitle burn-in on top of ffmpeg.
//!
//! # Usage
//!
//! ```bash
//! clipsub clip --video talk.mp4 --subtitles best.srt --output-dir clips --crop square
//! clipsub burn --video clips/best_trimmed.mp4 --subtitles best.srt --output-dir final
//! clipsub run --videos-dir videos --subtitles-dir subs --clips-dir clips --output-dir final
//! clipsub wait --path subs/best.srt --timeout-secs 30
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use clipsub_cli::adapters::{init_logging, LogLevel};
use clipsub_cli::cli::{commands, Cli};

/// Main entry point for the clipsub CLI application
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = LogLevel::parse(&cli.log_level)?;
    init_logging(level, cli.json_logs);

    info!("Starting clipsub");

    match commands::execute(cli).await {
        Ok(code) => Ok(code),
        Err(e) => {
            error!("{:#}", e);
            Err(e)
        }
    }
}
