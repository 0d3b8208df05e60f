//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Duration gate overrides shared by commands that extract
#[derive(Args, Debug, Clone, Default)]
pub struct GateArgs {
    /// Minimum accepted clip length in seconds
    #[arg(long)]
    pub min_secs: Option<f64>,

    /// Maximum accepted clip length in seconds
    #[arg(long)]
    pub max_secs: Option<f64>,
}

/// Arguments for the clip command
#[derive(Args, Debug)]
pub struct ClipArgs {
    /// Source video file
    #[arg(long)]
    pub video: PathBuf,

    /// Subtitle file whose first and last timecode bound the clip
    #[arg(long)]
    pub subtitles: PathBuf,

    /// Directory for the trimmed clip
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Crop mode: original or square (default from config)
    #[arg(long)]
    pub crop: Option<String>,

    #[command(flatten)]
    pub gate: GateArgs,
}

/// Arguments for the burn command
#[derive(Args, Debug)]
pub struct BurnArgs {
    /// Trimmed clip
    #[arg(long)]
    pub video: PathBuf,

    /// Subtitle file the clip was cut from
    #[arg(long)]
    pub subtitles: PathBuf,

    /// Directory for the subtitled clip
    #[arg(long)]
    pub output_dir: PathBuf,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Subtitle file to inspect
    #[arg(long)]
    pub subtitles: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub gate: GateArgs,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory of source videos
    #[arg(long)]
    pub videos_dir: PathBuf,

    /// Directory of subtitle files
    #[arg(long)]
    pub subtitles_dir: PathBuf,

    /// Directory for trimmed clips
    #[arg(long)]
    pub clips_dir: PathBuf,

    /// Directory for subtitled clips
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Extension of source videos
    #[arg(long, default_value = "mp4")]
    pub video_ext: String,

    /// Crop mode: original or square (default from config)
    #[arg(long)]
    pub crop: Option<String>,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub gate: GateArgs,
}

/// Arguments for the burn-all command
#[derive(Args, Debug)]
pub struct BurnAllArgs {
    /// Directory of `*_trimmed` clips
    #[arg(long)]
    pub clips_dir: PathBuf,

    /// Directory of subtitle files
    #[arg(long)]
    pub subtitles_dir: PathBuf,

    /// Directory for subtitled clips
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the wait command
#[derive(Args, Debug)]
pub struct WaitArgs {
    /// File to wait for
    #[arg(long)]
    pub path: PathBuf,

    /// Seconds to wait (default from config)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
