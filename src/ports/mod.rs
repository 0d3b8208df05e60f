// Ports - Interface definitions for the external media tools

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::model::*;
use crate::error::ClipResult;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Pixel size of the first video stream
    async fn probe_frame_dimensions(&self, file_path: &Path) -> ClipResult<FrameDimensions>;
}

/// Seek + duration-limited re-encode of one window
#[derive(Debug, Clone, PartialEq)]
pub struct TrimJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub start: Timecode,
    pub duration: Duration,
    pub crop: Option<CropRectangle>,
}

/// Subtitle overlay with audio passthrough
#[derive(Debug, Clone, PartialEq)]
pub struct BurnJob {
    pub video: PathBuf,
    /// UTF-8, zero-based subtitle file
    pub subtitles: PathBuf,
    pub output: PathBuf,
}

/// Port for transcoder execution
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Produce a trimmed (optionally cropped) clip, overwriting the output
    async fn execute_trim(&self, job: &TrimJob) -> ClipResult<()>;

    /// Render subtitles into the video frames, overwriting the output
    async fn execute_burn(&self, job: &BurnJob) -> ClipResult<()>;
}
