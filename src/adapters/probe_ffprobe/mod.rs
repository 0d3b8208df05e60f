//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` as a child process and reads the first video stream's
//! dimensions from its JSON output.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::model::FrameDimensions;
use crate::error::{ClipError, ClipResult};
use crate::ports::ProbePort;

/// FFprobe JSON output format
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<i64>,
    height: Option<i64>,
}

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    binary: String,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter for the given binary name or path
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn build_args(file_path: &Path) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-select_streams".to_string(),
            "v:0".to_string(),
            "-show_entries".to_string(),
            "stream=width,height".to_string(),
            "-of".to_string(),
            "json".to_string(),
            file_path.to_string_lossy().to_string(),
        ]
    }

    /// Extract dimensions from ffprobe's JSON document
    pub fn parse_dimensions(json: &[u8]) -> ClipResult<FrameDimensions> {
        let probe: FfprobeOutput =
            serde_json::from_slice(json).map_err(|e| ClipError::TranscoderFailure {
                message: format!("Unreadable ffprobe output: {}", e),
            })?;

        let stream = probe.streams.first().ok_or_else(|| ClipError::TranscoderFailure {
            message: "No video stream found".to_string(),
        })?;

        let width = stream.width.unwrap_or(0);
        let height = stream.height.unwrap_or(0);
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(width), Ok(height)) if width > 0 && height > 0 => {
                Ok(FrameDimensions::new(width, height))
            }
            _ => Err(ClipError::InvalidFrameDimensions {
                width: width.clamp(0, u32::MAX as i64) as u32,
                height: height.clamp(0, u32::MAX as i64) as u32,
            }),
        }
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe_frame_dimensions(&self, file_path: &Path) -> ClipResult<FrameDimensions> {
        if !file_path.exists() {
            return Err(ClipError::TranscoderFailure {
                message: format!("Input video not found: {}", file_path.display()),
            });
        }
        which::which(&self.binary).map_err(|_| ClipError::ToolNotFound {
            tool: self.binary.clone(),
        })?;

        let args = Self::build_args(file_path);
        debug!("Running FFprobe: {} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ClipError::TranscoderFailure {
                message: format!("Failed to spawn {}: {}", self.binary, e),
            })?;

        if !output.status.success() {
            return Err(ClipError::TranscoderFailure {
                message: format!(
                    "ffprobe exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Self::parse_dimensions(&output.stdout)
    }
}
