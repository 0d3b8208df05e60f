//! Error handling module for ClipSub

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::rules::RejectReason;

/// Main error type for ClipSub operations
///
/// Every variant describes a failure local to one (video, subtitle) unit of
/// work. Batch callers log it and move on to the next unit.
#[derive(Error, Debug)]
pub enum ClipError {
    /// Timecode text does not follow `HH:MM:SS,mmm` or a field is out of range
    #[error("Malformed timecode '{timecode}': {reason}")]
    MalformedTimecode { timecode: String, reason: String },

    /// Shifting a timecode would move it before zero
    #[error("Shifting timecode {timecode} back by {delta} would make it negative")]
    NegativeTimecode { timecode: String, delta: String },

    /// Subtitle file contains no SRT timestamps at all
    #[error("No timecodes found in subtitle file: {}", .path.display())]
    NoTimecodesFound { path: PathBuf },

    /// Probed frame has a zero dimension
    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidFrameDimensions { width: u32, height: u32 },

    /// Candidate clip rejected by the duration gate
    #[error("Clip window from {} rejected: {reason}", .path.display())]
    DurationOutOfRange { path: PathBuf, reason: RejectReason },

    /// ffmpeg/ffprobe failed while probing or trimming
    #[error("Transcoder failed: {message}")]
    TranscoderFailure { message: String },

    /// ffmpeg failed while burning subtitles
    #[error("Subtitle render failed: {message}")]
    RenderFailure { message: String },

    /// Subtitle text could not be re-encoded
    #[error("Encoding conversion failed for {}: {message}", .path.display())]
    EncodingConversionFailure { path: PathBuf, message: String },

    /// An expected file never became ready
    #[error("Timed out after {:.1}s waiting for {}", .timeout.as_secs_f64(), .path.display())]
    TimedOut { path: PathBuf, timeout: Duration },

    /// Required external binary is not on PATH
    #[error("Required tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ClipError {
    /// Short machine-friendly name of the error kind, used in batch reports
    pub fn kind(&self) -> &'static str {
        match self {
            ClipError::MalformedTimecode { .. } => "malformed_timecode",
            ClipError::NegativeTimecode { .. } => "negative_timecode",
            ClipError::NoTimecodesFound { .. } => "no_timecodes_found",
            ClipError::InvalidFrameDimensions { .. } => "invalid_frame_dimensions",
            ClipError::DurationOutOfRange { .. } => "duration_out_of_range",
            ClipError::TranscoderFailure { .. } => "transcoder_failure",
            ClipError::RenderFailure { .. } => "render_failure",
            ClipError::EncodingConversionFailure { .. } => "encoding_conversion_failure",
            ClipError::TimedOut { .. } => "timed_out",
            ClipError::ToolNotFound { .. } => "tool_not_found",
            ClipError::Config { .. } => "config",
            ClipError::IoError(_) => "io",
        }
    }
}

/// Result type alias for ClipSub operations
pub type ClipResult<T> = std::result::Result<T, ClipError>;
