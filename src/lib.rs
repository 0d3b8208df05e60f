//! clipsub library
//!
//! Cuts short clips out of long videos along the timeline of a subtitle file,
//! optionally squares them, and burns the rebased subtitles into the result.
//! Media work is delegated to `ffprobe` and `ffmpeg` through the ports in
//! [`ports`].

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod subtitles;
pub mod utils;

// Re-export commonly used types
pub use app::{BatchReport, PipelineInteractor};
pub use domain::model::{ClipArtifact, ClipWindow, CropMode, FinalArtifact, Timecode};
pub use engine::{ClipExtractionEngine, SubtitleBurnEngine};
pub use error::{ClipError, ClipResult};
pub use utils::readiness::{FileReadinessCoordinator, Readiness};
