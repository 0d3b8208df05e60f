//! Subtitle-driven clip extraction

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::model::{ClipArtifact, ClipWindow, CropMode};
use crate::domain::rules::{AspectRatioCropPlanner, GateDecision, SegmentDurationGate};
use crate::error::{ClipError, ClipResult};
use crate::ports::{ExecutePort, ProbePort, TrimJob};
use crate::subtitles::timecodes::window_from_content;
use crate::utils::path::clip_output_path;

/// Cuts the window covered by a subtitle file out of a source video
pub struct ClipExtractionEngine {
    probe: Arc<dyn ProbePort>,
    executor: Arc<dyn ExecutePort>,
    gate: SegmentDurationGate,
    container: String,
}

impl ClipExtractionEngine {
    pub fn new(
        probe: Arc<dyn ProbePort>,
        executor: Arc<dyn ExecutePort>,
        gate: SegmentDurationGate,
        container: impl Into<String>,
    ) -> Self {
        Self {
            probe,
            executor,
            gate,
            container: container.into(),
        }
    }

    /// Read the subtitle file and compute the window it spans
    pub fn window_for(subtitle_file: &Path) -> ClipResult<ClipWindow> {
        let content = std::fs::read(subtitle_file)?;
        window_from_content(&content).ok_or_else(|| ClipError::NoTimecodesFound {
            path: subtitle_file.to_path_buf(),
        })?
    }

    /// Produce `<subtitle-basename>_trimmed.<ext>` in `output_dir`.
    ///
    /// Nothing is written when the window fails the duration gate.
    pub async fn extract(
        &self,
        source_video: &Path,
        subtitle_file: &Path,
        output_dir: &Path,
        mode: CropMode,
    ) -> ClipResult<ClipArtifact> {
        let window = Self::window_for(subtitle_file)?;
        debug!(
            subtitle = %subtitle_file.display(),
            start = %window.start,
            end = %window.end,
            "Clip window computed"
        );

        if let GateDecision::Reject(reason) = self.gate.evaluate(&window) {
            warn!(
                subtitle = %subtitle_file.display(),
                duration_ms = window.duration().as_millis() as u64,
                %reason,
                "Skipping subtitle file"
            );
            return Err(ClipError::DurationOutOfRange {
                path: subtitle_file.to_path_buf(),
                reason,
            });
        }

        std::fs::create_dir_all(output_dir)?;

        let dimensions = self.probe.probe_frame_dimensions(source_video).await?;
        let crop = AspectRatioCropPlanner::plan(dimensions, mode)?;
        if let Some(rect) = &crop {
            debug!(
                width = dimensions.width,
                height = dimensions.height,
                filter = %rect.to_filter(),
                "Crop planned"
            );
        }

        let output = clip_output_path(subtitle_file, output_dir, &self.container);
        let job = TrimJob {
            input: source_video.to_path_buf(),
            output: output.clone(),
            start: window.start,
            duration: window.duration(),
            crop,
        };

        let started = Instant::now();
        self.executor.execute_trim(&job).await?;
        info!(
            video = %source_video.display(),
            output = %output.display(),
            duration_ms = window.duration().as_millis() as u64,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Clip extracted"
        );

        Ok(ClipArtifact {
            path: output,
            window,
            crop,
        })
    }
}
