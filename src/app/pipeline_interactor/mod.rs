// Pipeline interactor - Chains extraction, readiness and burn per unit of work

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::adapters::toml_config::{PipelineConfig, ReadinessSettings};
use crate::app::report::BatchReport;
use crate::domain::model::{CropMode, FinalArtifact};
use crate::domain::rules::SegmentDurationGate;
use crate::engine::{ClipExtractionEngine, SubtitleBurnEngine};
use crate::error::{ClipError, ClipResult};
use crate::ports::{ExecutePort, ProbePort};
use crate::utils::path::{discover_files, subtitle_base_for_clip};
use crate::utils::readiness::{FileReadinessCoordinator, Readiness};

/// Interactor for the clip-then-subtitle use case
pub struct PipelineInteractor {
    extractor: ClipExtractionEngine,
    burner: SubtitleBurnEngine,
    readiness: FileReadinessCoordinator,
    timeouts: ReadinessSettings,
    container: String,
}

impl PipelineInteractor {
    /// Create new pipeline interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        config: &PipelineConfig,
    ) -> ClipResult<Self> {
        config.validate()?;
        let gate = SegmentDurationGate::new(config.duration.policy()?);
        let container = config.encoder.container.trim().to_string();

        Ok(Self {
            extractor: ClipExtractionEngine::new(
                probe_port,
                Arc::clone(&execute_port),
                gate,
                container.clone(),
            ),
            burner: SubtitleBurnEngine::new(execute_port, container.clone()),
            readiness: FileReadinessCoordinator::new(config.readiness.poll_interval()),
            timeouts: config.readiness.clone(),
            container,
        })
    }

    pub fn extractor(&self) -> &ClipExtractionEngine {
        &self.extractor
    }

    pub fn burner(&self) -> &SubtitleBurnEngine {
        &self.burner
    }

    /// Extract one clip, wait for it to land, then burn its subtitles
    pub async fn clip_and_subtitle(
        &self,
        video: &Path,
        subtitle: &Path,
        clip_dir: &Path,
        final_dir: &Path,
        mode: CropMode,
    ) -> ClipResult<FinalArtifact> {
        let clip = self.extractor.extract(video, subtitle, clip_dir, mode).await?;

        let timeout = self.timeouts.trimmed_timeout();
        if self.readiness.await_ready(&clip.path, timeout).await == Readiness::TimedOut {
            return Err(ClipError::TimedOut {
                path: clip.path,
                timeout,
            });
        }

        let artifact = self.burner.burn(&clip.path, subtitle, final_dir).await?;
        info!(
            video = %video.display(),
            subtitle = %subtitle.display(),
            output = %artifact.path.display(),
            "Video processed"
        );
        Ok(artifact)
    }

    /// Combine every video with every subtitle file, sequentially.
    ///
    /// Failures are recorded and the batch always runs to the end.
    pub async fn run_batch(
        &self,
        videos: &[PathBuf],
        subtitles: &[PathBuf],
        clip_dir: &Path,
        final_dir: &Path,
        mode: CropMode,
    ) -> BatchReport {
        let mut report = BatchReport::new();
        info!(
            videos = videos.len(),
            subtitles = subtitles.len(),
            %mode,
            "Starting batch"
        );

        for video in videos {
            info!(video = %video.display(), "Processing video");
            for subtitle in subtitles {
                let outcome = self
                    .process_unit(video, subtitle, clip_dir, final_dir, mode)
                    .await;
                match outcome {
                    Ok(artifact) => report.record_success(artifact),
                    Err(e) => {
                        log_failure(subtitle, &e);
                        report.record_failure(subtitle, Some(video), &e);
                    }
                }
            }
        }

        let report = report.finish();
        log_summary(&report, "Batch finished");
        report
    }

    async fn process_unit(
        &self,
        video: &Path,
        subtitle: &Path,
        clip_dir: &Path,
        final_dir: &Path,
        mode: CropMode,
    ) -> ClipResult<FinalArtifact> {
        let timeout = self.timeouts.input_timeout();
        if self.readiness.await_ready(subtitle, timeout).await == Readiness::TimedOut {
            return Err(ClipError::TimedOut {
                path: subtitle.to_path_buf(),
                timeout,
            });
        }
        self.clip_and_subtitle(video, subtitle, clip_dir, final_dir, mode)
            .await
    }

    /// Burn every `*_trimmed` clip in `clip_dir` with the subtitle file of
    /// the same base name
    pub async fn burn_batch(
        &self,
        clip_dir: &Path,
        subtitles: &[PathBuf],
        final_dir: &Path,
    ) -> ClipResult<BatchReport> {
        let clips = discover_files(clip_dir, &self.container)?;
        let mut report = BatchReport::new();
        info!(clips = clips.len(), subtitles = subtitles.len(), "Starting burn batch");

        for clip in &clips {
            let Some(base) = subtitle_base_for_clip(clip) else {
                continue;
            };

            let subtitle = subtitles
                .iter()
                .find(|s| s.file_stem().map(|stem| stem.to_string_lossy() == base).unwrap_or(false));
            let Some(subtitle) = subtitle else {
                warn!(clip = %clip.display(), "Subtitle file not found");
                report.record_skip(clip, "missing_subtitle", "subtitle file not found");
                continue;
            };

            match self.burner.burn(clip, subtitle, final_dir).await {
                Ok(artifact) => report.record_success(artifact),
                Err(e) => {
                    log_failure(clip, &e);
                    report.record_failure(clip, None, &e);
                }
            }
        }

        let report = report.finish();
        log_summary(&report, "Burn batch finished");
        Ok(report)
    }
}

fn log_summary(report: &BatchReport, message: &str) {
    if report.is_clean() {
        info!(produced = report.produced.len(), "{}", message);
    } else {
        warn!(
            produced = report.produced.len(),
            skipped = report.skipped.len(),
            "{} with skipped units",
            message
        );
    }
}

fn log_failure(path: &Path, e: &ClipError) {
    match e {
        ClipError::TranscoderFailure { .. }
        | ClipError::RenderFailure { .. }
        | ClipError::ToolNotFound { .. } => {
            error!(path = %path.display(), kind = e.kind(), error = %e, "Unit failed");
        }
        _ => {
            warn!(path = %path.display(), kind = e.kind(), error = %e, "Unit skipped");
        }
    }
}
