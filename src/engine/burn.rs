//! Subtitle burn-in for trimmed clips

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};

use crate::domain::model::FinalArtifact;
use crate::error::ClipResult;
use crate::ports::{BurnJob, ExecutePort};
use crate::subtitles::{SubtitleTimingNormalizer, TextSanitizer};
use crate::utils::path::{base_name, subtitled_output_path};

/// Renders a subtitle file into the frames of a trimmed clip
pub struct SubtitleBurnEngine {
    executor: Arc<dyn ExecutePort>,
    container: String,
}

impl SubtitleBurnEngine {
    pub fn new(executor: Arc<dyn ExecutePort>, container: impl Into<String>) -> Self {
        Self {
            executor,
            container: container.into(),
        }
    }

    /// Produce `<clip-basename>_subtitled.<ext>` in `output_dir`.
    ///
    /// The rebased and re-encoded subtitle copies live in temp files next to
    /// the output and are removed when this returns, whatever the outcome.
    pub async fn burn(
        &self,
        trimmed_video: &Path,
        subtitle_file: &Path,
        output_dir: &Path,
    ) -> ClipResult<FinalArtifact> {
        std::fs::create_dir_all(output_dir)?;
        let base = base_name(subtitle_file);

        let normalized = SubtitleTimingNormalizer::normalize_file(subtitle_file)?;
        let mut adjusted = Self::scratch_file(output_dir, &base, "_adjusted")?;
        adjusted.write_all(&normalized.content)?;
        adjusted.flush()?;

        let utf8 = Self::scratch_file(output_dir, &base, "_utf8")?;
        TextSanitizer::to_canonical_encoding(adjusted.path(), utf8.path())?;
        debug!(
            subtitle = %subtitle_file.display(),
            scratch = %utf8.path().display(),
            "Subtitles prepared for rendering"
        );

        let output = subtitled_output_path(trimmed_video, output_dir, &self.container);
        let job = BurnJob {
            video: trimmed_video.to_path_buf(),
            subtitles: utf8.path().to_path_buf(),
            output: output.clone(),
        };

        let started = Instant::now();
        self.executor.execute_burn(&job).await?;
        info!(
            clip = %trimmed_video.display(),
            output = %output.display(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Subtitles burned"
        );

        Ok(FinalArtifact {
            path: output,
            source_clip: trimmed_video.to_path_buf(),
            subtitle_offset: normalized.offset,
        })
    }

    fn scratch_file(dir: &Path, base: &str, suffix: &str) -> ClipResult<NamedTempFile> {
        let file = Builder::new()
            .prefix(&format!("{}{}.", base, suffix))
            .suffix(".srt")
            .tempfile_in(dir)?;
        Ok(file)
    }
}
