// Batch report - Outcome of a batch run, one entry per unit of work

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::model::FinalArtifact;
use crate::error::ClipError;

/// A unit of work that produced no final artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedUnit {
    /// Subtitle file, or the clip when no subtitle could be paired
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<PathBuf>,
    pub kind: String,
    pub reason: String,
}

/// Summary of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub produced: Vec<FinalArtifact>,
    pub skipped: Vec<SkippedUnit>,
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            produced: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn record_success(&mut self, artifact: FinalArtifact) {
        self.produced.push(artifact);
    }

    pub fn record_failure(&mut self, path: &Path, video: Option<&Path>, error: &ClipError) {
        self.skipped.push(SkippedUnit {
            path: path.to_path_buf(),
            video: video.map(Path::to_path_buf),
            kind: error.kind().to_string(),
            reason: error.to_string(),
        });
    }

    pub fn record_skip(&mut self, path: &Path, kind: &str, reason: impl Into<String>) {
        self.skipped.push(SkippedUnit {
            path: path.to_path_buf(),
            video: None,
            kind: kind.to_string(),
            reason: reason.into(),
        });
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    /// Total units attempted
    pub fn total(&self) -> usize {
        self.produced.len() + self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_and_json() {
        let mut report = BatchReport::new();
        report.record_success(FinalArtifact {
            path: PathBuf::from("final/a_trimmed_subtitled.mp4"),
            source_clip: PathBuf::from("clips/a_trimmed.mp4"),
            subtitle_offset: None,
        });
        report.record_failure(
            Path::new("subs/b.srt"),
            Some(Path::new("videos/v.mp4")),
            &ClipError::NoTimecodesFound {
                path: PathBuf::from("subs/b.srt"),
            },
        );
        let report = report.finish();

        assert_eq!(report.total(), 2);
        assert!(!report.is_clean());
        assert!(report.finished_at.unwrap() >= report.started_at);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skipped"][0]["kind"], "no_timecodes_found");
        assert_eq!(json["skipped"][0]["video"], "videos/v.mp4");
        assert_eq!(json["produced"][0]["source_clip"], "clips/a_trimmed.mp4");
    }

    #[test]
    fn test_record_skip_omits_video() {
        let mut report = BatchReport::new();
        report.record_skip(Path::new("clips/x_trimmed.mp4"), "missing_subtitle", "subtitle file not found");
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["skipped"][0].get("video").is_none());
        assert_eq!(json["skipped"][0]["reason"], "subtitle file not found");
    }
}
