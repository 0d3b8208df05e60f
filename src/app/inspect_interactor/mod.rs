// Inspect interactor - Dry run of the extraction decision for one subtitle file

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::domain::model::{ClipWindow, SubtitleTrack};
use crate::domain::rules::{GateDecision, RejectReason, SegmentDurationGate};
use crate::error::ClipResult;
use crate::subtitles::timecodes::{count_timecodes, window_from_content};
use crate::subtitles::TextSanitizer;

/// What extraction would do with a subtitle file
#[derive(Debug, Clone, Serialize)]
pub struct SubtitleInspection {
    pub path: PathBuf,
    pub cue_count: usize,
    pub timecode_count: usize,
    pub window: Option<ClipWindow>,
    pub duration_ms: Option<u64>,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<RejectReason>,
}

/// Interactor for subtitle inspection use case
pub struct InspectInteractor {
    gate: SegmentDurationGate,
}

impl InspectInteractor {
    pub fn new(gate: SegmentDurationGate) -> Self {
        Self { gate }
    }

    /// Parse the file and run the duration gate without touching any video
    pub fn inspect(&self, subtitle_file: &Path) -> ClipResult<SubtitleInspection> {
        let content = std::fs::read(subtitle_file)?;
        let text = String::from_utf8(content.clone())
            .unwrap_or_else(|e| TextSanitizer::decode_legacy(e.as_bytes()));
        let track = SubtitleTrack::parse(&text);

        let window = window_from_content(&content).transpose()?;
        let (accepted, reject_reason) = match window.map(|w| self.gate.evaluate(&w)) {
            Some(GateDecision::Accept) => (true, None),
            Some(GateDecision::Reject(reason)) => (false, Some(reason)),
            None => (false, None),
        };

        info!(
            path = %subtitle_file.display(),
            cues = track.len(),
            accepted,
            "Subtitle file inspected"
        );

        Ok(SubtitleInspection {
            path: subtitle_file.to_path_buf(),
            cue_count: track.len(),
            timecode_count: count_timecodes(&content),
            window,
            duration_ms: window.map(|w| w.duration().as_millis() as u64),
            accepted,
            reject_reason,
        })
    }
}

impl SubtitleInspection {
    /// Human-readable multi-line summary
    pub fn summary(&self) -> String {
        let mut out = format!(
            "File: {}\nCues: {}\nTimecodes: {}\n",
            self.path.display(),
            self.cue_count,
            self.timecode_count
        );
        match &self.window {
            Some(window) => {
                out.push_str(&format!(
                    "Window: {} ({})\n",
                    window,
                    crate::utils::Utils::format_duration(window.duration())
                ));
            }
            None => out.push_str("Window: none\n"),
        }
        match (&self.reject_reason, self.accepted) {
            (_, true) => out.push_str("Verdict: accept\n"),
            (Some(reason), false) => out.push_str(&format!("Verdict: reject ({})\n", reason)),
            (None, false) => out.push_str("Verdict: reject (no timecodes found)\n"),
        }
        out
    }
}
