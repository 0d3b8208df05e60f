//! Rebasing of subtitle timelines onto a trimmed clip

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::domain::model::Timecode;
use crate::error::{ClipError, ClipResult};
use crate::subtitles::timecodes::{find_timecodes, parse_token};

/// Subtitle bytes whose timecodes start at zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSubtitles {
    pub content: Vec<u8>,
    /// Offset subtracted from every timecode, `None` if the input had none
    pub offset: Option<Timecode>,
}

/// Shifts every timecode so the first one in the file becomes `00:00:00,000`
pub struct SubtitleTimingNormalizer;

impl SubtitleTimingNormalizer {
    /// Normalize a subtitle file on disk
    pub fn normalize_file(path: &Path) -> ClipResult<NormalizedSubtitles> {
        let content = std::fs::read(path)?;
        let normalized = Self::normalize(&content)?;
        debug!(
            path = %path.display(),
            offset = ?normalized.offset.map(|o| o.format()),
            "Subtitle timings normalized"
        );
        Ok(normalized)
    }

    /// Rewrite every timecode token, leaving all other bytes untouched
    pub fn normalize(content: &[u8]) -> ClipResult<NormalizedSubtitles> {
        let first = match find_timecodes(content).next() {
            Some(token) => parse_token(token.as_bytes())?,
            None => {
                return Ok(NormalizedSubtitles {
                    content: content.to_vec(),
                    offset: None,
                })
            }
        };
        let delta = first.as_duration();

        let mut rebased = Vec::with_capacity(content.len());
        let mut cursor = 0;
        for token in find_timecodes(content) {
            rebased.extend_from_slice(&content[cursor..token.start()]);
            let shifted = Self::rebase(parse_token(token.as_bytes())?, delta)?;
            rebased.extend_from_slice(shifted.format().as_bytes());
            cursor = token.end();
        }
        rebased.extend_from_slice(&content[cursor..]);

        Ok(NormalizedSubtitles {
            content: rebased,
            offset: Some(first),
        })
    }

    // Out-of-order timecodes surface as malformed input instead of wrapping
    fn rebase(timecode: Timecode, delta: Duration) -> ClipResult<Timecode> {
        timecode.shift(delta).map_err(|e| match e {
            ClipError::NegativeTimecode { timecode, delta } => ClipError::MalformedTimecode {
                timecode,
                reason: format!("earlier than the first timecode {}", delta),
            },
            other => other,
        })
    }
}
