//! SubRip cue parsing

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::domain::model::{SubtitleCue, SubtitleTrack, Timecode};

static CUE_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{2,}:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d{2,}:\d{2}:\d{2}[,.]\d{3})")
        .expect("cue timing pattern is valid")
});

impl SubtitleTrack {
    /// Parse SRT text into cues, keeping file order.
    ///
    /// Blocks without a usable timing line, with an unparseable timecode, or
    /// ending before they start are skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut cues = Vec::new();
        let mut block: Vec<&str> = Vec::new();

        for line in text.lines().chain(std::iter::once("")) {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                if !block.is_empty() {
                    if let Some(cue) = parse_block(&block, cues.len() as u32 + 1) {
                        cues.push(cue);
                    }
                    block.clear();
                }
            } else {
                block.push(line);
            }
        }

        Self::new(cues)
    }
}

fn parse_block(block: &[&str], fallback_index: u32) -> Option<SubtitleCue> {
    let Some(timing_at) = block.iter().position(|line| CUE_TIMING.is_match(line)) else {
        warn!(block = ?block.first(), "Skipping subtitle block without timing line");
        return None;
    };

    let captures = CUE_TIMING.captures(block[timing_at])?;
    let (start, end) = match (Timecode::parse(&captures[1]), Timecode::parse(&captures[2])) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(e), _) | (_, Err(e)) => {
            warn!(timing = block[timing_at], error = %e, "Skipping subtitle block with bad timecode");
            return None;
        }
    };
    if end < start {
        warn!(timing = block[timing_at], "Skipping subtitle block that ends before it starts");
        return None;
    }

    let index = timing_at
        .checked_sub(1)
        .and_then(|i| block[i].trim().parse::<u32>().ok())
        .unwrap_or(fallback_index);

    Some(SubtitleCue {
        index,
        start,
        end,
        lines: block[timing_at + 1..].iter().map(|line| line.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_track() {
        let track = SubtitleTrack::parse(
            "1\n00:00:01,000 --> 00:00:02,500\nHello\nthere\n\n2\n00:00:03,000 --> 00:00:04,000\nBye\n",
        );
        assert_eq!(track.len(), 2);
        assert_eq!(track.cues[0].index, 1);
        assert_eq!(track.cues[0].lines, vec!["Hello", "there"]);
        assert_eq!(track.cues[0].end.format(), "00:00:02,500");
        assert_eq!(track.cues[1].text(), "Bye");
    }

    #[test]
    fn test_parse_crlf_and_bom() {
        let track = SubtitleTrack::parse("\u{feff}7\r\n00:00:01,000 --> 00:00:02,000\r\nHi\r\n\r\n");
        assert_eq!(track.len(), 1);
        assert_eq!(track.cues[0].index, 7);
        assert_eq!(track.cues[0].lines, vec!["Hi"]);
    }

    #[test]
    fn test_parse_keeps_file_order() {
        let track = SubtitleTrack::parse(
            "2\n00:00:05,000 --> 00:00:06,000\nB\n\n1\n00:00:01,000 --> 00:00:02,000\nA\n",
        );
        let indices: Vec<u32> = track.cues.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![2, 1]);
    }

    #[test]
    fn test_parse_skips_malformed_blocks() {
        let track = SubtitleTrack::parse(
            "1\nnot a timing line\nA\n\n2\n00:00:05,000 --> 00:00:04,000\nB\n\n3\n00:00:07,000 --> 00:00:08,000\nC\n",
        );
        assert_eq!(track.len(), 1);
        assert_eq!(track.cues[0].index, 3);
    }

    #[test]
    fn test_parse_skips_overflowing_timecode() {
        let track = SubtitleTrack::parse(
            "1\n99999999999999999:00:00,000 --> 99999999999999999:00:01,000\nHuge\n\n2\n00:00:07,000 --> 00:00:08,000\nC\n",
        );
        assert_eq!(track.len(), 1);
        assert_eq!(track.cues[0].index, 2);
    }

    #[test]
    fn test_parse_missing_index_uses_position() {
        let track = SubtitleTrack::parse("00:00:01,000 --> 00:00:02,000\nNo number\n");
        assert_eq!(track.cues[0].index, 1);
    }

    #[test]
    fn test_parse_empty() {
        assert!(SubtitleTrack::parse("").is_empty());
    }
}
