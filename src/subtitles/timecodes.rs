//! SRT timestamp grammar and token scanning
//!
//! Scanning works on raw bytes: subtitle files arrive in whatever encoding the
//! producer used, and timecodes are plain ASCII in all of them.

use once_cell::sync::Lazy;
use regex::bytes::{Match, Regex};

use crate::domain::model::{ClipWindow, Timecode};
use crate::error::{ClipError, ClipResult};

static TIMECODE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}:\d{2}:\d{2},\d{3}").expect("timecode token pattern is valid"));

/// Every timecode token in `content`, left to right
pub fn find_timecodes(content: &[u8]) -> impl Iterator<Item = Match<'_>> {
    TIMECODE_TOKEN.find_iter(content)
}

/// Number of timecode tokens in `content`
pub fn count_timecodes(content: &[u8]) -> usize {
    find_timecodes(content).count()
}

/// Parse one scanned token
pub fn parse_token(token: &[u8]) -> ClipResult<Timecode> {
    let text = std::str::from_utf8(token).map_err(|e| ClipError::MalformedTimecode {
        timecode: String::from_utf8_lossy(token).into_owned(),
        reason: e.to_string(),
    })?;
    Timecode::parse(text)
}

/// Window from the first and last timecode token, `None` when there are none
pub fn window_from_content(content: &[u8]) -> Option<ClipResult<ClipWindow>> {
    let first = TIMECODE_TOKEN.find(content)?;
    let last = find_timecodes(content).last().unwrap_or(first);

    Some(
        parse_token(first.as_bytes())
            .and_then(|start| parse_token(last.as_bytes()).and_then(|end| ClipWindow::new(start, end))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SAMPLE: &str = "1\n00:00:10,000 --> 00:00:12,500\nHello\n\n2\n00:01:15,000 --> 00:01:20,000\nWorld\n";

    #[test]
    fn test_find_timecodes_in_order() {
        let tokens: Vec<&[u8]> = find_timecodes(SAMPLE.as_bytes()).map(|m| m.as_bytes()).collect();
        assert_eq!(
            tokens,
            vec![
                b"00:00:10,000".as_slice(),
                b"00:00:12,500".as_slice(),
                b"00:01:15,000".as_slice(),
                b"00:01:20,000".as_slice()
            ]
        );
    }

    #[test]
    fn test_window_from_first_and_last_token() {
        let window = window_from_content(SAMPLE.as_bytes()).unwrap().unwrap();
        assert_eq!(window.duration(), Duration::from_secs(70));
    }

    #[test]
    fn test_window_absent_without_tokens() {
        assert!(window_from_content(b"1\nno timing here\n").is_none());
        assert!(window_from_content(b"").is_none());
    }

    #[test]
    fn test_dot_separated_timecodes_are_not_srt_tokens() {
        assert_eq!(count_timecodes(b"00:00:01.000 --> 00:00:02.000"), 0);
    }

    #[test]
    fn test_window_with_out_of_range_token() {
        let result = window_from_content(b"00:00:10,000 --> 00:61:00,000").unwrap();
        assert!(matches!(result, Err(ClipError::MalformedTimecode { .. })));
    }

    #[test]
    fn test_scanning_tolerates_latin1_bytes() {
        let content = b"1\n00:00:01,000 --> 00:00:40,000\nCaf\xe9\n";
        assert_eq!(count_timecodes(content), 2);
    }
}
