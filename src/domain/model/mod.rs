// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ClipError, ClipResult};

static TIMECODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})[,.](\d{3})$").expect("timecode pattern is valid")
});

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Subtitle timecode - a non-negative offset with millisecond resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Timecode {
    millis: u64,
}

impl Timecode {
    /// The zero point of a clip timeline
    pub const ZERO: Timecode = Timecode { millis: 0 };

    /// Create a timecode from a millisecond offset
    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Create a timecode from hours, minutes, seconds, milliseconds
    pub fn from_components(hours: u64, minutes: u64, seconds: u64, millis: u64) -> ClipResult<Self> {
        if minutes > 59 || seconds > 59 || millis > 999 {
            return Err(ClipError::MalformedTimecode {
                timecode: format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis),
                reason: "field out of range".to_string(),
            });
        }
        hours
            .checked_mul(MILLIS_PER_HOUR)
            .and_then(|total| total.checked_add(minutes * MILLIS_PER_MINUTE))
            .and_then(|total| total.checked_add(seconds * MILLIS_PER_SECOND + millis))
            .map(Self::from_millis)
            .ok_or_else(|| ClipError::MalformedTimecode {
                timecode: format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis),
                reason: "out of range".to_string(),
            })
    }

    /// Parse `HH:MM:SS,mmm` or `HH:MM:SS.mmm`
    pub fn parse(text: &str) -> ClipResult<Self> {
        let trimmed = text.trim();
        let captures = TIMECODE_PATTERN
            .captures(trimmed)
            .ok_or_else(|| ClipError::MalformedTimecode {
                timecode: trimmed.to_string(),
                reason: "expected HH:MM:SS,mmm".to_string(),
            })?;

        let field = |index: usize| -> ClipResult<u64> {
            captures[index].parse::<u64>().map_err(|e| ClipError::MalformedTimecode {
                timecode: trimmed.to_string(),
                reason: e.to_string(),
            })
        };

        let (hours, minutes, seconds, millis) = (field(1)?, field(2)?, field(3)?, field(4)?);
        if minutes > 59 {
            return Err(ClipError::MalformedTimecode {
                timecode: trimmed.to_string(),
                reason: "minutes must be less than 60".to_string(),
            });
        }
        if seconds > 59 {
            return Err(ClipError::MalformedTimecode {
                timecode: trimmed.to_string(),
                reason: "seconds must be less than 60".to_string(),
            });
        }

        Self::from_components(hours, minutes, seconds, millis)
    }

    /// Format as `HH:MM:SS,mmm`
    pub fn format(&self) -> String {
        let hours = self.millis / MILLIS_PER_HOUR;
        let minutes = (self.millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
        let seconds = (self.millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
        let millis = self.millis % MILLIS_PER_SECOND;
        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Move the timecode back by `delta`
    pub fn shift(&self, delta: Duration) -> ClipResult<Self> {
        let delta_millis = u64::try_from(delta.as_millis()).ok();
        delta_millis
            .and_then(|d| self.millis.checked_sub(d))
            .map(Self::from_millis)
            .ok_or_else(|| ClipError::NegativeTimecode {
                timecode: self.format(),
                delta: delta_millis
                    .map(|d| Timecode::from_millis(d).format())
                    .unwrap_or_else(|| format!("{:?}", delta)),
            })
    }

    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Offset from the zero point
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for Timecode {
    type Err = ClipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Timecode> for String {
    fn from(timecode: Timecode) -> Self {
        timecode.format()
    }
}

impl TryFrom<String> for Timecode {
    type Error = ClipError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Candidate clip bounds taken from a subtitle file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipWindow {
    pub start: Timecode,
    pub end: Timecode,
}

impl ClipWindow {
    /// Create a window, rejecting one that ends before it starts
    pub fn new(start: Timecode, end: Timecode) -> ClipResult<Self> {
        if end < start {
            return Err(ClipError::MalformedTimecode {
                timecode: end.format(),
                reason: format!("window ends before its start {}", start),
            });
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> Duration {
        self.end.as_duration() - self.start.as_duration()
    }
}

impl fmt::Display for ClipWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --> {} ({:.3}s)",
            self.start,
            self.end,
            self.duration().as_secs_f64()
        )
    }
}

/// Aspect ratio handling for extracted clips
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    /// Keep the source frame as-is
    #[default]
    Original,
    /// Centered 1:1 crop
    Square,
}

impl CropMode {
    /// Parse crop mode from string
    pub fn parse(mode_str: &str) -> ClipResult<Self> {
        match mode_str.trim().to_lowercase().as_str() {
            "original" | "1" => Ok(CropMode::Original),
            "square" | "1:1" | "2" => Ok(CropMode::Square),
            other => Err(ClipError::Config {
                message: format!("Invalid crop mode: {}. Valid modes: original, square", other),
            }),
        }
    }
}

impl FromStr for CropMode {
    type Err = ClipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropMode::Original => f.write_str("original"),
            CropMode::Square => f.write_str("square"),
        }
    }
}

/// Pixel size of the primary video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Square crop region inside the source frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRectangle {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

impl CropRectangle {
    /// ffmpeg `crop` filter expression
    pub fn to_filter(&self) -> String {
        format!("crop={}:{}:{}:{}", self.side, self.side, self.x, self.y)
    }
}

/// One timed subtitle entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleCue {
    pub index: u32,
    pub start: Timecode,
    pub end: Timecode,
    pub lines: Vec<String>,
}

impl SubtitleCue {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Subtitle cues in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    pub cues: Vec<SubtitleCue>,
}

impl SubtitleTrack {
    pub fn new(cues: Vec<SubtitleCue>) -> Self {
        Self { cues }
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }
}

/// Trimmed (and possibly cropped) clip written by the extraction engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipArtifact {
    pub path: PathBuf,
    pub window: ClipWindow,
    pub crop: Option<CropRectangle>,
}

/// Subtitle-burned clip, terminal output of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalArtifact {
    pub path: PathBuf,
    pub source_clip: PathBuf,
    /// Amount the subtitle timeline was moved back before burning
    pub subtitle_offset: Option<Timecode>,
}

#[cfg(test)]
mod tests;
