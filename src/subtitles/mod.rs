//! Subtitle handling: timestamp grammar, SRT parsing, rebasing and encoding cleanup

pub mod normalizer;
pub mod sanitizer;
pub mod srt;
pub mod timecodes;

pub use normalizer::{NormalizedSubtitles, SubtitleTimingNormalizer};
pub use sanitizer::TextSanitizer;
