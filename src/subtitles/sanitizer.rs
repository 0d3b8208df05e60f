//! Subtitle text encoding normalization

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ClipError, ClipResult};

/// Re-encodes subtitle text from ISO-8859-1 to UTF-8.
///
/// Upstream producers disagree on encodings, so the same source/target pair is
/// always applied. This is not an encoding detector.
pub struct TextSanitizer;

impl TextSanitizer {
    /// Decode ISO-8859-1 bytes; every byte maps to the code point of the same value
    pub fn decode_legacy(content: &[u8]) -> String {
        content.iter().map(|&byte| char::from(byte)).collect()
    }

    /// Read `source` as ISO-8859-1 and write it to `destination` as UTF-8
    pub fn to_canonical_encoding(source: &Path, destination: &Path) -> ClipResult<PathBuf> {
        let content = std::fs::read(source).map_err(|e| ClipError::EncodingConversionFailure {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::write_canonical(&content, destination)?;
        debug!(
            source = %source.display(),
            destination = %destination.display(),
            "Subtitle encoding converted"
        );
        Ok(destination.to_path_buf())
    }

    /// Write legacy-encoded bytes to `destination` as UTF-8
    pub fn write_canonical(content: &[u8], destination: &Path) -> ClipResult<()> {
        std::fs::write(destination, Self::decode_legacy(content)).map_err(|e| {
            ClipError::EncodingConversionFailure {
                path: destination.to_path_buf(),
                message: e.to_string(),
            }
        })
    }
}
