//! Output naming and input discovery

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ClipError, ClipResult};

/// Suffix appended to the subtitle base name for an extracted clip
pub const TRIMMED_SUFFIX: &str = "_trimmed";

/// Suffix appended to the clip base name for a burned clip
pub const SUBTITLED_SUFFIX: &str = "_subtitled";

/// File name without directory and final extension
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// `<subtitle-basename>_trimmed.<ext>` inside `output_dir`
pub fn clip_output_path(subtitle_file: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    output_dir.join(format!("{}{}.{}", base_name(subtitle_file), TRIMMED_SUFFIX, extension))
}

/// `<clip-basename>_subtitled.<ext>` inside `output_dir`
pub fn subtitled_output_path(clip: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    output_dir.join(format!("{}{}.{}", base_name(clip), SUBTITLED_SUFFIX, extension))
}

/// Base name of the subtitle file a trimmed clip was cut from, if the clip
/// follows the `_trimmed` naming
pub fn subtitle_base_for_clip(clip: &Path) -> Option<String> {
    base_name(clip)
        .strip_suffix(TRIMMED_SUFFIX)
        .filter(|base| !base.is_empty())
        .map(str::to_string)
}

/// Regular files directly inside `dir` whose extension matches
/// (case-insensitive), sorted by file name
pub fn discover_files(dir: &Path, extension: &str) -> ClipResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ClipError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Not a directory: {}", dir.display()),
        )));
    }

    let wanted = extension.trim_start_matches('.').to_lowercase();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            ClipError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase() == wanted)
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
