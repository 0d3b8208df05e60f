//! Common utilities and helpers

pub mod path;
pub mod readiness;

pub use path::{clip_output_path, discover_files, subtitled_output_path};
pub use readiness::{FileReadinessCoordinator, Readiness};

use std::time::Duration;

/// Utility functions for clipsub
pub struct Utils;

impl Utils {
    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        let milliseconds = duration.subsec_millis();

        if hours > 0 {
            format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(Utils::format_duration(Duration::from_millis(70_250)), "01:10.250");
        assert_eq!(Utils::format_duration(Duration::from_secs(3_725)), "01:02:05.000");
    }
}
