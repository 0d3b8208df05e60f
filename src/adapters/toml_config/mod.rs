// TOML config adapter - Pipeline configuration stored in TOML files

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::model::CropMode;
use crate::domain::rules::{DurationPolicy, DEFAULT_MAX_CLIP, DEFAULT_MIN_CLIP};
use crate::error::{ClipError, ClipResult};

/// Complete pipeline configuration, built once and passed to the interactor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub duration: DurationSettings,
    pub encoder: EncoderSettings,
    pub readiness: ReadinessSettings,
    pub output: OutputSettings,
}

/// Accepted clip length bounds in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationSettings {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl Default for DurationSettings {
    fn default() -> Self {
        Self {
            min_secs: DEFAULT_MIN_CLIP.as_secs_f64(),
            max_secs: DEFAULT_MAX_CLIP.as_secs_f64(),
        }
    }
}

impl DurationSettings {
    pub fn policy(&self) -> ClipResult<DurationPolicy> {
        DurationPolicy::new(
            Self::bound("min_secs", self.min_secs)?,
            Self::bound("max_secs", self.max_secs)?,
        )
    }

    fn bound(name: &str, value: f64) -> ClipResult<Duration> {
        Duration::try_from_secs_f64(value).map_err(|e| ClipError::Config {
            message: format!(
                "duration.{} must be a non-negative number of seconds, got {} ({})",
                name, value, e
            ),
        })
    }
}

/// External tool and codec settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderSettings {
    pub ffmpeg_bin: String,
    pub ffprobe_bin: String,
    pub video_codec: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
    /// Output container extension
    pub container: String,
    /// ffmpeg `-v` level
    pub log_level: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_string(),
            ffprobe_bin: "ffprobe".to_string(),
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate: "192k".to_string(),
            container: "mp4".to_string(),
            log_level: "error".to_string(),
        }
    }
}

/// Polling behaviour of the readiness coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessSettings {
    pub poll_interval_ms: u64,
    /// Wait for subtitle files handed over by upstream producers
    pub input_timeout_secs: u64,
    /// Wait for a freshly trimmed clip before burning
    pub trimmed_timeout_secs: u64,
}

impl Default for ReadinessSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1_000,
            input_timeout_secs: 30,
            trimmed_timeout_secs: 60,
        }
    }
}

impl ReadinessSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn input_timeout(&self) -> Duration {
        Duration::from_secs(self.input_timeout_secs)
    }

    pub fn trimmed_timeout(&self) -> Duration {
        Duration::from_secs(self.trimmed_timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub crop: CropMode,
}

impl PipelineConfig {
    /// Validate configuration
    pub fn validate(&self) -> ClipResult<()> {
        self.duration.policy()?;

        if self.readiness.poll_interval_ms == 0 {
            return Err(ClipError::Config {
                message: "readiness.poll_interval_ms must be greater than zero".to_string(),
            });
        }

        let container = self.encoder.container.trim();
        if container.is_empty() || container.contains(['/', '\\', '.']) {
            return Err(ClipError::Config {
                message: format!("encoder.container must be a bare extension, got '{}'", container),
            });
        }

        for (name, value) in [
            ("ffmpeg_bin", &self.encoder.ffmpeg_bin),
            ("ffprobe_bin", &self.encoder.ffprobe_bin),
            ("video_codec", &self.encoder.video_codec),
            ("audio_codec", &self.encoder.audio_codec),
        ] {
            if value.trim().is_empty() {
                return Err(ClipError::Config {
                    message: format!("encoder.{} cannot be empty", name),
                });
            }
        }

        Ok(())
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Default config file looked up in the working directory
    pub const DEFAULT_FILE_NAME: &'static str = "clipsub.toml";

    /// Deserialize config from TOML string; missing keys keep their defaults
    pub fn from_toml_str(toml_content: &str) -> ClipResult<PipelineConfig> {
        toml::from_str(toml_content).map_err(|e| ClipError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ClipResult<PipelineConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| ClipError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }
}
