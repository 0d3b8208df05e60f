//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info};

use crate::adapters::toml_config::{PipelineConfig, TomlConfigAdapter};
use crate::domain::model::CropMode;
use crate::error::{ClipError, ClipResult};

/// Values given on the command line; `None` leaves lower layers in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub crop: Option<CropMode>,
    pub min_clip_secs: Option<f64>,
    pub max_clip_secs: Option<f64>,
}

/// Environment variables understood by [`apply_environment_overrides`]
pub const ENV_VARS: &[&str] = &[
    "CLIPSUB_MIN_SECS",
    "CLIPSUB_MAX_SECS",
    "CLIPSUB_CROP",
    "CLIPSUB_FFMPEG_BIN",
    "CLIPSUB_FFPROBE_BIN",
    "CLIPSUB_CONTAINER",
    "CLIPSUB_POLL_INTERVAL_MS",
];

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> ClipResult<PipelineConfig> {
    let mut config = load_config_file(config_path)?;

    let env_overrides = apply_environment_overrides(&mut config, |key| std::env::var(key).ok())?;
    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }

    let cli_overrides = apply_cli_overrides(&mut config, overrides);
    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }

    config.validate()?;
    Ok(config)
}

/// Explicit path must exist; otherwise `clipsub.toml` in the working
/// directory is used when present
fn load_config_file(config_path: Option<&Path>) -> ClipResult<PipelineConfig> {
    let candidate = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(TomlConfigAdapter::DEFAULT_FILE_NAME);
            default.is_file().then_some(default)
        }
    };

    match candidate {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            TomlConfigAdapter::load(&path)
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(PipelineConfig::default())
        }
    }
}

/// Apply `CLIPSUB_*` variables read through `lookup`, returning how many were set
pub fn apply_environment_overrides(
    config: &mut PipelineConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ClipResult<usize> {
    let mut applied = 0;

    for key in ENV_VARS {
        let Some(value) = lookup(key) else {
            continue;
        };
        let value = value.trim().to_string();
        debug!("Found environment override: {} = {}", key, value);

        match *key {
            "CLIPSUB_MIN_SECS" => config.duration.min_secs = parse_env(key, &value)?,
            "CLIPSUB_MAX_SECS" => config.duration.max_secs = parse_env(key, &value)?,
            "CLIPSUB_CROP" => config.output.crop = CropMode::parse(&value)?,
            "CLIPSUB_FFMPEG_BIN" => config.encoder.ffmpeg_bin = value,
            "CLIPSUB_FFPROBE_BIN" => config.encoder.ffprobe_bin = value,
            "CLIPSUB_CONTAINER" => config.encoder.container = value,
            "CLIPSUB_POLL_INTERVAL_MS" => config.readiness.poll_interval_ms = parse_env(key, &value)?,
            _ => continue,
        }
        applied += 1;
    }

    Ok(applied)
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> ClipResult<T>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ClipError::Config {
        message: format!("Invalid value for {}: '{}' ({})", key, value, e),
    })
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut PipelineConfig, overrides: &ConfigOverrides) -> usize {
    let mut applied = 0;

    if let Some(crop) = overrides.crop {
        debug!("CLI override: crop = {}", crop);
        config.output.crop = crop;
        applied += 1;
    }
    if let Some(min) = overrides.min_clip_secs {
        debug!("CLI override: min_secs = {}", min);
        config.duration.min_secs = min;
        applied += 1;
    }
    if let Some(max) = overrides.max_clip_secs {
        debug!("CLI override: max_secs = {}", max);
        config.duration.max_secs = max;
        applied += 1;
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_environment_overrides() {
        let mut config = PipelineConfig::default();
        let applied = apply_environment_overrides(
            &mut config,
            env(&[
                ("CLIPSUB_MAX_SECS", "90"),
                ("CLIPSUB_CROP", "square"),
                ("CLIPSUB_CONTAINER", "mkv"),
                ("UNRELATED", "x"),
            ]),
        )
        .unwrap();

        assert_eq!(applied, 3);
        assert_eq!(config.duration.max_secs, 90.0);
        assert_eq!(config.output.crop, CropMode::Square);
        assert_eq!(config.encoder.container, "mkv");
    }

    #[test]
    fn test_invalid_environment_value() {
        let mut config = PipelineConfig::default();
        let result = apply_environment_overrides(&mut config, env(&[("CLIPSUB_MIN_SECS", "soon")]));
        assert!(matches!(result, Err(ClipError::Config { .. })));
    }

    #[test]
    fn test_oversized_environment_bound_is_config_error() {
        let mut config = PipelineConfig::default();
        apply_environment_overrides(&mut config, env(&[("CLIPSUB_MAX_SECS", "1e20")])).unwrap();
        assert!(matches!(config.validate(), Err(ClipError::Config { .. })));
    }

    #[test]
    fn test_cli_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clipsub.toml");
        std::fs::write(&path, "[duration]\nmin_secs = 10.0\nmax_secs = 60.0\n").unwrap();

        let overrides = ConfigOverrides {
            max_clip_secs: Some(120.0),
            crop: Some(CropMode::Square),
            ..ConfigOverrides::default()
        };
        let config = initialize_configuration(Some(&path), &overrides).unwrap();

        assert_eq!(config.duration.min_secs, 10.0);
        assert_eq!(config.duration.max_secs, 120.0);
        assert_eq!(config.output.crop, CropMode::Square);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = initialize_configuration(
            Some(Path::new("/definitely/not/clipsub.toml")),
            &ConfigOverrides::default(),
        );
        assert!(matches!(result, Err(ClipError::Config { .. })));
    }

    #[test]
    fn test_overrides_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clipsub.toml");
        std::fs::write(&path, "").unwrap();

        let overrides = ConfigOverrides {
            min_clip_secs: Some(200.0),
            ..ConfigOverrides::default()
        };
        assert!(initialize_configuration(Some(&path), &overrides).is_err());
    }
}
