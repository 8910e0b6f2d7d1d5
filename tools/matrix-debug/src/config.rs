//! Settings files
//!
//! Settings live in a TOML file holding a [`MatrixConfig`]; missing keys
//! take their defaults.

use chrono::Local;
use led_matrix::{ConfigError, MatrixConfig};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::devices::DeviceProfile;

/// Problems reading or writing a settings file
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("invalid settings in {path}: {reason}")]
    Invalid { path: PathBuf, reason: ConfigError },
}

/// Load and validate a settings file
pub fn load(path: &Path) -> Result<MatrixConfig, ConfigFileError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: MatrixConfig = toml::from_str(&text).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(|reason| ConfigFileError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;
    log::debug!("loaded settings from {}", path.display());
    Ok(config)
}

/// Write settings as plain TOML
pub fn save(config: &MatrixConfig, path: &Path) -> Result<(), ConfigFileError> {
    let text = toml::to_string_pretty(config)?;
    fs::write(path, text).map_err(|source| ConfigFileError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Commented default settings for a panel
pub fn generate(profile: &DeviceProfile) -> Result<String, ConfigFileError> {
    let config = profile.default_config();
    let body = toml::to_string_pretty(&config)?;

    let mut out = String::new();
    out.push_str(&format!("# {} settings\n", profile.name));
    out.push_str(&format!(
        "# Generated by matrix-debug on {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str("#\n");
    out.push_str("# variant          leds16x9 (15x8, rows) or leds9x16 (16x6, columns)\n");
    out.push_str("# address          7-bit I2C address of the controller\n");
    out.push_str("# brightness       PWM level written to every LED on reset\n");
    out.push_str("# blink_frequency  0-7, blink period code\n");
    out.push_str("# scroll_delay_ms  pause between scroll frames\n");
    out.push_str("# scroll_row       top row of scrolling text\n");
    out.push_str(&format!(
        "# world_overlay    overlay live pixels on worlds (panel default: {})\n\n",
        profile.world_overlay
    ));
    out.push_str(&body);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::LEDS9X16_PROFILE;
    use led_matrix::Variant;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.toml");
        let config = MatrixConfig {
            variant: Variant::Leds9x16,
            brightness: 64,
            world_overlay: Some(true),
            ..MatrixConfig::default()
        };

        save(&config, &path).unwrap();
        assert_eq!(load(&path).unwrap(), config);
    }

    #[test]
    fn test_generated_file_loads() {
        let text = generate(&LEDS9X16_PROFILE).unwrap();
        assert!(text.starts_with("# leds9x16:bit settings"));

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        let config = load(file.path()).unwrap();
        assert_eq!(config.variant, Variant::Leds9x16);
        assert_eq!(config.world_overlay, None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "blink_frequency = 12").unwrap();
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigFileError::Invalid { .. }));
        assert!(err.to_string().contains("blink frequency 12"));
    }

    #[test]
    fn test_malformed_file_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "variant = 3").unwrap();
        assert!(matches!(load(file.path()), Err(ConfigFileError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigFileError::Read { .. }));
    }
}
