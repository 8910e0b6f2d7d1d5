//! Engine settings
//!
//! Every field has a default, so a settings file only needs the values it
//! changes.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::hal::bus::DEFAULT_ADDRESS;
use crate::layout::Variant;

/// Brightness written to every LED by `reset`
pub const DEFAULT_BRIGHTNESS: u8 = 200;
/// Highest blink frequency code the display-option register accepts
pub const MAX_BLINK_FREQUENCY: u8 = 7;

/// Settings for one matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Panel geometry
    pub variant: Variant,
    /// 7-bit I²C address
    pub address: u8,
    /// PWM level applied by `reset`
    pub brightness: u8,
    /// Blink frequency code (0-7) used by `enable_blink`
    pub blink_frequency: u8,
    /// Pause between scroll frames
    pub scroll_delay_ms: u32,
    /// Top row of scrolling text
    pub scroll_row: i32,
    /// Overlay mode for new worlds; unset uses the panel's default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_overlay: Option<bool>,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            address: DEFAULT_ADDRESS,
            brightness: DEFAULT_BRIGHTNESS,
            blink_frequency: 0,
            scroll_delay_ms: 50,
            scroll_row: 1,
            world_overlay: None,
        }
    }
}

impl MatrixConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 0x00-0x07 and 0x78-0x7F are reserved
        if !(0x08..=0x77).contains(&self.address) {
            return Err(ConfigError::InvalidAddress(self.address));
        }
        if self.blink_frequency > MAX_BLINK_FREQUENCY {
            return Err(ConfigError::InvalidBlinkFrequency(self.blink_frequency));
        }
        Ok(())
    }
}

/// Settings rejected by [`MatrixConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Not a usable 7-bit address
    InvalidAddress(u8),
    /// Blink frequency code above 7
    InvalidBlinkFrequency(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAddress(a) => write!(f, "invalid I2C address 0x{:02X}", a),
            ConfigError::InvalidBlinkFrequency(n) => {
                write!(f, "blink frequency {} out of range (0-{})", n, MAX_BLINK_FREQUENCY)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = MatrixConfig::default();
        assert_eq!(config.variant, Variant::Leds16x9);
        assert_eq!(config.address, 0x74);
        assert_eq!(config.brightness, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: MatrixConfig = toml::from_str("variant = \"leds9x16\"\nscroll_delay_ms = 80\n").unwrap();
        assert_eq!(config.variant, Variant::Leds9x16);
        assert_eq!(config.scroll_delay_ms, 80);
        assert_eq!(config.scroll_row, 1);
        assert_eq!(config.world_overlay, None);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = MatrixConfig {
            variant: Variant::Leds9x16,
            world_overlay: Some(true),
            blink_frequency: 3,
            ..MatrixConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("leds9x16"));
        let back: MatrixConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_variant_rejected() {
        assert!(toml::from_str::<MatrixConfig>("variant = \"leds8x8\"").is_err());
    }

    #[test]
    fn test_validation_errors() {
        let config = MatrixConfig {
            blink_frequency: 8,
            ..MatrixConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidBlinkFrequency(8)));

        let config = MatrixConfig {
            address: 0x80,
            ..MatrixConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidAddress(0x80)));
        assert_eq!(
            std::format!("{}", ConfigError::InvalidAddress(0x80)),
            "invalid I2C address 0x80"
        );
    }
}
