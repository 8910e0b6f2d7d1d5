//! Device profile definitions
//!
//! A profile pairs a panel variant with what a person wiring one up needs
//! to know: its geometry, default bus address and wiring quirks.

use led_matrix::hal::DEFAULT_ADDRESS;
use led_matrix::{Layout, MatrixConfig, Variant};
use serde::{Deserialize, Serialize};

/// Wiring note shown with a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WiringNote {
    /// Short label (e.g. "Packing")
    pub topic: String,
    pub detail: String,
}

/// Complete device profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Display name
    pub name: String,
    /// Short identifier, also the variant name
    pub id: String,
    pub description: String,
    /// Panel variant driven by this profile
    pub variant: Variant,
    /// Default 7-bit I²C address
    pub address: u8,
    /// Default overlay mode for worlds
    pub world_overlay: bool,
    pub notes: Vec<WiringNote>,
}

impl DeviceProfile {
    /// Create a profile with geometry defaults taken from the variant
    pub fn new(variant: Variant, name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: variant.name().to_string(),
            description: String::new(),
            variant,
            address: DEFAULT_ADDRESS,
            world_overlay: variant.layout().world_overlay,
            notes: Vec::new(),
        }
    }

    /// Add a wiring note
    pub fn add_note(&mut self, topic: &str, detail: &str) {
        self.notes.push(WiringNote {
            topic: topic.to_string(),
            detail: detail.to_string(),
        });
    }

    pub fn layout(&self) -> &'static Layout {
        self.variant.layout()
    }

    /// LEDs physically present on the panel
    pub fn led_count(&self) -> i32 {
        let layout = self.layout();
        layout.physical_width * layout.physical_height
    }

    /// Default settings for this panel
    pub fn default_config(&self) -> MatrixConfig {
        MatrixConfig {
            variant: self.variant,
            address: self.address,
            ..MatrixConfig::default()
        }
    }
}
