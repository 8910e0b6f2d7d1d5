//! Device profiles for the supported panels
//!
//! One built-in profile per panel variant, reachable under its variant
//! name and a few aliases.

pub mod leds16x9;
pub mod leds9x16;
pub mod profile;

pub use leds16x9::LEDS16X9_PROFILE;
pub use leds9x16::LEDS9X16_PROFILE;
pub use profile::DeviceProfile;

use led_matrix::Variant;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Registry of built-in device profiles
pub static DEVICE_PROFILES: Lazy<HashMap<&'static str, &'static DeviceProfile>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("leds16x9", &*LEDS16X9_PROFILE);
    m.insert("16x9", &*LEDS16X9_PROFILE);
    m.insert("15x8", &*LEDS16X9_PROFILE);
    m.insert("rows", &*LEDS16X9_PROFILE);
    m.insert("leds9x16", &*LEDS9X16_PROFILE);
    m.insert("9x16", &*LEDS9X16_PROFILE);
    m.insert("16x6", &*LEDS9X16_PROFILE);
    m.insert("columns", &*LEDS9X16_PROFILE);
    m
});

/// Get a device profile by name or alias
pub fn get_profile(name: &str) -> Option<&'static DeviceProfile> {
    DEVICE_PROFILES.get(name.to_lowercase().as_str()).copied()
}

/// The built-in profile for a variant
pub fn profile_for(variant: Variant) -> &'static DeviceProfile {
    match variant {
        Variant::Leds16x9 => &LEDS16X9_PROFILE,
        Variant::Leds9x16 => &LEDS9X16_PROFILE,
    }
}

/// Get profile names only (deduplicated)
pub fn profile_names() -> Vec<&'static str> {
    Variant::ALL.iter().map(|v| v.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(get_profile("16X9").map(|p| p.variant), Some(Variant::Leds16x9));
        assert_eq!(get_profile("columns").map(|p| p.variant), Some(Variant::Leds9x16));
        assert!(get_profile("leds8x8").is_none());
    }

    #[test]
    fn test_every_name_has_a_profile() {
        for name in profile_names() {
            let profile = get_profile(name).unwrap();
            assert_eq!(profile.id, name);
            assert_eq!(profile_for(profile.variant).id, name);
        }
    }
}
