//! 15×8 row-wired panel profile

use super::profile::DeviceProfile;
use led_matrix::Variant;
use once_cell::sync::Lazy;

/// 15×8 panel, one LED-control register pair per row
pub static LEDS16X9_PROFILE: Lazy<DeviceProfile> = Lazy::new(|| {
    let mut profile = DeviceProfile::new(Variant::Leds16x9, "leds16x9:bit");
    profile.description = "15×8 LED matrix, row wired (16×9 addressable)".to_string();

    profile.add_note("Packing", "two bytes per row, bit 0 of the first byte is column 0");
    profile.add_note("Registers", "row y lives in LED-control registers 2y and 2y+1");
    profile.add_note("Hidden area", "column 15 and row 8 are addressable but not fitted");
    profile.add_note("Text", "glyph rows are clamped to 0-3 so a 5-row glyph stays on the panel");
    profile.add_note("World", "live pixels are overlaid on the world window by default");
    profile
});
