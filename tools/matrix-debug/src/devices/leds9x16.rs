//! 16×6 column-wired panel profile

use super::profile::DeviceProfile;
use led_matrix::Variant;
use once_cell::sync::Lazy;

/// 16×6 panel, one LED-control register per column
pub static LEDS9X16_PROFILE: Lazy<DeviceProfile> = Lazy::new(|| {
    let mut profile = DeviceProfile::new(Variant::Leds9x16, "leds9x16:bit");
    profile.description = "16×6 LED matrix, column wired (17×7 addressable)".to_string();

    profile.add_note("Packing", "one byte per column, bit 0 is row 0");
    profile.add_note(
        "Registers",
        "columns 0-8 go to even registers right to left, 9-16 to odd registers",
    );
    profile.add_note("Mirroring", "columns 0-8 are mounted mirrored, their bytes are sent bit reversed");
    profile.add_note("Hidden area", "column 16 and row 6 are addressable but not fitted");
    profile.add_note("Text", "blank glyph columns are dropped, so text runs narrower");
    profile.add_note("World", "the world window replaces live pixels by default");
    profile
});
