//! Panel geometry and wiring
//!
//! A [`Layout`] is the single value that parametrises the engine for one
//! panel variant. It fixes the addressable and physical dimensions, the way
//! pixels are packed into the 18-byte plane, and how plane bytes map onto
//! the controller's LED-control registers.
//!
//! ```text
//!  leds16x9  (row packed)            leds9x16  (column packed)
//!  byte 2y   : x 0..7  of row y      byte x : rows 0..6 of column x
//!  byte 2y+1 : x 8..15 of row y      register i <- column COLUMN_ORDER[i]
//!  register i <- byte i              columns 0..=8 bit reversed
//! ```

pub mod tables;

use serde::{Deserialize, Serialize};

use tables::{COLUMN_MAP, COLUMN_ORDER, FILL, IDENTITY, REVERSE7};

/// Bytes in a pixel or blink plane
pub const PLANE_BYTES: usize = 18;

/// Supported panel variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    /// 15×8 LEDs, 16×9 addressable, row packed
    #[default]
    #[serde(rename = "leds16x9")]
    Leds16x9,
    /// 16×6 LEDs, 17×7 addressable, column packed
    #[serde(rename = "leds9x16")]
    Leds9x16,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Leds16x9, Variant::Leds9x16];

    pub fn layout(self) -> &'static Layout {
        match self {
            Variant::Leds16x9 => &LEDS_16X9,
            Variant::Leds9x16 => &LEDS_9X16,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Leds16x9 => "leds16x9",
            Variant::Leds9x16 => "leds9x16",
        }
    }
}

/// Axis a plane byte (or byte pair) runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packing {
    /// A lane is one row of 16 pixels in two bytes
    Rows,
    /// A lane is one column of 7 pixels in one byte
    Columns,
}

/// Geometry and wiring of one panel variant
#[derive(Debug)]
pub struct Layout {
    pub variant: Variant,
    pub packing: Packing,
    /// Addressable width (includes the virtual margin)
    pub width: i32,
    /// Addressable height (includes the virtual margin)
    pub height: i32,
    pub physical_width: i32,
    pub physical_height: i32,
    /// Pixel registers flushed by a plain `show`
    pub frame_registers: usize,
    /// Largest top row for a font glyph
    pub glyph_row_max: i32,
    /// Whether a freshly created world overlays the live plane
    pub world_overlay: bool,
    wire_order: [u8; PLANE_BYTES],
    column_map: [u8; PLANE_BYTES],
    mirrored_columns: i32,
}

pub static LEDS_16X9: Layout = Layout {
    variant: Variant::Leds16x9,
    packing: Packing::Rows,
    width: 16,
    height: 9,
    physical_width: 15,
    physical_height: 8,
    frame_registers: 18,
    glyph_row_max: 3,
    world_overlay: true,
    wire_order: IDENTITY,
    column_map: IDENTITY,
    mirrored_columns: 0,
};

pub static LEDS_9X16: Layout = Layout {
    variant: Variant::Leds9x16,
    packing: Packing::Columns,
    width: 17,
    height: 7,
    physical_width: 16,
    physical_height: 6,
    frame_registers: 17,
    glyph_row_max: 2,
    world_overlay: false,
    wire_order: COLUMN_ORDER,
    column_map: COLUMN_MAP,
    mirrored_columns: 9,
};

impl Layout {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (x | y) >= 0 && x < self.width && y < self.height
    }

    /// Plane byte and bit mask holding pixel (x, y)
    pub fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if !self.contains(x, y) {
            return None;
        }
        Some(match self.packing {
            Packing::Rows => ((2 * y + (x >> 3)) as usize, 1 << (x & 7)),
            Packing::Columns => (x as usize, 1 << y),
        })
    }

    /// Number of lanes in a plane
    pub fn lane_count(&self) -> i32 {
        match self.packing {
            Packing::Rows => self.height,
            Packing::Columns => self.width,
        }
    }

    /// Pixels per lane
    pub fn lane_len(&self) -> i32 {
        match self.packing {
            Packing::Rows => self.width,
            Packing::Columns => self.height,
        }
    }

    /// Mask with every pixel of a lane set
    pub fn lane_full(&self) -> u16 {
        FILL[self.lane_len() as usize]
    }

    /// Split a point into (lane, position along the lane)
    pub fn lane_of(&self, x: i32, y: i32) -> (i32, i32) {
        match self.packing {
            Packing::Rows => (y, x),
            Packing::Columns => (x, y),
        }
    }

    /// Bits of plane byte `index` that address real pixels
    pub fn valid_bits(&self, index: usize) -> u8 {
        match self.packing {
            Packing::Rows => 0xFF,
            Packing::Columns if (index as i32) < self.width => self.lane_full() as u8,
            Packing::Columns => 0,
        }
    }

    fn encode(&self, column: usize, byte: u8) -> u8 {
        if (column as i32) < self.mirrored_columns {
            REVERSE7[byte as usize]
        } else {
            byte
        }
    }

    /// Plane bytes in LED-control register order
    pub fn pack(&self, plane: &[u8; PLANE_BYTES]) -> [u8; PLANE_BYTES] {
        let mut wire = [0u8; PLANE_BYTES];
        for (reg, slot) in wire.iter_mut().enumerate() {
            let source = self.wire_order[reg] as usize;
            *slot = self.encode(source, plane[source]);
        }
        wire
    }

    /// Inverse of [`Layout::pack`]
    pub fn unpack(&self, wire: &[u8]) -> [u8; PLANE_BYTES] {
        let mut plane = [0u8; PLANE_BYTES];
        for (reg, &byte) in wire.iter().enumerate().take(PLANE_BYTES) {
            let target = self.wire_order[reg] as usize;
            plane[target] = self.encode(target, byte) & self.valid_bits(target);
        }
        plane
    }

    /// First register and wire bytes of one lane
    pub fn pack_lane(&self, plane: &[u8; PLANE_BYTES], lane: i32) -> Option<(u8, [u8; 2], usize)> {
        if lane < 0 || lane >= self.lane_count() {
            return None;
        }
        let lane = lane as usize;
        Some(match self.packing {
            Packing::Rows => (
                self.column_map[2 * lane],
                [plane[2 * lane], plane[2 * lane + 1]],
                2,
            ),
            Packing::Columns => (
                self.column_map[lane],
                [self.encode(lane, plane[lane]), 0],
                1,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let l = Variant::Leds16x9.layout();
        assert_eq!((l.width, l.height, l.physical_width, l.physical_height), (16, 9, 15, 8));
        let l = Variant::Leds9x16.layout();
        assert_eq!((l.width, l.height, l.physical_width, l.physical_height), (17, 7, 16, 6));
    }

    #[test]
    fn test_row_packing() {
        let l = &LEDS_16X9;
        assert_eq!(l.locate(0, 0), Some((0, 0x01)));
        assert_eq!(l.locate(9, 2), Some((5, 0x02)));
        assert_eq!(l.locate(15, 8), Some((17, 0x80)));
        assert_eq!(l.locate(16, 0), None);
        assert_eq!(l.locate(-1, 0), None);
    }

    #[test]
    fn test_column_packing() {
        let l = &LEDS_9X16;
        assert_eq!(l.locate(3, 4), Some((3, 0x10)));
        assert_eq!(l.locate(16, 6), Some((16, 0x40)));
        assert_eq!(l.locate(17, 0), None);
        assert_eq!(l.locate(0, 7), None);
        assert_eq!(l.valid_bits(16), 0x7F);
        assert_eq!(l.valid_bits(17), 0);
    }

    #[test]
    fn test_column_wire_order_and_mirroring() {
        let l = &LEDS_9X16;
        let mut plane = [0u8; PLANE_BYTES];
        plane[8] = 0x01; // mirrored column, register 0
        plane[9] = 0x01; // plain column, register 1
        let wire = l.pack(&plane);
        assert_eq!(wire[0], 0x40);
        assert_eq!(wire[1], 0x01);
        assert_eq!(l.unpack(&wire), plane);
    }

    #[test]
    fn test_lane_registers() {
        let mut plane = [0u8; PLANE_BYTES];
        plane[6] = 0xAB;
        plane[7] = 0xCD;
        assert_eq!(LEDS_16X9.pack_lane(&plane, 3), Some((6, [0xAB, 0xCD], 2)));
        assert_eq!(LEDS_16X9.pack_lane(&plane, 9), None);

        plane[0] = 0x02;
        assert_eq!(LEDS_9X16.pack_lane(&plane, 0), Some((16, [0x20, 0], 1)));
    }
}
