//! Pixel and blink bit-planes
//!
//! A [`Plane`] is the 18-byte image of one LED-control block in logical
//! order. Every accessor is bounds-checked against the panel's addressable
//! area; anything outside reads dark and ignores writes.

use crate::layout::{Layout, Packing, PLANE_BYTES};

/// Logical scroll direction for [`PlanePair::shift`] and world viewports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

/// One bit per addressable pixel
#[derive(Debug, Clone)]
pub struct Plane {
    layout: &'static Layout,
    bytes: [u8; PLANE_BYTES],
}

impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.layout.variant == other.layout.variant && self.bytes == other.bytes
    }
}

impl Eq for Plane {}

impl Plane {
    /// Create an all-dark plane
    pub const fn new(layout: &'static Layout) -> Self {
        Self {
            layout,
            bytes: [0; PLANE_BYTES],
        }
    }

    /// Build a plane from raw bytes, dropping bits outside the panel
    pub fn from_bytes(layout: &'static Layout, bytes: [u8; PLANE_BYTES]) -> Self {
        let mut plane = Self { layout, bytes };
        for (i, b) in plane.bytes.iter_mut().enumerate() {
            *b &= layout.valid_bits(i);
        }
        plane
    }

    pub fn layout(&self) -> &'static Layout {
        self.layout
    }

    pub fn as_bytes(&self) -> &[u8; PLANE_BYTES] {
        &self.bytes
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        match self.layout.locate(x, y) {
            Some((index, mask)) => self.bytes[index] & mask != 0,
            None => false,
        }
    }

    pub fn set(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, mask)) = self.layout.locate(x, y) {
            if on {
                self.bytes[index] |= mask;
            } else {
                self.bytes[index] &= !mask;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Number of lit pixels
    pub fn count(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// Bits of one lane, bit k is position k along the lane
    pub fn lane(&self, lane: i32) -> u16 {
        if lane < 0 || lane >= self.layout.lane_count() {
            return 0;
        }
        let lane = lane as usize;
        match self.layout.packing {
            Packing::Rows => u16::from_le_bytes([self.bytes[2 * lane], self.bytes[2 * lane + 1]]),
            Packing::Columns => self.bytes[lane] as u16,
        }
    }

    /// Replace one lane; out-of-range lanes are ignored
    pub fn set_lane(&mut self, lane: i32, bits: u16) {
        if lane < 0 || lane >= self.layout.lane_count() {
            return;
        }
        let bits = bits & self.layout.lane_full();
        let lane = lane as usize;
        match self.layout.packing {
            Packing::Rows => {
                let [lo, hi] = bits.to_le_bytes();
                self.bytes[2 * lane] = lo;
                self.bytes[2 * lane + 1] = hi;
            }
            Packing::Columns => self.bytes[lane] = bits as u8,
        }
    }

    pub fn clear(&mut self) {
        self.bytes = [0; PLANE_BYTES];
    }

    /// Light every addressable pixel
    pub fn fill(&mut self) {
        for (i, b) in self.bytes.iter_mut().enumerate() {
            *b = self.layout.valid_bits(i);
        }
    }

    pub fn invert(&mut self) {
        for (i, b) in self.bytes.iter_mut().enumerate() {
            *b ^= self.layout.valid_bits(i);
        }
    }

    /// Move the image one pixel; pixels pushed off the edge are lost
    pub fn shift(&mut self, direction: Direction) {
        let along_lane = matches!(
            (self.layout.packing, direction),
            (Packing::Rows, Direction::Left | Direction::Right)
                | (Packing::Columns, Direction::Up | Direction::Down)
        );
        let toward_origin = matches!(direction, Direction::Left | Direction::Up);
        let lanes = self.layout.lane_count();

        if along_lane {
            for lane in 0..lanes {
                let bits = self.lane(lane);
                self.set_lane(lane, if toward_origin { bits >> 1 } else { bits << 1 });
            }
        } else if toward_origin {
            for lane in 0..lanes {
                let next = self.lane(lane + 1);
                self.set_lane(lane, next);
            }
        } else {
            for lane in (0..lanes).rev() {
                let prev = self.lane(lane - 1);
                self.set_lane(lane, prev);
            }
        }
    }
}

/// The pixel plane and its blink plane, edited together
///
/// A pixel that is switched off loses its blink bit as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanePair {
    pub pixels: Plane,
    pub blinks: Plane,
}

impl PlanePair {
    pub const fn new(layout: &'static Layout) -> Self {
        Self {
            pixels: Plane::new(layout),
            blinks: Plane::new(layout),
        }
    }

    pub fn layout(&self) -> &'static Layout {
        self.pixels.layout
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        self.pixels.set(x, y, on);
        if !on {
            self.blinks.set(x, y, false);
        }
    }

    pub fn set_blink(&mut self, x: i32, y: i32, on: bool) {
        self.blinks.set(x, y, on);
    }

    pub fn is_pixel(&self, x: i32, y: i32) -> bool {
        self.pixels.get(x, y)
    }

    pub fn is_blink(&self, x: i32, y: i32) -> bool {
        self.blinks.get(x, y)
    }

    pub fn clear(&mut self) {
        self.pixels.clear();
        self.blinks.clear();
    }

    /// Toggle every pixel; blink bits are left alone
    pub fn invert(&mut self) {
        self.pixels.invert();
    }

    pub fn shift(&mut self, direction: Direction) {
        self.pixels.shift(direction);
        self.blinks.shift(direction);
    }

    /// Light (`on`) or darken the lane positions in `mask`
    pub fn apply_lane(&mut self, lane: i32, mask: u16, on: bool) {
        let bits = self.pixels.lane(lane);
        if on {
            self.pixels.set_lane(lane, bits | mask);
        } else {
            self.pixels.set_lane(lane, bits & !mask);
            let blinks = self.blinks.lane(lane);
            self.blinks.set_lane(lane, blinks & !mask);
        }
    }

    /// Overwrite a lane and drop its blink bits
    pub fn write_lane(&mut self, lane: i32, bits: u16) {
        self.pixels.set_lane(lane, bits);
        self.blinks.set_lane(lane, 0);
    }

    /// Row `y` becomes `(row & and) | or`; bit k of the masks is column k
    pub fn mask_row(&mut self, y: i32, and: u32, or: u32) {
        if y < 0 || y >= self.layout().height {
            return;
        }
        for x in 0..self.layout().width {
            let bit = 1u32 << x;
            let on = (self.pixels.get(x, y) && and & bit != 0) || or & bit != 0;
            self.set_pixel(x, y, on);
        }
    }

    /// Column `x` becomes `(column & and) | or`; bit k of the masks is row k
    pub fn mask_column(&mut self, x: i32, and: u32, or: u32) {
        if x < 0 || x >= self.layout().width {
            return;
        }
        for y in 0..self.layout().height {
            let bit = 1u32 << y;
            let on = (self.pixels.get(x, y) && and & bit != 0) || or & bit != 0;
            self.set_pixel(x, y, on);
        }
    }
}
