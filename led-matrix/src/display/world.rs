//! Scrollable world canvas
//!
//! A world is a bit buffer larger than the panel with a viewport into it.
//! When a world is active, `show` sends the viewport window instead of the
//! live plane (optionally with the live plane OR-ed on top).
//!
//! ```text
//!   world (width × height)
//!   ┌──────────────────────────────┐
//!   │        (frame_x, frame_y)    │
//!   │         ┌───────────┐        │
//!   │         │  viewport │        │
//!   │         └───────────┘        │
//!   └──────────────────────────────┘
//! ```

use alloc::vec;
use alloc::vec::Vec;

use super::geometry::Canvas;
use super::plane::{Direction, Plane};
use crate::layout::{Layout, Packing};

/// Virtual canvas with a clamped viewport
#[derive(Debug, Clone)]
pub struct WorldCanvas {
    layout: &'static Layout,
    width: i32,
    height: i32,
    /// Bytes per row (row packed) or byte rows (column packed)
    stride: i32,
    buffer: Vec<u8>,
    frame_x: i32,
    frame_y: i32,
    max_x: i32,
    max_y: i32,
    overlay: bool,
}

impl WorldCanvas {
    /// Allocate an all-dark world with the viewport at the origin
    pub fn new(layout: &'static Layout, width: u16, height: u16, overlay: bool) -> Self {
        let (width, height) = (width as i32, height as i32);
        let (stride, len) = match layout.packing {
            Packing::Rows => {
                let row_bytes = (width + 7) >> 3;
                (row_bytes, row_bytes * height)
            }
            Packing::Columns => {
                let byte_rows = (height + 7) >> 3;
                (byte_rows, byte_rows * width)
            }
        };
        Self {
            layout,
            width,
            height,
            stride,
            buffer: vec![0; len as usize],
            frame_x: 0,
            frame_y: 0,
            max_x: (width - layout.physical_width).max(0),
            max_y: (height - layout.physical_height).max(0),
            overlay,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn overlay(&self) -> bool {
        self.overlay
    }

    pub fn set_overlay(&mut self, overlay: bool) {
        self.overlay = overlay;
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if (x | y) < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(match self.layout.packing {
            Packing::Rows => ((self.stride * y + (x >> 3)) as usize, 1 << (x & 7)),
            Packing::Columns => ((self.width * (y >> 3) + x) as usize, 1 << (y & 7)),
        })
    }

    /// Pixel relative to the viewport origin
    pub fn is_pixel_relative(&self, x: i32, y: i32) -> bool {
        self.is_pixel(x.saturating_add(self.frame_x), y.saturating_add(self.frame_y))
    }

    pub fn frame_position(&self) -> (i32, i32) {
        (self.frame_x, self.frame_y)
    }

    /// Largest allowed viewport origin
    pub fn frame_max(&self) -> (i32, i32) {
        (self.max_x, self.max_y)
    }

    /// Place the viewport, clamped to the world
    pub fn position_frame(&mut self, x: i32, y: i32) {
        self.frame_x = x.clamp(0, self.max_x);
        self.frame_y = y.clamp(0, self.max_y);
    }

    /// Nudge the viewport one pixel
    pub fn move_frame(&mut self, direction: Direction) {
        let (x, y) = (self.frame_x, self.frame_y);
        match direction {
            Direction::Up => self.position_frame(x, y - 1),
            Direction::Down => self.position_frame(x, y + 1),
            Direction::Left => self.position_frame(x - 1, y),
            Direction::Right => self.position_frame(x + 1, y),
        }
    }

    fn byte_at(&self, index: i32) -> u8 {
        if index < 0 {
            return 0;
        }
        self.buffer.get(index as usize).copied().unwrap_or(0)
    }

    /// Eight world pixels of row `y` starting at column `x`
    fn row_byte(&self, x: i32, y: i32) -> u8 {
        if y < 0 || y >= self.height || x >= self.width {
            return 0;
        }
        let col = x >> 3;
        let row = self.stride * y;
        let lo = self.byte_at(row + col) as u16;
        let hi = if col + 1 < self.stride {
            self.byte_at(row + col + 1) as u16
        } else {
            0
        };
        let bits = (((hi << 8) | lo) >> (x & 7)) as u8;
        bits & visible(self.width - x)
    }

    /// Eight world pixels of column `x` starting at row `y`
    fn column_byte(&self, x: i32, y: i32) -> u8 {
        if x < 0 || x >= self.width || y >= self.height {
            return 0;
        }
        let byte_row = y >> 3;
        let lo = self.byte_at(self.width * byte_row + x) as u16;
        let hi = if byte_row + 1 < self.stride {
            self.byte_at(self.width * (byte_row + 1) + x) as u16
        } else {
            0
        };
        let bits = (((hi << 8) | lo) >> (y & 7)) as u8;
        bits & visible(self.height - y)
    }

    /// The viewport window as a plane, with `live` on top in overlay mode
    pub fn composite(&self, live: &Plane) -> Plane {
        let mut out = Plane::new(self.layout);
        for lane in 0..self.layout.lane_count() {
            let window = match self.layout.packing {
                Packing::Rows => {
                    let (x, y) = (self.frame_x, self.frame_y + lane);
                    u16::from_le_bytes([self.row_byte(x, y), self.row_byte(x + 8, y)])
                }
                Packing::Columns => self.column_byte(self.frame_x + lane, self.frame_y) as u16,
            };
            let bits = if self.overlay { window | live.lane(lane) } else { window };
            out.set_lane(lane, bits);
        }
        out
    }
}

/// Mask keeping the first `n` pixels of a byte
fn visible(n: i32) -> u8 {
    match n {
        n if n <= 0 => 0,
        n if n >= 8 => 0xFF,
        n => (1u8 << n) - 1,
    }
}

impl Canvas for WorldCanvas {
    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, mask)) = self.locate(x, y) {
            if on {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
    }

    fn is_pixel(&self, x: i32, y: i32) -> bool {
        match self.locate(x, y) {
            Some((index, mask)) => self.buffer[index] & mask != 0,
            None => false,
        }
    }

    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LEDS_16X9, LEDS_9X16};

    #[test]
    fn test_buffer_sizes() {
        let w = WorldCanvas::new(&LEDS_16X9, 30, 20, true);
        assert_eq!(w.buffer.len(), 4 * 20);
        let w = WorldCanvas::new(&LEDS_9X16, 30, 20, false);
        assert_eq!(w.buffer.len(), 30 * 3);
    }

    #[test]
    fn test_viewport_clamp() {
        let mut w = WorldCanvas::new(&LEDS_16X9, 40, 20, true);
        assert_eq!(w.frame_max(), (25, 12));
        w.position_frame(100, -5);
        assert_eq!(w.frame_position(), (25, 0));
        w.move_frame(Direction::Right);
        assert_eq!(w.frame_position(), (25, 0));
        w.move_frame(Direction::Down);
        w.move_frame(Direction::Left);
        assert_eq!(w.frame_position(), (24, 1));
    }

    #[test]
    fn test_small_world_pins_viewport() {
        let mut w = WorldCanvas::new(&LEDS_9X16, 4, 3, false);
        assert_eq!(w.frame_max(), (0, 0));
        w.position_frame(3, 3);
        assert_eq!(w.frame_position(), (0, 0));
    }

    #[test]
    fn test_relative_reads_follow_viewport() {
        let mut w = WorldCanvas::new(&LEDS_16X9, 32, 16, true);
        w.set_pixel(20, 10, true);
        w.position_frame(17, 4);
        assert!(w.is_pixel_relative(3, 6));
        assert!(!w.is_pixel_relative(0, 0));
    }

    #[test]
    fn test_composite_row_packed_sub_byte_offset() {
        let mut w = WorldCanvas::new(&LEDS_16X9, 40, 12, false);
        w.set_pixel(13, 2, true);
        w.set_pixel(27, 3, true);
        w.position_frame(12, 2);

        let out = w.composite(&Plane::new(&LEDS_16X9));
        assert!(out.get(1, 0));
        assert!(out.get(15, 1));
        assert_eq!(out.count(), 2);
    }

    #[test]
    fn test_composite_column_packed_sub_byte_offset() {
        let mut w = WorldCanvas::new(&LEDS_9X16, 20, 20, false);
        w.set_pixel(4, 9, true);
        w.set_pixel(4, 3, true);
        w.position_frame(2, 3);

        let out = w.composite(&Plane::new(&LEDS_9X16));
        assert!(out.get(2, 6));
        assert!(out.get(2, 0));
        assert_eq!(out.count(), 2);
    }

    #[test]
    fn test_composite_outside_world_is_dark() {
        let mut w = WorldCanvas::new(&LEDS_16X9, 10, 5, false);
        w.plot_box(0, 0, 9, 4, true);
        let out = w.composite(&Plane::new(&LEDS_16X9));
        assert_eq!(out.count(), 50);
        assert!(!out.get(10, 0));
        assert!(!out.get(0, 5));
    }

    #[test]
    fn test_overlay() {
        let mut live = Plane::new(&LEDS_9X16);
        live.set(0, 0, true);
        let mut w = WorldCanvas::new(&LEDS_9X16, 30, 10, false);
        w.set_pixel(1, 1, true);
        assert_eq!(w.composite(&live).count(), 1);
        w.set_overlay(true);
        assert_eq!(w.composite(&live).count(), 2);
    }

    #[test]
    fn test_world_shapes() {
        let mut w = WorldCanvas::new(&LEDS_16X9, 24, 12, true);
        w.plot_rect(2, 2, 20, 10, true);
        assert!(w.is_pixel(20, 6) && w.is_pixel(2, 10) && w.is_pixel(11, 2));
        assert!(!w.is_pixel(11, 6));
        w.plot_rect(2, 2, 20, 10, false);
        assert!(!w.is_pixel(20, 6));

        w.plot_box(20, 11, 18, 9, true);
        assert!(w.is_pixel(19, 10));
        w.clear();
        assert!(!w.is_pixel(19, 10));
    }

    #[test]
    fn test_extreme_coordinates_are_ignored() {
        let mut w = WorldCanvas::new(&LEDS_16X9, 30, 10, true);
        w.position_frame(5, 5);
        assert!(!w.is_pixel_relative(i32::MAX, 0));
        assert!(!w.is_pixel_relative(0, i32::MAX));

        w.plot_line(i32::MIN, 0, i32::MAX, 1, true);
        let lit = (0..10)
            .flat_map(|y| (0..30).map(move |x| (x, y)))
            .filter(|&(x, y)| w.is_pixel(x, y))
            .count();
        assert_eq!(lit, 30);

        w.clear();
        w.plot_box(i32::MIN, i32::MIN, i32::MAX, i32::MAX, true);
        assert!(w.is_pixel(0, 0) && w.is_pixel(29, 9));
    }
}
