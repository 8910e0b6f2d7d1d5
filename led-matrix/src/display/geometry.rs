//! Shape rasterization
//!
//! [`Canvas`] carries per-pixel default implementations of the plotting
//! primitives (the same idea as a display backend's `hline`/`draw_rect`
//! defaults). [`PlanePair`] overrides them with lane-masked fast paths that
//! paint exactly the same pixels.

use super::plane::PlanePair;
use crate::layout::tables::FILL;

/// Shapes accepted by [`Canvas::plot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Line,
    /// Filled rectangle
    Box,
    /// Rectangle outline
    Rect,
}

/// Integer Bresenham walk from (x0, y0) to (x1, y1), visiting only the
/// pixels whose major-axis coordinate lies inside a `size` canvas
///
/// The walk always starts from the end with the smaller major-axis
/// coordinate, and a zero error term steps the minor axis only while the
/// cursor is below the major-axis midpoint. Swapping the endpoints therefore
/// visits the same pixels. Endpoints far off the canvas are skipped in
/// closed form, so the cost is bounded by the canvas size.
pub fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32, size: (i32, i32), mut plot: impl FnMut(i32, i32)) {
    let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
    if (x1 - x0).abs() > (y1 - y0).abs() {
        walk((x0, y0), (x1, y1), i64::from(size.0), |x, y| plot(x, y));
    } else {
        walk((y0, x0), (y1, x1), i64::from(size.1), |y, x| plot(x, y));
    }
}

/// One octant pair of [`bresenham`]: points are (major, minor)
fn walk(a: (i64, i64), b: (i64, i64), len: i64, mut plot: impl FnMut(i32, i32)) {
    let ((start, minor), (end, minor_end)) = if a.0 > b.0 { (b, a) } else { (a, b) };
    let first = start.max(0);
    let last = end.min(len - 1);
    if first > last {
        return;
    }

    let major_span = i128::from(end - start);
    let minor_span = i128::from((minor_end - minor).abs());
    let step = if minor_end < minor { -1 } else { 1 };
    let mid = (start + end) >> 1;

    // Minor steps taken before the walk reaches `first`
    let skipped = i128::from(first - start);
    let taken = if skipped == 0 {
        0
    } else {
        let n = 2 * minor_span * skipped - major_span;
        let d = 2 * major_span;
        if n.rem_euclid(d) == 0 {
            n / d + i128::from(first - 1 < mid)
        } else {
            n.div_euclid(d) + 1
        }
    };

    let inc = 2 * minor_span;
    let dec = inc - 2 * major_span;
    let mut p = inc * (skipped + 1) - major_span - 2 * major_span * taken;
    let mut cursor = first;
    let mut pos = minor + step * taken as i64;
    plot(cursor as i32, pos as i32);
    while cursor < last {
        if p < 0 || (p == 0 && cursor >= mid) {
            p += inc;
        } else {
            p += dec;
            pos += step;
        }
        cursor += 1;
        plot(cursor as i32, pos as i32);
    }
}

/// Lane bits `lo..=hi` clipped to a lane of `len` pixels
pub fn span_mask(lo: i32, hi: i32, len: i32) -> u16 {
    let lo = lo.max(0);
    let hi = hi.min(len - 1);
    if lo > hi {
        return 0;
    }
    FILL[(hi + 1) as usize] & !FILL[lo as usize]
}

/// Lane bits at `lo` and `hi`, each only when it lies on the lane
pub fn edge_mask(lo: i32, hi: i32, len: i32) -> u16 {
    [lo, hi]
        .iter()
        .filter(|&&pos| (0..len).contains(&pos))
        .fold(0, |mask, &pos| mask | (1 << pos))
}

/// Both corners left of (or above) the canvas; boxes and outlines skip these
fn off_canvas(x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
    (x0 & x1) < 0 || (y0 & y1) < 0
}

/// Something pixels can be plotted onto
pub trait Canvas {
    fn set_pixel(&mut self, x: i32, y: i32, on: bool);

    fn is_pixel(&self, x: i32, y: i32) -> bool;

    /// Width and height; nothing outside is ever plotted
    fn size(&self) -> (i32, i32);

    fn plot_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        let size = self.size();
        bresenham(x0, y0, x1, y1, size, |x, y| self.set_pixel(x, y, on));
    }

    /// Filled rectangle between two corners (inclusive)
    fn plot_box(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        if off_canvas(x0, y0, x1, y1) {
            return;
        }
        let (x_lo, x_hi) = (x0.min(x1), x0.max(x1));
        let height = self.size().1;
        for y in y0.min(y1).max(0)..=y0.max(y1).min(height - 1) {
            self.plot_line(x_lo, y, x_hi, y, on);
        }
    }

    /// Rectangle outline between two corners (inclusive)
    fn plot_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        if off_canvas(x0, y0, x1, y1) {
            return;
        }
        self.plot_line(x0, y0, x1, y0, on);
        self.plot_line(x0, y1, x1, y1, on);
        self.plot_line(x0, y0, x0, y1, on);
        self.plot_line(x1, y0, x1, y1, on);
    }

    fn plot(&mut self, shape: Shape, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        match shape {
            Shape::Line => self.plot_line(x0, y0, x1, y1, on),
            Shape::Box => self.plot_box(x0, y0, x1, y1, on),
            Shape::Rect => self.plot_rect(x0, y0, x1, y1, on),
        }
    }
}

/// Corners of a box as (lane_lo, lane_hi, pos_lo, pos_hi)
fn lane_bounds(pair: &PlanePair, x0: i32, y0: i32, x1: i32, y1: i32) -> (i32, i32, i32, i32) {
    let layout = pair.layout();
    let (lane_a, pos_a) = layout.lane_of(x0, y0);
    let (lane_b, pos_b) = layout.lane_of(x1, y1);
    (lane_a.min(lane_b), lane_a.max(lane_b), pos_a.min(pos_b), pos_a.max(pos_b))
}

impl Canvas for PlanePair {
    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        PlanePair::set_pixel(self, x, y, on);
    }

    fn is_pixel(&self, x: i32, y: i32) -> bool {
        PlanePair::is_pixel(self, x, y)
    }

    fn size(&self) -> (i32, i32) {
        (self.layout().width, self.layout().height)
    }

    fn plot_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        let layout = self.layout();
        let (lane_a, pos_a) = layout.lane_of(x0, y0);
        let (lane_b, pos_b) = layout.lane_of(x1, y1);
        if lane_a == lane_b && pos_a != pos_b {
            let mask = span_mask(pos_a.min(pos_b), pos_a.max(pos_b), layout.lane_len());
            self.apply_lane(lane_a, mask, on);
            return;
        }
        let size = Canvas::size(self);
        bresenham(x0, y0, x1, y1, size, |x, y| PlanePair::set_pixel(self, x, y, on));
    }

    fn plot_box(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        // Both corners left of or above the panel
        if off_canvas(x0, y0, x1, y1) {
            return;
        }
        let len = self.layout().lane_len();
        let (lane_lo, lane_hi, pos_lo, pos_hi) = lane_bounds(self, x0, y0, x1, y1);
        let mask = span_mask(pos_lo, pos_hi, len);
        for lane in lane_lo.max(0)..=lane_hi.min(self.layout().lane_count() - 1) {
            self.apply_lane(lane, mask, on);
        }
    }

    fn plot_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        if off_canvas(x0, y0, x1, y1) {
            return;
        }
        let len = self.layout().lane_len();
        let (lane_lo, lane_hi, pos_lo, pos_hi) = lane_bounds(self, x0, y0, x1, y1);
        let full = span_mask(pos_lo, pos_hi, len);
        let edges = edge_mask(pos_lo, pos_hi, len);
        for lane in lane_lo.max(0)..=lane_hi.min(self.layout().lane_count() - 1) {
            let mask = if lane == lane_lo || lane == lane_hi { full } else { edges };
            self.apply_lane(lane, mask, on);
        }
    }
}
