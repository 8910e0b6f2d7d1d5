//! Glyph composition onto a plane pair
//!
//! The row-packed panel draws glyphs pixel by pixel inside a `|width|`×5
//! box. The column-packed panel writes each lit glyph column as a whole
//! plane column and drops blank columns, so its glyphs come out narrower
//! than the font's advance width.

use super::font::{FontProvider, Glyph};
use super::icons::{Bitmap, Symbol};
use super::tokenize::tokenize;
use crate::display::PlanePair;
use crate::layout::Packing;

/// Columns a symbol occupies
pub const SYMBOL_WIDTH: i32 = Bitmap::WIDTH;

/// Draw a 5×5 bitmap with its top-left corner at (x, y), dark pixels included
pub fn set_image(pair: &mut PlanePair, image: &Bitmap, x: i32, y: i32) {
    for row in 0..Bitmap::HEIGHT {
        for col in 0..Bitmap::WIDTH {
            pair.set_pixel(x.saturating_add(col), y.saturating_add(row), image.pixel(col, row));
        }
    }
}

/// Replace the whole picture; bit x of `rows[y]` is pixel (x, y)
pub fn set_full_image(pair: &mut PlanePair, rows: &[u32]) {
    let layout = pair.layout();
    pair.clear();
    for (y, &bits) in rows.iter().enumerate().take(layout.height as usize) {
        for x in 0..layout.width {
            if bits >> x & 1 != 0 {
                pair.set_pixel(x, y as i32, true);
            }
        }
    }
}

/// Draw one character and return the columns it used
pub fn draw_char<F: FontProvider + ?Sized>(pair: &mut PlanePair, font: &F, c: char, x: i32, y: i32) -> i32 {
    if let Some(symbol) = Symbol::from_char(c) {
        set_image(pair, &symbol.bitmap(), x, y);
        return SYMBOL_WIDTH;
    }
    let layout = pair.layout();
    let y = y.clamp(0, layout.glyph_row_max);
    let glyph = font.glyph(c);
    match layout.packing {
        Packing::Rows => draw_glyph_pixels(pair, &glyph, x, y),
        Packing::Columns => draw_glyph_columns(pair, &glyph, x, y),
    }
}

fn draw_glyph_pixels(pair: &mut PlanePair, glyph: &Glyph, x: i32, y: i32) -> i32 {
    let mut rows = glyph.rows;
    if glyph.width < 0 {
        for bits in rows.iter_mut() {
            *bits <<= 1;
        }
    }
    let width = glyph.advance().min(Bitmap::WIDTH);
    for (row, bits) in (0..).zip(rows) {
        for col in 0..width {
            pair.set_pixel(x.saturating_add(col), y + row, bits & (1 << (4 - col)) != 0);
        }
    }
    width
}

fn draw_glyph_columns(pair: &mut PlanePair, glyph: &Glyph, x: i32, y: i32) -> i32 {
    let mut written = 0;
    let mut lit = false;
    for col in 0..Bitmap::WIDTH {
        let mask = 0x10 >> col;
        let bits = (0..)
            .zip(glyph.rows)
            .filter(|&(_, row_bits)| row_bits & mask != 0)
            .fold(0u16, |acc, (row, _)| acc | (1 << row))
            << y;
        lit |= bits != 0;
        // blank columns count only as leading space of an empty glyph
        if bits != 0 || (col > 1 && !lit) {
            pair.write_lane(x.saturating_add(written), bits);
            written += 1;
        }
    }
    written
}

/// Blank separator column after a glyph
fn clear_gap(pair: &mut PlanePair, x: i32, y: i32) {
    match pair.layout().packing {
        Packing::Rows => {
            for row in 0..Bitmap::HEIGHT {
                pair.set_pixel(x, y.saturating_add(row), false);
            }
        }
        Packing::Columns => pair.write_lane(x, 0),
    }
}

/// Draw already tokenized text starting at column `x`
pub fn draw_tokens<F: FontProvider + ?Sized>(pair: &mut PlanePair, font: &F, tokens: &str, x: i32, y: i32) {
    let limit = pair.layout().physical_width;
    let mut offset = 0;
    let mut chars = tokens.chars().peekable();
    while let Some(c) = chars.next() {
        let cursor = x.saturating_add(offset);
        if cursor > limit {
            return;
        }
        let width = draw_char(pair, font, c, cursor, y);
        if chars.peek().is_some() {
            clear_gap(pair, cursor.saturating_add(width), y);
        }
        offset += width + 1;
    }
}

/// Tokenize `text` and draw it starting at column `x`
pub fn draw_text<F: FontProvider + ?Sized>(pair: &mut PlanePair, font: &F, text: &str, x: i32, y: i32) {
    draw_tokens(pair, font, &tokenize(text), x, y);
}

/// Columns one tokenized character advances
pub fn char_advance<F: FontProvider + ?Sized>(font: &F, c: char) -> i32 {
    if Symbol::from_char(c).is_some() {
        SYMBOL_WIDTH
    } else {
        font.advance_width(c).abs()
    }
}

/// Width of tokenized text: glyph widths plus one gap between glyphs
pub fn measure_tokens<F: FontProvider + ?Sized>(font: &F, tokens: &str) -> i32 {
    let (sum, count) = tokens
        .chars()
        .fold((0, 0), |(sum, count), c| (sum + char_advance(font, c), count + 1));
    if count == 0 {
        0
    } else {
        sum + count - 1
    }
}

pub fn measure_text<F: FontProvider + ?Sized>(font: &F, text: &str) -> i32 {
    measure_tokens(font, &tokenize(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LEDS_16X9, LEDS_9X16};
    use crate::text::font::MicroFont;

    /// Font with one hand-made glyph per test character
    struct TestFont;

    impl FontProvider for TestFont {
        fn glyph(&self, c: char) -> Glyph {
            match c {
                // lit in cell columns 1 and 2 only
                'n' => Glyph { rows: [0b01100, 0b01000, 0b01100, 0b01000, 0b01100], width: -2 },
                // gap between cell columns 0 and 2
                'g' => Glyph { rows: [0b10100; 5], width: 3 },
                _ => Glyph { rows: [0b11000; 5], width: 2 },
            }
        }
    }

    fn row_pixels(pair: &PlanePair, y: i32) -> std::vec::Vec<i32> {
        (0..pair.layout().width).filter(|&x| pair.is_pixel(x, y)).collect()
    }

    #[test]
    fn test_negative_width_renders_from_second_column() {
        let mut pair = PlanePair::new(&LEDS_16X9);
        let width = draw_char(&mut pair, &TestFont, 'n', 4, 0);
        assert_eq!(width, 2);
        assert_eq!(row_pixels(&pair, 0), [4, 5]);
        assert_eq!(row_pixels(&pair, 1), [4]);
        assert!(!pair.is_pixel(6, 0));
    }

    #[test]
    fn test_glyph_row_is_clamped() {
        let mut pair = PlanePair::new(&LEDS_16X9);
        draw_char(&mut pair, &TestFont, 'x', 0, 7);
        assert!(pair.is_pixel(0, 3) && pair.is_pixel(0, 7));
        assert!(!pair.is_pixel(0, 8));

        let mut pair = PlanePair::new(&LEDS_9X16);
        draw_char(&mut pair, &TestFont, 'x', 0, -4);
        assert_eq!(pair.pixels.lane(0), 0b11111);
    }

    #[test]
    fn test_column_panel_drops_blank_columns() {
        let mut pair = PlanePair::new(&LEDS_9X16);
        let width = draw_char(&mut pair, &TestFont, 'g', 3, 1);
        assert_eq!(width, 2);
        assert_eq!(pair.pixels.lane(3), 0b111110);
        assert_eq!(pair.pixels.lane(4), 0b111110);
        assert_eq!(pair.pixels.lane(5), 0);
    }

    #[test]
    fn test_column_panel_blank_glyph_is_three_wide() {
        let mut pair = PlanePair::new(&LEDS_9X16);
        pair.pixels.fill();
        pair.blinks.fill();
        let width = draw_char(&mut pair, &MicroFont, ' ', 0, 0);
        assert_eq!(width, 3);
        assert_eq!(pair.pixels.lane(2), 0);
        assert_eq!(pair.blinks.lane(2), 0);
        assert_eq!(pair.pixels.lane(3), 0x7F);
    }

    #[test]
    fn test_symbol_is_drawn_unclamped() {
        let mut pair = PlanePair::new(&LEDS_16X9);
        let c = Symbol::Square.to_char();
        assert_eq!(draw_char(&mut pair, &MicroFont, c, 10, 4), 5);
        assert!(pair.is_pixel(10, 4) && pair.is_pixel(14, 8));
        assert!(!pair.is_pixel(11, 5));
    }

    #[test]
    fn test_text_gap_is_cleared() {
        let mut pair = PlanePair::new(&LEDS_16X9);
        pair.pixels.fill();
        draw_text(&mut pair, &TestFont, "ab", 0, 0);
        // 'a' occupies 0..2, gap at 2, 'b' at 3..5
        assert_eq!(row_pixels(&pair, 0)[..4], [0, 1, 3, 4]);
        assert!(!pair.is_pixel(2, 4));
        assert!(pair.is_pixel(2, 5));
    }

    #[test]
    fn test_text_stops_past_physical_width() {
        let mut pair = PlanePair::new(&LEDS_16X9);
        draw_text(&mut pair, &TestFont, "aaaaaaaa", 10, 0);
        // glyphs start at 10 and 13; 16 is past the panel
        assert_eq!(row_pixels(&pair, 0), [10, 11, 13, 14]);
    }

    #[test]
    fn test_measure() {
        let font = MicroFont;
        let a = font.advance_width('A').abs();
        let b = font.advance_width('B').abs();
        assert_eq!(measure_text(&font, "AB"), a + 1 + b);
        assert_eq!(measure_text(&font, ""), 0);
        assert_eq!(measure_text(&font, "{Heart}"), 5);
        assert_eq!(measure_text(&font, "!{Heart}"), 1 + 1 + 5);
    }

    #[test]
    fn test_full_image() {
        let mut pair = PlanePair::new(&LEDS_9X16);
        pair.set_pixel(5, 5, true);
        pair.set_blink(5, 5, true);
        set_full_image(&mut pair, &[0b1, 0, 1 << 16]);
        assert!(pair.is_pixel(0, 0) && pair.is_pixel(16, 2));
        assert!(!pair.is_pixel(5, 5) && !pair.is_blink(5, 5));
        assert_eq!(pair.pixels.count(), 2);
    }

    #[test]
    fn test_far_off_glyphs_are_ignored() {
        for layout in [&LEDS_16X9, &LEDS_9X16] {
            let mut pair = PlanePair::new(layout);
            draw_char(&mut pair, &MicroFont, 'A', i32::MAX, 0);
            draw_char(&mut pair, &MicroFont, 'A', i32::MIN, 0);
            draw_char(&mut pair, &MicroFont, Symbol::Heart.to_char(), i32::MAX, i32::MAX);
            draw_char(&mut pair, &MicroFont, Symbol::Heart.to_char(), i32::MIN, i32::MIN);
            set_image(&mut pair, &Symbol::Square.bitmap(), i32::MAX, i32::MAX);
            draw_text(&mut pair, &MicroFont, "AB", i32::MAX - 2, i32::MAX);
            assert!(pair.pixels.is_empty());
        }
    }
}
