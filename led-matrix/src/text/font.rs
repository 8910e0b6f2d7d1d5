//! Glyph source for text rendering

use super::icons::parse_row;

/// One character cell: five rows, bit 4 is the leftmost column
///
/// A negative `width` means the glyph starts in the cell's second column;
/// `|width|` columns are drawn after moving every row left by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub rows: [u8; 5],
    pub width: i8,
}

impl Glyph {
    /// Width of an all-blank glyph (space)
    pub const BLANK_WIDTH: i8 = 3;

    pub const BLANK: Glyph = Glyph {
        rows: [0; 5],
        width: Self::BLANK_WIDTH,
    };

    /// Build a glyph from a `#`/`.` cell, deriving its signed width
    pub const fn parse(cell: [&str; 5]) -> Self {
        let mut rows = [0u8; 5];
        let mut used = 0u8;
        let mut r = 0;
        while r < 5 {
            rows[r] = parse_row(cell[r]) & 0x1F;
            used |= rows[r];
            r += 1;
        }
        if used == 0 {
            return Self::BLANK;
        }
        // column c lives in bit 4 - c
        let last = 4 - used.trailing_zeros() as i8;
        let width = if used & 0x10 != 0 { last + 1 } else { -last };
        Self { rows, width }
    }

    /// Columns the glyph occupies when drawn
    pub fn advance(&self) -> i32 {
        (self.width as i32).abs()
    }
}

/// Source of glyph bitmaps and advance widths
pub trait FontProvider {
    fn glyph(&self, c: char) -> Glyph;

    /// Signed advance; see [`Glyph`] for the meaning of a negative width
    fn advance_width(&self, c: char) -> i32 {
        self.glyph(c).width as i32
    }
}

impl<F: FontProvider + ?Sized> FontProvider for &F {
    fn glyph(&self, c: char) -> Glyph {
        (**self).glyph(c)
    }

    fn advance_width(&self, c: char) -> i32 {
        (**self).advance_width(c)
    }
}

/// Built-in proportional 5×5 font for printable ASCII
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroFont;

const FIRST: u32 = ' ' as u32;

static GLYPHS: [Glyph; 95] = [
    Glyph::parse([".....", ".....", ".....", ".....", "....."]), // ' '
    Glyph::parse([".#...", ".#...", ".#...", ".....", ".#..."]), // !
    Glyph::parse(["#.#..", "#.#..", ".....", ".....", "....."]), // "
    Glyph::parse([".#.#.", "#####", ".#.#.", "#####", ".#.#."]), // #
    Glyph::parse([".####", "#.#..", ".###.", "..#.#", "####."]), // $
    Glyph::parse(["##..#", "##.#.", "..#..", ".#.##", "#..##"]), // %
    Glyph::parse([".#...", "#.#..", ".#...", "#.#..", ".#.#."]), // &
    Glyph::parse([".#...", ".#...", ".....", ".....", "....."]), // '
    Glyph::parse(["..#..", ".#...", ".#...", ".#...", "..#.."]), // (
    Glyph::parse([".#...", "..#..", "..#..", "..#..", ".#..."]), // )
    Glyph::parse([".....", "#.#..", ".#...", "#.#..", "....."]), // *
    Glyph::parse([".....", ".#...", "###..", ".#...", "....."]), // +
    Glyph::parse([".....", ".....", ".....", ".#...", "#...."]), // ,
    Glyph::parse([".....", ".....", "###..", ".....", "....."]), // -
    Glyph::parse([".....", ".....", ".....", ".....", ".#..."]), // .
    Glyph::parse(["....#", "...#.", "..#..", ".#...", "#...."]), // /
    Glyph::parse([".##..", "#..#.", "#..#.", "#..#.", ".##.."]), // 0
    Glyph::parse([".#...", "##...", ".#...", ".#...", "###.."]), // 1
    Glyph::parse(["###..", "...#.", ".##..", "#....", "####."]), // 2
    Glyph::parse(["####.", "...#.", "..#..", "#..#.", ".##.."]), // 3
    Glyph::parse(["..##.", ".#.#.", "#..#.", "#####", "...#."]), // 4
    Glyph::parse(["#####", "#....", "####.", "....#", "####."]), // 5
    Glyph::parse(["...#.", "..#..", ".###.", "#...#", ".###."]), // 6
    Glyph::parse(["#####", "...#.", "..#..", ".#...", "#...."]), // 7
    Glyph::parse([".###.", "#...#", ".###.", "#...#", ".###."]), // 8
    Glyph::parse([".###.", "#...#", ".###.", "..#..", ".#..."]), // 9
    Glyph::parse([".....", ".#...", ".....", ".#...", "....."]), // :
    Glyph::parse([".....", ".#...", ".....", ".#...", "#...."]), // ;
    Glyph::parse(["..#..", ".#...", "#....", ".#...", "..#.."]), // <
    Glyph::parse([".....", "###..", ".....", "###..", "....."]), // =
    Glyph::parse(["#....", ".#...", "..#..", ".#...", "#...."]), // >
    Glyph::parse([".###.", "#...#", "..##.", ".....", "..#.."]), // ?
    Glyph::parse([".###.", "#...#", "#.#.#", "#.##.", ".##.."]), // @
    Glyph::parse([".##..", "#..#.", "####.", "#..#.", "#..#."]), // A
    Glyph::parse(["###..", "#..#.", "###..", "#..#.", "###.."]), // B
    Glyph::parse([".###.", "#....", "#....", "#....", ".###."]), // C
    Glyph::parse(["###..", "#..#.", "#..#.", "#..#.", "###.."]), // D
    Glyph::parse(["####.", "#....", "###..", "#....", "####."]), // E
    Glyph::parse(["####.", "#....", "###..", "#....", "#...."]), // F
    Glyph::parse([".###.", "#....", "#..##", "#...#", ".###."]), // G
    Glyph::parse(["#..#.", "#..#.", "####.", "#..#.", "#..#."]), // H
    Glyph::parse(["###..", ".#...", ".#...", ".#...", "###.."]), // I
    Glyph::parse(["#####", "...#.", "...#.", "#..#.", ".##.."]), // J
    Glyph::parse(["#..#.", "#.#..", "##...", "#.#..", "#..#."]), // K
    Glyph::parse(["#....", "#....", "#....", "#....", "####."]), // L
    Glyph::parse(["#...#", "##.##", "#.#.#", "#...#", "#...#"]), // M
    Glyph::parse(["#...#", "##..#", "#.#.#", "#..##", "#...#"]), // N
    Glyph::parse([".##..", "#..#.", "#..#.", "#..#.", ".##.."]), // O
    Glyph::parse(["###..", "#..#.", "###..", "#....", "#...."]), // P
    Glyph::parse([".##..", "#..#.", "#..#.", ".##..", "...#."]), // Q
    Glyph::parse(["###..", "#..#.", "###..", "#.#..", "#..#."]), // R
    Glyph::parse([".###.", "#....", ".##..", "...#.", "###.."]), // S
    Glyph::parse(["#####", "..#..", "..#..", "..#..", "..#.."]), // T
    Glyph::parse(["#..#.", "#..#.", "#..#.", "#..#.", ".##.."]), // U
    Glyph::parse(["#...#", "#...#", "#...#", ".#.#.", "..#.."]), // V
    Glyph::parse(["#...#", "#...#", "#.#.#", "##.##", "#...#"]), // W
    Glyph::parse(["#..#.", "#..#.", ".##..", "#..#.", "#..#."]), // X
    Glyph::parse(["#...#", ".#.#.", "..#..", "..#..", "..#.."]), // Y
    Glyph::parse(["####.", "..#..", ".#...", "#....", "####."]), // Z
    Glyph::parse(["###..", "#....", "#....", "#....", "###.."]), // [
    Glyph::parse(["#....", ".#...", "..#..", "...#.", "....#"]), // \
    Glyph::parse(["###..", "..#..", "..#..", "..#..", "###.."]), // ]
    Glyph::parse([".#...", "#.#..", ".....", ".....", "....."]), // ^
    Glyph::parse([".....", ".....", ".....", ".....", "####."]), // _
    Glyph::parse(["#....", ".#...", ".....", ".....", "....."]), // `
    Glyph::parse([".....", ".###.", "#..#.", "#..#.", ".####"]), // a
    Glyph::parse(["#....", "#....", "###..", "#..#.", "###.."]), // b
    Glyph::parse([".....", ".###.", "#....", "#....", ".###."]), // c
    Glyph::parse(["...#.", "...#.", ".###.", "#..#.", ".###."]), // d
    Glyph::parse([".##..", "#..#.", "###..", "#....", ".###."]), // e
    Glyph::parse(["..##.", ".#...", "###..", ".#...", ".#..."]), // f
    Glyph::parse([".###.", "#..#.", ".###.", "...#.", ".##.."]), // g
    Glyph::parse(["#....", "#....", "###..", "#..#.", "#..#."]), // h
    Glyph::parse([".#...", ".....", ".#...", ".#...", ".#..."]), // i
    Glyph::parse(["..#..", ".....", "..#..", "..#..", "##..."]), // j
    Glyph::parse(["#....", "#.#..", "##...", "#.#..", "#..#."]), // k
    Glyph::parse([".#...", ".#...", ".#...", ".#...", "..#.."]), // l
    Glyph::parse([".....", "##.#.", "#.#.#", "#.#.#", "#...#"]), // m
    Glyph::parse([".....", "###..", "#..#.", "#..#.", "#..#."]), // n
    Glyph::parse([".....", ".##..", "#..#.", "#..#.", ".##.."]), // o
    Glyph::parse([".....", "###..", "#..#.", "###..", "#...."]), // p
    Glyph::parse([".....", ".###.", "#..#.", ".###.", "...#."]), // q
    Glyph::parse([".....", ".###.", "#....", "#....", "#...."]), // r
    Glyph::parse([".....", ".##..", "##...", "..#..", "##..."]), // s
    Glyph::parse([".#...", "###..", ".#...", ".#...", "..#.."]), // t
    Glyph::parse([".....", "#..#.", "#..#.", "#..#.", ".###."]), // u
    Glyph::parse([".....", "#...#", "#...#", ".#.#.", "..#.."]), // v
    Glyph::parse([".....", "#...#", "#.#.#", "#.#.#", ".#.#."]), // w
    Glyph::parse([".....", "#..#.", ".##..", ".##..", "#..#."]), // x
    Glyph::parse([".....", "#...#", ".#.#.", "..#..", "##..."]), // y
    Glyph::parse([".....", "####.", "..#..", ".#...", "####."]), // z
    Glyph::parse(["..##.", ".#...", "##...", ".#...", "..##."]), // {
    Glyph::parse([".#...", ".#...", ".#...", ".#...", ".#..."]), // |
    Glyph::parse(["##...", "..#..", "...##", "..#..", "##..."]), // }
    Glyph::parse([".....", ".....", ".#.#.", "#.#..", "....."]), // ~
];

impl FontProvider for MicroFont {
    fn glyph(&self, c: char) -> Glyph {
        (c as u32)
            .checked_sub(FIRST)
            .and_then(|i| GLYPHS.get(i as usize))
            .copied()
            .unwrap_or(Glyph::BLANK)
    }
}
