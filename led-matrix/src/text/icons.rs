//! 5×5 bitmaps, icons and arrows
//!
//! Icons and arrows travel through text as private-use characters
//! (`U+E000 + index`): the first 40 indices are icons, the next 8 arrows.

/// Private-use code point of icon index 0
pub const SYMBOL_BASE: u32 = 0xE000;
/// Index of the first arrow in the symbol table
pub const ARROW_OFFSET: u32 = 40;

/// Markup keys, at most six characters each, in symbol-index order
pub const SYMBOL_KEYS: [&str; 48] = [
    "Heart", "SmallH", "Yes", "No", "Happy", "Sad", "Confus", "Angry", "Asleep", "Surpri",
    "Silly", "Fabulo", "Meh", "TShirt", "Roller", "Duck", "House", "Tortoi", "Butter", "StickF",
    "Ghost", "Sword", "Giraff", "Skull", "Umbrel", "Snake", "Rabbit", "Cow", "Quarte", "EigthN",
    "Pitchf", "Target", "Triang", "LeftTr", "Chessb", "Diamon", "SmallD", "Square", "SmallS", "Scisso",
    "North", "NorthE", "East", "SouthE", "South", "SouthW", "West", "NorthW",
];

/// Five rows of five pixels, bit 4 is the leftmost column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap([u8; 5]);

impl Bitmap {
    pub const WIDTH: i32 = 5;
    pub const HEIGHT: i32 = 5;

    pub const fn from_rows(rows: [u8; 5]) -> Self {
        Self(rows)
    }

    /// Parse rows drawn with `#` (lit) and `.` (dark)
    pub const fn parse(rows: [&str; 5]) -> Self {
        let mut out = [0u8; 5];
        let mut r = 0;
        while r < 5 {
            out[r] = parse_row(rows[r]);
            r += 1;
        }
        Self(out)
    }

    pub const fn rows(&self) -> [u8; 5] {
        self.0
    }

    pub fn pixel(&self, col: i32, row: i32) -> bool {
        if !(0..Self::WIDTH).contains(&col) || !(0..Self::HEIGHT).contains(&row) {
            return false;
        }
        self.0[row as usize] & (1 << (4 - col)) != 0
    }
}

/// Row bits of a `#`/`.` pattern, first character is the most significant
pub(crate) const fn parse_row(row: &str) -> u8 {
    let bytes = row.as_bytes();
    let mut bits = 0u8;
    let mut i = 0;
    while i < bytes.len() && i < 8 {
        bits <<= 1;
        if bytes[i] == b'#' {
            bits |= 1;
        }
        i += 1;
    }
    bits
}

macro_rules! symbols {
    ($( $name:ident => [$($row:literal),* $(,)?] ),* $(,)?) => {
        /// Built-in icons and arrows, in symbol-index order
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Symbol {
            $( $name, )*
        }

        impl Symbol {
            pub const ALL: &'static [Symbol] = &[$( Symbol::$name, )*];

            pub const fn bitmap(self) -> Bitmap {
                match self {
                    $( Symbol::$name => Bitmap::parse([$($row),*]), )*
                }
            }
        }
    };
}

symbols! {
    Heart => [".#.#.", "#####", "#####", ".###.", "..#.."],
    SmallHeart => [".....", ".#.#.", ".###.", "..#..", "....."],
    Yes => [".....", "....#", "...#.", "#.#..", ".#..."],
    No => ["#...#", ".#.#.", "..#..", ".#.#.", "#...#"],
    Happy => [".....", ".#.#.", ".....", "#...#", ".###."],
    Sad => [".....", ".#.#.", ".....", ".###.", "#...#"],
    Confused => [".....", ".#.#.", ".....", ".#.#.", "#.#.#"],
    Angry => ["#...#", ".#.#.", ".....", "#####", "#.#.#"],
    Asleep => [".....", "##.##", ".....", ".###.", "....."],
    Surprised => [".#.#.", ".....", "..#..", ".#.#.", "..#.."],
    Silly => ["#...#", ".....", "#####", "..#.#", "..###"],
    Fabulous => ["#####", "##.##", ".....", ".#.#.", "..#.."],
    Meh => ["##.##", ".....", "...#.", "..#..", ".#..."],
    TShirt => ["##.##", "#####", ".###.", ".###.", ".###."],
    Rollerskate => ["...##", "...##", "#####", "#####", ".#.#."],
    Duck => [".##..", "###..", ".####", ".###.", "....."],
    House => ["..#..", ".###.", "#####", ".###.", ".#.#."],
    Tortoise => [".....", ".###.", "#####", ".#.#.", "....."],
    Butterfly => ["##.##", "#####", "..#..", "#####", "##.##"],
    StickFigure => ["..#..", "#####", "..#..", ".#.#.", "#...#"],
    Ghost => [".###.", "#.#.#", "#####", "#####", "#.#.#"],
    Sword => ["..#..", "..#..", "..#..", ".###.", "..#.."],
    Giraffe => ["##...", ".#...", ".#...", ".###.", ".#.#."],
    Skull => [".###.", "#.#.#", "#####", ".###.", ".###."],
    Umbrella => [".###.", "#####", "..#..", "#.#..", "###.."],
    Snake => ["##...", "##.##", ".#.#.", ".###.", "....."],
    Rabbit => ["#.#..", "#.#..", "####.", "##.#.", "####."],
    Cow => ["#...#", "#...#", "#####", ".###.", "..#.."],
    QuarterNote => ["..#..", "..#..", "..#..", "###..", "###.."],
    EigthNote => ["..#..", "..##.", "..#.#", "###..", "###.."],
    Pitchfork => ["#.#.#", "#.#.#", "#####", "..#..", "..#.."],
    Target => ["..#..", ".###.", "##.##", ".###.", "..#.."],
    Triangle => [".....", "..#..", ".#.#.", "#####", "....."],
    LeftTriangle => ["#....", "##...", "#.#..", "#..#.", "#####"],
    Chessboard => [".#.#.", "#.#.#", ".#.#.", "#.#.#", ".#.#."],
    Diamond => ["..#..", ".#.#.", "#...#", ".#.#.", "..#.."],
    SmallDiamond => [".....", "..#..", ".#.#.", "..#..", "....."],
    Square => ["#####", "#...#", "#...#", "#...#", "#####"],
    SmallSquare => [".....", ".###.", ".#.#.", ".###.", "....."],
    Scissors => ["##..#", "##.#.", "..#..", "##.#.", "##..#"],
    North => ["..#..", ".###.", "#.#.#", "..#..", "..#.."],
    NorthEast => ["..###", "...##", "..#.#", ".#...", "#...."],
    East => ["..#..", "...#.", "#####", "...#.", "..#.."],
    SouthEast => ["#....", ".#...", "..#.#", "...##", "..###"],
    South => ["..#..", "..#..", "#.#.#", ".###.", "..#.."],
    SouthWest => ["....#", "...#.", "#.#..", "##...", "###.."],
    West => ["..#..", ".#...", "#####", ".#...", "..#.."],
    NorthWest => ["###..", "##...", "#.#..", "...#.", "....#"],
}

impl Symbol {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Icon number `index` (0-39)
    pub fn icon(index: usize) -> Option<Symbol> {
        Self::ALL[..ARROW_OFFSET as usize].get(index).copied()
    }

    /// Arrow number `index` (0-7), clockwise from north
    pub fn arrow(index: usize) -> Option<Symbol> {
        Self::ALL[ARROW_OFFSET as usize..].get(index).copied()
    }

    pub fn is_arrow(self) -> bool {
        self.index() as u32 >= ARROW_OFFSET
    }

    /// The private-use character standing for this symbol in text
    pub fn to_char(self) -> char {
        char::from_u32(SYMBOL_BASE + self.index() as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    pub fn from_char(c: char) -> Option<Symbol> {
        let index = (c as u32).checked_sub(SYMBOL_BASE)?;
        Self::ALL.get(index as usize).copied()
    }

    /// Symbol for a markup key (the first six characters of its name)
    pub fn from_key(key: &str) -> Option<Symbol> {
        let index = SYMBOL_KEYS.iter().position(|&k| k == key)?;
        Self::ALL.get(index).copied()
    }

    pub fn key(self) -> &'static str {
        SYMBOL_KEYS[self.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes_agree() {
        assert_eq!(Symbol::ALL.len(), SYMBOL_KEYS.len());
        assert!(!Symbol::Scissors.is_arrow());
        assert!(Symbol::North.is_arrow());
        assert_eq!(Symbol::North.index(), ARROW_OFFSET as usize);
        assert_eq!(Symbol::icon(39), Some(Symbol::Scissors));
        assert_eq!(Symbol::icon(40), None);
        assert_eq!(Symbol::arrow(2), Some(Symbol::East));
        assert_eq!(Symbol::arrow(8), None);
    }

    #[test]
    fn test_keys_name_their_symbols() {
        assert_eq!(Symbol::from_key("SmallH"), Some(Symbol::SmallHeart));
        assert_eq!(Symbol::from_key("NorthW"), Some(Symbol::NorthWest));
        assert_eq!(Symbol::from_key("Heartb"), None);
        for &symbol in Symbol::ALL {
            assert_eq!(Symbol::from_char(symbol.to_char()), Some(symbol));
        }
        assert_eq!(Symbol::from_char('A'), None);
    }

    #[test]
    fn test_bitmap_pixels() {
        let heart = Symbol::Heart.bitmap();
        assert_eq!(heart.rows(), [0b01010, 0b11111, 0b11111, 0b01110, 0b00100]);
        assert!(heart.pixel(1, 0));
        assert!(!heart.pixel(0, 0));
        assert!(!heart.pixel(5, 0));
        assert!(!heart.pixel(0, -1));
    }
}
