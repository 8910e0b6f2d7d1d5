//! Lookup tables built at compile time

/// `FILL[n]` has the low `n` bits set
pub const FILL: [u16; 17] = fill_table();

/// Reverses bits 0..=6 of a byte, bit 7 is kept in place
pub const REVERSE7: [u8; 256] = reverse7_table();

/// Column to LED-control register for the column-packed wiring
pub const COLUMN_MAP: [u8; 18] = column_map();

/// LED-control register to column (inverse of [`COLUMN_MAP`])
pub const COLUMN_ORDER: [u8; 18] = invert(&COLUMN_MAP);

/// Identity register order for the row-packed wiring
pub const IDENTITY: [u8; 18] = identity();

const fn fill_table() -> [u16; 17] {
    let mut table = [0u16; 17];
    let mut n = 0;
    while n < 17 {
        table[n] = ((1u32 << n) - 1) as u16;
        n += 1;
    }
    table
}

const fn reverse7_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut b = 0;
    while b < 256 {
        let byte = b as u8;
        table[b] = (byte.reverse_bits() >> 1) | (byte & 0x80);
        b += 1;
    }
    table
}

// Columns 0..=8 sit on the even registers counting down from 16,
// columns 9.. on the odd registers counting up from 1.
const fn column_map() -> [u8; 18] {
    let mut map = [0u8; 18];
    let mut c = 0;
    while c < 18 {
        map[c] = if c <= 8 {
            (2 * (8 - c)) as u8
        } else {
            (2 * (c - 9) + 1) as u8
        };
        c += 1;
    }
    map
}

const fn invert(map: &[u8; 18]) -> [u8; 18] {
    let mut inverse = [0u8; 18];
    let mut i = 0;
    while i < 18 {
        inverse[map[i] as usize] = i as u8;
        i += 1;
    }
    inverse
}

const fn identity() -> [u8; 18] {
    let mut table = [0u8; 18];
    let mut i = 0;
    while i < 18 {
        table[i] = i as u8;
        i += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_masks() {
        assert_eq!(FILL[0], 0);
        assert_eq!(FILL[3], 0b111);
        assert_eq!(FILL[16], 0xFFFF);
    }

    #[test]
    fn test_reverse_low_seven_bits() {
        assert_eq!(&REVERSE7[..9], &[0x00, 0x40, 0x20, 0x60, 0x10, 0x50, 0x30, 0x70, 0x08]);
        assert_eq!(REVERSE7[0x80], 0x80);
        assert_eq!(REVERSE7[0x7F], 0x7F);
        for b in 0..=255u8 {
            assert_eq!(REVERSE7[REVERSE7[b as usize] as usize], b);
        }
    }

    #[test]
    fn test_column_wiring() {
        assert_eq!(&COLUMN_MAP[..10], &[16, 14, 12, 10, 8, 6, 4, 2, 0, 1]);
        assert_eq!(COLUMN_MAP[16], 15);
        assert_eq!(&COLUMN_ORDER[..6], &[8, 9, 7, 10, 6, 11]);
        for c in 0..18 {
            assert_eq!(COLUMN_ORDER[COLUMN_MAP[c] as usize] as usize, c);
        }
    }
}
