//! Text rendering
//!
//! ```text
//! "Hi {Heart}" ──tokenize──▶ "Hi \u{E000}" ──compose──▶ plane pair
//!                                              │
//!                              FontProvider ───┘  (icons/arrows: Bitmap)
//! ```

pub mod compose;
pub mod font;
pub mod icons;
pub mod tokenize;

pub use compose::{draw_char, draw_text, draw_tokens, measure_text, measure_tokens, set_full_image, set_image};
pub use font::{FontProvider, Glyph, MicroFont};
pub use icons::{Bitmap, Symbol};
pub use tokenize::tokenize;
