//! `{Name}` icon markup

use alloc::string::String;

use super::icons::Symbol;

/// Longest markup key, in characters
const KEY_LEN: usize = 6;

/// Replace every `{Name}` span naming a known symbol with its character
///
/// The key is the first six characters after `{`, so `{SmallHeart}` and
/// `{SmallH}` both resolve. Unknown spans, and a span left open at the end,
/// are kept literally.
pub fn tokenize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut span = String::new();

    for c in text.chars() {
        if c == '}' && !span.is_empty() {
            match Symbol::from_key(key(&span)) {
                Some(symbol) => out.push(symbol.to_char()),
                None => {
                    out.push_str(&span);
                    out.push(c);
                }
            }
            span.clear();
        } else if c == '{' || !span.is_empty() {
            span.push(c);
        } else {
            out.push(c);
        }
    }
    out.push_str(&span);
    out
}

fn key(span: &str) -> &str {
    let body = &span[1..];
    match body.char_indices().nth(KEY_LEN) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
