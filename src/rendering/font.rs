//! Embedded 8x8 bitmap face used for all template typography.
//!
//! Each glyph occupies a square cell of `size` logical pixels; one bitmap
//! bit maps to a `size / 8` square. Metrics are therefore monospace and
//! fully deterministic across platforms.

use font8x8::{UnicodeFonts, BASIC_FONTS, GREEK_FONTS, LATIN_FONTS, MISC_FONTS};

/// Bitmap rows per glyph (and bits per row)
pub const GLYPH_CELLS: usize = 8;

/// Replace characters the face cannot draw with close ASCII equivalents.
fn normalize(ch: char) -> char {
    match ch {
        '\u{2014}' | '\u{2013}' | '\u{2012}' | '\u{2212}' => '-',
        '\u{2018}' | '\u{2019}' | '\u{201a}' | '\u{2032}' => '\'',
        '\u{201c}' | '\u{201d}' | '\u{201e}' | '\u{2033}' => '"',
        '\u{2026}' => '.',
        '\u{00a0}' => ' ',
        other => other,
    }
}

/// Bitmap rows for `ch`; bit 0 of each row is the leftmost pixel.
pub fn glyph(ch: char) -> [u8; 8] {
    let ch = normalize(ch);
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
        .or_else(|| MISC_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Horizontal distance from one glyph origin to the next.
pub fn advance(size: f32, tracking: f32) -> f32 {
    size + tracking
}

/// Width of a single line of text; trailing tracking is not counted.
pub fn measure(text: &str, size: f32, tracking: f32) -> f32 {
    let n = text.chars().count();
    if n == 0 {
        return 0.0;
    }
    n as f32 * size + (n - 1) as f32 * tracking
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_glyphs_have_ink() {
        assert!(glyph('A').iter().any(|row| *row != 0));
        assert_eq!(glyph(' '), [0; 8]);
    }

    #[test]
    fn typographic_dash_falls_back_to_hyphen() {
        assert_eq!(glyph('\u{2014}'), glyph('-'));
    }

    #[test]
    fn measure_counts_chars_not_bytes() {
        assert_eq!(measure("abc", 10.0, 2.0), 34.0);
        assert_eq!(measure("é", 10.0, 2.0), 10.0);
        assert_eq!(measure("", 10.0, 2.0), 0.0);
    }
}
