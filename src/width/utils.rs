//! Terminal text measuring helpers.
//!
//! Status text may arrive with ANSI styling baked in; those escapes must
//! neither reach the cell grid nor count towards the space a message needs.

use unicode_width::UnicodeWidthChar;

/// Remove ANSI escape sequences from `text`.
pub fn strip_ansi(text: &str) -> String {
    let clean = strip_ansi_escapes::strip(text);
    String::from_utf8_lossy(&clean).into_owned()
}

/// Number of grid cells `write_text` uses for `text` once escapes are gone.
/// Wide glyphs count double; zero-width ones still take a cell.
pub fn cell_count(text: &str) -> usize {
    strip_ansi(text)
        .chars()
        .map(|glyph| glyph.width().unwrap_or(1).max(1))
        .sum()
}
