//! Metrics and character encoding for the standard Helvetica font.

/// The name the font is registered under in each page's resources.
pub const FONT_RESOURCE_NAME: &str = "F1";

/// The PostScript name of the standard font used for all text.
pub const BASE_FONT: &str = "Helvetica";

/// Glyph widths in thousandths of an em for the printable ASCII characters ' ' to '~'.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' to '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' to '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' to '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' to 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' to 'Z'
    278, 278, 278, 469, 556, 333, // '[' to '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' to 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' to 'z'
    334, 260, 334, 584, // '{' to '~'
];

/// Width used for encodable characters outside printable ASCII, e.g. 'é'.
const DEFAULT_WIDTH: u16 = 556;

/// The width of `text` in points when set at `font_size`.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();

    units as f32 * font_size / 1000.0
}

fn char_width(c: char) -> u16 {
    match c {
        ' '..='~' => ASCII_WIDTHS[c as usize - ' ' as usize],
        _ => DEFAULT_WIDTH,
    }
}

/// Encode `text` as single-byte WinAnsi text for a PDF string.
///
/// Only printable ASCII and the Latin-1 range U+00A0 to U+00FF are accepted,
/// since these map to the same byte in WinAnsi.
///
/// # Errors
/// Returns the first character that cannot be encoded.
pub fn encode_text(text: &str) -> Result<Vec<u8>, char> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => Ok(c as u8),
            _ => Err(c),
        })
        .collect()
}
