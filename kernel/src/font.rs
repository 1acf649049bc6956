use font8x8::{UnicodeFonts, BASIC_FONTS};

/// 8 rows, bit 0 is the leftmost column.
pub type Glyph = [u8; 8];

pub const BLANK: Glyph = [0; 8];

/// Bitmap for `ch`; anything outside the basic Latin table is blank.
pub fn glyph(ch: char) -> Glyph {
    BASIC_FONTS.get(ch).unwrap_or(BLANK)
}
