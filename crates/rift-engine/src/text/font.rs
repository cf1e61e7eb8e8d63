use crate::assets::{AtlasEntry, AtlasImage};
use crate::paint::Color;

/// The two built-in bitmap fonts.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Font {
    /// Thin 3x5 glyphs on a 6 px advance.
    #[default]
    Bit,
    /// Wide 6x7 glyphs on an 8 px advance.
    Gb,
}

impl Font {
    /// Horizontal advance per character at scale 1.
    #[inline]
    pub const fn cell(self) -> u32 {
        match self {
            Font::Bit => 6,
            Font::Gb => 8,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Font::Bit => "bit",
            Font::Gb => "gb",
        }
    }

    /// Size of one rasterized glyph cell in the atlas.
    #[inline]
    pub const fn glyph_size(self) -> (u32, u32) {
        match self {
            Font::Bit => (3, 5),
            Font::Gb => (6, 7),
        }
    }

    /// Atlas entry describing this font's glyph strip at `(x, y)`.
    pub fn atlas_entry(self, x: u32, y: u32) -> AtlasEntry {
        let (w, h) = self.glyph_size();
        AtlasEntry::Font { name: self.name().to_string(), glyphs: glyph_chars(), x, y, w, h }
    }

    /// Paints every glyph in white, left to right from `(x, y)`.
    ///
    /// Returns the strip width in pixels.
    pub fn rasterize(self, image: &mut AtlasImage, x: u32, y: u32) -> u32 {
        let (w, _) = self.glyph_size();
        let mut ox = x;
        for ch in glyph_chars().chars() {
            let Some(bits) = glyph_bits(ch) else { continue; };
            for (row, src_row) in self.rows().iter().enumerate() {
                for col in 0..3u32 {
                    let bit = 14 - (*src_row * 3 + col);
                    if (bits >> bit) & 1 == 0 {
                        continue;
                    }
                    match self {
                        Font::Bit => image.set(ox + col, y + row as u32, Color::WHITE),
                        Font::Gb => image.fill_rect(ox + col * 2, y + row as u32, 2, 1, Color::WHITE),
                    }
                }
            }
            ox += w;
        }
        ox - x
    }

    // Source row of the 3x5 pattern for each output row.
    fn rows(self) -> &'static [u32] {
        match self {
            Font::Bit => &[0, 1, 2, 3, 4],
            Font::Gb => &[0, 1, 1, 2, 3, 3, 4],
        }
    }
}

/// Every character the built-in fonts can draw, in atlas order.
///
/// Upper-case letters reuse the lower-case shapes.
pub fn glyph_chars() -> String {
    GLYPH_TABLE
        .iter()
        .map(|(c, _)| *c)
        .chain('A'..='Z')
        .collect()
}

/// 3x5 bitmap for `ch`, row-major with the top-left pixel in bit 14.
pub fn glyph_bits(ch: char) -> Option<u16> {
    let ch = ch.to_ascii_lowercase();
    GLYPH_TABLE.iter().find(|(c, _)| *c == ch).map(|(_, bits)| *bits)
}

const GLYPH_TABLE: [(char, u16); 55] = [
    ('a', 0b010_101_111_101_101),
    ('b', 0b110_101_110_101_110),
    ('c', 0b011_100_100_100_011),
    ('d', 0b110_101_101_101_110),
    ('e', 0b111_100_110_100_111),
    ('f', 0b111_100_110_100_100),
    ('g', 0b011_100_101_101_011),
    ('h', 0b101_101_111_101_101),
    ('i', 0b111_010_010_010_111),
    ('j', 0b001_001_001_101_010),
    ('k', 0b101_101_110_101_101),
    ('l', 0b100_100_100_100_111),
    ('m', 0b101_111_111_101_101),
    ('n', 0b110_101_101_101_101),
    ('o', 0b010_101_101_101_010),
    ('p', 0b110_101_110_100_100),
    ('q', 0b010_101_101_110_011),
    ('r', 0b110_101_110_101_101),
    ('s', 0b011_100_010_001_110),
    ('t', 0b111_010_010_010_010),
    ('u', 0b101_101_101_101_111),
    ('v', 0b101_101_101_101_010),
    ('w', 0b101_101_111_111_101),
    ('x', 0b101_101_010_101_101),
    ('y', 0b101_101_010_010_010),
    ('z', 0b111_001_010_100_111),
    ('0', 0b111_101_101_101_111),
    ('1', 0b010_110_010_010_111),
    ('2', 0b110_001_010_100_111),
    ('3', 0b110_001_010_001_110),
    ('4', 0b101_101_111_001_001),
    ('5', 0b111_100_110_001_110),
    ('6', 0b011_100_111_101_111),
    ('7', 0b111_001_010_010_010),
    ('8', 0b111_101_111_101_111),
    ('9', 0b111_101_111_001_110),
    ('.', 0b000_000_000_000_010),
    (',', 0b000_000_000_010_100),
    ('\'', 0b010_010_000_000_000),
    ('!', 0b010_010_010_000_010),
    ('?', 0b110_001_010_000_010),
    (':', 0b000_010_000_010_000),
    (';', 0b000_010_000_010_100),
    ('+', 0b000_010_111_010_000),
    ('-', 0b000_000_111_000_000),
    ('=', 0b000_111_000_111_000),
    ('*', 0b000_101_010_101_000),
    ('/', 0b001_001_010_100_100),
    ('(', 0b001_010_010_010_001),
    (')', 0b100_010_010_010_100),
    ('<', 0b001_010_100_010_001),
    ('>', 0b100_010_001_010_100),
    ('%', 0b101_001_010_100_101),
    ('_', 0b000_000_000_000_111),
    ('"', 0b101_101_000_000_000),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn upper_case_shares_lower_case_shape() {
        assert_eq!(glyph_bits('K'), glyph_bits('k'));
        assert_eq!(glyph_bits('~'), None);
    }

    #[test]
    fn glyph_strip_matches_atlas_entry() {
        let mut img = AtlasImage::new(512, 8);
        let width = Font::Bit.rasterize(&mut img, 0, 0);
        assert_eq!(width, glyph_chars().chars().count() as u32 * 3);

        // 'a' top row is 010.
        assert_eq!(img.get(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(img.get(1, 0), Some(Color::WHITE));
    }

    #[test]
    fn gb_glyphs_are_doubled_horizontally() {
        let mut img = AtlasImage::new(1024, 8);
        Font::Gb.rasterize(&mut img, 0, 0);
        assert_eq!(img.get(2, 0), Some(Color::WHITE));
        assert_eq!(img.get(3, 0), Some(Color::WHITE));
        assert_eq!(img.get(4, 0), Some(Color::TRANSPARENT));
    }
}
