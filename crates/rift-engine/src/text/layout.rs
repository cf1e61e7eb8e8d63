use std::collections::HashMap;

use crate::paint::Color;

use super::Font;

/// Horizontal alignment of each line relative to the draw position.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Parameters for one text draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextParams {
    pub font: Font,
    pub color: Color,
    pub align: Align,
    pub scale: u32,
    /// Wrap width in pixels; 0 keeps the text on one line.
    pub wrap: u32,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            font: Font::Bit,
            color: Color::WHITE,
            align: Align::Left,
            scale: 1,
            wrap: 0,
        }
    }
}

impl TextParams {
    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn wrap(mut self, wrap: u32) -> Self {
        self.wrap = wrap;
        self
    }

    #[inline]
    pub fn letter_size(&self) -> u32 {
        self.font.cell() * self.scale
    }

    /// Distance between consecutive line tops.
    #[inline]
    pub fn line_advance(&self) -> u32 {
        self.letter_size() + self.scale
    }
}

/// Pixel width of `chars` characters.
#[inline]
pub fn text_width(chars: usize, scale: u32, font: Font) -> f32 {
    (font.cell() * scale) as f32 * chars as f32
}

/// Pixel height of `lines` lines.
#[inline]
pub fn text_height(lines: usize, scale: u32, font: Font) -> f32 {
    ((font.cell() * scale + scale) * lines as u32) as f32
}

/// X offset applied to a line of `chars` characters for `params.align`.
pub fn align_offset(chars: usize, params: &TextParams) -> f32 {
    let line = (chars as u32 * params.letter_size()) as f32;
    let scale = params.scale as f32;
    match params.align {
        Align::Left => 0.0,
        Align::Center => ((-line + scale) / 2.0).trunc(),
        Align::Right => (-(line - scale)).trunc(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LayoutKey {
    text: String,
    font: Font,
    scale: u32,
    wrap: u32,
}

/// Word-wrapping with a per-(text, font, scale, wrap) line cache.
///
/// Texts are static labels or short-lived numbers, so the cache is never
/// evicted.
#[derive(Debug, Default)]
pub struct TextLayout {
    cache: HashMap<LayoutKey, Vec<String>>,
}

impl TextLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines `text` breaks into.
    ///
    /// Words are added greedily; the word that brings the joined line to
    /// `wrap` pixels or more starts the next line.
    pub fn lines(&mut self, text: &str, params: &TextParams) -> &[String] {
        let key = LayoutKey {
            text: text.to_string(),
            font: params.font,
            scale: params.scale,
            wrap: params.wrap,
        };
        self.cache
            .entry(key)
            .or_insert_with(|| wrap_words(text, params.letter_size() as usize, params.wrap as usize))
    }

    /// Number of lines without keeping a borrow of them.
    pub fn line_count(&mut self, text: &str, params: &TextParams) -> usize {
        self.lines(text, params).len()
    }

    #[inline]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

/// Uncached [`TextLayout::lines`], for sizing nodes before any frame exists.
pub fn wrap_lines(text: &str, params: &TextParams) -> Vec<String> {
    wrap_words(text, params.letter_size() as usize, params.wrap as usize)
}

fn wrap_words(text: &str, letter: usize, wrap: usize) -> Vec<String> {
    if wrap == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut line: Vec<&str> = Vec::new();
    for word in text.split(' ') {
        line.push(word);
        if line.join(" ").len() * letter >= wrap {
            if let Some(last) = line.pop() {
                lines.push(line.join(" "));
                line = vec![last];
            }
        }
    }
    if !line.is_empty() {
        lines.push(line.join(" "));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── measuring ─────────────────────────────────────────────────────────

    #[test]
    fn width_and_height_follow_cell_size() {
        assert_eq!(text_width(5, 2, Font::Bit), 60.0);
        assert_eq!(text_height(3, 1, Font::Gb), 27.0);
    }

    #[test]
    fn center_offset_truncates_toward_zero() {
        let p = TextParams::default().align(Align::Center);
        // (-30 + 1) / 2 = -14.5
        assert_eq!(align_offset(5, &p), -14.0);
    }

    #[test]
    fn right_offset_leaves_one_scale_unit() {
        let p = TextParams::default().align(Align::Right).scale(2);
        assert_eq!(align_offset(3, &p), -34.0);
    }

    // ── wrapping ──────────────────────────────────────────────────────────

    #[test]
    fn zero_wrap_keeps_a_single_line() {
        let mut l = TextLayout::new();
        assert_eq!(l.lines("one two three", &TextParams::default()), ["one two three"]);
    }

    #[test]
    fn word_reaching_the_wrap_width_moves_down() {
        let mut l = TextLayout::new();
        // "aaa bbb" is 7 chars * 6 px = 42 >= 40.
        let p = TextParams::default().wrap(40);
        assert_eq!(l.lines("aaa bbb cc", &p), ["aaa", "bbb cc"]);
    }

    #[test]
    fn results_are_cached_per_scale() {
        let mut l = TextLayout::new();
        let p = TextParams::default().wrap(100);
        l.lines("hello there", &p);
        l.lines("hello there", &p);
        assert_eq!(l.cached(), 1);
        l.lines("hello there", &p.scale(2));
        assert_eq!(l.cached(), 2);
    }
}
