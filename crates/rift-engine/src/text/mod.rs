//! Bitmap-font text: glyph tables, measuring and word wrapping.

mod font;
mod layout;

pub use font::{glyph_bits, glyph_chars, Font};
pub use layout::{align_offset, text_height, text_width, Align, TextLayout, TextParams, wrap_lines};
