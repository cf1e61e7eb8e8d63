use std::path::Path;

use crate::paint::Color;

use super::AssetError;

/// CPU-side RGBA8 canvas that atlas images are painted into before upload.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl AtlasImage {
    /// A fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Decodes a PNG from disk.
    pub fn load_png(path: &Path) -> Result<Self, AssetError> {
        let decoded = image::open(path).map_err(|e| AssetError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let rgba = decoded.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Writes one pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.pixels[i..i + 4].copy_from_slice(&[color.r(), color.g(), color.b(), color.a()]);
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let p = &self.pixels[i..i + 4];
        Some(Color::from_rgba(p[0], p[1], p[2], p[3]))
    }

    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color) {
        for py in y..y.saturating_add(h) {
            for px in x..x.saturating_add(w) {
                self.set(px, py, color);
            }
        }
    }

    /// One-pixel outline just inside `(x, y, w, h)`.
    pub fn stroke_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color) {
        if w == 0 || h == 0 {
            return;
        }
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_outside_the_canvas_are_dropped() {
        let mut img = AtlasImage::new(2, 2);
        img.fill_rect(1, 1, 5, 5, Color::WHITE);
        assert_eq!(img.get(1, 1), Some(Color::WHITE));
        assert_eq!(img.get(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(img.get(2, 2), None);
    }

    #[test]
    fn stroke_leaves_the_inside_untouched() {
        let mut img = AtlasImage::new(4, 4);
        img.stroke_rect(0, 0, 4, 4, Color::BLACK);
        assert_eq!(img.get(0, 3), Some(Color::BLACK));
        assert_eq!(img.get(1, 1), Some(Color::TRANSPARENT));
    }
}
