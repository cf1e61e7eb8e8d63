use std::collections::HashMap;

use crate::render::{TextureId, UvRect};

use super::AssetError;

/// A named rectangle of an atlas texture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Region {
    pub texture: TextureId,
    /// Size in atlas pixels; the drawn size at scale 1.
    pub w: f32,
    pub h: f32,
    pub uv: UvRect,
}

/// How a strip of the atlas image is cut into regions.
#[derive(Debug, Clone, PartialEq)]
pub enum AtlasEntry {
    Sprite { name: String, x: u32, y: u32, w: u32, h: u32 },
    /// Consecutive frames of equal size starting at `(x, y)`, one per name.
    Row { names: Vec<String>, x: u32, y: u32, w: u32, h: u32 },
    /// Consecutive glyph cells, one per character of `glyphs`.
    Font { name: String, glyphs: String, x: u32, y: u32, w: u32, h: u32 },
}

impl AtlasEntry {
    pub fn sprite(name: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        AtlasEntry::Sprite { name: name.into(), x, y, w, h }
    }

    pub fn row<S: Into<String>>(names: impl IntoIterator<Item = S>, x: u32, y: u32, w: u32, h: u32) -> Self {
        AtlasEntry::Row { names: names.into_iter().map(Into::into).collect(), x, y, w, h }
    }
}

/// Name-indexed regions of one uploaded texture.
///
/// Lookups are plain map reads; whether a miss is fatal is left to the
/// caller (see `render::MissingAssetPolicy`).
#[derive(Debug)]
pub struct Atlas {
    texture: TextureId,
    width: u32,
    height: u32,
    sprites: HashMap<String, Region>,
    fonts: HashMap<String, HashMap<char, Region>>,
}

impl Atlas {
    pub fn new(texture: TextureId, width: u32, height: u32) -> Self {
        Self {
            texture,
            width,
            height,
            sprites: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    pub fn with_entries<'e>(
        texture: TextureId,
        width: u32,
        height: u32,
        entries: impl IntoIterator<Item = &'e AtlasEntry>,
    ) -> Self {
        let mut atlas = Self::new(texture, width, height);
        for entry in entries {
            atlas.insert(entry);
        }
        atlas
    }

    #[inline]
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Cuts `entry` into regions. Rows and fonts stop at the image's right
    /// edge even if names remain.
    pub fn insert(&mut self, entry: &AtlasEntry) {
        match entry {
            AtlasEntry::Sprite { name, x, y, w, h } => {
                let region = self.region(*x, *y, *w, *h);
                self.sprites.insert(name.clone(), region);
            }
            AtlasEntry::Row { names, x, y, w, h } => {
                for (i, name) in names.iter().enumerate() {
                    let ox = x + i as u32 * w;
                    if ox >= self.width {
                        log::warn!("atlas row {name:?} starts past the image edge");
                        break;
                    }
                    let region = self.region(ox, *y, *w, *h);
                    self.sprites.insert(name.clone(), region);
                }
            }
            AtlasEntry::Font { name, glyphs, x, y, w, h } => {
                let mut font = HashMap::new();
                for (i, ch) in glyphs.chars().enumerate() {
                    let ox = x + i as u32 * w;
                    if ox >= self.width {
                        break;
                    }
                    font.insert(ch, self.region(ox, *y, *w, *h));
                }
                self.fonts.entry(name.clone()).or_default().extend(font);
            }
        }
    }

    pub fn sprite(&self, name: &str) -> Result<&Region, AssetError> {
        self.sprites
            .get(name)
            .ok_or_else(|| AssetError::UnknownTexture(name.to_string()))
    }

    pub fn glyph(&self, font: &str, glyph: char) -> Result<&Region, AssetError> {
        self.fonts
            .get(font)
            .and_then(|f| f.get(&glyph))
            .ok_or_else(|| AssetError::UnknownGlyph { font: font.to_string(), glyph })
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.sprites.contains_key(name)
    }

    fn region(&self, x: u32, y: u32, w: u32, h: u32) -> Region {
        let iw = self.width as f32;
        let ih = self.height as f32;
        Region {
            texture: self.texture,
            w: w as f32,
            h: h as f32,
            uv: UvRect::new(
                x as f32 / iw,
                y as f32 / ih,
                (x + w) as f32 / iw,
                (y + h) as f32 / ih,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn atlas() -> Atlas {
        Atlas::new(TextureId(0), 64, 32)
    }

    // ── sprites ───────────────────────────────────────────────────────────

    #[test]
    fn sprite_uv_is_normalized_by_image_size() {
        let mut a = atlas();
        a.insert(&AtlasEntry::sprite("solid", 16, 8, 16, 8));
        let r = a.sprite("solid").unwrap();
        assert_eq!(r.uv, UvRect::new(0.25, 0.25, 0.5, 0.5));
        assert_eq!((r.w, r.h), (16.0, 8.0));
    }

    #[test]
    fn row_advances_by_frame_width() {
        let mut a = atlas();
        a.insert(&AtlasEntry::row(["a", "b"], 8, 0, 8, 8));
        assert_eq!(a.sprite("b").unwrap().uv.u0, 0.25);
    }

    #[test]
    fn row_stops_at_image_edge() {
        let mut a = atlas();
        a.insert(&AtlasEntry::row(["a", "b", "c"], 32, 0, 16, 8));
        assert!(a.contains("b"));
        assert!(!a.contains("c"));
    }

    #[test]
    fn missing_sprite_is_reported_by_name() {
        assert_eq!(
            atlas().sprite("card_back").unwrap_err(),
            AssetError::UnknownTexture("card_back".into())
        );
    }

    // ── fonts ─────────────────────────────────────────────────────────────

    #[test]
    fn font_maps_each_character_to_a_cell() {
        let mut a = atlas();
        a.insert(&AtlasEntry::Font { name: "bit".into(), glyphs: "ab".into(), x: 0, y: 16, w: 4, h: 6 });
        assert_eq!(a.glyph("bit", 'b').unwrap().uv.u0, 4.0 / 64.0);
        assert!(a.glyph("bit", 'c').is_err());
        assert!(a.glyph("gb", 'a').is_err());
    }
}
