use std::collections::HashSet;

use crate::assets::{AssetError, Atlas, Region};
use crate::coords::Viewport;
use crate::paint::{Color, Rgb};
use crate::text::{align_offset, TextLayout, TextParams};

use super::{DrawBatch, Quad};

/// Name of the 1x1-ish white region used for solid fills.
pub const SOLID: &str = "solid";

const PLACEHOLDER: Color = Color::from_rgba(0xFF, 0x00, 0xFF, 0xFF);
const PLACEHOLDER_SIZE: f32 = 16.0;

/// What happens when a draw names a texture or glyph the atlas lacks.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum MissingAssetPolicy {
    /// Record the error; the frame loop stops at the end of the frame.
    Fail,
    /// Draw a magenta block and warn once per name.
    #[default]
    Placeholder,
}

/// Frame-spanning bookkeeping for missing assets.
#[derive(Debug, Default)]
pub struct AssetGuard {
    policy: MissingAssetPolicy,
    fault: Option<AssetError>,
    warned: HashSet<String>,
}

impl AssetGuard {
    pub fn new(policy: MissingAssetPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    #[inline]
    pub fn policy(&self) -> MissingAssetPolicy {
        self.policy
    }

    /// First lookup failure recorded under [`MissingAssetPolicy::Fail`].
    pub fn take_fault(&mut self) -> Option<AssetError> {
        self.fault.take()
    }

    // Returns true when a placeholder should be drawn.
    fn miss(&mut self, err: AssetError) -> bool {
        match self.policy {
            MissingAssetPolicy::Fail => {
                if self.fault.is_none() {
                    log::error!("{err}");
                    self.fault = Some(err);
                }
                false
            }
            MissingAssetPolicy::Placeholder => {
                if self.warned.insert(err.to_string()) {
                    log::warn!("{err}, drawing placeholder");
                }
                true
            }
        }
    }
}

/// Drawing facade handed to nodes for one frame.
///
/// Resolves atlas names, lays out text, and records quads into the frame's
/// [`DrawBatch`]. The tint is global: anything that changes it for a scoped
/// draw restores white afterwards.
pub struct Painter<'a> {
    batch: &'a mut DrawBatch,
    atlas: &'a Atlas,
    text: &'a mut TextLayout,
    guard: &'a mut AssetGuard,
    screen: Viewport,
}

impl<'a> Painter<'a> {
    pub fn new(
        batch: &'a mut DrawBatch,
        atlas: &'a Atlas,
        text: &'a mut TextLayout,
        guard: &'a mut AssetGuard,
        screen: Viewport,
    ) -> Self {
        Self { batch, atlas, text, guard, screen }
    }

    #[inline]
    pub fn screen(&self) -> Viewport {
        self.screen
    }

    // ── textures ──────────────────────────────────────────────────────────

    pub fn draw_texture(&mut self, name: &str, x: f32, y: f32) {
        self.draw_texture_scaled(name, x, y, 1.0, 1.0);
    }

    pub fn draw_texture_scaled(&mut self, name: &str, x: f32, y: f32, sx: f32, sy: f32) {
        match self.atlas.sprite(name) {
            Ok(region) => {
                let region = *region;
                self.push_region(&region, x, y, region.w, region.h, sx, sy);
            }
            Err(err) => {
                if self.guard.miss(err) {
                    self.placeholder(x, y, PLACEHOLDER_SIZE * sx, PLACEHOLDER_SIZE * sy);
                }
            }
        }
    }

    /// Solid rectangle in `color`. Sizes covering at least half the screen
    /// grow by one pixel so full-screen fills leave no seam.
    pub fn draw_quad(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let w = if w >= self.screen.width / 2.0 { w + 1.0 } else { w };
        let h = if h >= self.screen.height / 2.0 { h + 1.0 } else { h };
        self.solid(x, y, w, h, color);
    }

    /// Fills the logical screen with the background colour.
    pub fn clear(&mut self) {
        let Rgb { r, g, b } = self.batch.background();
        self.solid(0.0, 0.0, self.screen.width, self.screen.height, Color::from_rgba(r, g, b, 0xFF));
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Draws `text` line by line from `(x, y)` and returns the line count.
    ///
    /// Spaces advance without drawing. The tint is white afterwards.
    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, params: TextParams) -> usize {
        let letter = params.letter_size() as f32;
        let advance = params.line_advance() as f32;
        let scale = params.scale as f32;
        let font = params.font.name();

        // Owned copy so glyph lookups can borrow self mutably.
        let lines = self.text.lines(text, &params).to_vec();

        self.batch.set_tint(params.color);
        let mut y = y;
        for line in &lines {
            let mut gx = x + align_offset(line.chars().count(), &params);
            for ch in line.chars() {
                if ch != ' ' {
                    match self.atlas.glyph(font, ch) {
                        Ok(region) => {
                            let region = *region;
                            self.push_region(&region, gx, y, region.w, region.h, scale, scale);
                        }
                        Err(err) => {
                            if self.guard.miss(err) {
                                let tint = self.batch.tint();
                                self.solid(gx, y, letter - scale, letter - scale, PLACEHOLDER);
                                self.batch.set_tint(tint);
                            }
                        }
                    }
                }
                gx += letter;
            }
            y += advance;
        }
        self.batch.set_tint(Color::WHITE);
        lines.len()
    }

    /// Line count `text` would occupy, without drawing.
    pub fn line_count(&mut self, text: &str, params: TextParams) -> usize {
        self.text.line_count(text, &params)
    }

    // ── global state ──────────────────────────────────────────────────────

    #[inline]
    pub fn set_tint(&mut self, tint: Color) {
        self.batch.set_tint(tint);
    }

    #[inline]
    pub fn tint(&self) -> Color {
        self.batch.tint()
    }

    #[inline]
    pub fn set_background(&mut self, rgb: Rgb) {
        self.batch.set_background(rgb);
    }

    #[inline]
    pub fn background(&self) -> Rgb {
        self.batch.background()
    }

    /// Closes the pending batch. Call once after the last draw of the frame.
    pub fn flush(&mut self) {
        self.batch.flush();
    }

    // ── internals ─────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn push_region(&mut self, region: &Region, x: f32, y: f32, w: f32, h: f32, sx: f32, sy: f32) {
        self.batch.push(Quad {
            texture: region.texture,
            x,
            y,
            w,
            h,
            uv: region.uv,
            sx,
            sy,
        });
    }

    fn solid(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let region = match self.atlas.sprite(SOLID) {
            Ok(region) => *region,
            Err(err) => {
                self.guard.miss(err);
                return;
            }
        };
        let tint = self.batch.tint();
        self.batch.set_tint(color);
        self.push_region(&region, x, y, w, h, 1.0, 1.0);
        self.batch.set_tint(tint);
    }

    fn placeholder(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.solid(x, y, w, h, PLACEHOLDER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AtlasEntry;
    use crate::render::{Batch, TextureId};
    use crate::text::{Align, Font};
    use pretty_assertions::assert_eq;

    const SCREEN: Viewport = Viewport::new(512.0, 288.0);

    struct Fixture {
        batch: DrawBatch,
        atlas: Atlas,
        text: TextLayout,
        guard: AssetGuard,
    }

    impl Fixture {
        fn new(policy: MissingAssetPolicy) -> Self {
            let mut atlas = Atlas::new(TextureId(0), 512, 64);
            atlas.insert(&AtlasEntry::sprite(SOLID, 0, 0, 1, 1));
            atlas.insert(&AtlasEntry::sprite("card_back", 8, 0, 32, 48));
            atlas.insert(&Font::Bit.atlas_entry(0, 50));
            Self { batch: DrawBatch::new(), atlas, text: TextLayout::new(), guard: AssetGuard::new(policy) }
        }

        fn painter(&mut self) -> Painter<'_> {
            Painter::new(&mut self.batch, &self.atlas, &mut self.text, &mut self.guard, SCREEN)
        }

        fn quads(&mut self) -> Vec<Batch> {
            self.batch.flush();
            self.batch.batches().to_vec()
        }
    }

    fn top_lefts(batches: &[Batch]) -> Vec<[f32; 2]> {
        batches.iter().flat_map(|b| b.vertices.iter().step_by(4).map(|v| v.pos)).collect()
    }

    // ── quads ─────────────────────────────────────────────────────────────

    #[test]
    fn half_screen_quads_grow_one_pixel() {
        let mut f = Fixture::new(MissingAssetPolicy::Fail);
        f.painter().draw_quad(0.0, 0.0, 256.0, 10.0, Color::BLACK);
        let b = f.quads();
        assert_eq!(b[0].vertices[1].pos, [257.0, 10.0]);
    }

    #[test]
    fn quad_colour_does_not_leak_into_tint() {
        let mut f = Fixture::new(MissingAssetPolicy::Fail);
        let mut p = f.painter();
        p.draw_quad(0.0, 0.0, 4.0, 4.0, Color(0x88000000));
        assert_eq!(p.tint(), Color::WHITE);
        let b = f.quads();
        assert_eq!(b[0].vertices[0].color, 0x88000000);
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[test]
    fn spaces_advance_without_drawing() {
        let mut f = Fixture::new(MissingAssetPolicy::Fail);
        let lines = f.painter().draw_text("a b", 10.0, 5.0, TextParams::default());
        assert_eq!(lines, 1);
        assert_eq!(top_lefts(&f.quads()), vec![[10.0, 5.0], [22.0, 5.0]]);
    }

    #[test]
    fn centered_lines_stack_by_line_advance() {
        let mut f = Fixture::new(MissingAssetPolicy::Fail);
        let params = TextParams::default().align(Align::Center).wrap(20);
        let lines = f.painter().draw_text("ab cd", 100.0, 0.0, params);
        assert_eq!(lines, 2);
        // "ab" is 12 px wide: offset trunc((-12 + 1) / 2) = -5.
        assert_eq!(top_lefts(&f.quads()), vec![[95.0, 0.0], [101.0, 0.0], [95.0, 7.0], [101.0, 7.0]]);
    }

    #[test]
    fn text_resets_tint_to_white() {
        let mut f = Fixture::new(MissingAssetPolicy::Fail);
        let mut p = f.painter();
        p.set_tint(Color(0xFF0000FF));
        p.draw_text("a", 0.0, 0.0, TextParams::default().color(Color(0xFF00FF00)));
        assert_eq!(p.tint(), Color::WHITE);
    }

    // ── missing assets ────────────────────────────────────────────────────

    #[test]
    fn fail_policy_records_first_miss_and_draws_nothing() {
        let mut f = Fixture::new(MissingAssetPolicy::Fail);
        let mut p = f.painter();
        p.draw_texture("nope", 0.0, 0.0);
        p.draw_texture("other", 0.0, 0.0);
        assert!(f.quads().is_empty());
        assert_eq!(f.guard.take_fault(), Some(AssetError::UnknownTexture("nope".into())));
    }

    #[test]
    fn placeholder_policy_draws_magenta_block() {
        let mut f = Fixture::new(MissingAssetPolicy::Placeholder);
        f.painter().draw_texture_scaled("nope", 2.0, 3.0, 2.0, 1.0);
        let b = f.quads();
        assert_eq!(b[0].vertices[0].color, PLACEHOLDER.abgr());
        assert_eq!(b[0].vertices[1].pos, [34.0, 19.0]);
        assert_eq!(f.guard.take_fault(), None);
    }

    #[test]
    fn known_texture_uses_region_size() {
        let mut f = Fixture::new(MissingAssetPolicy::Fail);
        f.painter().draw_texture("card_back", 1.0, 1.0);
        assert_eq!(f.quads()[0].vertices[1].pos, [33.0, 49.0]);
    }
}
