//! Shared fixtures for the in-crate tests.

use std::cell::RefCell;

use rift_engine::assets::{Atlas, AtlasEntry};
use rift_engine::coords::Viewport;
use rift_engine::paint::Rgb;
use rift_engine::render::{AssetGuard, DrawBatch, Painter, TextureId, SOLID};
use rift_engine::text::{Font, TextLayout};
use rift_engine::time::Tick;

use crate::navigation::Navigation;
use crate::scene::SceneContext;

#[derive(Default)]
pub(crate) struct TestCtx {
    pub nav: Navigation,
    pub background: Rgb,
    pub log: Vec<String>,
    pub drawn: RefCell<Vec<String>>,
}

impl SceneContext for TestCtx {
    fn navigation(&mut self) -> &mut Navigation {
        &mut self.nav
    }

    fn background(&mut self) -> &mut Rgb {
        &mut self.background
    }
}

/// A frame at `now` milliseconds, 16ms after the previous one.
pub(crate) fn frame(now: f64) -> Tick {
    Tick::new(now, 16.0)
}

/// Runs `f` with a painter over a tiny atlas holding the solid region and
/// the bit font, returning the recorded (flushed) batch.
pub(crate) fn with_painter(f: impl FnOnce(&mut Painter<'_>)) -> DrawBatch {
    let mut entries = vec![AtlasEntry::sprite(SOLID, 0, 0, 1, 1)];
    entries.push(Font::Bit.atlas_entry(0, 8));
    let atlas = Atlas::with_entries(TextureId(0), 1024, 64, &entries);

    let mut batch = DrawBatch::new();
    let mut layout = TextLayout::new();
    let mut guard = AssetGuard::default();
    let mut painter = Painter::new(&mut batch, &atlas, &mut layout, &mut guard, Viewport::new(512.0, 288.0));
    f(&mut painter);
    painter.flush();
    batch
}
