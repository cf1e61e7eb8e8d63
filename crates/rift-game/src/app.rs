use rift_engine::assets::{Atlas, AtlasImage};
use rift_engine::coords::{Vec2, Viewport};
use rift_engine::core::{App as EngineApp, AppControl, FrameCtx};
use rift_engine::input::MouseButton;
use rift_engine::paint::Color;
use rift_engine::render::{AssetGuard, DrawBatch, Painter, SpriteRenderer};
use rift_engine::text::{Align, TextLayout, TextParams};
use rift_engine::time::Tick;
use rift_scene::{SceneError, SceneManager};

use crate::assets::{self, POINTER};
use crate::config::GameConfig;
use crate::context::GameCtx;
use crate::rng::GameRng;
use crate::scenes;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const SCREEN: Viewport = Viewport::new(SCREEN_WIDTH, SCREEN_HEIGHT);
const UNFOCUSED_OVERLAY: Color = Color(0xCC00_0000);
const BLINK_MS: f64 = 750.0;

/// What the window reported for one frame, in logical coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub focused: bool,
    pub pointer: Option<Vec2>,
    pub mouse_down: bool,
    pub pressed: bool,
    /// The press came from a touch screen.
    pub touch: bool,
    pub released: bool,
}

// ── RiftApp ───────────────────────────────────────────────────────────────

/// Drives the scene stack from the engine's frame loop.
///
/// The atlas image is painted (or loaded) up front and uploaded on the first
/// frame, once a GPU context exists.
pub struct RiftApp {
    ctx: GameCtx,
    manager: SceneManager<GameCtx>,

    pending_image: Option<AtlasImage>,
    atlas: Option<Atlas>,
    renderer: SpriteRenderer,
    batch: DrawBatch,
    text: TextLayout,
    guard: AssetGuard,
}

impl RiftApp {
    pub fn new(config: &GameConfig, image: AtlasImage) -> Self {
        let mut ctx = GameCtx::new(GameRng::from_seed(config.seed));
        let mut manager = SceneManager::new();
        scenes::register_all(&mut manager);
        ctx.nav.push(scenes::MAIN_MENU);

        Self {
            ctx,
            manager,
            pending_image: Some(image),
            atlas: None,
            renderer: SpriteRenderer::new(),
            batch: DrawBatch::new(),
            text: TextLayout::new(),
            guard: AssetGuard::new(config.missing_assets),
        }
    }

    /// Routes input and advances the current scene. Nothing moves while the
    /// window is unfocused.
    pub fn update(&mut self, tick: Tick, input: FrameInput) -> Result<(), SceneError> {
        if !input.focused {
            return Ok(());
        }
        if let Some(p) = input.pointer {
            self.ctx.pointer = p;
            self.manager.pointer_move(&mut self.ctx, p, input.mouse_down);
            if input.pressed {
                self.manager.pointer_down(&mut self.ctx, p, input.touch);
            }
        }
        if input.released {
            self.manager.pointer_up(&mut self.ctx);
        }
        self.manager.update(&mut self.ctx, tick)
    }

    /// Records the frame into the batch. Returns false when a missing asset
    /// was hit under the strict policy.
    pub fn record(&mut self, tick: Tick, input: FrameInput) -> bool {
        let Some(atlas) = self.atlas.as_ref() else { return true };
        self.batch.reset();
        let mut painter = Painter::new(&mut self.batch, atlas, &mut self.text, &mut self.guard, SCREEN);
        painter.set_background(self.ctx.background);
        painter.clear();
        self.manager.draw(&self.ctx, &mut painter);

        if input.focused {
            if let Some(p) = input.pointer {
                painter.draw_texture(POINTER, p.x, p.y);
            }
        } else {
            painter.draw_quad(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT, UNFOCUSED_OVERLAY);
            if (tick.now / BLINK_MS) as u64 % 2 == 0 {
                let params = TextParams::default().align(Align::Center).scale(2);
                painter.draw_text("click to focus", SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 - 6.0, params);
            }
        }
        painter.flush();

        match self.guard.take_fault() {
            Some(err) => {
                log::error!("stopping: {err}");
                false
            }
            None => true,
        }
    }

    fn upload_atlas(&mut self, ctx: &FrameCtx<'_, '_>) {
        let Some(image) = self.pending_image.take() else { return };
        let renderer = &mut self.renderer;
        let texture = ctx.with_render_ctx(SCREEN, |rctx| {
            renderer.upload_texture(rctx, image.width(), image.height(), image.rgba())
        });
        self.atlas = Some(Atlas::with_entries(texture, image.width(), image.height(), &assets::atlas_entries()));
        log::debug!("atlas uploaded as {texture:?}");
    }
}

impl EngineApp for RiftApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.upload_atlas(ctx);

        let tick = ctx.time.tick();
        let input = FrameInput {
            focused: ctx.input.focused,
            pointer: ctx.pointer(SCREEN),
            mouse_down: ctx.input.button_down(MouseButton::Left),
            pressed: ctx.input_frame.pressed(MouseButton::Left),
            released: ctx.input_frame.released(MouseButton::Left),
            touch: ctx.input_frame.touch_pressed,
        };

        if let Err(err) = self.update(tick, input) {
            log::error!("scene stack: {err}");
            return AppControl::Exit;
        }
        if !self.record(tick, input) {
            return AppControl::Exit;
        }

        let renderer = &mut self.renderer;
        let batch = &self.batch;
        ctx.render(SCREEN, |rctx, target| renderer.render(rctx, target, batch))
    }

    fn on_close(&mut self) {
        log::info!("closing on turn {} with {} scene(s) open", self.ctx.game.turn, self.manager.stack().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::testing::frame;
    use pretty_assertions::assert_eq;
    use rift_engine::render::{MissingAssetPolicy, TextureId};

    fn app(policy: MissingAssetPolicy) -> RiftApp {
        let config = GameConfig { seed: Some(7), missing_assets: policy, ..GameConfig::default() };
        let (atlas, image) = assets::procedural_atlas(TextureId(0));
        let mut app = RiftApp::new(&config, image);
        app.pending_image = None;
        app.atlas = Some(atlas);
        app
    }

    fn focused_at(x: f32, y: f32) -> FrameInput {
        FrameInput { focused: true, pointer: Some(Vec2::new(x, y)), ..FrameInput::default() }
    }

    fn quads(app: &RiftApp) -> usize {
        app.batch.batches().iter().map(|b| b.vertices.len() / 4).sum()
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn the_main_menu_comes_up_first() {
        let mut app = app(MissingAssetPolicy::Fail);
        app.update(frame(0.0), focused_at(10.0, 10.0)).unwrap();
        assert_eq!(app.manager.stack(), [scenes::MAIN_MENU]);
        assert_eq!(app.ctx.pointer, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn nothing_advances_while_unfocused() {
        let mut app = app(MissingAssetPolicy::Fail);
        app.update(frame(0.0), FrameInput::default()).unwrap();
        assert!(app.manager.stack().is_empty());
    }

    #[test]
    fn a_click_on_new_game_reaches_the_difficulty_screen() {
        let mut app = app(MissingAssetPolicy::Fail);
        let mut now = 0.0;
        while now <= 1500.0 {
            app.update(frame(now), focused_at(5.0, 5.0)).unwrap();
            now += 16.0;
        }
        let press = FrameInput { pressed: true, mouse_down: true, ..focused_at(256.0, 150.0) };
        app.update(frame(now), press).unwrap();
        let release = FrameInput { released: true, ..focused_at(256.0, 150.0) };
        app.update(frame(now + 16.0), release).unwrap();
        now += 32.0;
        while now <= 3000.0 {
            app.update(frame(now), focused_at(5.0, 5.0)).unwrap();
            now += 16.0;
        }
        assert_eq!(app.manager.stack(), [scenes::MAIN_MENU, scenes::GAME_DIFFICULTY]);
    }

    // ── record ────────────────────────────────────────────────────────────

    #[test]
    fn every_frame_of_the_menu_draws_cleanly() {
        let mut app = app(MissingAssetPolicy::Fail);
        let input = focused_at(100.0, 100.0);
        let mut now = 0.0;
        while now <= 1500.0 {
            app.update(frame(now), input).unwrap();
            assert!(app.record(frame(now), input));
            now += 16.0;
        }
        assert!(quads(&app) > 0);
    }

    #[test]
    fn the_focus_prompt_blinks() {
        let mut app = app(MissingAssetPolicy::Fail);
        app.update(frame(0.0), focused_at(0.0, 0.0)).unwrap();

        assert!(app.record(frame(100.0), FrameInput::default()));
        let shown = quads(&app);
        assert!(app.record(frame(800.0), FrameInput::default()));
        let hidden = quads(&app);
        assert_eq!(shown - hidden, "clicktofocus".len());
    }

    #[test]
    fn a_missing_sprite_stops_only_the_strict_loop() {
        for (policy, keeps_running) in [(MissingAssetPolicy::Fail, false), (MissingAssetPolicy::Placeholder, true)] {
            let mut app = app(policy);
            app.atlas = Some(Atlas::new(TextureId(0), 16, 16));
            assert_eq!(app.record(frame(0.0), FrameInput::default()), keeps_running, "{policy:?}");
        }
    }
}
