use rift_engine::coords::Vec2;
use rift_engine::paint::Rgb;
use rift_scene::{Navigation, SceneContext};

use crate::rng::GameRng;
use crate::state::GameState;

/// Initial and main-menu background.
pub const BACKGROUND: Rgb = Rgb::new(0, 25, 55);

/// Context threaded through every scene, node and delay.
#[derive(Debug)]
pub struct GameCtx {
    pub game: GameState,
    pub nav: Navigation,
    pub background: Rgb,
    /// Last pointer position in logical pixels.
    pub pointer: Vec2,
}

impl GameCtx {
    pub fn new(rng: GameRng) -> Self {
        Self {
            game: GameState::new(rng),
            nav: Navigation::default(),
            background: BACKGROUND,
            pointer: Vec2::zero(),
        }
    }
}

impl SceneContext for GameCtx {
    fn navigation(&mut self) -> &mut Navigation {
        &mut self.nav
    }

    fn background(&mut self) -> &mut Rgb {
        &mut self.background
    }
}
