//! Every scene of the game, registered by name with the scene manager.
//!
//! Scenes push and pop each other through [`GameCtx::nav`]; the manager
//! applies the requests between frames. Most scenes slide their root in
//! from one edge and out through another, binding input only once they
//! have arrived.

mod deck_select;
mod difficulty;
mod discard_pile;
mod game;
mod game_over;
mod help;
mod main_menu;

pub use deck_select::DeckSelectScene;
pub use difficulty::DifficultyScene;
pub use discard_pile::DiscardPileScene;
pub use game::GameScene;
pub use game_over::GameOverScene;
pub use help::HelpScene;
pub use main_menu::MainMenuScene;

use rift_engine::coords::Vec2;
use rift_engine::interp::Easing;
use rift_engine::paint::Rgb;
use rift_scene::{Completion, SceneManager, Sequence, Stage};

use crate::context::GameCtx;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const MAIN_MENU: &str = "MainMenu";
pub const GAME_DIFFICULTY: &str = "GameDifficulty";
pub const DECK_SELECT: &str = "DeckSelect";
pub const GAME: &str = "Game";
pub const HELP: &str = "Help";
pub const DISCARD_PILE: &str = "DiscardPile";
pub const GAME_OVER: &str = "GameOver";

/// Scenes that hold per-game state and are rebuilt whenever the main menu
/// comes back.
pub const PER_GAME: [&str; 6] = [GAME_DIFFICULTY, DECK_SELECT, GAME, HELP, DISCARD_PILE, GAME_OVER];

const SLIDE_MS: f64 = 500.0;
/// Background the overlay scenes fade back to when they leave.
const LEAVE_BACKGROUND: Rgb = Rgb::new(0, 87, 132);

pub fn register_all(manager: &mut SceneManager<GameCtx>) {
    manager.register(MAIN_MENU, |_: &mut GameCtx| MainMenuScene::build());
    manager.register(GAME_DIFFICULTY, |_: &mut GameCtx| DifficultyScene::build());
    manager.register(DECK_SELECT, |_: &mut GameCtx| DeckSelectScene::build());
    manager.register(GAME, |_: &mut GameCtx| GameScene::build());
    manager.register(HELP, |_: &mut GameCtx| HelpScene::build());
    manager.register(DISCARD_PILE, |_: &mut GameCtx| DiscardPileScene::build());
    manager.register(GAME_OVER, |_: &mut GameCtx| GameOverScene::build());
}

pub(crate) fn screen() -> Vec2 {
    Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
}

pub(crate) fn new_stage() -> Stage<GameCtx> {
    Stage::new(screen())
}

/// Drops the root at `from`, eases it home, then binds input. `arrived`
/// runs once the root is in place.
pub(crate) fn slide_in(
    stage: &mut Stage<GameCtx>,
    ctx: &mut GameCtx,
    from: Vec2,
    arrived: impl FnOnce(&mut Stage<GameCtx>, &mut GameCtx) -> Completion + 'static,
) -> Completion {
    let root = stage.root();
    stage.tree.set_origin(root, from);
    let sequence = Sequence::new()
        .then(move |stage: &mut Stage<GameCtx>, _: &mut GameCtx| {
            stage.tree.move_to(root, Vec2::zero(), SLIDE_MS, Easing::EaseOutQuad)
        })
        .then(arrived)
        .then(|stage: &mut Stage<GameCtx>, _: &mut GameCtx| {
            stage.bind_input();
            Completion::done()
        });
    stage.run(ctx, sequence)
}

/// Unbinds input and eases the root out to `to`.
pub(crate) fn slide_out(stage: &mut Stage<GameCtx>, to: Vec2) -> Completion {
    stage.unbind_input();
    let root = stage.root();
    stage.tree.move_to(root, to, SLIDE_MS, Easing::EaseOutQuad)
}

/// Tweens the global background from whatever it is now.
pub(crate) fn fade_background(stage: &mut Stage<GameCtx>, ctx: &mut GameCtx, to: Rgb) -> Completion {
    stage.sync_background(ctx);
    stage.change_background(ctx, to, SLIDE_MS, Easing::Linear)
}

pub(crate) fn below() -> Vec2 {
    Vec2::new(0.0, SCREEN_HEIGHT)
}

pub(crate) fn above() -> Vec2 {
    Vec2::new(0.0, -SCREEN_HEIGHT)
}

#[cfg(test)]
pub(crate) mod testing {
    use rift_scene::SceneManager;

    use crate::context::GameCtx;
    use crate::nodes::testing::frame;

    pub fn manager() -> SceneManager<GameCtx> {
        let mut manager = SceneManager::new();
        super::register_all(&mut manager);
        manager
    }

    /// Updates `manager` every 16ms from `from` through `to`; returns `to`.
    pub fn run(manager: &mut SceneManager<GameCtx>, ctx: &mut GameCtx, from: f64, to: f64) -> f64 {
        let mut now = from;
        while now <= to {
            manager.update(ctx, frame(now)).expect("scene request");
            now += 16.0;
        }
        to
    }

    /// Taps `(x, y)` on the current scene.
    pub fn click(manager: &mut SceneManager<GameCtx>, ctx: &mut GameCtx, x: f32, y: f32) {
        let p = rift_engine::coords::Vec2::new(x, y);
        manager.pointer_down(ctx, p, true);
        manager.pointer_up(ctx);
    }
}
