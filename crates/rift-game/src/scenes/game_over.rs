use rift_engine::coords::Vec2;
use rift_engine::paint::{Color, Rgb};
use rift_engine::render::Painter;
use rift_engine::text::{Align, TextParams};
use rift_scene::widgets::{button_node, Button};
use rift_scene::{Completion, NodeCx, Scene, SceneBehavior, Stage};

use super::{above, fade_background, new_stage, slide_in, slide_out, GAME_OVER, MAIN_MENU};
use crate::context::GameCtx;
use crate::state::GameOverReason;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const BACKGROUND: Rgb = Rgb::new(10, 10, 10);

/// Title, colour and closing words for each way a game can end.
pub fn ending(reason: GameOverReason) -> (&'static str, Color, &'static str) {
    match reason {
        GameOverReason::Overrun => (
            "overrun...",
            Color(0xFF66_66FF),
            "your defense was broken by the constant outpouring of unspeakable creatures from the rift. \
             it appears humanity was not ready for this step forward...",
        ),
        GameOverReason::Clear => (
            "defense successful!",
            Color(0xFF66_FF66),
            "your defensive line withstood the onslaught that emerged from the rift. \
             it's only a matter of time before it opens its maw again...",
        ),
        GameOverReason::OldOne => (
            "help from beyond...",
            Color(0xFF22_A6F5),
            "your plea for help was answered by... something... this debt will surely be collected somehow one day...",
        ),
        GameOverReason::Stitch => (
            "rift temporarily closed",
            Color(0xFFE0_0DBD),
            "as the final psychic stitch comes into place, humanity's defenders have earned themselves a reprieve... \
             how long will these hold this time...",
        ),
    }
}

/// Shows how the game ended and leads back to the main menu.
pub struct GameOverScene;

impl GameOverScene {
    pub fn build() -> Scene<GameCtx> {
        let mut stage = new_stage();
        let root = stage.root();
        stage.tree.spawn_in_with(
            root,
            button_node(SCREEN_WIDTH / 2.0 - 80.0, SCREEN_HEIGHT - 40.0, Vec2::new(160.0, 30.0), Color(0xFF22_22AA)),
            Button::new("back to menu", |cx: &mut NodeCx<'_, GameCtx>| cx.ctx.nav.pop_to(MAIN_MENU)),
        );
        Scene::new(GAME_OVER, stage, GameOverScene)
    }
}

impl SceneBehavior<GameCtx> for GameOverScene {
    fn transition_in(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) -> Completion {
        fade_background(stage, ctx, BACKGROUND);
        slide_in(stage, ctx, above(), |_, _| Completion::done())
    }

    fn transition_out(&mut self, stage: &mut Stage<GameCtx>, _ctx: &mut GameCtx) -> Completion {
        slide_out(stage, above())
    }

    fn draw(&self, stage: &Stage<GameCtx>, ctx: &GameCtx, painter: &mut Painter<'_>) {
        let Some(reason) = ctx.game.game_over_reason else { return };
        let (title, colour, text) = ending(reason);
        let at = stage.tree.top_left(stage.root());
        let x = at.x + SCREEN_WIDTH / 2.0;
        let params = TextParams::default().align(Align::Center);
        painter.draw_text(title, x, at.y + 20.0, params.scale(3).color(colour));
        painter.draw_text(text, x, at.y + 50.0, params.scale(2).wrap(500));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::testing::{ctx, draw_strict};
    use crate::scenes::testing::{click, manager, run};
    use pretty_assertions::assert_eq;

    #[test]
    fn back_returns_to_a_fresh_main_menu() {
        let mut manager = manager();
        let mut ctx = ctx();
        ctx.game.game_over_reason = Some(GameOverReason::Clear);
        ctx.nav.push(MAIN_MENU);
        let now = run(&mut manager, &mut ctx, 0.0, 1200.0);
        ctx.nav.push(GAME_OVER);
        let now = run(&mut manager, &mut ctx, now + 16.0, now + 3000.0);
        assert_eq!(manager.stack(), [MAIN_MENU, GAME_OVER]);
        assert_eq!(ctx.background, BACKGROUND);

        click(&mut manager, &mut ctx, 256.0, 260.0);
        run(&mut manager, &mut ctx, now + 16.0, now + 3000.0);
        assert_eq!(manager.stack(), [MAIN_MENU]);
        // the slid-out instance was replaced by one resting at the origin
        let origin = manager.scene(GAME_OVER).map(|s| s.stage.tree.origin(s.stage.root()));
        assert_eq!(origin, Some(Vec2::zero()));
    }

    #[test]
    fn every_ending_can_be_drawn() {
        let reasons = [GameOverReason::Overrun, GameOverReason::Clear, GameOverReason::OldOne, GameOverReason::Stitch];
        let stage = new_stage();
        for reason in reasons {
            let mut ctx = ctx();
            ctx.game.game_over_reason = Some(reason);
            let (_, fault) = draw_strict(|painter| GameOverScene.draw(&stage, &ctx, painter));
            assert_eq!(fault, None, "{reason:?}");
        }
    }
}
