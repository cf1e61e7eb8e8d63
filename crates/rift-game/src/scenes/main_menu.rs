use rift_engine::coords::Vec2;
use rift_engine::interp::Easing;
use rift_engine::paint::{Color, Rgb};
use rift_engine::text::{Align, TextParams};
use rift_engine::time::Tick;
use rift_scene::widgets::{button_node, Button, Label};
use rift_scene::{Completion, NodeCx, NodeId, Scene, SceneBehavior, Stage};

use super::{above, fade_background, new_stage, slide_in, slide_out, GAME_DIFFICULTY, LEAVE_BACKGROUND, MAIN_MENU, PER_GAME};
use crate::context::{GameCtx, BACKGROUND};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const BUTTON: Vec2 = Vec2::new(144.0, 30.0);
const CYCLE_TO: Rgb = Rgb::new(67, 21, 174);
const CYCLE_MS: f64 = 5000.0;

/// Title screen. The background drifts between two blues while it is up.
pub struct MainMenuScene {
    new_game: NodeId,
    settings: NodeId,
    new_game_y: f32,
    settings_y: f32,
    cycle: Completion,
    to_violet: bool,
    leaving: bool,
}

impl MainMenuScene {
    pub fn build() -> Scene<GameCtx> {
        let mut stage = new_stage();
        let root = stage.root();
        let mut y = SCREEN_HEIGHT / 2.0 - 40.0;
        let title = TextParams::default().align(Align::Center).scale(4);
        Label::spawn(&mut stage.tree, root, SCREEN_WIDTH / 2.0, y + 2.0, "beyond the rift", title.color(Color(0xCC00_0000)));
        Label::spawn(&mut stage.tree, root, SCREEN_WIDTH / 2.0, y, "beyond the rift", title);
        y += 37.0;

        let new_game = stage.tree.spawn_in_with(
            root,
            button_node(-SCREEN_WIDTH / 2.0, y, BUTTON, Color(0xFF55_CC55)),
            Button::new("new game", |cx: &mut NodeCx<'_, GameCtx>| cx.ctx.nav.push(GAME_DIFFICULTY)),
        );
        let new_game_y = y;
        y += 34.0;

        let settings = stage.tree.spawn_in_with(
            root,
            button_node(SCREEN_WIDTH / 2.0 - 72.0, SCREEN_HEIGHT * 2.0, BUTTON, Color(0xFFFF_5555)),
            Button::new("settings", |_: &mut NodeCx<'_, GameCtx>| log::debug!("settings are not available yet")),
        );

        let behavior = MainMenuScene {
            new_game,
            settings,
            new_game_y,
            settings_y: y,
            cycle: Completion::done(),
            to_violet: true,
            leaving: false,
        };
        Scene::new(MAIN_MENU, stage, behavior)
    }
}

impl SceneBehavior<GameCtx> for MainMenuScene {
    fn transition_in(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) -> Completion {
        self.leaving = false;
        self.to_violet = true;
        self.cycle = fade_background(stage, ctx, BACKGROUND);
        for name in PER_GAME {
            ctx.nav.rebuild(name);
        }

        let (new_game, new_game_to) = (self.new_game, Vec2::new(SCREEN_WIDTH / 2.0 - 72.0, self.new_game_y));
        let (settings, settings_to) = (self.settings, Vec2::new(SCREEN_WIDTH / 2.0 - 72.0, self.settings_y));
        slide_in(stage, ctx, above(), move |stage, _| {
            Completion::all([
                stage.tree.move_to(new_game, new_game_to, 500.0, Easing::EaseOutQuad),
                stage.tree.move_to(settings, settings_to, 500.0, Easing::EaseOutQuad),
            ])
        })
    }

    fn transition_out(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) -> Completion {
        self.leaving = true;
        self.cycle = fade_background(stage, ctx, LEAVE_BACKGROUND);
        slide_out(stage, above())
    }

    fn update(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx, _tick: Tick) {
        if self.leaving || self.cycle.is_pending() {
            return;
        }
        let to = if self.to_violet { CYCLE_TO } else { BACKGROUND };
        self.to_violet = !self.to_violet;
        self.cycle = stage.change_background(ctx, to, CYCLE_MS, Easing::Linear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::testing::ctx;
    use crate::scenes::testing::{manager, run};
    use pretty_assertions::assert_eq;
    use rift_scene::NavRequest;

    #[test]
    fn entering_rebuilds_every_per_game_scene() {
        let mut manager = manager();
        let mut ctx = ctx();
        ctx.nav.push(MAIN_MENU);
        run(&mut manager, &mut ctx, 0.0, 0.0);
        let pending: Vec<NavRequest> = ctx.nav.pending().cloned().collect();
        let expected: Vec<NavRequest> = PER_GAME.iter().map(|name| NavRequest::Rebuild(name.to_string())).collect();
        assert_eq!(pending, expected);

        run(&mut manager, &mut ctx, 16.0, 1200.0);
        assert!(ctx.nav.is_empty());
    }

    #[test]
    fn the_background_drifts_once_the_menu_is_up() {
        let mut manager = manager();
        let mut ctx = ctx();
        ctx.background = Rgb::new(10, 10, 10);
        ctx.nav.push(MAIN_MENU);
        // The entry fade lands on the first frame past 500ms.
        run(&mut manager, &mut ctx, 0.0, 512.0);
        assert_eq!(ctx.background, BACKGROUND);

        // The drift starts on the next frame and runs for five seconds.
        run(&mut manager, &mut ctx, 528.0, 2528.0);
        assert!(ctx.background.r > BACKGROUND.r && ctx.background.r < CYCLE_TO.r);

        run(&mut manager, &mut ctx, 2544.0, 5536.0);
        assert_eq!(ctx.background, CYCLE_TO);
    }
}
