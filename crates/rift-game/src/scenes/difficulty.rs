use rift_engine::coords::Vec2;
use rift_engine::paint::Color;
use rift_engine::render::Painter;
use rift_engine::text::{Align, TextParams};
use rift_scene::widgets::{button_node, Button, Label};
use rift_scene::{Completion, NodeCx, Scene, SceneBehavior, Stage};

use super::{above, below, new_stage, slide_in, slide_out, DECK_SELECT, GAME_DIFFICULTY};
use crate::context::GameCtx;
use crate::state::Difficulty;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const BUTTON: Vec2 = Vec2::new(120.0, 25.0);
const BUTTON_FILL: Color = Color(0xFF44_AA44);
const PANEL: Color = Color(0x6600_0000);

/// Picks the difficulty and starts a fresh game at it.
pub struct DifficultyScene;

impl DifficultyScene {
    pub fn build() -> Scene<GameCtx> {
        let mut stage = new_stage();
        let root = stage.root();
        let title = TextParams::default().align(Align::Center).scale(3);
        Label::spawn(&mut stage.tree, root, SCREEN_WIDTH / 2.0, 40.0, "select a difficulty", title);

        let y = SCREEN_HEIGHT / 2.0 + 20.0;
        for (difficulty, x) in Difficulty::ALL.into_iter().zip([-190.0, -60.0, 70.0]) {
            stage.tree.spawn_in_with(
                root,
                button_node(SCREEN_WIDTH / 2.0 + x, y, BUTTON, BUTTON_FILL),
                Button::new(caption(difficulty), move |cx: &mut NodeCx<'_, GameCtx>| {
                    cx.ctx.game.setup_game(difficulty);
                    cx.ctx.nav.push(DECK_SELECT);
                }),
            );
        }
        Scene::new(GAME_DIFFICULTY, stage, DifficultyScene)
    }
}

fn caption(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Easy",
        Difficulty::Normal => "Normal",
        Difficulty::Hard => "Hard",
    }
}

fn blurb(difficulty: Difficulty) -> &'static [(&'static str, f32)] {
    match difficulty {
        Difficulty::Easy => &[
            ("the rift takes longer to stabilize (about 25 turns)", 0.0),
            ("you can select 2 card sets to use", 26.0),
        ],
        Difficulty::Normal => &[
            ("the rift stabilizes at a standard rate (about 20 turns)", 0.0),
            ("you can select 2 card sets to use", 26.0),
        ],
        Difficulty::Hard => &[
            ("the rift stabilizes much sooner", 0.0),
            ("(about 15 turns)", 14.0),
            ("you can select 1 card set to use", 26.0),
        ],
    }
}

impl SceneBehavior<GameCtx> for DifficultyScene {
    fn transition_in(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) -> Completion {
        slide_in(stage, ctx, below(), |_, _| Completion::done())
    }

    fn transition_out(&mut self, stage: &mut Stage<GameCtx>, _ctx: &mut GameCtx) -> Completion {
        slide_out(stage, above())
    }

    fn draw(&self, stage: &Stage<GameCtx>, _ctx: &GameCtx, painter: &mut Painter<'_>) {
        let at = stage.tree.top_left(stage.root());
        let params = TextParams::default().align(Align::Center).wrap(120);
        for (difficulty, offset) in Difficulty::ALL.into_iter().zip([-130.0, 0.0, 130.0]) {
            let x = at.x + SCREEN_WIDTH / 2.0 + offset;
            let y = at.y + SCREEN_HEIGHT / 2.0 - 30.0;
            painter.draw_quad(x - 62.0, y - 4.0, 124.0, 81.0, PANEL);
            for (line, dy) in blurb(difficulty) {
                painter.draw_text(line, x, y + dy, params);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::testing::ctx;
    use crate::scenes::testing::{click, manager, run};
    use pretty_assertions::assert_eq;
    use rift_scene::NavRequest;

    #[test]
    fn each_button_starts_a_game_at_its_difficulty() {
        for (difficulty, x) in Difficulty::ALL.into_iter().zip([126.0, 256.0, 386.0]) {
            let mut manager = manager();
            let mut ctx = ctx();
            ctx.nav.push(GAME_DIFFICULTY);
            run(&mut manager, &mut ctx, 0.0, 800.0);
            ctx.game.money = 9;

            click(&mut manager, &mut ctx, x, 175.0);
            assert_eq!(ctx.game.difficulty, difficulty);
            assert_eq!(ctx.game.rift_stability_max, difficulty.stability_max());
            assert_eq!(ctx.game.money, 0);
            assert_eq!(ctx.game.player_deck.len(), 14);
            let pending: Vec<NavRequest> = ctx.nav.pending().cloned().collect();
            assert_eq!(pending, [NavRequest::Push(DECK_SELECT.to_string())]);
        }
    }
}
