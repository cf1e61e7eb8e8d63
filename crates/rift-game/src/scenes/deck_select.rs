use rift_engine::coords::Vec2;
use rift_engine::paint::Color;
use rift_engine::render::Painter;
use rift_engine::text::{Align, TextParams};
use rift_scene::widgets::{button_node, Button};
use rift_scene::{Completion, Node, NodeCx, Scene, SceneBehavior, Stage};

use super::{above, below, new_stage, slide_in, slide_out, DECK_SELECT, GAME};
use crate::context::GameCtx;
use crate::decks::DeckSet;
use crate::nodes::DeckSelectorNode;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const SELECTOR: Vec2 = Vec2::new(270.0, 30.0);

fn fill(set: DeckSet) -> Color {
    match set {
        DeckSet::Occult => Color(0xFF22_A6F5),
        DeckSet::Technology => Color(0xFFC1_E34F),
        DeckSet::Psychic => Color(0xFFE0_0DBD),
    }
}

/// Picks the research sets whose cards join the store.
pub struct DeckSelectScene;

impl DeckSelectScene {
    pub fn build() -> Scene<GameCtx> {
        let mut stage = new_stage();
        let root = stage.root();
        let x = SCREEN_WIDTH / 2.0 - SELECTOR.x / 2.0;
        for (set, dy) in DeckSet::ALL.into_iter().zip([-40.0, 0.0, 40.0]) {
            let node = Node::new(SELECTOR).at(x, SCREEN_HEIGHT / 2.0 + dy).color(fill(set));
            stage.tree.spawn_in_with(root, node, DeckSelectorNode::new(set));
        }

        stage.tree.spawn_in_with(
            root,
            button_node(SCREEN_WIDTH / 2.0 - 75.0, SCREEN_HEIGHT / 2.0 + 80.0, Vec2::new(150.0, 30.0), Color(0xFF55_CC55)),
            Button::new("let's go!", |cx: &mut NodeCx<'_, GameCtx>| {
                cx.ctx.game.generate_store();
                cx.ctx.nav.push(GAME);
            }),
        );
        Scene::new(DECK_SELECT, stage, DeckSelectScene)
    }
}

impl SceneBehavior<GameCtx> for DeckSelectScene {
    fn transition_in(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) -> Completion {
        slide_in(stage, ctx, below(), |_, _| Completion::done())
    }

    fn transition_out(&mut self, stage: &mut Stage<GameCtx>, _ctx: &mut GameCtx) -> Completion {
        slide_out(stage, above())
    }

    fn draw(&self, stage: &Stage<GameCtx>, ctx: &GameCtx, painter: &mut Painter<'_>) {
        let at = stage.tree.top_left(stage.root());
        let limit = ctx.game.difficulty.deck_limit();
        let text = format!("select up to {limit} additional card sets to bring");
        let params = TextParams::default().align(Align::Center).scale(2).wrap(400);
        painter.draw_text(&text, at.x + SCREEN_WIDTH / 2.0, at.y + 60.0, params);
    }
}
