use rift_engine::coords::Vec2;
use rift_engine::paint::Color;
use rift_engine::render::Painter;
use rift_engine::text::{Align, TextParams};
use rift_scene::widgets::{button_node, Button};
use rift_scene::{Completion, Node, NodeCx, NodeId, Scene, SceneBehavior, Stage};

use super::{above, fade_background, new_stage, slide_in, slide_out, DISCARD_PILE, LEAVE_BACKGROUND};
use crate::cards::PlayerCard;
use crate::context::{GameCtx, BACKGROUND};
use crate::nodes::{PileCardNode, CARD_SIZE};
use crate::state::{GameState, PileView};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const COLUMNS: usize = 13;
const ROWS: usize = 4;
const WATERMARK: Color = Color(0x99DD_DDDD);

/// Where the `i`th most recent card of the pile is laid out.
fn slot(i: usize) -> Vec2 {
    let (row, col) = (i / COLUMNS, i % COLUMNS);
    Vec2::new(col as f32 * 34.0 + 36.0, row as f32 * 52.0 + 4.0)
}

fn pile(game: &GameState) -> &[PlayerCard] {
    match game.pile_view {
        PileView::Player => &game.discard_pile,
        PileView::Store => &game.store_discard,
    }
}

/// Lays out one of the discard piles, most recent card first.
pub struct DiscardPileScene {
    cards: Vec<NodeId>,
}

impl DiscardPileScene {
    pub fn build() -> Scene<GameCtx> {
        let mut stage = new_stage();
        let root = stage.root();
        stage.tree.spawn_in_with(
            root,
            button_node(SCREEN_WIDTH / 2.0 - 50.0, SCREEN_HEIGHT - 33.0, Vec2::new(100.0, 30.0), Color(0xFF55_CC55)),
            Button::new("back", |cx: &mut NodeCx<'_, GameCtx>| cx.ctx.nav.pop()),
        );
        Scene::new(DISCARD_PILE, stage, DiscardPileScene { cards: Vec::new() })
    }

    fn lay_out(&mut self, stage: &mut Stage<GameCtx>, game: &GameState) {
        for id in self.cards.drain(..) {
            stage.tree.despawn(id);
        }
        let cards = pile(game);
        let shown = COLUMNS * ROWS;
        if cards.len() > shown {
            log::debug!("showing the {shown} most recent of {} discarded cards", cards.len());
        }
        let root = stage.root();
        for (i, card) in cards.iter().rev().take(shown).enumerate() {
            let at = slot(i);
            let node = Node::new(CARD_SIZE).at(at.x, at.y);
            let id = stage.tree.spawn_in_with(root, node, PileCardNode { card: card.clone() });
            self.cards.push(id);
        }
    }
}

impl SceneBehavior<GameCtx> for DiscardPileScene {
    fn transition_in(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) -> Completion {
        self.lay_out(stage, &ctx.game);
        fade_background(stage, ctx, BACKGROUND);
        slide_in(stage, ctx, above(), |_, _| Completion::done())
    }

    fn transition_out(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) -> Completion {
        fade_background(stage, ctx, LEAVE_BACKGROUND);
        slide_out(stage, above())
    }

    fn draw(&self, stage: &Stage<GameCtx>, ctx: &GameCtx, painter: &mut Painter<'_>) {
        let at = stage.tree.top_left(stage.root());
        let title = match ctx.game.pile_view {
            PileView::Player => "discard pile",
            PileView::Store => "hq discards",
        };
        let params = TextParams::default().align(Align::Center).scale(3).color(WATERMARK);
        painter.draw_text(title, at.x + SCREEN_WIDTH / 2.0, at.y + SCREEN_HEIGHT / 2.0 - 8.0, params);
    }
}
