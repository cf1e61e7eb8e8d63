use rift_engine::coords::Vec2;
use rift_engine::paint::Color;
use rift_engine::render::Painter;
use rift_engine::text::{Align, Font, TextParams};
use rift_scene::{Behavior, DrawCx, Interactive, NodeCx};

use super::{draw_empty_slots, draw_outline, draw_player_card, draw_player_tooltip, HIGHLIGHT};
use crate::cards::PlayerCard;
use crate::context::GameCtx;
use crate::scenes;
use crate::state::{DiscardQueue, GameState, PileView};

const COUNT: Color = Color(0x88FF_FFFF);
const PLAYER_PILE_SHADE: Color = Color(0x9911_1111);
const STORE_PILE_SHADE: Color = Color(0x9922_2222);

/// A face-down pile showing a label and how many cards it holds.
pub struct DeckNode {
    label: &'static str,
    font: Font,
    count: fn(&GameState) -> usize,
}

impl DeckNode {
    pub fn player_deck() -> Self {
        Self { label: "deck", font: Font::Bit, count: |game| game.player_deck.len() }
    }

    pub fn encounter_deck() -> Self {
        Self { label: "rift", font: Font::Gb, count: |game| game.encounter_deck.len() }
    }
}

impl Behavior<GameCtx> for DeckNode {
    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let at = cx.top_left();
        cx.painter.draw_texture("card_back", at.x, at.y);
        let params = TextParams::default().align(Align::Center);
        cx.painter.draw_text(self.label, at.x + 17.0, at.y + 4.0, params);
        let count = format!("{:02}", (self.count)(&cx.ctx.game));
        cx.painter.draw_text(&count, at.x + 17.0, at.y + 36.0, params.font(self.font).color(COUNT));
    }
}

/// Empty slot, then the top card shaded, then the card still falling onto
/// the pile, then the count.
fn draw_discard(painter: &mut Painter<'_>, at: Vec2, pile: &[PlayerCard], queue: &DiscardQueue, shade: Color) {
    draw_empty_slots(painter, at, 1);
    if let Some(top) = pile.last() {
        draw_player_card(painter, Some(top), at);
        painter.draw_quad(at.x, at.y, 32.0, 48.0, shade);
    }
    if let Some((card, offset)) = queue.head() {
        draw_player_card(painter, Some(card), at + offset);
    }
    let count = format!("{:02}", pile.len());
    painter.draw_text(&count, at.x + 16.0, at.y + 36.0, TextParams::default().align(Align::Center).font(Font::Gb));
}

fn open_pile(cx: &mut NodeCx<'_, GameCtx>, view: PileView) {
    cx.ctx.game.pile_view = view;
    cx.ctx.nav.push(scenes::DISCARD_PILE);
}

/// The player's discard pile. Lands falling cards; clicking opens the
/// pile view.
pub struct DiscardPileNode;

impl Behavior<GameCtx> for DiscardPileNode {
    fn update(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        cx.ctx.game.settle_discards(cx.tick.now);
    }

    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let at = cx.top_left();
        let game = &cx.ctx.game;
        draw_discard(cx.painter, at, &game.discard_pile, &game.discard_queue, PLAYER_PILE_SHADE);
        if cx.node().is_some_and(|n| n.is_hovered()) {
            draw_hover_frame(cx.painter, at);
        }
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive<GameCtx>> {
        Some(self)
    }
}

impl Interactive<GameCtx> for DiscardPileNode {
    fn on_hover(&mut self, _cx: &mut NodeCx<'_, GameCtx>, _mouse_down: bool) {}

    fn on_blur(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_down(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_up(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        open_pile(cx, PileView::Player);
    }
}

/// Where refreshed store cards go. Clicking shows them.
pub struct StoreDiscardNode;

impl Behavior<GameCtx> for StoreDiscardNode {
    fn update(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        cx.ctx.game.settle_store_discards(cx.tick.now);
    }

    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let at = cx.top_left();
        let game = &cx.ctx.game;
        draw_discard(cx.painter, at, &game.store_discard, &game.store_discard_queue, STORE_PILE_SHADE);
        if cx.node().is_some_and(|n| n.is_hovered()) {
            draw_hover_frame(cx.painter, at);
        }
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive<GameCtx>> {
        Some(self)
    }
}

impl Interactive<GameCtx> for StoreDiscardNode {
    fn on_hover(&mut self, _cx: &mut NodeCx<'_, GameCtx>, _mouse_down: bool) {}

    fn on_blur(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_down(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_up(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        open_pile(cx, PileView::Store);
    }
}

// Drawn over the pile so the card underneath keeps its own frame.
fn draw_hover_frame(painter: &mut Painter<'_>, at: Vec2) {
    painter.draw_quad(at.x - 1.0, at.y - 1.0, 34.0, 1.0, HIGHLIGHT);
    painter.draw_quad(at.x - 1.0, at.y + 48.0, 34.0, 1.0, HIGHLIGHT);
    painter.draw_quad(at.x - 1.0, at.y, 1.0, 48.0, HIGHLIGHT);
    painter.draw_quad(at.x + 32.0, at.y, 1.0, 48.0, HIGHLIGHT);
}

/// A card laid out in the pile view, with a tooltip on hover.
pub struct PileCardNode {
    pub card: PlayerCard,
}

impl Behavior<GameCtx> for PileCardNode {
    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let at = cx.top_left();
        if cx.node().is_some_and(|n| n.is_hovered()) {
            draw_outline(cx.painter, at, HIGHLIGHT);
        }
        draw_player_card(cx.painter, Some(&self.card), at);
    }

    fn draw_over(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        if !cx.node().is_some_and(|n| n.is_hovered()) {
            return;
        }
        let at = cx.top_left();
        let below = at.y < 60.0;
        let y = if below { at.y + 50.0 } else { at.y - 49.0 };
        draw_player_tooltip(cx.painter, &self.card, at.x - 34.0, y, 44.0, cx.ctx.game.stitch_counter);
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive<GameCtx>> {
        Some(self)
    }
}

impl Interactive<GameCtx> for PileCardNode {
    fn on_hover(&mut self, _cx: &mut NodeCx<'_, GameCtx>, _mouse_down: bool) {}

    fn on_blur(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_down(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_up(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::player_card;
    use crate::nodes::testing::{ctx, frame, stage};
    use crate::nodes::CARD_SIZE;
    use pretty_assertions::assert_eq;
    use rift_scene::{NavRequest, Node};

    #[test]
    fn the_discard_pile_lands_queued_cards() {
        let mut stage = stage();
        let mut ctx = ctx();
        let root = stage.root();
        stage.tree.spawn_in_with(root, Node::new(CARD_SIZE).at(410.0, 236.0), DiscardPileNode);

        ctx.game.discard_queue.push(player_card("funds").unwrap());
        ctx.game.discard_queue.push(player_card("dazed").unwrap());
        let mut now = 0.0;
        while now <= 500.0 {
            stage.update(&mut ctx, frame(now));
            now += 16.0;
        }
        let names: Vec<&str> = ctx.game.discard_pile.iter().map(|c| c.name).collect();
        assert_eq!(names, ["funds", "dazed"]);
        assert!(ctx.game.discard_queue.is_empty());
    }

    #[test]
    fn clicking_a_discard_pile_opens_the_pile_view() {
        let mut stage = stage();
        let mut ctx = ctx();
        let root = stage.root();
        stage.tree.spawn_in_with(root, Node::new(CARD_SIZE).at(10.0, 10.0), StoreDiscardNode);

        stage.pointer_down(&mut ctx, Vec2::new(20.0, 20.0), true);
        stage.pointer_up(&mut ctx);

        assert_eq!(ctx.game.pile_view, PileView::Store);
        let pending: Vec<NavRequest> = ctx.nav.pending().cloned().collect();
        assert_eq!(pending, [NavRequest::Push(scenes::DISCARD_PILE.to_string())]);
    }
}
