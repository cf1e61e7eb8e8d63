use rift_engine::coords::Vec2;
use rift_engine::interp::Easing;
use rift_engine::paint::Color;
use rift_engine::text::{text_height, Align, Font, TextParams};
use rift_scene::{Behavior, DrawCx, Interactive, Node, NodeCx, NodeId, NodeTree};

use super::{
    draw_empty_slots, draw_outline, draw_player_card, draw_player_tooltip, draw_tooltip_box, sync_slots, CardSlot,
    CARD_SIZE, HIGHLIGHT, SLOT_STRIDE, TEXT, WARNING,
};
use crate::cards::PlayerCard;
use crate::context::GameCtx;
use crate::state::{Phase, PlayerMode, STORE_SLOTS};

const SLOTS: usize = 15;
const PARK: Vec2 = Vec2::zero();
const COUNT: Color = Color(0x88FF_FFFF);
const UNAFFORDABLE: Color = Color(0xAA00_0000);

/// Headquarters: the store deck on the left and the cards for sale.
#[derive(Default)]
pub struct StoreNode {
    slots: Vec<NodeId>,
    tooltip: Option<(PlayerCard, Vec2)>,
}

impl StoreNode {
    pub const SIZE: Vec2 = Vec2::new(304.0, 48.0);

    pub fn spawn(tree: &mut NodeTree<GameCtx>, parent: NodeId, x: f32, y: f32) -> NodeId {
        let id = tree.spawn_in_with(parent, Node::new(Self::SIZE).at(x, y), StoreNode::default());
        let slots = (0..SLOTS)
            .map(|_| tree.spawn_in_with(id, Node::new(CARD_SIZE).at(PARK.x, PARK.y), StoreCardNode::default()))
            .collect();
        if let Some(store) = tree.behavior_mut::<StoreNode>(id) {
            store.slots = slots;
        }
        id
    }

    pub fn slots(&self) -> &[NodeId] {
        &self.slots
    }

    /// Tooltip for the refresh and upgrade buttons, placed relative to the
    /// store at `at`.
    pub fn draw_action_tooltip(painter: &mut rift_engine::render::Painter<'_>, at: Vec2, action: &str, money: u32) {
        let (x, y) = (at.x + 197.0, at.y - 45.0);
        draw_tooltip_box(painter, x, y, 80.0, 40.0);
        let params = TextParams::default().align(Align::Center).color(TEXT).wrap(74);
        let lines = painter.draw_text(action, x + 40.0, y + 3.0, params);
        let cost_y = y + 3.0 + text_height(lines, 1, Font::Bit) + 3.0;
        let cost = if money < 1 { WARNING } else { TEXT };
        painter.draw_text("cost: 1", x + 40.0, cost_y, params.color(cost));
    }

    fn draw_card_tooltip(&self, cx: &mut DrawCx<'_, '_, GameCtx>, card: &PlayerCard, at: Vec2) {
        let (x, y) = (at.x - SLOT_STRIDE, at.y - 65.0);
        let game = &cx.ctx.game;
        draw_player_tooltip(cx.painter, card, x, y, 60.0, game.stitch_counter);
        let cost = if card.cost > game.money { WARNING } else { TEXT };
        let params = TextParams::default().align(Align::Center).color(cost);
        cx.painter.draw_text(&format!("cost: {}", card.cost), x + 51.0, y + 52.0, params);

        let preview = card.level_preview();
        if preview.is_empty() {
            return;
        }
        let params = TextParams::default().align(Align::Center).color(TEXT).wrap(96);
        let height: f32 = 4.0
            + preview
                .iter()
                .map(|line| text_height(cx.painter.line_count(line, params), 1, Font::Bit))
                .sum::<f32>();
        let px = x + 104.0;
        draw_tooltip_box(cx.painter, px, y, 102.0, height);
        let mut line_y = y + 3.0;
        for line in &preview {
            let lines = cx.painter.draw_text(line, px + 51.0, line_y, params);
            line_y += text_height(lines, 1, Font::Bit);
        }
    }
}

impl Behavior<GameCtx> for StoreNode {
    fn update(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        let active = cx.ctx.game.store_active.clone();
        sync_slots::<StoreCardNode>(cx.tree, cx.id, &mut self.slots, &active, PARK);
        self.tooltip = None;

        let shown = active.len().min(SLOTS);
        let mut x = SLOT_STRIDE;
        for i in (0..shown).rev() {
            let id = self.slots[i];
            if !cx.tree.node(id).is_some_and(|n| n.is_moving()) {
                cx.tree.move_to(id, Vec2::new(x, 0.0), 250.0 + 25.0 * i as f64, Easing::EaseOutQuad);
            }
            x += SLOT_STRIDE;
        }
    }

    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let at = cx.top_left();
        draw_empty_slots(cx.painter, at + Vec2::new(SLOT_STRIDE, 0.0), STORE_SLOTS);
    }

    fn draw_over(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let at = cx.top_left();
        cx.painter.draw_texture("card_back", at.x, at.y);
        let label = TextParams::default().align(Align::Center);
        cx.painter.draw_text("hq", at.x + 17.0, at.y + 4.0, label);
        let count = format!("{:02}", cx.ctx.game.store_deck.len());
        cx.painter.draw_text(&count, at.x + 17.0, at.y + 36.0, label.font(Font::Gb).color(COUNT));

        if let Some((card, at)) = &self.tooltip {
            self.draw_card_tooltip(cx, card, *at);
        }
    }
}

/// A card for sale; clicking it buys it when affordable.
#[derive(Default)]
pub struct StoreCardNode {
    card: Option<PlayerCard>,
}

impl CardSlot for StoreCardNode {
    type Card = PlayerCard;

    fn card(&self) -> Option<&PlayerCard> {
        self.card.as_ref()
    }

    fn set_card(&mut self, card: Option<PlayerCard>) {
        self.card = card;
    }
}

impl Behavior<GameCtx> for StoreCardNode {
    fn update(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        let Some(card) = &self.card else { return };
        if cx.node().is_some_and(|n| n.is_hovered()) {
            let at = cx.top_left();
            if let Some(store) = cx.tree.parent(cx.id).and_then(|p| cx.tree.behavior_mut::<StoreNode>(p)) {
                store.tooltip = Some((card.clone(), at));
            }
        }
    }

    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let Some(card) = &self.card else { return };
        let at = cx.top_left();
        if cx.node().is_some_and(|n| n.is_hovered()) {
            draw_outline(cx.painter, at, HIGHLIGHT);
        }
        draw_player_card(cx.painter, Some(card), at);
        if card.cost > cx.ctx.game.money {
            cx.painter.draw_quad(at.x, at.y, CARD_SIZE.x, CARD_SIZE.y, UNAFFORDABLE);
        }
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive<GameCtx>> {
        Some(self)
    }
}

impl Interactive<GameCtx> for StoreCardNode {
    fn on_hover(&mut self, _cx: &mut NodeCx<'_, GameCtx>, _mouse_down: bool) {}

    fn on_blur(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_down(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_up(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        let Some(card) = &self.card else { return };
        let game = &mut cx.ctx.game;
        if game.phase != Phase::Player || game.mode != PlayerMode::Play || game.awaiting_phase {
            return;
        }
        if game.buy(card.id) {
            if let Some(node) = cx.node_mut() {
                node.unhover();
            }
        }
    }
}
