use rift_engine::coords::Vec2;
use rift_engine::interp::Easing;
use rift_scene::{unsupported_hook, Behavior, Completion, DrawCx, Interactive, Node, NodeCx, NodeId, NodeTree};

use super::{
    centred_row_start, draw_outline, draw_player_card, draw_player_tooltip, sync_slots, CardSlot, CARD_SIZE, HIGHLIGHT,
    SLOT_STRIDE,
};
use crate::cards::PlayerCard;
use crate::context::GameCtx;

const SLOTS: usize = 12;
const PARK: Vec2 = Vec2::new(0.0, 350.0);
const PLAY_LIFT: f32 = -10.0;
const PLAY_MS: f64 = 66.0;

/// Permanent cards in play, centred in a row above the hand.
#[derive(Default)]
pub struct PermanentsNode {
    slots: Vec<NodeId>,
    tooltip: Option<(PlayerCard, Vec2)>,
}

impl PermanentsNode {
    pub const SIZE: Vec2 = Vec2::new(406.0, 48.0);

    pub fn spawn(tree: &mut NodeTree<GameCtx>, parent: NodeId, x: f32, y: f32) -> NodeId {
        let id = tree.spawn_in_with(parent, Node::new(Self::SIZE).at(x, y), PermanentsNode::default());
        let slots = (0..SLOTS)
            .map(|_| tree.spawn_in_with(id, Node::new(CARD_SIZE).at(PARK.x, PARK.y), PermanentCardNode::default()))
            .collect();
        if let Some(row) = tree.behavior_mut::<PermanentsNode>(id) {
            row.slots = slots;
        }
        id
    }

    pub fn slots(&self) -> &[NodeId] {
        &self.slots
    }
}

impl Behavior<GameCtx> for PermanentsNode {
    fn update(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        let permanents = cx.ctx.game.permanents.clone();
        sync_slots::<PermanentCardNode>(cx.tree, cx.id, &mut self.slots, &permanents, PARK);
        self.tooltip = None;

        let shown = permanents.len().min(SLOTS);
        let start = centred_row_start(Self::SIZE.x, shown);
        for (i, id) in self.slots.iter().take(shown).enumerate() {
            if cx.tree.node(*id).is_some_and(|n| n.is_moving()) {
                continue;
            }
            let to = Vec2::new(start + SLOT_STRIDE * i as f32, 0.0);
            cx.tree.move_to(*id, to, 250.0 + 25.0 * i as f64, Easing::EaseOutQuad);
        }
    }

    fn draw_over(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        if let Some((card, at)) = &self.tooltip {
            draw_player_tooltip(cx.painter, card, at.x - SLOT_STRIDE, at.y - 49.0, 44.0, cx.ctx.game.stitch_counter);
        }
    }
}

#[derive(Default)]
enum Playing {
    #[default]
    Idle,
    Rising(Completion),
    Settling(Completion),
}

/// One permanent. At the start of each player phase it lifts, applies its
/// effects, and settles back.
#[derive(Default)]
pub struct PermanentCardNode {
    card: Option<PlayerCard>,
    playing: Playing,
}

impl CardSlot for PermanentCardNode {
    type Card = PlayerCard;

    fn card(&self) -> Option<&PlayerCard> {
        self.card.as_ref()
    }

    fn set_card(&mut self, card: Option<PlayerCard>) {
        self.card = card;
    }
}

impl Behavior<GameCtx> for PermanentCardNode {
    fn update(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        let Some(card) = self.card.clone() else {
            self.playing = Playing::Idle;
            return;
        };
        if cx.node().is_some_and(|n| n.is_hovered()) {
            let at = cx.top_left();
            if let Some(row) = cx.tree.parent(cx.id).and_then(|p| cx.tree.behavior_mut::<PermanentsNode>(p)) {
                row.tooltip = Some((card.clone(), at));
            }
        }

        let game = &mut cx.ctx.game;
        self.playing = match std::mem::take(&mut self.playing) {
            Playing::Idle if game.permanent_playing == Some(card.id) => {
                Playing::Rising(cx.tree.move_by(cx.id, Vec2::new(0.0, PLAY_LIFT), PLAY_MS, Easing::Linear))
            }
            Playing::Rising(lift) if lift.is_done() => {
                log::debug!("{} takes effect", card.name);
                game.apply_player_effects(&card.effects, None);
                Playing::Settling(cx.tree.move_by(cx.id, Vec2::new(0.0, -PLAY_LIFT), PLAY_MS, Easing::Linear))
            }
            Playing::Rising(lift) if lift.is_abandoned() => {
                game.permanent_playing = None;
                Playing::Idle
            }
            Playing::Settling(settle) if !settle.is_pending() => {
                game.permanent_playing = None;
                Playing::Idle
            }
            other => other,
        };
    }

    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let Some(card) = &self.card else { return };
        let at = cx.top_left();
        let hovered = cx.node().is_some_and(|n| n.is_hovered());
        if hovered || cx.ctx.game.permanent_playing == Some(card.id) {
            draw_outline(cx.painter, at, HIGHLIGHT);
        }
        draw_player_card(cx.painter, Some(card), at);
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive<GameCtx>> {
        Some(self)
    }
}

// Permanents are only hovered, for their tooltip.
impl Interactive<GameCtx> for PermanentCardNode {
    fn accepts_press(&self) -> bool {
        false
    }

    fn on_hover(&mut self, _cx: &mut NodeCx<'_, GameCtx>, _mouse_down: bool) {}

    fn on_blur(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_down(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        unsupported_hook(cx.id, "on_mouse_down");
    }

    fn on_mouse_up(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        unsupported_hook(cx.id, "on_mouse_up");
    }
}
