use rift_engine::coords::Vec2;
use rift_engine::interp::Easing;
use rift_engine::paint::Color;
use rift_scene::{Behavior, DrawCx, Interactive, Node, NodeCx, NodeId, NodeTree};

use super::{
    centred_row_start, draw_outline, draw_player_card, draw_player_tooltip, draw_solid, sync_slots, CardSlot, CARD_SIZE,
    SLOT_STRIDE,
};
use crate::cards::{CardKind, PlayerCard};
use crate::context::GameCtx;
use crate::state::{Phase, PlayerMode, HAND_LIMIT};

const PARK: Vec2 = Vec2::new(-SLOT_STRIDE, 0.0);
/// A card released at or above this height is played.
const PLAY_LINE: f32 = -48.0;
const DRAG_LIMIT: f32 = -62.0;
const HOVER_LIFT: f32 = -5.0;
const PLAYABLE: Color = Color(0xFF22_DD00);
const GHOST: Color = Color(0x33FF_FFFF);
const AIM_DOTS: usize = 10;

/// The player's hand: one slot per card, centred, plus a ghost marking the
/// slot of the card being dragged.
#[derive(Default)]
pub struct HandNode {
    ghost: Option<NodeId>,
    slots: Vec<NodeId>,
    selected: Option<NodeId>,
    hover_tip: Option<(PlayerCard, Vec2)>,
}

impl HandNode {
    pub const SIZE: Vec2 = Vec2::new(338.0, 48.0);

    pub fn spawn(tree: &mut NodeTree<GameCtx>, parent: NodeId, x: f32, y: f32) -> NodeId {
        let id = tree.spawn_in_with(parent, Node::new(Self::SIZE).at(x, y), HandNode::default());
        let ghost = tree.spawn_in_with(id, Node::new(CARD_SIZE).at(PARK.x, PARK.y), GhostCard);
        let slots = (0..HAND_LIMIT)
            .map(|_| tree.spawn_in_with(id, Node::new(CARD_SIZE).at(PARK.x, PARK.y), HandCardNode::default()))
            .collect();
        if let Some(hand) = tree.behavior_mut::<HandNode>(id) {
            hand.ghost = Some(ghost);
            hand.slots = slots;
        }
        id
    }

    /// Card slots, in hand order.
    pub fn slots(&self) -> &[NodeId] {
        &self.slots
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn ghost(&self) -> Option<NodeId> {
        self.ghost
    }

    fn selected_card<'t>(&self, tree: &'t NodeTree<GameCtx>) -> Option<&'t PlayerCard> {
        self.selected
            .and_then(|id| tree.behavior::<HandCardNode>(id))
            .and_then(|slot| slot.card.as_ref())
    }
}

impl Behavior<GameCtx> for HandNode {
    fn update(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        let hand = cx.ctx.game.player_hand.clone();
        sync_slots::<HandCardNode>(cx.tree, cx.id, &mut self.slots, &hand, PARK);
        self.hover_tip = None;

        if self.selected_card(cx.tree).is_none() {
            self.selected = None;
        }
        cx.ctx.game.selected_card = self.selected_card(cx.tree).cloned();

        if let Some(ghost) = self.ghost {
            let at = match self.selected {
                Some(id) => Vec2::new(cx.tree.origin(id).x, 0.0),
                None => PARK,
            };
            cx.tree.move_to(ghost, at, 0.0, Easing::Linear);
        }

        let start = centred_row_start(Self::SIZE.x, hand.len());
        for (i, id) in self.slots.iter().take(hand.len()).enumerate() {
            let Some(node) = cx.tree.node(*id) else { continue };
            if node.is_hovered() || node.is_pressed() || node.is_moving() {
                continue;
            }
            let to = Vec2::new(start + SLOT_STRIDE * i as f32, 0.0);
            cx.tree.move_to(*id, to, 250.0 + 25.0 * i as f64, Easing::EaseOutQuad);
        }
    }

    fn draw_over(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let stitches = cx.ctx.game.stitch_counter;
        let top = cx.top_left().y - 49.0;
        if let (Some(id), Some(card)) = (self.selected, self.selected_card(cx.tree)) {
            let x = cx.tree.top_left(id).x + SLOT_STRIDE;
            draw_player_tooltip(cx.painter, card, x, top, 44.0, stitches);
        } else if let Some((card, at)) = &self.hover_tip {
            draw_player_tooltip(cx.painter, card, at.x - SLOT_STRIDE, top, 44.0, stitches);
        }
    }
}

/// One card of the hand. Pressing picks it up; releasing it above the play
/// line resolves it according to the current player mode.
#[derive(Default)]
pub struct HandCardNode {
    card: Option<PlayerCard>,
    will_be_played: bool,
}

impl HandCardNode {
    pub fn will_be_played(&self) -> bool {
        self.will_be_played
    }

    fn draw_aim(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let Some(card) = &self.card else { return };
        let Some(node) = cx.node() else { return };
        if card.kind != CardKind::Attack || cx.ctx.game.mode != PlayerMode::Play {
            return;
        }
        let at = cx.top_left();
        let pointer = cx.ctx.pointer;
        if !node.is_pressed() || node.origin().y != DRAG_LIMIT || pointer.y >= at.y + HOVER_LIFT {
            return;
        }

        // quadratic curve from the card to the pointer, bending sideways first
        let from = at + Vec2::new(15.0, -5.0);
        let to = pointer + Vec2::new(1.0, 3.0);
        let bend = Vec2::new(to.x, from.y);
        for i in 0..AIM_DOTS {
            let t = i as f32 / AIM_DOTS as f32;
            let u = 1.0 - t;
            let p = from * (u * u) + bend * (2.0 * u * t) + to * (t * t);
            draw_solid(cx.painter, p.x.round(), p.y.round(), 2.0, 2.0);
        }
    }
}

impl CardSlot for HandCardNode {
    type Card = PlayerCard;

    fn card(&self) -> Option<&PlayerCard> {
        self.card.as_ref()
    }

    fn set_card(&mut self, card: Option<PlayerCard>) {
        self.card = card;
    }
}

impl Behavior<GameCtx> for HandCardNode {
    fn update(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        let Some(card) = self.card.clone() else {
            self.will_be_played = false;
            return;
        };
        let Some(parent) = cx.tree.parent(cx.id) else { return };
        let Some((hovered, pressed, moving)) = cx.node().map(|n| (n.is_hovered(), n.is_pressed(), n.is_moving())) else {
            return;
        };
        let selection = cx.tree.behavior::<HandNode>(parent).and_then(HandNode::selected);
        let selected = selection == Some(cx.id);
        let origin = cx.origin();

        if selected && !pressed {
            if let Some(hand) = cx.tree.behavior_mut::<HandNode>(parent) {
                hand.selected = None;
            }
            let target = cx.ctx.game.encounter_target;
            if self.will_be_played && cx.ctx.game.release_card(card.id, target) {
                self.card = None;
                self.will_be_played = false;
                cx.move_to(PARK, 0.0, Easing::Linear);
                if let Some(node) = cx.node_mut() {
                    node.unhover();
                }
                cx.tree.add(parent, cx.id);
                return;
            }
        } else if selected {
            let top = cx.tree.top_left(parent).y;
            let y = (cx.ctx.pointer.y - top - 24.0).max(DRAG_LIMIT);
            cx.move_to(Vec2::new(origin.x, y), 0.0, Easing::Linear);
        } else if selection.is_none() && hovered && !moving {
            cx.move_to(Vec2::new(origin.x, HOVER_LIFT), 25.0, Easing::EaseOutQuad);
            let at = cx.top_left();
            if let Some(hand) = cx.tree.behavior_mut::<HandNode>(parent) {
                hand.hover_tip = Some((card, at));
            }
        }
        self.will_be_played = cx.origin().y <= PLAY_LINE;
    }

    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let at = cx.top_left();
        if self.will_be_played {
            draw_outline(cx.painter, at, PLAYABLE);
        }
        draw_player_card(cx.painter, self.card.as_ref(), at);
        self.draw_aim(cx);
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive<GameCtx>> {
        Some(self)
    }
}

impl Interactive<GameCtx> for HandCardNode {
    fn on_hover(&mut self, _cx: &mut NodeCx<'_, GameCtx>, _mouse_down: bool) {}

    fn on_blur(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_down(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        if self.card.is_none() || cx.ctx.game.phase != Phase::Player {
            return;
        }
        let Some(parent) = cx.tree.parent(cx.id) else { return };
        if let Some(hand) = cx.tree.behavior_mut::<HandNode>(parent) {
            if hand.selected.is_none() {
                hand.selected = Some(cx.id);
            }
        }
    }

    fn on_mouse_up(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        if let Some(node) = cx.node_mut() {
            node.unhover();
        }
    }
}

/// Faint empty slot left behind by the card being dragged.
pub struct GhostCard;

impl Behavior<GameCtx> for GhostCard {
    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let at = cx.top_left();
        cx.painter.set_tint(GHOST);
        cx.painter.draw_texture("card_empty_space", at.x, at.y);
        cx.painter.set_tint(Color::WHITE);
    }
}
