use rift_engine::coords::Vec2;
use rift_engine::interp::Easing;
use rift_engine::paint::Color;
use rift_engine::text::{Align, TextParams};
use rift_scene::{Behavior, Completion, DrawCx, Interactive, Node, NodeCx, NodeId, NodeTree};

use super::{
    draw_empty_slots, draw_encounter_card, draw_encounter_tooltip, draw_outline, sync_slots, CardSlot, CARD_SIZE,
    HIGHLIGHT, SLOT_STRIDE,
};
use crate::cards::{CardKind, EncounterCard};
use crate::context::GameCtx;
use crate::state::{PlayerMode, ENCOUNTER_SLOTS};

const PARK: Vec2 = Vec2::new(-SLOT_STRIDE, 0.0);
const PLAY_DIP: f32 = 10.0;
const PLAY_MS: f64 = 120.0;
const PREVIEW_SHADE: Color = Color(0x9900_0000);
const PREVIEW_DAMAGE: Color = Color(0xFF22_22FF);

/// The creatures that came through the rift, newest on the left.
#[derive(Default)]
pub struct EncountersNode {
    slots: Vec<NodeId>,
    tooltip: Option<(EncounterCard, Vec2)>,
}

impl EncountersNode {
    pub const SIZE: Vec2 = Vec2::new(SLOT_STRIDE * ENCOUNTER_SLOTS as f32, 48.0);

    pub fn spawn(tree: &mut NodeTree<GameCtx>, parent: NodeId, x: f32, y: f32) -> NodeId {
        let id = tree.spawn_in_with(parent, Node::new(Self::SIZE).at(x, y), EncountersNode::default());
        let slots = (0..ENCOUNTER_SLOTS)
            .map(|_| tree.spawn_in_with(id, Node::new(CARD_SIZE).at(PARK.x, PARK.y), EncounterCardNode::default()))
            .collect();
        if let Some(row) = tree.behavior_mut::<EncountersNode>(id) {
            row.slots = slots;
        }
        id
    }

    pub fn slots(&self) -> &[NodeId] {
        &self.slots
    }
}

impl Behavior<GameCtx> for EncountersNode {
    fn update(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        let active = cx.ctx.game.encounters_active.clone();
        sync_slots::<EncounterCardNode>(cx.tree, cx.id, &mut self.slots, &active, PARK);
        self.tooltip = None;

        let shown = active.len().min(self.slots.len());
        let mut x = 0.0;
        for i in (0..shown).rev() {
            let id = self.slots[i];
            if !cx.tree.node(id).is_some_and(|n| n.is_moving()) {
                cx.tree.move_to(id, Vec2::new(x, 0.0), 250.0 + 25.0 * i as f64, Easing::EaseOutQuad);
            }
            x += SLOT_STRIDE;
        }
    }

    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        draw_empty_slots(cx.painter, cx.top_left(), ENCOUNTER_SLOTS);
    }

    fn draw_over(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        if let Some((card, at)) = &self.tooltip {
            draw_encounter_tooltip(cx.painter, card, *at);
        }
    }
}

#[derive(Default)]
enum Playing {
    #[default]
    Idle,
    Dipping(Completion),
    Rising(Completion),
}

/// One creature. Hovering makes it the attack target; while the rift plays
/// it, the card dips, its effects resolve, and it rises again.
#[derive(Default)]
pub struct EncounterCardNode {
    card: Option<EncounterCard>,
    playing: Playing,
}

impl CardSlot for EncounterCardNode {
    type Card = EncounterCard;

    fn card(&self) -> Option<&EncounterCard> {
        self.card.as_ref()
    }

    fn set_card(&mut self, card: Option<EncounterCard>) {
        self.card = card;
    }
}

impl EncounterCardNode {
    fn step_play(&mut self, cx: &mut NodeCx<'_, GameCtx>, card: &EncounterCard) {
        let game = &mut cx.ctx.game;
        self.playing = match std::mem::take(&mut self.playing) {
            Playing::Idle if game.encounter_playing == Some(card.id) => {
                Playing::Dipping(cx.tree.move_by(cx.id, Vec2::new(0.0, PLAY_DIP), PLAY_MS, Easing::Linear))
            }
            Playing::Dipping(dip) if dip.is_done() => {
                game.apply_encounter_effects(card.id);
                Playing::Rising(cx.tree.move_by(cx.id, Vec2::new(0.0, -PLAY_DIP), PLAY_MS, Easing::Linear))
            }
            Playing::Dipping(dip) if dip.is_abandoned() => {
                game.encounter_playing = None;
                Playing::Idle
            }
            Playing::Rising(rise) if !rise.is_pending() => {
                game.encounter_playing = None;
                Playing::Idle
            }
            other => other,
        };
    }

    fn attack_preview(&self, cx: &DrawCx<'_, '_, GameCtx>) -> Option<u32> {
        let card = self.card.as_ref()?;
        let selected = cx.ctx.game.selected_card.as_ref()?;
        if selected.kind != CardKind::Attack || cx.ctx.game.mode != PlayerMode::Play {
            return None;
        }
        Some(card.damage_from(selected.attack()))
    }
}

impl Behavior<GameCtx> for EncounterCardNode {
    fn update(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        let Some(card) = self.card.clone() else {
            self.playing = Playing::Idle;
            return;
        };
        if cx.node().is_some_and(|n| n.is_hovered()) {
            cx.ctx.game.encounter_target = Some(card.id);
            let at = cx.top_left();
            if let Some(row) = cx.tree.parent(cx.id).and_then(|p| cx.tree.behavior_mut::<EncountersNode>(p)) {
                row.tooltip = Some((card.clone(), at));
            }
        }
        self.step_play(cx, &card);
    }

    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let Some(card) = &self.card else { return };
        let at = cx.top_left();
        let game = &cx.ctx.game;
        if game.encounter_target == Some(card.id) || game.encounter_playing == Some(card.id) {
            draw_outline(cx.painter, at, HIGHLIGHT);
        }
        draw_encounter_card(cx.painter, Some(card), at);

        if let Some(damage) = self.attack_preview(cx) {
            cx.painter.draw_quad(at.x, at.y, CARD_SIZE.x, CARD_SIZE.y, PREVIEW_SHADE);
            let params = TextParams::default().align(Align::Center).scale(2).color(PREVIEW_DAMAGE);
            cx.painter.draw_text(&format!("-{damage}"), at.x + 17.0, at.y + 18.0, params);
        }
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive<GameCtx>> {
        Some(self)
    }
}

impl Interactive<GameCtx> for EncounterCardNode {
    fn on_hover(&mut self, _cx: &mut NodeCx<'_, GameCtx>, _mouse_down: bool) {}

    fn on_blur(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        let Some(card) = &self.card else { return };
        if cx.ctx.game.encounter_target == Some(card.id) {
            cx.ctx.game.encounter_target = None;
        }
    }

    fn on_mouse_down(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_up(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}
}
