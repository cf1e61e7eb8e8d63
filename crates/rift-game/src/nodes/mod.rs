//! Gameplay nodes: the card rows of the game scene, the piles and the
//! research-set toggles.
//!
//! Row nodes own a fixed set of card slots. Each tick [`sync_slots`] hands
//! the slots the current cards of their collection; a slot whose card left
//! the collection is parked and moved to the back, so the remaining slots
//! keep following their cards.

mod deck_selector;
mod encounters;
mod hand;
mod permanents;
mod piles;
mod store;

pub use deck_selector::DeckSelectorNode;
pub use encounters::{EncounterCardNode, EncountersNode};
pub use hand::{GhostCard, HandCardNode, HandNode};
pub use permanents::{PermanentCardNode, PermanentsNode};
pub use piles::{DeckNode, DiscardPileNode, PileCardNode, StoreDiscardNode};
pub use store::{StoreCardNode, StoreNode};

use rift_engine::coords::Vec2;
use rift_engine::paint::Color;
use rift_engine::render::{Painter, SOLID};
use rift_engine::interp::Easing;
use rift_engine::text::{text_height, Align, Font, TextParams};
use rift_scene::{Behavior, NodeId, NodeTree};

use crate::cards::{CardId, EncounterCard, PlayerCard};
use crate::context::GameCtx;
use crate::state::ALT_WIN_THRESHOLD;

pub const CARD_SIZE: Vec2 = Vec2::new(32.0, 48.0);
/// Horizontal distance between neighbouring card slots.
pub const SLOT_STRIDE: f32 = 34.0;

pub(crate) const HIGHLIGHT: Color = Color(0xFFEE_EEEE);
pub(crate) const TEXT: Color = Color(0xFFEE_EEEE);
pub(crate) const MUTED: Color = Color(0xFF77_7777);
pub(crate) const WARNING: Color = Color(0xFF22_22FF);
const TOOLTIP_FILL: Color = Color(0xFF0E_0803);
const MISSING_ART: Color = Color(0xFF00_00FF);
const COST: Color = Color(0xFF35_3330);
const LEVEL_BADGE: Color = Color(0xAA00_0000);
const EMPTY_SLOT: Color = Color(0x66FF_FFFF);

// ── slots ─────────────────────────────────────────────────────────────────

pub(crate) trait HasCardId {
    fn card_id(&self) -> CardId;
}

impl HasCardId for PlayerCard {
    fn card_id(&self) -> CardId {
        self.id
    }
}

impl HasCardId for EncounterCard {
    fn card_id(&self) -> CardId {
        self.id
    }
}

/// A node that shows one card of a collection.
pub(crate) trait CardSlot: Behavior<GameCtx> {
    type Card: HasCardId + Clone;

    fn card(&self) -> Option<&Self::Card>;
    fn set_card(&mut self, card: Option<Self::Card>);
}

/// Hands `cards` to `slots` in order. Slots whose card is no longer in
/// `cards` are parked at `park`, moved to the end of their parent's
/// children and to the back of `slots`.
pub(crate) fn sync_slots<S: CardSlot>(
    tree: &mut NodeTree<GameCtx>,
    parent: NodeId,
    slots: &mut Vec<NodeId>,
    cards: &[S::Card],
    park: Vec2,
) {
    let holds_live_card = |tree: &NodeTree<GameCtx>, id: NodeId| {
        tree.behavior::<S>(id)
            .and_then(S::card)
            .is_some_and(|card| cards.iter().any(|c| c.card_id() == card.card_id()))
    };
    let (mut kept, freed): (Vec<NodeId>, Vec<NodeId>) = slots.iter().copied().partition(|id| holds_live_card(tree, *id));

    for id in &freed {
        let had_card = tree.behavior::<S>(*id).is_some_and(|s| s.card().is_some());
        if had_card {
            tree.move_to(*id, park, 0.0, Easing::Linear);
            if let Some(node) = tree.node_mut(*id) {
                node.unhover();
            }
            tree.add(parent, *id);
        }
    }
    kept.extend(freed);
    *slots = kept;

    for (i, id) in slots.iter().enumerate() {
        if let Some(slot) = tree.behavior_mut::<S>(*id) {
            slot.set_card(cards.get(i).cloned());
        }
    }
}

/// Left edge of the first of `count` cards centred in a row `width` wide.
pub(crate) fn centred_row_start(width: f32, count: usize) -> f32 {
    let used = (count as f32 - 1.0) * SLOT_STRIDE + CARD_SIZE.x;
    ((width - used) / 2.0).trunc()
}

// ── drawing ───────────────────────────────────────────────────────────────

pub(crate) fn draw_empty_slots(painter: &mut Painter<'_>, at: Vec2, count: usize) {
    painter.set_tint(EMPTY_SLOT);
    for i in 0..count {
        painter.draw_texture("card_empty_space", at.x + SLOT_STRIDE * i as f32, at.y);
    }
    painter.set_tint(Color::WHITE);
}

/// One-pixel frame around a card at `at`.
pub(crate) fn draw_outline(painter: &mut Painter<'_>, at: Vec2, color: Color) {
    painter.draw_quad(at.x - 1.0, at.y - 1.0, CARD_SIZE.x + 2.0, CARD_SIZE.y + 2.0, color);
}

pub(crate) fn draw_player_card(painter: &mut Painter<'_>, card: Option<&PlayerCard>, at: Vec2) {
    match card {
        Some(card) => painter.draw_texture(card.art, at.x, at.y),
        None => painter.draw_quad(at.x, at.y + 1.0, 32.0, 32.0, MISSING_ART),
    }
    painter.draw_texture("card_player", at.x, at.y);

    let Some(card) = card else {
        painter.draw_text("0", at.x + CARD_SIZE.x - 9.0, at.y + CARD_SIZE.y - 9.0, TextParams::default().color(COST));
        return;
    };
    if card.level > 0 {
        painter.draw_quad(at.x + CARD_SIZE.x - 15.0, at.y + 4.0, 11.0, 7.0, LEVEL_BADGE);
        painter.draw_text(&format!("+{}", card.level), at.x + CARD_SIZE.x - 15.0, at.y + 5.0, TextParams::default());
    }
    painter.draw_text(
        &card.cost.to_string(),
        at.x + CARD_SIZE.x - 11.0,
        at.y + CARD_SIZE.y - 9.0,
        TextParams::default().color(COST),
    );
}

pub(crate) fn draw_encounter_card(painter: &mut Painter<'_>, card: Option<&EncounterCard>, at: Vec2) {
    match card {
        Some(card) => painter.draw_texture(card.art, at.x, at.y),
        None => painter.draw_quad(at.x, at.y + 1.0, 32.0, 32.0, MISSING_ART),
    }
    painter.draw_texture("card_enemy", at.x, at.y);
    let health = card.map_or(0, |c| c.health);
    painter.draw_text(&health.to_string(), at.x + CARD_SIZE.x - 9.0, at.y + CARD_SIZE.y - 9.0, TextParams::default());
}

pub(crate) fn draw_tooltip_box(painter: &mut Painter<'_>, x: f32, y: f32, w: f32, h: f32) {
    painter.draw_quad(x, y, w, h, HIGHLIGHT);
    painter.draw_quad(x + 1.0, y + 1.0, w - 2.0, h - 2.0, TOOLTIP_FILL);
}

fn centred(color: Color) -> TextParams {
    TextParams::default().align(Align::Center).color(color)
}

/// Name, kind and effects of `card` in a 102 px box whose top-left is
/// `(x, y)`. Returns the y just below the last line.
pub(crate) fn draw_player_tooltip(painter: &mut Painter<'_>, card: &PlayerCard, x: f32, y: f32, h: f32, stitches: u32) -> f32 {
    draw_tooltip_box(painter, x, y, 102.0, h);
    let mid = x + 51.0;
    let mut line_y = y + 3.0;

    let name = if card.level > 0 { format!("{}+{}", card.name, card.level) } else { card.name.to_string() };
    let lines = painter.draw_text(&name, mid, line_y, centred(TEXT).wrap(98));
    line_y += text_height(lines, 1, Font::Bit);

    painter.draw_text(card.kind.label(), mid, line_y, centred(MUTED));
    line_y += 11.0;

    for effect in card.description() {
        let lines = painter.draw_text(&effect, mid, line_y, centred(TEXT).wrap(96));
        line_y += text_height(lines, 1, Font::Bit);
    }
    if card.has_stitch() {
        line_y += 3.0;
        let left = ALT_WIN_THRESHOLD.saturating_sub(stitches);
        painter.draw_text(&format!("{left} more..."), mid, line_y, centred(TEXT).wrap(96));
    }
    line_y
}

/// Encounter tooltip below a card whose top-left is `at`; sized to fit.
pub(crate) fn draw_encounter_tooltip(painter: &mut Painter<'_>, card: &EncounterCard, at: Vec2) {
    let x = at.x - SLOT_STRIDE;
    let y = at.y + 50.0;
    let description = card.description();
    let name_params = centred(TEXT).wrap(98);
    let effect_params = centred(TEXT).wrap(96);

    let name_lines = painter.line_count(card.name, name_params);
    let mut height = 3.0 + text_height(name_lines, 1, Font::Bit);
    height += match (card.armor > 0, description.is_empty()) {
        (true, false) => 11.0,
        (true, true) => 7.0,
        (false, false) => 4.0,
        (false, true) => 0.0,
    };
    for effect in &description {
        height += text_height(painter.line_count(effect, effect_params), 1, Font::Bit);
    }

    draw_tooltip_box(painter, x, y, 102.0, height + 2.0);
    let mid = x + 51.0;
    let mut line_y = y + 3.0;
    painter.draw_text(card.name, mid, line_y, name_params);
    line_y += text_height(name_lines, 1, Font::Bit);

    if card.armor > 0 {
        painter.draw_text(&format!("armor {}", card.armor), mid, line_y, centred(MUTED));
        line_y += 11.0;
    } else if !description.is_empty() {
        line_y += 4.0;
    }
    for effect in &description {
        let lines = painter.draw_text(effect, mid, line_y, effect_params);
        line_y += text_height(lines, 1, Font::Bit);
    }
}

/// Solid white quad, for markers and aim dots.
pub(crate) fn draw_solid(painter: &mut Painter<'_>, x: f32, y: f32, w: f32, h: f32) {
    let tint = painter.tint();
    painter.draw_texture_scaled(SOLID, x, y, w, h);
    painter.set_tint(tint);
}

#[cfg(test)]
pub(crate) mod testing {
    use rift_engine::coords::Viewport;
    use rift_engine::assets::AssetError;
    use rift_engine::render::{AssetGuard, DrawBatch, MissingAssetPolicy, Painter};
    use rift_engine::text::TextLayout;
    use rift_engine::time::Tick;
    use rift_scene::Stage;

    use crate::assets::procedural_atlas;
    use crate::context::GameCtx;
    use crate::rng::GameRng;
    use crate::state::Difficulty;
    use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use rift_engine::coords::Vec2;

    pub fn ctx() -> GameCtx {
        let mut ctx = GameCtx::new(GameRng::seeded(5));
        ctx.game.setup_game(Difficulty::Normal);
        ctx
    }

    pub fn stage() -> Stage<GameCtx> {
        let mut stage = Stage::new(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        stage.bind_input();
        stage
    }

    pub fn frame(now: f64) -> Tick {
        Tick::new(now, 16.0)
    }

    /// Draws with the built-in atlas. Missing textures and glyphs are
    /// recorded rather than replaced; returns the batch and the first one.
    pub fn draw_strict(f: impl FnOnce(&mut Painter<'_>)) -> (DrawBatch, Option<AssetError>) {
        let (atlas, _) = procedural_atlas(rift_engine::render::TextureId(0));
        let mut batch = DrawBatch::new();
        let mut layout = TextLayout::new();
        let mut guard = AssetGuard::new(MissingAssetPolicy::Fail);
        let mut painter = Painter::new(&mut batch, &atlas, &mut layout, &mut guard, Viewport::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        f(&mut painter);
        painter.flush();
        let fault = guard.take_fault();
        (batch, fault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centred_rows_are_whole_pixels() {
        assert_eq!(centred_row_start(338.0, 6), 68.0);
        assert_eq!(centred_row_start(338.0, 1), 153.0);
        assert_eq!(centred_row_start(406.0, 12), 0.0);
    }
}
