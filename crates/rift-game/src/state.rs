//! The shared game record and the rules that mutate it.
//!
//! Nodes and the phase machine read and write [`GameState`] directly; every
//! rule that touches more than one collection lives here so the nodes stay
//! thin and the rules can be tested without a scene.

use std::collections::VecDeque;

use rift_engine::coords::Vec2;
use rift_engine::interp::{Easing, Interpolator};

use crate::cards::{known_encounter_card, known_player_card, CardId, CardKind, Effect, EncounterCard, PlayerCard};
use crate::decks::{self, DeckSet};
use crate::rng::GameRng;

pub const HAND_LIMIT: usize = 15;
pub const ENCOUNTER_SLOTS: usize = 10;
pub const STORE_SLOTS: usize = 5;
/// Cards drawn by the player every draw phase.
pub const DRAW_PER_TURN: usize = 6;
/// Stitch or favour count that ends the game.
pub const ALT_WIN_THRESHOLD: u32 = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Pregame,
    Begin,
    Draw,
    Player,
    Rift,
    Discard,
    End,
    GameOver,
}

impl Phase {
    /// The phases of one turn, in order.
    pub const TURN: [Phase; 6] = [Phase::Begin, Phase::Draw, Phase::Player, Phase::Rift, Phase::Discard, Phase::End];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Pregame => "pregame",
            Phase::Begin => "begin",
            Phase::Draw => "draw",
            Phase::Player => "player",
            Phase::Rift => "rift",
            Phase::Discard => "discard",
            Phase::End => "end",
            Phase::GameOver => "game over",
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn stability_max(self) -> u32 {
        match self {
            Difficulty::Easy => 75,
            Difficulty::Normal => 50,
            Difficulty::Hard => 30,
        }
    }

    /// How many research sets may be picked.
    pub fn deck_limit(self) -> usize {
        match self {
            Difficulty::Hard => 1,
            Difficulty::Easy | Difficulty::Normal => 2,
        }
    }
}

/// What a card dragged past the play line does.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PlayerMode {
    #[default]
    Play,
    Discard,
    Destroy,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameOverReason {
    /// Too many creatures came through the rift.
    Overrun,
    /// Every creature was defeated.
    Clear,
    Stitch,
    OldOne,
}

/// Which pile the discard pile scene shows.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PileView {
    #[default]
    Player,
    Store,
}

// ── discard queue ─────────────────────────────────────────────────────────

#[derive(Debug)]
struct Falling {
    card: PlayerCard,
    interp: Interpolator,
    offset: Vec2,
}

/// Cards on their way to a discard pile. Only the head animates, dropping
/// from `(0, -40)` onto the pile; the rest wait their turn.
#[derive(Debug)]
pub struct DiscardQueue {
    base_ms: f64,
    pending: VecDeque<Falling>,
}

impl DiscardQueue {
    const DROP: f32 = -40.0;

    /// `base_ms` is the fall time of a card queued onto an empty queue;
    /// later cards fall faster (`base_ms / (len + 1)`).
    pub fn new(base_ms: f64) -> Self {
        Self { base_ms, pending: VecDeque::new() }
    }

    pub fn push(&mut self, card: PlayerCard) {
        let duration = self.base_ms / (self.pending.len() as f64 + 1.0);
        self.pending.push_back(Falling {
            card,
            interp: Interpolator::new(duration, Easing::EaseOutQuad),
            offset: Vec2::new(0.0, Self::DROP),
        });
    }

    /// Advances the head; returns it once it has landed.
    pub fn step(&mut self, now: f64) -> Option<PlayerCard> {
        let head = self.pending.front_mut()?;
        let step = head.interp.step(now);
        if step.done {
            return self.pending.pop_front().map(|f| f.card);
        }
        head.offset.y = Self::DROP + (-Self::DROP as f64 * step.value).round() as f32;
        None
    }

    /// The falling card and its offset from the pile.
    pub fn head(&self) -> Option<(&PlayerCard, Vec2)> {
        self.pending.front().map(|f| (&f.card, f.offset))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// ── game state ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct GameState {
    pub rng: GameRng,
    pub difficulty: Difficulty,

    pub turn: u32,
    pub phase: Phase,
    /// A delayed phase change is scheduled.
    pub awaiting_phase: bool,

    pub rift_stability: u32,
    pub rift_stability_max: u32,

    pub encounter_deck: Vec<EncounterCard>,
    pub encounters_active: Vec<EncounterCard>,
    pub encounter_target: Option<CardId>,
    pub encounter_playing: Option<CardId>,
    pub encounter_playing_index: usize,
    /// Creatures acting this rift phase, taken once on entry.
    pub rift_snapshot: Vec<CardId>,

    pub player_deck: Vec<PlayerCard>,
    pub player_hand: Vec<PlayerCard>,
    pub discard_pile: Vec<PlayerCard>,
    pub discard_queue: DiscardQueue,
    pub permanents: Vec<PlayerCard>,
    pub permanent_playing: Option<CardId>,
    pub permanent_playing_index: usize,
    /// Mirror of the card being dragged, for tooltips and attack previews.
    pub selected_card: Option<PlayerCard>,

    pub mode: PlayerMode,
    pub discards_required: u32,
    pub destroys_required: u32,

    pub money: u32,
    pub stitch_counter: u32,
    pub favour_counter: u32,

    pub store_deck: Vec<PlayerCard>,
    pub store_active: Vec<PlayerCard>,
    pub store_discard: Vec<PlayerCard>,
    pub store_discard_queue: DiscardQueue,

    pub decks_picked: Vec<DeckSet>,
    pub game_over_reason: Option<GameOverReason>,
    pub pile_view: PileView,
}

impl GameState {
    pub fn new(rng: GameRng) -> Self {
        Self {
            rng,
            difficulty: Difficulty::Normal,
            turn: 0,
            phase: Phase::Pregame,
            awaiting_phase: false,
            rift_stability: 0,
            rift_stability_max: 50,
            encounter_deck: Vec::new(),
            encounters_active: Vec::new(),
            encounter_target: None,
            encounter_playing: None,
            encounter_playing_index: 0,
            rift_snapshot: Vec::new(),
            player_deck: Vec::new(),
            player_hand: Vec::new(),
            discard_pile: Vec::new(),
            discard_queue: DiscardQueue::new(125.0),
            permanents: Vec::new(),
            permanent_playing: None,
            permanent_playing_index: 0,
            selected_card: None,
            mode: PlayerMode::Play,
            discards_required: 0,
            destroys_required: 0,
            money: 0,
            stitch_counter: 0,
            favour_counter: 0,
            store_deck: Vec::new(),
            store_active: Vec::new(),
            store_discard: Vec::new(),
            store_discard_queue: DiscardQueue::new(100.0),
            decks_picked: Vec::new(),
            game_over_reason: None,
            pile_view: PileView::Player,
        }
    }

    /// Fresh game at the given difficulty; the rng carries on.
    pub fn setup_game(&mut self, difficulty: Difficulty) {
        let rng = self.rng.clone();
        *self = GameState::new(rng);
        self.difficulty = difficulty;
        self.rift_stability_max = difficulty.stability_max();
        self.player_deck = decks::starting_deck(&mut self.rng);
        self.encounter_deck = decks::encounter_deck(&mut self.rng);
        log::info!("new {} game, seed {}", difficulty.label(), self.rng.seed());
    }

    pub fn generate_store(&mut self) {
        self.store_deck = decks::store_deck(&self.decks_picked, &mut self.rng);
        self.store_active.clear();
        self.store_discard.clear();
        log::debug!("store built from {:?}: {} cards", self.decks_picked, self.store_deck.len());
    }

    /// Picks `set`, or unpicks it when already picked. Picking past the
    /// difficulty's limit drops the oldest pick.
    pub fn toggle_deck(&mut self, set: DeckSet) {
        let limit = self.difficulty.deck_limit();
        if let Some(index) = self.decks_picked.iter().position(|s| *s == set) {
            self.decks_picked.remove(index);
            return;
        }
        if self.decks_picked.len() >= limit && !self.decks_picked.is_empty() {
            self.decks_picked.remove(0);
        }
        self.decks_picked.push(set);
    }

    // ── stability ──

    /// Stability gained at the end of each rift phase.
    pub fn stability_rate(&self) -> u32 {
        self.turn.saturating_sub(1) / 5 + 1
    }

    pub fn raise_stability(&mut self, by: u32) {
        self.rift_stability = (self.rift_stability + by).min(self.rift_stability_max);
    }

    pub fn is_stability_maxed(&self) -> bool {
        self.rift_stability >= self.rift_stability_max
    }

    // ── encounters ──

    /// More creatures than slots, or full slots with more still to come.
    pub fn is_overrun(&self) -> bool {
        let active = self.encounters_active.len();
        active > ENCOUNTER_SLOTS || (active == ENCOUNTER_SLOTS && !self.encounter_deck.is_empty())
    }

    pub fn is_cleared(&self) -> bool {
        self.encounter_deck.is_empty() && self.encounters_active.is_empty()
    }

    pub fn draw_encounter(&mut self) -> bool {
        let Some(card) = self.encounter_deck.pop() else { return false };
        log::debug!("{} comes through the rift", card.name);
        self.encounters_active.push(card);
        true
    }

    pub fn summon_encounter(&mut self, name: &str) {
        let card = known_encounter_card(name);
        log::debug!("{} is summoned", card.name);
        self.encounters_active.push(card);
    }

    pub fn encounter(&self, id: CardId) -> Option<&EncounterCard> {
        self.encounters_active.iter().find(|c| c.id == id)
    }

    pub fn encounter_mut(&mut self, id: CardId) -> Option<&mut EncounterCard> {
        self.encounters_active.iter_mut().find(|c| c.id == id)
    }

    fn forget_encounter(&mut self, id: CardId) {
        if self.encounter_target == Some(id) {
            self.encounter_target = None;
        }
        if self.encounter_playing == Some(id) {
            self.encounter_playing = None;
        }
    }

    /// Removes every creature whose health has run out.
    pub fn remove_dead(&mut self) {
        let dead: Vec<CardId> = self.encounters_active.iter().filter(|c| c.is_dead()).map(|c| c.id).collect();
        for id in dead {
            self.encounters_active.retain(|c| c.id != id);
            self.forget_encounter(id);
            log::debug!("{id} was defeated");
        }
    }

    // ── player cards ──

    /// Draws one card, reshuffling the discard pile into an empty deck.
    /// Does nothing once the hand is full or both piles are empty.
    pub fn draw_player_card(&mut self) -> bool {
        if self.player_hand.len() >= HAND_LIMIT {
            return false;
        }
        if self.player_deck.is_empty() {
            if self.discard_pile.is_empty() {
                return false;
            }
            self.player_deck = std::mem::take(&mut self.discard_pile);
            self.rng.shuffle(&mut self.player_deck);
            log::debug!("discard pile reshuffled into a deck of {}", self.player_deck.len());
        }
        let Some(card) = self.player_deck.pop() else { return false };
        self.player_hand.push(card);
        true
    }

    fn take_from_hand(&mut self, id: CardId) -> Option<PlayerCard> {
        let index = self.player_hand.iter().position(|c| c.id == id)?;
        Some(self.player_hand.remove(index))
    }

    /// Whether `card` can be played right now with `target` hovered.
    pub fn can_play(&self, card: &PlayerCard, target: Option<CardId>) -> bool {
        match self.mode {
            PlayerMode::Discard | PlayerMode::Destroy => true,
            PlayerMode::Play => match card.kind {
                CardKind::Action | CardKind::Permanent => true,
                CardKind::Attack => target.is_some_and(|t| self.encounter(t).is_some()),
                CardKind::Status => false,
            },
        }
    }

    /// Resolves a card released past the play line according to the
    /// current mode. Returns false when the card stays in hand.
    pub fn release_card(&mut self, id: CardId, target: Option<CardId>) -> bool {
        let Some(card) = self.player_hand.iter().find(|c| c.id == id) else { return false };
        if !self.can_play(card, target) {
            return false;
        }
        let Some(card) = self.take_from_hand(id) else { return false };
        match self.mode {
            PlayerMode::Discard => {
                self.discards_required = self.discards_required.saturating_sub(1);
                self.discard_queue.push(card);
            }
            PlayerMode::Destroy => {
                self.destroys_required = self.destroys_required.saturating_sub(1);
                log::debug!("{} destroyed", card.name);
            }
            PlayerMode::Play => self.play(card, target),
        }
        true
    }

    fn play(&mut self, card: PlayerCard, target: Option<CardId>) {
        log::debug!("playing {} (level {})", card.name, card.level);
        if card.kind == CardKind::Permanent {
            self.permanents.push(card);
            return;
        }
        let effects = card.effects.clone();
        self.discard_queue.push(card);
        self.apply_player_effects(&effects, target);
    }

    /// Sends the whole hand to the discard queue and spends all funding.
    pub fn discard_hand(&mut self) {
        self.money = 0;
        while let Some(card) = self.player_hand.pop() {
            self.discard_queue.push(card);
        }
    }

    pub fn apply_player_effects(&mut self, effects: &[Effect], target: Option<CardId>) {
        for effect in effects {
            match *effect {
                Effect::Attack(n) => {
                    if let Some(creature) = target.and_then(|t| self.encounter_mut(t)) {
                        let damage = creature.damage_from(n);
                        creature.health = creature.health.saturating_sub(damage);
                    }
                }
                Effect::Disrupt(n) => self.rift_stability = self.rift_stability.saturating_sub(n),
                Effect::Gain(n) => self.money += n,
                Effect::Draw(n) => {
                    for _ in 0..n {
                        self.draw_player_card();
                    }
                }
                Effect::Discard(n) => {
                    self.discards_required = n.min(self.player_hand.len() as u32);
                    self.mode = PlayerMode::Discard;
                }
                Effect::Destroy(n) => {
                    self.destroys_required = n.min(self.player_hand.len() as u32);
                    self.mode = PlayerMode::Destroy;
                }
                Effect::Recall(n) => {
                    for _ in 0..n {
                        if self.encounters_active.is_empty() {
                            break;
                        }
                        let mut creature = self.encounters_active.remove(0);
                        self.forget_encounter(creature.id);
                        creature.health = creature.max_health;
                        self.encounter_deck.push(creature);
                    }
                }
                Effect::Stitch(n) => self.stitch_counter += n,
                Effect::OldOne(n) => self.favour_counter += n,
                Effect::Stabilize(n) => self.raise_stability(n),
                Effect::Wound(_) | Effect::Regenerate(_) | Effect::Summon(_) | Effect::Spawn(_) => {
                    log::warn!("player card effect {effect} has no player-side meaning");
                }
            }
        }
        self.remove_dead();
    }

    /// Runs the effects of the creature `id` against the player.
    pub fn apply_encounter_effects(&mut self, id: CardId) {
        let Some(effects) = self.encounter(id).map(|c| c.effects.clone()) else { return };
        for effect in effects {
            match effect {
                Effect::Wound(n) => {
                    for _ in 0..n {
                        self.discard_queue.push(known_player_card("wounded"));
                    }
                }
                Effect::Regenerate(n) => {
                    if let Some(creature) = self.encounter_mut(id) {
                        creature.health = (creature.health + n).min(creature.max_health);
                    }
                }
                Effect::Summon(n) => {
                    for _ in 0..n {
                        self.summon_encounter("creeping feeler");
                    }
                }
                Effect::Spawn(n) => {
                    for _ in 0..n {
                        self.draw_encounter();
                    }
                }
                Effect::Stabilize(n) => self.raise_stability(n),
                Effect::Discard(n) => {
                    for _ in 0..n {
                        let Some(card) = self.player_deck.pop() else { break };
                        self.discard_queue.push(card);
                    }
                }
                other => log::warn!("creature effect {other} has no rift-side meaning"),
            }
        }
    }

    /// Lands any card that finished falling onto its pile.
    pub fn settle_discards(&mut self, now: f64) {
        if let Some(card) = self.discard_queue.step(now) {
            self.discard_pile.push(card);
        }
    }

    pub fn settle_store_discards(&mut self, now: f64) {
        if let Some(card) = self.store_discard_queue.step(now) {
            self.store_discard.push(card);
        }
    }

    // ── store ──

    /// Moves one card into the store when it is short, reshuffling the
    /// store discard into an empty store deck first.
    pub fn top_up_store(&mut self) -> bool {
        if self.store_active.len() >= STORE_SLOTS {
            return false;
        }
        if self.store_deck.is_empty() {
            if self.store_discard.is_empty() {
                return false;
            }
            self.store_deck = std::mem::take(&mut self.store_discard);
            self.rng.shuffle(&mut self.store_deck);
            return true;
        }
        match self.store_deck.pop() {
            Some(card) => {
                self.store_active.push(card);
                true
            }
            None => false,
        }
    }

    pub fn buy(&mut self, id: CardId) -> bool {
        let Some(index) = self.store_active.iter().position(|c| c.id == id) else { return false };
        let cost = self.store_active[index].cost;
        if cost > self.money {
            return false;
        }
        self.money -= cost;
        let card = self.store_active.remove(index);
        log::debug!("bought {} for {cost}", card.name);
        self.discard_queue.push(card);
        true
    }

    /// Spends one funding to send every store card to the store discard.
    pub fn refresh_store(&mut self) -> bool {
        if self.money < 1 {
            return false;
        }
        self.money -= 1;
        while let Some(card) = self.store_active.pop() {
            self.store_discard_queue.push(card);
        }
        true
    }

    /// Spends one funding to level up every store card.
    pub fn upgrade_store(&mut self) -> bool {
        if self.money < 1 {
            return false;
        }
        self.money -= 1;
        for card in &mut self.store_active {
            card.level_up();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{encounter_card, player_card};
    use pretty_assertions::assert_eq;

    fn state() -> GameState {
        let mut state = GameState::new(GameRng::seeded(11));
        state.setup_game(Difficulty::Normal);
        state
    }

    fn creature(name: &str) -> EncounterCard {
        encounter_card(name).unwrap()
    }

    fn card(name: &str) -> PlayerCard {
        player_card(name).unwrap()
    }

    // ── setup ──

    #[test]
    fn setup_builds_both_decks() {
        let state = state();
        assert_eq!(state.player_deck.len(), 14);
        assert_eq!(state.encounter_deck.len(), 20);
        assert_eq!(state.rift_stability_max, 50);
        assert_eq!(state.phase, Phase::Pregame);
    }

    #[test]
    fn toggle_deck_respects_the_limit() {
        let mut state = state();
        state.toggle_deck(DeckSet::Occult);
        state.toggle_deck(DeckSet::Psychic);
        state.toggle_deck(DeckSet::Technology);
        assert_eq!(state.decks_picked, vec![DeckSet::Psychic, DeckSet::Technology]);
        state.toggle_deck(DeckSet::Psychic);
        assert_eq!(state.decks_picked, vec![DeckSet::Technology]);

        state.setup_game(Difficulty::Hard);
        state.toggle_deck(DeckSet::Occult);
        state.toggle_deck(DeckSet::Psychic);
        assert_eq!(state.decks_picked, vec![DeckSet::Psychic]);
    }

    // ── stability ──

    #[test]
    fn stability_rate_grows_every_five_turns() {
        let mut state = state();
        for (turn, rate) in [(1, 1), (5, 1), (6, 2), (11, 3)] {
            state.turn = turn;
            assert_eq!(state.stability_rate(), rate, "turn {turn}");
        }
    }

    #[test]
    fn stability_is_clamped() {
        let mut state = state();
        state.rift_stability = 49;
        state.raise_stability(3);
        assert_eq!(state.rift_stability, 50);
        assert!(state.is_stability_maxed());
    }

    // ── encounters ──

    #[test]
    fn overrun_needs_full_slots_and_more_to_come() {
        let mut state = state();
        state.encounters_active = (0..ENCOUNTER_SLOTS).map(|_| creature("tentacle")).collect();
        assert!(state.is_overrun());
        state.encounter_deck.clear();
        assert!(!state.is_overrun());
        state.encounters_active.push(creature("tentacle"));
        assert!(state.is_overrun());
    }

    #[test]
    fn attacks_respect_armor_and_remove_the_dead() {
        let mut state = state();
        let rock = creature("living rock");
        let id = rock.id;
        state.encounters_active.push(rock);
        state.encounter_target = Some(id);

        state.apply_player_effects(&[Effect::Attack(3)], Some(id));
        assert_eq!(state.encounter(id).map(|c| c.health), Some(3));

        state.apply_player_effects(&[Effect::Attack(4)], Some(id));
        assert!(state.encounter(id).is_none());
        assert_eq!(state.encounter_target, None);
    }

    #[test]
    fn recall_sends_the_oldest_creature_back_healed() {
        let mut state = state();
        let mut first = creature("shapeless");
        first.health = 1;
        let first_id = first.id;
        state.encounters_active.push(first);
        state.encounters_active.push(creature("tentacle"));
        let deck_len = state.encounter_deck.len();

        state.apply_player_effects(&[Effect::Recall(1)], None);

        assert_eq!(state.encounters_active.len(), 1);
        assert_eq!(state.encounter_deck.len(), deck_len + 1);
        let top = state.encounter_deck.last().unwrap();
        assert_eq!((top.id, top.health), (first_id, 4));
    }

    #[test]
    fn creature_effects_hit_the_player() {
        let mut state = state();
        let king = creature("king in yellow");
        let id = king.id;
        state.encounters_active.push(king);

        state.apply_encounter_effects(id);

        assert_eq!(state.encounters_active.len(), 2);
        assert_eq!(state.encounters_active[1].name, "creeping feeler");
        assert_eq!(state.discard_queue.len(), 1);
        assert_eq!(state.discard_queue.head().map(|(c, _)| c.name), Some("wounded"));
    }

    #[test]
    fn regeneration_stops_at_max_health() {
        let mut state = state();
        let mut blob = creature("shapeless");
        blob.health = 4;
        let id = blob.id;
        state.encounters_active.push(blob);
        state.apply_encounter_effects(id);
        assert_eq!(state.encounter(id).map(|c| c.health), Some(4));
    }

    // ── player cards ──

    #[test]
    fn empty_deck_reshuffles_the_discard_pile() {
        let mut state = state();
        state.player_deck.clear();
        state.discard_pile = vec![card("funds"), card("funds")];
        assert!(state.draw_player_card());
        assert_eq!(state.player_hand.len(), 1);
        assert_eq!(state.player_deck.len(), 1);
        assert!(state.discard_pile.is_empty());
    }

    #[test]
    fn hand_is_capped() {
        let mut state = state();
        state.player_hand = (0..HAND_LIMIT).map(|_| card("funds")).collect();
        assert!(!state.draw_player_card());
    }

    #[test]
    fn attacks_need_a_target() {
        let mut state = state();
        let shot = card("open fire");
        let shot_id = shot.id;
        state.player_hand.push(shot);

        assert!(!state.release_card(shot_id, None));

        let target = creature("tentacle");
        let target_id = target.id;
        state.encounters_active.push(target);
        assert!(state.release_card(shot_id, Some(target_id)));
        assert_eq!(state.encounter(target_id).map(|c| c.health), Some(1));
        assert_eq!(state.discard_queue.len(), 1);
    }

    #[test]
    fn status_cards_only_leave_by_discard_or_destroy() {
        let mut state = state();
        let wound = card("wounded");
        let id = wound.id;
        state.player_hand.push(wound);
        assert!(!state.release_card(id, None));

        state.mode = PlayerMode::Destroy;
        state.destroys_required = 1;
        assert!(state.release_card(id, None));
        assert_eq!(state.destroys_required, 0);
        assert!(state.discard_queue.is_empty());
    }

    #[test]
    fn permanents_stay_in_play() {
        let mut state = state();
        let field = card("containment field");
        let id = field.id;
        state.player_hand.push(field);
        assert!(state.release_card(id, None));
        assert_eq!(state.permanents.len(), 1);
        assert!(state.discard_queue.is_empty());
    }

    #[test]
    fn discard_effect_is_capped_by_the_hand() {
        let mut state = state();
        state.player_hand.push(card("funds"));
        state.apply_player_effects(&[Effect::Discard(3)], None);
        assert_eq!(state.mode, PlayerMode::Discard);
        assert_eq!(state.discards_required, 1);
    }

    // ── discard queue ──

    #[test]
    fn queue_drops_the_head_then_lands_it() {
        let mut queue = DiscardQueue::new(100.0);
        queue.push(card("funds"));
        queue.push(card("dazed"));

        assert!(queue.step(0.0).is_none());
        assert_eq!(queue.head().map(|(_, at)| at), Some(Vec2::new(0.0, -40.0)));
        assert!(queue.step(50.0).is_none());
        assert_eq!(queue.head().map(|(_, at)| at), Some(Vec2::new(0.0, -10.0)));

        assert_eq!(queue.step(100.0).map(|c| c.name), Some("funds"));
        // the second card was queued behind one other: 100 / 2
        assert!(queue.step(100.0).is_none());
        assert_eq!(queue.step(150.0).map(|c| c.name), Some("dazed"));
        assert!(queue.is_empty());
    }

    // ── store ──

    #[test]
    fn store_tops_up_one_card_at_a_time() {
        let mut state = state();
        state.generate_store();
        for _ in 0..STORE_SLOTS {
            assert!(state.top_up_store());
        }
        assert!(!state.top_up_store());
        assert_eq!(state.store_active.len(), STORE_SLOTS);
    }

    #[test]
    fn buying_costs_funding() {
        let mut state = state();
        let bomb = card("anti-matter bomb");
        let id = bomb.id;
        state.store_active.push(bomb);
        state.money = 6;
        assert!(!state.buy(id));
        state.money = 7;
        assert!(state.buy(id));
        assert_eq!(state.money, 0);
        assert_eq!(state.discard_queue.len(), 1);
    }

    #[test]
    fn refresh_and_upgrade_cost_one() {
        let mut state = state();
        state.store_active = vec![card("barrage"), card("taxation")];
        assert!(!state.refresh_store());

        state.money = 2;
        assert!(state.upgrade_store());
        assert_eq!(state.store_active[0].level, 1);
        assert!(state.refresh_store());
        assert!(state.store_active.is_empty());
        assert_eq!(state.store_discard_queue.len(), 2);
        assert_eq!(state.money, 0);
    }
}
