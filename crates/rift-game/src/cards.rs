//! Card types and the built-in card tables.
//!
//! Effects are written in the tables as comma-separated `"<effect> <n>"`
//! strings (`"attack 2,draw 1"`) and parsed when a card is created, so a
//! typo surfaces as a [`CardError`] rather than a silently inert card.
//! [`validate_tables`] parses every entry once at startup.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

/// Highest level a player card can be upgraded to.
pub const MAX_LEVEL: u32 = 5;

/// Identity of one physical card. Copies of the same table entry differ.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CardId(u64);

impl CardId {
    fn next() -> Self {
        CardId(NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

// ── errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    UnknownPlayerCard(String),
    UnknownEncounterCard(String),
    /// An effect string that is not `"<known effect> <count>"`.
    MalformedEffect { card: String, effect: String },
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::UnknownPlayerCard(name) => write!(f, "no player card named {name:?}"),
            CardError::UnknownEncounterCard(name) => write!(f, "no encounter card named {name:?}"),
            CardError::MalformedEffect { card, effect } => {
                write!(f, "card {card:?} has a malformed effect {effect:?}")
            }
        }
    }
}

impl std::error::Error for CardError {}

// ── effects ───────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Effect {
    Attack(u32),
    /// Lowers rift stability.
    Disrupt(u32),
    /// Adds funding.
    Gain(u32),
    Draw(u32),
    Discard(u32),
    Destroy(u32),
    /// Sends the right-most creature back on top of the rift deck.
    Recall(u32),
    Stitch(u32),
    OldOne(u32),
    /// Raises rift stability.
    Stabilize(u32),
    Wound(u32),
    Regenerate(u32),
    Summon(u32),
    Spawn(u32),
}

impl Effect {
    pub fn parse(card: &str, raw: &str) -> Result<Effect, CardError> {
        let malformed = || CardError::MalformedEffect { card: card.to_string(), effect: raw.to_string() };
        let raw = raw.trim();
        let (name, count) = raw.rsplit_once(' ').ok_or_else(malformed)?;
        let n: u32 = count.parse().map_err(|_| malformed())?;
        let effect = match name.trim() {
            "attack" => Effect::Attack(n),
            "disrupt" => Effect::Disrupt(n),
            "gain" => Effect::Gain(n),
            "draw" => Effect::Draw(n),
            "discard" => Effect::Discard(n),
            "destroy" => Effect::Destroy(n),
            "recall" => Effect::Recall(n),
            "stitch" => Effect::Stitch(n),
            "old one" => Effect::OldOne(n),
            "stabilize" => Effect::Stabilize(n),
            "wound" => Effect::Wound(n),
            "regenerate" => Effect::Regenerate(n),
            "summon" => Effect::Summon(n),
            "spawn" => Effect::Spawn(n),
            _ => return Err(malformed()),
        };
        Ok(effect)
    }

    pub fn parse_list(card: &str, raw: &str) -> Result<Vec<Effect>, CardError> {
        raw.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| Effect::parse(card, part))
            .collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            Effect::Attack(_) => "attack",
            Effect::Disrupt(_) => "disrupt",
            Effect::Gain(_) => "gain",
            Effect::Draw(_) => "draw",
            Effect::Discard(_) => "discard",
            Effect::Destroy(_) => "destroy",
            Effect::Recall(_) => "recall",
            Effect::Stitch(_) => "stitch",
            Effect::OldOne(_) => "old one",
            Effect::Stabilize(_) => "stabilize",
            Effect::Wound(_) => "wound",
            Effect::Regenerate(_) => "regenerate",
            Effect::Summon(_) => "summon",
            Effect::Spawn(_) => "spawn",
        }
    }

    pub fn value(self) -> u32 {
        match self {
            Effect::Attack(n)
            | Effect::Disrupt(n)
            | Effect::Gain(n)
            | Effect::Draw(n)
            | Effect::Discard(n)
            | Effect::Destroy(n)
            | Effect::Recall(n)
            | Effect::Stitch(n)
            | Effect::OldOne(n)
            | Effect::Stabilize(n)
            | Effect::Wound(n)
            | Effect::Regenerate(n)
            | Effect::Summon(n)
            | Effect::Spawn(n) => n,
        }
    }

    /// The effect one level up. Effects that do not scale are unchanged.
    pub fn upgraded(self) -> Effect {
        match self {
            Effect::Attack(n) => Effect::Attack(n + 1),
            Effect::Disrupt(n) => Effect::Disrupt(n + 1),
            Effect::Gain(n) => Effect::Gain(n + 1),
            Effect::Stitch(n) => Effect::Stitch(n + 1),
            Effect::OldOne(n) => Effect::OldOne(n + 1),
            other => other,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.name(), self.value())
    }
}

// ── player cards ──────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CardKind {
    Action,
    /// Needs a targeted creature to be played.
    Attack,
    /// Stays in play and fires at the start of every turn.
    Permanent,
    /// Cannot be played; only discarded or destroyed.
    Status,
}

impl CardKind {
    pub fn label(self) -> &'static str {
        match self {
            CardKind::Action => "action",
            CardKind::Attack => "attack",
            CardKind::Permanent => "permanent",
            CardKind::Status => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCard {
    pub id: CardId,
    pub name: &'static str,
    pub art: &'static str,
    pub kind: CardKind,
    pub cost: u32,
    pub level: u32,
    pub effects: Vec<Effect>,
}

impl PlayerCard {
    pub fn description(&self) -> Vec<String> {
        self.effects.iter().map(Effect::to_string).collect()
    }

    pub fn attack(&self) -> u32 {
        self.effects
            .iter()
            .map(|e| match e {
                Effect::Attack(n) => *n,
                _ => 0,
            })
            .sum()
    }

    pub fn has_stitch(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::Stitch(_)))
    }

    /// Raises the level by one; status cards and maxed cards stay put.
    pub fn level_up(&mut self) -> bool {
        if self.kind == CardKind::Status || self.level >= MAX_LEVEL {
            return false;
        }
        self.level += 1;
        for effect in &mut self.effects {
            *effect = effect.upgraded();
        }
        true
    }

    /// One line per remaining level: `"+2 attack 3, draw 1"`.
    pub fn level_preview(&self) -> Vec<String> {
        if self.kind == CardKind::Status {
            return Vec::new();
        }
        let mut effects = self.effects.clone();
        let mut lines = Vec::new();
        for level in self.level + 1..=MAX_LEVEL {
            effects = effects.iter().map(|e| e.upgraded()).collect();
            if effects == self.effects {
                break;
            }
            let parts: Vec<String> = effects.iter().map(|e| format!("{} {}", e.name(), e.value())).collect();
            lines.push(format!("+{level} {}", parts.join(", ")));
        }
        lines
    }
}

// ── encounter cards ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct EncounterCard {
    pub id: CardId,
    pub name: &'static str,
    pub art: &'static str,
    pub health: u32,
    pub max_health: u32,
    pub armor: u32,
    pub effects: Vec<Effect>,
}

impl EncounterCard {
    pub fn description(&self) -> Vec<String> {
        self.effects.iter().map(Effect::to_string).collect()
    }

    /// Damage left after armor for an attack of `attack`.
    pub fn damage_from(&self, attack: u32) -> u32 {
        attack.saturating_sub(self.armor)
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

// ── tables ────────────────────────────────────────────────────────────────

struct PlayerCardData {
    name: &'static str,
    art: &'static str,
    kind: CardKind,
    cost: u32,
    effects: &'static str,
}

const fn player(name: &'static str, art: &'static str, kind: CardKind, cost: u32, effects: &'static str) -> PlayerCardData {
    PlayerCardData { name, art, kind, cost, effects }
}

#[rustfmt::skip]
const PLAYER_CARDS: &[PlayerCardData] = &[
    // starting deck
    player("wounded", "art_wound", CardKind::Status, 0, ""),
    player("dazed", "art_daze", CardKind::Status, 0, ""),
    player("open fire", "art_gun", CardKind::Attack, 0, "attack 1"),
    player("funds", "art_coin", CardKind::Action, 0, "gain 1"),
    player("electrical interference", "art_bolt", CardKind::Action, 0, "disrupt 1"),
    // tier 0
    player("barrage", "art_gun", CardKind::Attack, 3, "attack 3"),
    player("emp burst", "art_bolt", CardKind::Action, 3, "disrupt 2"),
    player("taxation", "art_coin", CardKind::Action, 2, "gain 2"),
    player("supressive fire", "art_gun", CardKind::Attack, 3, "attack 2,draw 1"),
    player("bounty", "art_coin", CardKind::Attack, 2, "attack 1,gain 1"),
    // tier 1
    player("reevaluate", "art_book", CardKind::Action, 2, "draw 2,discard 1"),
    player("recruitment", "art_book", CardKind::Action, 3, "destroy 1,gain 1"),
    // tier 2
    player("only the best", "art_book", CardKind::Action, 4, "destroy 2,draw 1"),
    player("public funding", "art_coin", CardKind::Action, 5, "gain 3"),
    // tier 3
    player("anti-matter bomb", "art_bomb", CardKind::Attack, 7, "attack 8"),
    // occult research
    player("old one's wrath", "art_eye", CardKind::Attack, 3, "attack 2,old one 1"),
    player("dark pact", "art_eye", CardKind::Action, 3, "gain 2,old one 1"),
    player("abyss take me", "art_eye", CardKind::Action, 5, "recall 1,old one 1"),
    player("blood ritual", "art_eye", CardKind::Action, 5, "draw 2,old one 2"),
    player("old one's favour", "art_eye", CardKind::Permanent, 7, "old one 1"),
    // technology research
    player("experimental rifle", "art_gun", CardKind::Attack, 4, "attack 4"),
    player("collect samples", "art_flask", CardKind::Action, 3, "gain 1,draw 1"),
    player("emp bomb", "art_bomb", CardKind::Action, 5, "disrupt 4"),
    player("live samples", "art_flask", CardKind::Action, 6, "gain 3,draw 1"),
    player("containment field", "art_bolt", CardKind::Permanent, 7, "disrupt 1"),
    // psychic research
    player("psychic offensive", "art_star", CardKind::Attack, 4, "attack 2,disrupt 1"),
    player("psychic interference", "art_star", CardKind::Action, 4, "disrupt 2,draw 1"),
    player("rift stitch", "art_star", CardKind::Action, 5, "stitch 2"),
    player("will of mind", "art_star", CardKind::Action, 5, "draw 3"),
    player("psychic destruction", "art_star", CardKind::Permanent, 7, "stitch 1"),
];

struct EncounterCardData {
    name: &'static str,
    art: &'static str,
    health: u32,
    armor: u32,
    effects: &'static str,
}

const fn encounter(name: &'static str, art: &'static str, health: u32, armor: u32, effects: &'static str) -> EncounterCardData {
    EncounterCardData { name, art, health, armor, effects }
}

#[rustfmt::skip]
const ENCOUNTER_CARDS: &[EncounterCardData] = &[
    encounter("tentacle", "art_tentacle", 2, 0, "discard 1"),
    encounter("timelost", "art_hourglass", 3, 0, "stabilize 1"),
    encounter("shapeless", "art_blob", 4, 0, "regenerate 1"),
    encounter("living rock", "art_rock", 5, 1, "wound 1"),
    encounter("cultist", "art_cultist", 3, 0, "stabilize 2"),
    encounter("unspeakable", "art_mouth", 6, 0, "wound 1,discard 1"),
    encounter("faceless", "art_mask", 5, 0, "spawn 1"),
    encounter("vagabonds", "art_wagon", 4, 1, "stabilize 1,regenerate 1"),
    encounter("creeping feeler", "art_feeler", 3, 0, "discard 1"),
    encounter("rift horror", "art_horror", 8, 1, "stabilize 2,wound 1"),
    encounter("king in yellow", "art_king", 20, 2, "summon 1,wound 1"),
];

/// Every art name the tables refer to.
pub fn art_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PLAYER_CARDS
        .iter()
        .map(|c| c.art)
        .chain(ENCOUNTER_CARDS.iter().map(|c| c.art))
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

pub fn player_card(name: &str) -> Result<PlayerCard, CardError> {
    let data = PLAYER_CARDS
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| CardError::UnknownPlayerCard(name.to_string()))?;
    Ok(PlayerCard {
        id: CardId::next(),
        name: data.name,
        art: data.art,
        kind: data.kind,
        cost: data.cost,
        level: 0,
        effects: Effect::parse_list(data.name, data.effects)?,
    })
}

pub fn encounter_card(name: &str) -> Result<EncounterCard, CardError> {
    let data = ENCOUNTER_CARDS
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| CardError::UnknownEncounterCard(name.to_string()))?;
    Ok(EncounterCard {
        id: CardId::next(),
        name: data.name,
        art: data.art,
        health: data.health,
        max_health: data.health,
        armor: data.armor,
        effects: Effect::parse_list(data.name, data.effects)?,
    })
}

/// Parses every table entry once.
pub fn validate_tables() -> Result<(), CardError> {
    for data in PLAYER_CARDS {
        Effect::parse_list(data.name, data.effects)?;
    }
    for data in ENCOUNTER_CARDS {
        Effect::parse_list(data.name, data.effects)?;
    }
    Ok(())
}

/// Creates a card the game itself asks for by name. The tables are
/// validated at startup, so a miss here is a content bug.
pub(crate) fn known_player_card(name: &str) -> PlayerCard {
    match player_card(name) {
        Ok(card) => card,
        Err(err) => content_bug(err),
    }
}

pub(crate) fn known_encounter_card(name: &str) -> EncounterCard {
    match encounter_card(name) {
        Ok(card) => card,
        Err(err) => content_bug(err),
    }
}

#[track_caller]
fn content_bug(err: CardError) -> ! {
    log::error!("{err}");
    panic!("card tables are inconsistent: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── parsing ──

    #[test]
    fn effect_strings_parse() {
        assert_eq!(
            Effect::parse_list("x", "attack 2, draw 1").unwrap(),
            vec![Effect::Attack(2), Effect::Draw(1)]
        );
        assert_eq!(Effect::parse("x", "old one 3").unwrap(), Effect::OldOne(3));
        assert_eq!(Effect::parse_list("x", "").unwrap(), vec![]);
    }

    #[test]
    fn malformed_effects_name_the_card() {
        let err = Effect::parse("barrage", "atack 3").unwrap_err();
        assert_eq!(
            err,
            CardError::MalformedEffect { card: "barrage".into(), effect: "atack 3".into() }
        );
        assert!(Effect::parse("x", "attack").is_err());
        assert!(Effect::parse("x", "attack many").is_err());
    }

    #[test]
    fn every_table_entry_parses() {
        validate_tables().unwrap();
    }

    #[test]
    fn unknown_names_are_errors() {
        assert_eq!(player_card("gold"), Err(CardError::UnknownPlayerCard("gold".into())));
        assert!(encounter_card("dragon").is_err());
    }

    // ── cards ──

    #[test]
    fn copies_are_distinct_cards() {
        let a = player_card("funds").unwrap();
        let b = player_card("funds").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.effects, b.effects);
    }

    #[test]
    fn description_reads_each_effect() {
        let card = player_card("supressive fire").unwrap();
        assert_eq!(card.description(), vec!["attack for 2", "draw for 1"]);
        assert_eq!(card.attack(), 2);
    }

    #[test]
    fn level_up_scales_only_scaling_effects() {
        let mut card = player_card("supressive fire").unwrap();
        assert!(card.level_up());
        assert_eq!(card.level, 1);
        assert_eq!(card.effects, vec![Effect::Attack(3), Effect::Draw(1)]);
    }

    #[test]
    fn level_caps_and_status_cards_never_level() {
        let mut card = player_card("funds").unwrap();
        for _ in 0..MAX_LEVEL {
            assert!(card.level_up());
        }
        assert!(!card.level_up());
        assert_eq!(card.effects, vec![Effect::Gain(1 + MAX_LEVEL)]);

        let mut wound = player_card("wounded").unwrap();
        assert!(!wound.level_up());
    }

    #[test]
    fn level_preview_lists_the_remaining_levels() {
        let mut card = player_card("barrage").unwrap();
        card.level = 3;
        assert_eq!(card.level_preview(), vec!["+4 attack 4", "+5 attack 5"]);

        let draw_only = player_card("will of mind").unwrap();
        assert!(draw_only.level_preview().is_empty());
    }

    #[test]
    fn armor_soaks_damage() {
        let rock = encounter_card("living rock").unwrap();
        assert_eq!(rock.damage_from(3), 2);
        assert_eq!(rock.damage_from(1), 0);
        assert_eq!(rock.max_health, rock.health);
    }

    #[test]
    fn art_names_are_unique() {
        let names = art_names();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names, deduped);
        assert!(names.contains(&"art_king"));
    }
}
