//! Deck construction. Every deck is a stack: the next card to draw is the
//! last element.

use crate::cards::{known_encounter_card, known_player_card, EncounterCard, PlayerCard};
use crate::rng::GameRng;

/// Optional research sets picked before a game; each adds cards to the
/// store's tiers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DeckSet {
    Occult,
    Technology,
    Psychic,
}

impl DeckSet {
    pub const ALL: [DeckSet; 3] = [DeckSet::Occult, DeckSet::Technology, DeckSet::Psychic];

    pub fn label(self) -> &'static str {
        match self {
            DeckSet::Occult => "occult research",
            DeckSet::Technology => "technology research",
            DeckSet::Psychic => "psychic research",
        }
    }

    // (tier 1, tier 2, tier 3), three copies of each
    fn tiers(self) -> (&'static [&'static str], &'static [&'static str], &'static [&'static str]) {
        match self {
            DeckSet::Occult => (
                &["old one's wrath", "dark pact"],
                &["abyss take me", "blood ritual"],
                &["old one's favour"],
            ),
            DeckSet::Technology => (
                &["experimental rifle", "collect samples"],
                &["emp bomb", "live samples"],
                &["containment field"],
            ),
            DeckSet::Psychic => (
                &["psychic offensive", "psychic interference"],
                &["rift stitch", "will of mind"],
                &["psychic destruction"],
            ),
        }
    }
}

fn copies(out: &mut Vec<PlayerCard>, names: &[&str], count: usize) {
    for name in names {
        for _ in 0..count {
            out.push(known_player_card(name));
        }
    }
}

fn encounters(out: &mut Vec<EncounterCard>, names: &[(&str, usize)]) {
    for (name, count) in names {
        for _ in 0..*count {
            out.push(known_encounter_card(name));
        }
    }
}

pub fn starting_deck(rng: &mut GameRng) -> Vec<PlayerCard> {
    let mut deck = Vec::with_capacity(14);
    copies(&mut deck, &["wounded", "dazed"], 1);
    copies(&mut deck, &["open fire", "funds"], 5);
    copies(&mut deck, &["electrical interference"], 2);
    rng.shuffle(&mut deck);
    deck
}

/// The king at the bottom, then the final, middle and opening waves, each
/// shuffled on its own so the opening wave is drawn first.
pub fn encounter_deck(rng: &mut GameRng) -> Vec<EncounterCard> {
    let mut deck = Vec::new();
    encounters(&mut deck, &[("king in yellow", 1)]);

    let mut finale = Vec::new();
    encounters(&mut finale, &[("unspeakable", 2), ("rift horror", 1), ("vagabonds", 2)]);
    let mut middle = Vec::new();
    encounters(&mut middle, &[("shapeless", 2), ("living rock", 2), ("faceless", 2), ("vagabonds", 1)]);
    let mut opening = Vec::new();
    encounters(&mut opening, &[("tentacle", 3), ("timelost", 2), ("cultist", 2)]);

    for mut wave in [finale, middle, opening] {
        rng.shuffle(&mut wave);
        deck.extend(wave);
    }
    deck
}

/// Tiers 0 and 1 are drawn first in random order, then tiers 2 and 3 mixed.
pub fn store_deck(picked: &[DeckSet], rng: &mut GameRng) -> Vec<PlayerCard> {
    let mut early = Vec::new();
    copies(&mut early, &["barrage", "emp burst", "taxation", "supressive fire", "bounty"], 2);
    copies(&mut early, &["reevaluate", "recruitment"], 2);
    let mut tier2 = Vec::new();
    copies(&mut tier2, &["only the best", "public funding"], 2);
    let mut tier3 = Vec::new();
    copies(&mut tier3, &["anti-matter bomb"], 2);

    for set in picked {
        let (t1, t2, t3) = set.tiers();
        copies(&mut early, t1, 3);
        copies(&mut tier2, t2, 3);
        copies(&mut tier3, t3, 3);
    }

    rng.shuffle(&mut early);
    let mut late = tier2;
    late.extend(tier3);
    rng.shuffle(&mut late);

    // Stack order: late at the bottom, early on top.
    let mut deck = late;
    early.reverse();
    deck.extend(early);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn count<T>(cards: &[T], name: impl Fn(&T) -> &str, wanted: &str) -> usize {
        cards.iter().filter(|c| name(c) == wanted).count()
    }

    #[test]
    fn starting_deck_contents() {
        let deck = starting_deck(&mut GameRng::seeded(3));
        assert_eq!(deck.len(), 14);
        assert_eq!(count(&deck, |c| c.name, "open fire"), 5);
        assert_eq!(count(&deck, |c| c.name, "funds"), 5);
        assert_eq!(count(&deck, |c| c.name, "electrical interference"), 2);
        assert_eq!(count(&deck, |c| c.name, "wounded"), 1);
    }

    #[test]
    fn the_king_is_drawn_last() {
        let deck = encounter_deck(&mut GameRng::seeded(3));
        assert_eq!(deck.len(), 20);
        assert_eq!(deck[0].name, "king in yellow");
        // the opening wave sits on top
        let opening = ["tentacle", "timelost", "cultist"];
        assert!(deck[13..].iter().all(|c| opening.contains(&c.name)));
    }

    #[test]
    fn picked_sets_join_the_store() {
        let plain = store_deck(&[], &mut GameRng::seeded(9));
        assert_eq!(plain.len(), 20);

        let occult = store_deck(&[DeckSet::Occult], &mut GameRng::seeded(9));
        assert_eq!(occult.len(), 35);
        assert_eq!(count(&occult, |c| c.name, "old one's favour"), 3);
        assert_eq!(count(&occult, |c| c.name, "rift stitch"), 0);
    }

    #[test]
    fn early_tiers_come_off_the_top() {
        let deck = store_deck(&[DeckSet::Technology], &mut GameRng::seeded(5));
        let late = ["only the best", "public funding", "anti-matter bomb", "emp bomb", "live samples", "containment field"];
        // 14 tier 0/1 cards plus 6 technology tier 1 cards
        let top = &deck[deck.len() - 20..];
        assert!(top.iter().all(|c| !late.contains(&c.name)));
    }
}
