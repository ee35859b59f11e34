//! # Card Catalog
//!
//! The catalog is the grid of card tiles. It is built once from a snapshot of
//! the store and never refreshes itself; a card appended afterwards shows up
//! the next time a catalog is loaded.
//!
//! Every tile supports one interaction, selection, which hands the full card
//! to whoever drives the detail view. There is no filtering,
//! sorting or paging here.

use crate::error::Result;
use crate::model::Card;
use crate::store::CardStore;
use crate::theme::{badge, theme_for};
use serde::Serialize;

/// What a grid tile shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub id: u64,
    pub name: String,
    pub rarity: String,
    pub theme: &'static str,
    pub class: String,
    pub attack: i64,
    pub defense: i64,
    /// The cached total, as stored.
    pub power: i64,
}

impl CardSummary {
    pub fn of(card: &Card) -> Self {
        let theme = theme_for(&card.rarity);
        Self {
            id: card.id,
            name: card.name.clone(),
            rarity: badge(&card.rarity),
            theme: theme.key,
            class: card.stats.kind.clone(),
            attack: card.stats.attack,
            defense: card.stats.defense,
            power: card.stats.total,
        }
    }
}

/// Emitted when a tile is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub card: Card,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Reads the store once.
    pub fn load<S: CardStore>(store: &S) -> Result<Self> {
        Ok(Self::from_cards(store.load()?))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn summaries(&self) -> Vec<CardSummary> {
        self.cards.iter().map(CardSummary::of).collect()
    }

    pub fn select(&self, id: u64) -> Option<Selection> {
        self.cards
            .iter()
            .find(|c| c.id == id)
            .map(|card| Selection { card: card.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rarity;
    use crate::store::memory::fixtures::{card, seven_cards};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn summaries_follow_store_order() {
        let catalog = Catalog::from_cards(seven_cards());
        let names: Vec<String> = catalog.summaries().into_iter().map(|s| s.name).collect();
        assert_eq!(names[0], "Ash Golem");
        assert_eq!(names[6], "Bog Imp");
    }

    #[test]
    fn summary_shows_cached_power_not_live_sum() {
        let mut stale = card(1, "Stale", Rarity::Rare);
        stale.stats.attack += 100;
        let summary = CardSummary::of(&stale);
        assert_eq!(summary.power, 530);
        assert_eq!(summary.attack, 190);
        assert_eq!(summary.rarity, "Rare");
    }

    #[test]
    fn unknown_rarity_tile_uses_common_theme() {
        let odd = card(1, "Odd", Rarity::Unknown("uncommon".into()));
        let summary = CardSummary::of(&odd);
        assert_eq!(summary.theme, "common");
        assert_eq!(summary.rarity, "uncommon");
    }

    #[test]
    fn select_yields_full_card() {
        let catalog = Catalog::from_cards(seven_cards());
        let selection = catalog.select(5).unwrap();
        assert_eq!(selection.card, seven_cards()[4]);
        assert!(catalog.select(99).is_none());
    }

    #[test]
    fn catalog_is_a_snapshot() {
        let mut store = InMemoryStore::with_cards(&seven_cards()).unwrap();
        let catalog = Catalog::load(&store).unwrap();
        store.save(&[]).unwrap();
        assert_eq!(catalog.len(), 7);
    }
}
