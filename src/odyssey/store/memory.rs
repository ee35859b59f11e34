use super::{encode_cards, CardStore};
use crate::error::{OdysseyError, Result};
use crate::model::Card;
use std::io;

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// The document is kept as raw text, exactly as it would sit on disk, so a
/// corrupt store is just a document that fails to parse.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: Option<String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl InMemoryStore {
    /// An initialized, empty store (`[]`).
    pub fn new() -> Self {
        Self {
            document: Some("[]".to_string()),
            ..Self::default()
        }
    }

    /// A store whose document has never been created.
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: &[Card]) -> Result<Self> {
        let mut store = Self::new();
        store.document = Some(encode_cards(cards)?);
        Ok(store)
    }

    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            ..Self::default()
        }
    }

    pub fn fail_reads(mut self, fail: bool) -> Self {
        self.fail_reads = fail;
        self
    }

    pub fn fail_writes(mut self, fail: bool) -> Self {
        self.fail_writes = fail;
        self
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl CardStore for InMemoryStore {
    fn read_document(&self) -> Result<String> {
        if self.fail_reads {
            return Err(OdysseyError::StoreRead(io::Error::other(
                "injected read failure",
            )));
        }
        match &self.document {
            Some(doc) => Ok(doc.clone()),
            None => Err(OdysseyError::StoreRead(io::Error::new(
                io::ErrorKind::NotFound,
                "card store document does not exist",
            ))),
        }
    }

    fn write_document(&mut self, content: String) -> Result<()> {
        if self.fail_writes {
            return Err(OdysseyError::StoreWrite(io::Error::other(
                "injected write failure",
            )));
        }
        self.document = Some(content);
        self.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Card, CardStats, NewCard, NewCardStats, Rarity};
    use serde_json::Map;

    /// A stored card with a consistent cached total.
    pub fn card(id: u64, name: &str, rarity: Rarity) -> Card {
        let stats = CardStats {
            hp: 300,
            attack: 90,
            defense: 60,
            mana: 40,
            speed: 25,
            intelligence: 15,
            total: 530,
            range: "Melee".to_string(),
            kind: "organic".to_string(),
        };
        Card {
            id,
            name: name.to_string(),
            rarity,
            image: format!("https://cards.example/{id}.webp"),
            lore: format!("{name} walks the odyssey."),
            stats,
            extra: Map::new(),
        }
    }

    /// Seven cards, ids 1..=7.
    pub fn seven_cards() -> Vec<Card> {
        [
            ("Ash Golem", Rarity::Common),
            ("Dune Stalker", Rarity::Rare),
            ("Salt Wraith", Rarity::Epic),
            ("Crown of Thorns", Rarity::Legendary),
            ("Void Leviathan", Rarity::Mythical),
            ("Aurelia", Rarity::Hero),
            ("Bog Imp", Rarity::Common),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, rarity))| card(i as u64 + 1, name, rarity))
        .collect()
    }

    pub fn ember_wyrm() -> NewCard {
        NewCard::new(
            "Ember Wyrm",
            Rarity::Epic,
            NewCardStats {
                hp: 500,
                attack: 120,
                defense: 80,
                mana: 60,
                speed: 40,
                intelligence: 30,
                total: None,
                range: "Flying".to_string(),
                kind: "elemental".to_string(),
            },
        )
    }
}
