//! # Storage Layer
//!
//! The card store is one JSON document holding the ordered array of cards.
//! The [`CardStore`] trait hides where that document lives so the command
//! layer can run against a file in production and memory in tests.
//!
//! ## Implementations
//!
//! - [`fs::JsonFileStore`]: production storage
//!   - The whole array lives in a single file (default `data/cards.json`)
//!   - Pretty-printed with 2-space indentation
//!   - Writes go to a temp file in the same directory and are renamed over
//!     the document, so a failed write leaves the previous document intact
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!   - Holds the raw document text, so corrupt documents can be simulated
//!   - Read and write failures can be injected
//!
//! ## Failure Modes
//!
//! `load` distinguishes the two ways a read can go wrong:
//! - the document cannot be read at all ([`OdysseyError::StoreRead`])
//! - the document is not a card array ([`OdysseyError::CorruptStore`])
//!
//! `save` reports [`OdysseyError::StoreWrite`] and must leave the document
//! either fully replaced or untouched.
//!
//! ## Typed Cards and Raw Records
//!
//! Implementations only move document text. [`CardStore::load`] gives the
//! typed view used for display. [`CardStore::load_records`] validates the same
//! document but hands back each record as the JSON object it is, so the
//! append path can write existing cards back without normalizing them.
//!
//! [`OdysseyError::StoreRead`]: crate::error::OdysseyError::StoreRead
//! [`OdysseyError::CorruptStore`]: crate::error::OdysseyError::CorruptStore
//! [`OdysseyError::StoreWrite`]: crate::error::OdysseyError::StoreWrite

use crate::error::{OdysseyError, Result};
use crate::model::Card;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod fs;
pub mod memory;

/// What the append path does when the document does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorruptStorePolicy {
    /// Report the corruption to the caller and write nothing.
    #[default]
    Reject,
    /// Carry on as if the store were empty. The next write replaces the
    /// corrupt document.
    TreatAsEmpty,
}

impl CorruptStorePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorruptStorePolicy::Reject => "reject",
            CorruptStorePolicy::TreatAsEmpty => "treat-as-empty",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "reject" => Some(CorruptStorePolicy::Reject),
            "treat-as-empty" => Some(CorruptStorePolicy::TreatAsEmpty),
            _ => None,
        }
    }
}

/// Abstract interface over the card store document.
pub trait CardStore {
    /// Raw document text.
    fn read_document(&self) -> Result<String>;

    /// Replace the document with `content`, all or nothing.
    fn write_document(&mut self, content: String) -> Result<()>;

    /// Human readable location, used in messages.
    fn location(&self) -> String;

    /// Read and parse the whole document.
    fn load(&self) -> Result<Vec<Card>> {
        decode_cards(&self.read_document()?)
    }

    /// Replace the whole document with `cards`.
    fn save(&mut self, cards: &[Card]) -> Result<()> {
        let content = encode_cards(cards)?;
        self.write_document(content)
    }

    /// Read the document as untouched JSON records, each checked to be a card.
    fn load_records(&self) -> Result<Vec<Value>> {
        decode_records(&self.read_document()?)
    }

    /// Replace the whole document with `records`, written as given.
    fn save_records(&mut self, records: &[Value]) -> Result<()> {
        let content = encode_records(records)?;
        self.write_document(content)
    }
}

/// Serializes the card array the way it is stored on disk.
pub fn encode_cards(cards: &[Card]) -> Result<String> {
    let mut content = serde_json::to_string_pretty(cards).map_err(OdysseyError::Serialization)?;
    content.push('\n');
    Ok(content)
}

pub fn decode_cards(content: &str) -> Result<Vec<Card>> {
    serde_json::from_str(content).map_err(OdysseyError::CorruptStore)
}

pub fn encode_records(records: &[Value]) -> Result<String> {
    let mut content =
        serde_json::to_string_pretty(records).map_err(OdysseyError::Serialization)?;
    content.push('\n');
    Ok(content)
}

/// Parses the document into raw records. A record that would not load as a
/// [`Card`] makes the whole document corrupt, same as [`decode_cards`].
pub fn decode_records(content: &str) -> Result<Vec<Value>> {
    let records: Vec<Value> = serde_json::from_str(content).map_err(OdysseyError::CorruptStore)?;
    for record in &records {
        Card::deserialize(record).map_err(OdysseyError::CorruptStore)?;
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CardStats, Rarity};
    use serde_json::Map;

    fn card(id: u64, name: &str) -> Card {
        Card {
            id,
            name: name.to_string(),
            rarity: Rarity::Rare,
            image: format!("https://img.example/{id}.png"),
            lore: "Forged in the ash wastes.".to_string(),
            stats: CardStats {
                hp: 100,
                attack: 20,
                defense: 10,
                mana: 5,
                speed: 3,
                intelligence: 2,
                total: 140,
                range: "Melee".to_string(),
                kind: "organic".to_string(),
            },
            extra: Map::new(),
        }
    }

    #[test]
    fn encode_then_decode_keeps_order_and_values() {
        let cards = vec![card(1, "Ash Golem"), card(2, "Dune Stalker"), card(3, "Salt Wraith")];
        let decoded = decode_cards(&encode_cards(&cards).unwrap()).unwrap();
        assert_eq!(decoded, cards);
    }

    #[test]
    fn encode_uses_two_space_indentation() {
        let content = encode_cards(&[card(1, "Ash Golem")]).unwrap();
        assert!(content.starts_with("[\n  {\n    \"id\": 1,"));
    }

    #[test]
    fn decode_reports_corruption() {
        let err = decode_cards("{ not an array").unwrap_err();
        assert!(matches!(err, OdysseyError::CorruptStore(_)));
    }

    #[test]
    fn records_keep_fields_the_model_would_normalize() {
        let doc = r#"[{"id": 1, "name": "Old", "rarity": "Legendary", "stats": {"hp": 5}}]"#;
        let records = decode_records(doc).unwrap();
        let rewritten: Vec<Value> = serde_json::from_str(&encode_records(&records).unwrap()).unwrap();
        let original: Vec<Value> = serde_json::from_str(doc).unwrap();
        assert_eq!(rewritten, original);
    }

    #[test]
    fn records_that_are_not_cards_are_corrupt() {
        let err = decode_records(r#"[{"name": "No Id"}]"#).unwrap_err();
        assert!(matches!(err, OdysseyError::CorruptStore(_)));
        let err = decode_records(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, OdysseyError::CorruptStore(_)));
    }

    #[test]
    fn policy_parses_config_names() {
        assert_eq!(
            CorruptStorePolicy::parse("treat-as-empty"),
            Some(CorruptStorePolicy::TreatAsEmpty)
        );
        assert_eq!(CorruptStorePolicy::parse("reject"), Some(CorruptStorePolicy::Reject));
        assert_eq!(CorruptStorePolicy::parse("ignore"), None);
    }
}
