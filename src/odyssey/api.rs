//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for card operations, whether they come from the terminal client
//! or from the HTTP persistence service.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Carries** the per-store settings a command needs (the corrupt store policy)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business logic of its own.
//!
//! ## Generic Over CardStore
//!
//! `OdysseyApi<S: CardStore>` is generic over the storage backend:
//! - Production: `OdysseyApi<JsonFileStore>`
//! - Testing: `OdysseyApi<InMemoryStore>`
//!
//! ## Single Writer
//!
//! `append_card` takes `&mut self`. The HTTP service keeps exactly one API
//! value behind a mutex, so every append runs its read-modify-write cycle
//! alone.

use crate::commands;
use crate::error::{OdysseyError, Result};
use crate::model::{Card, NewCard};
use crate::store::fs::JsonFileStore;
use crate::store::{CardStore, CorruptStorePolicy};

pub struct OdysseyApi<S: CardStore> {
    store: S,
    paths: commands::OdysseyPaths,
    corrupt_store: CorruptStorePolicy,
}

impl<S: CardStore> OdysseyApi<S> {
    pub fn new(store: S, paths: commands::OdysseyPaths) -> Self {
        Self {
            store,
            paths,
            corrupt_store: CorruptStorePolicy::default(),
        }
    }

    pub fn with_corrupt_store_policy(mut self, policy: CorruptStorePolicy) -> Self {
        self.corrupt_store = policy;
        self
    }

    pub fn append_card(&mut self, candidate: NewCard) -> Result<commands::CmdResult> {
        commands::append::run(&mut self.store, candidate, self.corrupt_store)
    }

    /// Appends and hands back just the stored record.
    pub fn append(&mut self, candidate: NewCard) -> Result<Card> {
        self.append_card(candidate)?
            .affected_cards
            .into_iter()
            .next()
            .ok_or_else(|| OdysseyError::Api("append produced no card".to_string()))
    }

    pub fn list_cards(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn view_card(&self, id: u64) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, id)
    }

    pub fn doctor(&self) -> Result<commands::CmdResult> {
        commands::doctor::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::OdysseyPaths {
        &self.paths
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl OdysseyApi<JsonFileStore> {
    pub fn init(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&mut self.store)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::doctor::DoctorReport;
pub use commands::{CmdMessage, CmdResult, MessageLevel, OdysseyPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{ember_wyrm, seven_cards};
    use crate::store::memory::InMemoryStore;

    fn api(store: InMemoryStore) -> OdysseyApi<InMemoryStore> {
        OdysseyApi::new(store, OdysseyPaths::new(std::env::temp_dir()))
    }

    #[test]
    fn append_returns_stored_card() {
        let mut api = api(InMemoryStore::with_cards(&seven_cards()).unwrap());
        let card = api.append(ember_wyrm()).unwrap();
        assert_eq!(card.id, 8);
        assert_eq!(api.list_cards().unwrap().listed_cards.len(), 8);
    }

    #[test]
    fn policy_is_forwarded_to_append() {
        let store = InMemoryStore::with_document("garbage");
        let mut strict = api(store);
        assert!(matches!(
            strict.append(ember_wyrm()),
            Err(OdysseyError::CorruptStore(_))
        ));

        let mut lenient = api(InMemoryStore::with_document("garbage"))
            .with_corrupt_store_policy(CorruptStorePolicy::TreatAsEmpty);
        assert_eq!(lenient.append(ember_wyrm()).unwrap().id, 1);
    }

    #[test]
    fn view_dispatches_by_id() {
        let api = api(InMemoryStore::with_cards(&seven_cards()).unwrap());
        let result = api.view_card(2).unwrap();
        assert_eq!(result.listed_cards[0].name, "Dune Stalker");
    }
}
