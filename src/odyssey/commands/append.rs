use crate::commands::{CmdMessage, CmdResult};
use crate::error::{OdysseyError, Result};
use crate::model::NewCard;
use crate::store::{CardStore, CorruptStorePolicy};
use serde_json::Value;
use tracing::{debug, info, warn};

/// The id the next appended card receives: one past the largest id in the store.
pub fn next_id(ids: impl IntoIterator<Item = u64>) -> Result<u64> {
    match ids.into_iter().max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(OdysseyError::IdsExhausted(max)),
    }
}

/// Appends one card: read the whole document, assign the next id, write the
/// whole document back.
///
/// Existing records are written back as they were read, field for field.
/// Nothing is written when the read fails, when the document is corrupt under
/// [`CorruptStorePolicy::Reject`], or when no id is left. A failed write leaves
/// the store as it was.
pub fn run<S: CardStore>(
    store: &mut S,
    candidate: NewCard,
    policy: CorruptStorePolicy,
) -> Result<CmdResult> {
    let mut records = match store.load_records() {
        Ok(records) => records,
        Err(OdysseyError::CorruptStore(e)) if policy == CorruptStorePolicy::TreatAsEmpty => {
            warn!(
                store = %store.location(),
                error = %e,
                "card store does not parse, continuing as empty"
            );
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    if let Some(claimed) = candidate.stats.total {
        let derived = candidate.stats.live_total();
        if claimed != derived {
            warn!(claimed, derived, name = %candidate.name, "submitted total replaced");
        }
    }

    let id = next_id(
        records
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_u64)),
    )?;
    let card = candidate.into_card(id);
    records.push(serde_json::to_value(&card).map_err(OdysseyError::Serialization)?);
    store.save_records(&records)?;

    info!(id = card.id, name = %card.name, count = records.len(), "card appended");
    debug!(store = %store.location(), "card store rewritten");

    let mut result = CmdResult::default().with_affected_cards(vec![card.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Card added: #{} {}",
        card.id, card.name
    )));
    Ok(result)
}
