use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::fs::JsonFileStore;
use crate::store::CardStore;

/// Creates an empty card store. An existing document is never overwritten.
pub fn run(store: &mut JsonFileStore) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if store.exists() {
        result.add_message(CmdMessage::warning(format!(
            "Card store already exists at {}",
            store.location()
        )));
        return Ok(result);
    }

    store.save(&[])?;
    result.add_message(CmdMessage::success(format!(
        "Initialized card store at {}",
        store.location()
    )));
    Ok(result)
}
