use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::CardStore;

/// Reads the full catalog snapshot, in store order.
pub fn run<S: CardStore>(store: &S) -> Result<CmdResult> {
    let cards = store.load()?;
    Ok(CmdResult::default().with_listed_cards(cards))
}
