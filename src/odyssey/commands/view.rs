use crate::commands::CmdResult;
use crate::error::{OdysseyError, Result};
use crate::store::CardStore;

pub fn run<S: CardStore>(store: &S, id: u64) -> Result<CmdResult> {
    let card = store
        .load()?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or(OdysseyError::CardNotFound(id))?;
    Ok(CmdResult::default().with_listed_cards(vec![card]))
}
