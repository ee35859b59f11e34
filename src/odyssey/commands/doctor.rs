use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Card;
use crate::store::CardStore;
use std::collections::HashSet;

/// Findings of a read-only consistency check over the card store.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DoctorReport {
    /// Cards whose cached `total` no longer matches their six stats.
    pub stale_totals: Vec<u64>,
    pub duplicate_ids: Vec<u64>,
    /// Cards whose id is not greater than the id before them.
    pub out_of_order: Vec<u64>,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.stale_totals.is_empty() && self.duplicate_ids.is_empty() && self.out_of_order.is_empty()
    }
}

pub fn inspect(cards: &[Card]) -> DoctorReport {
    let mut report = DoctorReport::default();
    let mut seen = HashSet::new();
    let mut previous: Option<u64> = None;

    for card in cards {
        if card.stats.is_total_stale() {
            report.stale_totals.push(card.id);
        }
        if !seen.insert(card.id) && !report.duplicate_ids.contains(&card.id) {
            report.duplicate_ids.push(card.id);
        }
        if previous.is_some_and(|p| card.id <= p) {
            report.out_of_order.push(card.id);
        }
        previous = Some(card.id);
    }
    report
}

/// Cards are immutable once created, so problems are reported, not fixed.
pub fn run<S: CardStore>(store: &S) -> Result<CmdResult> {
    let cards = store.load()?;
    let report = inspect(&cards);
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success(format!(
            "No inconsistencies found in {} card(s).",
            cards.len()
        )));
        return Ok(result);
    }

    result.add_message(CmdMessage::warning("Inconsistencies found:"));
    if !report.stale_totals.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "  - Cached total differs from stat sum: {}",
            join_ids(&report.stale_totals)
        )));
    }
    if !report.duplicate_ids.is_empty() {
        result.add_message(CmdMessage::error(format!(
            "  - Duplicate ids: {}",
            join_ids(&report.duplicate_ids)
        )));
    }
    if !report.out_of_order.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "  - Ids out of insertion order: {}",
            join_ids(&report.out_of_order)
        )));
    }
    Ok(result)
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| format!("#{}", id))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rarity;
    use crate::store::memory::fixtures::{card, seven_cards};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn clean_store_reports_nothing() {
        let store = InMemoryStore::with_cards(&seven_cards()).unwrap();
        let result = run(&store).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains("No inconsistencies"));
    }

    #[test]
    fn edited_stats_make_total_stale() {
        let mut cards = seven_cards();
        cards[2].stats.attack += 50;
        let report = inspect(&cards);
        assert_eq!(report.stale_totals, vec![3]);
        assert!(report.duplicate_ids.is_empty());
    }

    #[test]
    fn detects_duplicates_and_ordering() {
        let cards = vec![
            card(1, "A", Rarity::Common),
            card(3, "B", Rarity::Common),
            card(2, "C", Rarity::Common),
            card(3, "D", Rarity::Common),
        ];
        let report = inspect(&cards);
        assert_eq!(report.duplicate_ids, vec![3]);
        assert_eq!(report.out_of_order, vec![2]);
    }

    #[test]
    fn run_lists_problems() {
        let mut cards = seven_cards();
        cards[0].stats.total = 0;
        let store = InMemoryStore::with_cards(&cards).unwrap();
        let result = run(&store).unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("#1")));
    }
}
