//! # Card Submission Form
//!
//! The form holds raw string values keyed by field name, one per entry in
//! [`FORM_SCHEMA`]. Nothing is interpreted until submission: [`CardForm::build_candidate`]
//! checks the name, parses the integer fields, restricts the rarity to the
//! known set and computes `total`.
//!
//! A submission moves the status through exactly one of:
//!
//! ```text
//! Idle ─▶ Invalid(reason)
//! Idle ─▶ Saving ─▶ Saved(card)        (form reset to defaults)
//!                └▶ Failed(Rejected)   (HTTP answer other than success)
//!                └▶ Failed(Unreachable)(no answer at all)
//! ```
//!
//! There is no range check on the numbers. Negative values go through.

use crate::client::{CardSink, SubmitFailure};
use crate::model::{stat_sum, Card, NewCard, NewCardStats, Rarity};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Rarity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: &'static str,
    pub required: bool,
}

const fn field(
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    default: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        default,
        required: false,
    }
}

pub const FORM_SCHEMA: [FieldSpec; 12] = [
    FieldSpec {
        name: "name",
        label: "Card Name",
        kind: FieldKind::Text,
        default: "",
        required: true,
    },
    field("rarity", "Rarity", FieldKind::Rarity, "common"),
    field("image", "Image URL", FieldKind::Text, ""),
    field("lore", "Lore", FieldKind::Text, ""),
    field("hp", "HP", FieldKind::Integer, "0"),
    field("attack", "Attack", FieldKind::Integer, "0"),
    field("defense", "Defense", FieldKind::Integer, "0"),
    field("mana", "Mana", FieldKind::Integer, "0"),
    field("speed", "Speed", FieldKind::Integer, "0"),
    field("intelligence", "Intelligence", FieldKind::Integer, "0"),
    field("range", "Range", FieldKind::Text, "Melee"),
    field("type", "Type", FieldKind::Text, "organic"),
];

pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FORM_SCHEMA.iter().find(|f| f.name == name)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Invalid(String),
    Saving,
    Saved(Card),
    Failed(SubmitFailure),
}

impl SubmitStatus {
    /// The line shown under the form. Empty while idle.
    pub fn message(&self) -> String {
        match self {
            SubmitStatus::Idle => String::new(),
            SubmitStatus::Invalid(reason) => format!("Error: {}", reason),
            SubmitStatus::Saving => "Saving...".to_string(),
            SubmitStatus::Saved(_) => "Success! Card added to the catalog.".to_string(),
            SubmitStatus::Failed(SubmitFailure::Rejected { .. }) => "Error saving card.".to_string(),
            SubmitStatus::Failed(SubmitFailure::Unreachable(_)) => {
                "Error: Is the card server running?".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardForm {
    values: BTreeMap<&'static str, String>,
    status: SubmitStatus,
}

impl Default for CardForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CardForm {
    pub fn new() -> Self {
        let values = FORM_SCHEMA
            .iter()
            .map(|f| (f.name, f.default.to_string()))
            .collect();
        Self {
            values,
            status: SubmitStatus::Idle,
        }
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Sets a raw value. Only names in the schema are accepted.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), String> {
        let spec = field_spec(name).ok_or_else(|| format!("unknown field '{}'", name))?;
        self.values.insert(spec.name, value.into());
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn text(&self, name: &str) -> String {
        self.value(name).unwrap_or_default().to_string()
    }

    fn integer(&self, spec: &FieldSpec) -> Result<i64, String> {
        let raw = self.value(spec.name).unwrap_or_default().trim();
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse::<i64>()
            .map_err(|_| format!("{} must be a whole number, got '{}'", spec.label, raw))
    }

    /// Validates the raw values and assembles the payload, total included.
    pub fn build_candidate(&self) -> Result<NewCard, String> {
        let mut numbers = BTreeMap::new();
        for spec in FORM_SCHEMA.iter() {
            match spec.kind {
                FieldKind::Text if spec.required => {
                    if self.text(spec.name).trim().is_empty() {
                        return Err(format!("{} is required", spec.label));
                    }
                }
                FieldKind::Text => {}
                FieldKind::Integer => {
                    numbers.insert(spec.name, self.integer(spec)?);
                }
                FieldKind::Rarity => {
                    let raw = self.text(spec.name);
                    if Rarity::parse_known(&raw).is_none() {
                        return Err(format!("unknown rarity '{}'", raw));
                    }
                }
            }
        }

        let n = |name: &str| numbers.get(name).copied().unwrap_or(0);
        let mut stats = NewCardStats {
            hp: n("hp"),
            attack: n("attack"),
            defense: n("defense"),
            mana: n("mana"),
            speed: n("speed"),
            intelligence: n("intelligence"),
            total: None,
            range: self.text("range"),
            kind: self.text("type"),
        };
        stats.total = Some(stat_sum(stats.numeric()));

        let rarity = Rarity::parse_known(&self.text("rarity")).unwrap_or_default();
        let mut candidate = NewCard::new(self.text("name"), rarity, stats);
        candidate.image = self.text("image");
        candidate.lore = self.text("lore");
        Ok(candidate)
    }

    /// First half of a submission: validate and enter `Saving`.
    pub fn begin_submit(&mut self) -> Option<NewCard> {
        match self.build_candidate() {
            Ok(candidate) => {
                self.status = SubmitStatus::Saving;
                Some(candidate)
            }
            Err(reason) => {
                self.status = SubmitStatus::Invalid(reason);
                None
            }
        }
    }

    /// Second half: record the outcome of the append call.
    pub fn finish_submit(&mut self, outcome: Result<Card, SubmitFailure>) {
        match outcome {
            Ok(card) => {
                self.reset();
                self.status = SubmitStatus::Saved(card);
            }
            Err(failure) => self.status = SubmitStatus::Failed(failure),
        }
    }

    pub async fn submit<K: CardSink>(&mut self, sink: &K) -> &SubmitStatus {
        if let Some(candidate) = self.begin_submit() {
            let outcome = sink.append(&candidate).await;
            self.finish_submit(outcome);
        }
        &self.status
    }
}
