use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Presentation tier of a card.
///
/// The six known tags form a closed set. A tag read from the document that is
/// not one of them is kept verbatim in `Unknown` so that rendering can fall
/// back to the common theme and the tag survives a rewrite of the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
    Mythical,
    Hero,
    Unknown(String),
}

impl Rarity {
    pub const KNOWN: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythical,
        Rarity::Hero,
    ];

    /// Case-insensitive parse that never fails.
    pub fn parse(raw: &str) -> Rarity {
        match raw.trim().to_ascii_lowercase().as_str() {
            "common" => Rarity::Common,
            "rare" => Rarity::Rare,
            "epic" => Rarity::Epic,
            "legendary" => Rarity::Legendary,
            "mythical" => Rarity::Mythical,
            "hero" => Rarity::Hero,
            _ => Rarity::Unknown(raw.to_string()),
        }
    }

    /// Parse restricted to the closed set, as the submission form requires.
    pub fn parse_known(raw: &str) -> Option<Rarity> {
        match Rarity::parse(raw) {
            Rarity::Unknown(_) => None,
            known => Some(known),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythical => "mythical",
            Rarity::Hero => "hero",
            Rarity::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rarity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rarity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Rarity::parse(&raw))
    }
}

/// Sum of the six numeric stats. Saturates instead of overflowing on absurd input.
pub fn stat_sum(values: [i64; 6]) -> i64 {
    values.iter().fold(0i64, |acc, v| acc.saturating_add(*v))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStats {
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub mana: i64,
    pub speed: i64,
    pub intelligence: i64,
    /// Cached at creation time, never recomputed.
    pub total: i64,
    pub range: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl CardStats {
    pub fn numeric(&self) -> [i64; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.mana,
            self.speed,
            self.intelligence,
        ]
    }

    pub fn live_total(&self) -> i64 {
        stat_sum(self.numeric())
    }

    pub fn is_total_stale(&self) -> bool {
        self.total != self.live_total()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub lore: String,
    #[serde(default)]
    pub stats: CardStats,
    // Fields we don't model are carried through rewrites untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    pub fn live_total(&self) -> i64 {
        self.stats.live_total()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCardStats {
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub mana: i64,
    pub speed: i64,
    pub intelligence: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    pub range: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl NewCardStats {
    pub fn numeric(&self) -> [i64; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.mana,
            self.speed,
            self.intelligence,
        ]
    }

    pub fn live_total(&self) -> i64 {
        stat_sum(self.numeric())
    }
}

/// A card as submitted for creation: everything but the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCard {
    pub name: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub lore: String,
    #[serde(default)]
    pub stats: NewCardStats,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewCard {
    pub fn new(name: impl Into<String>, rarity: Rarity, stats: NewCardStats) -> Self {
        Self {
            name: name.into(),
            rarity,
            image: String::new(),
            lore: String::new(),
            stats,
            extra: Map::new(),
        }
    }

    /// Builds the stored record. The total is always derived from the six
    /// numeric stats, and an `id` smuggled in the payload is dropped.
    pub fn into_card(mut self, id: u64) -> Card {
        self.extra.remove("id");
        let total = self.stats.live_total();
        Card {
            id,
            name: self.name,
            rarity: self.rarity,
            image: self.image,
            lore: self.lore,
            stats: CardStats {
                hp: self.stats.hp,
                attack: self.stats.attack,
                defense: self.stats.defense,
                mana: self.stats.mana,
                speed: self.stats.speed,
                intelligence: self.stats.intelligence,
                total,
                range: self.stats.range,
                kind: self.stats.kind,
            },
            extra: self.extra,
        }
    }
}
