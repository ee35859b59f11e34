//! Rarity themes.
//!
//! Each rarity maps to one presentation theme. Lookup never fails: a tag
//! outside the known set (`"uncommon"`, a typo, an empty string) gets the
//! common theme. The badge text still shows such a tag as written.

use crate::model::Rarity;
use console::{Color, Style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RarityTheme {
    pub key: &'static str,
    pub label: &'static str,
    pub accent: Color,
    pub bold: bool,
}

impl RarityTheme {
    /// Name of the template style registered for this theme.
    pub fn style_name(&self) -> String {
        format!("rarity_{}", self.key)
    }

    pub fn style(&self) -> Style {
        let style = Style::new().fg(self.accent);
        if self.bold {
            style.bold()
        } else {
            style
        }
    }
}

pub static THEMES: [RarityTheme; 6] = [
    RarityTheme {
        key: "common",
        label: "Common",
        accent: Color::Color256(245),
        bold: false,
    },
    RarityTheme {
        key: "rare",
        label: "Rare",
        accent: Color::Blue,
        bold: false,
    },
    RarityTheme {
        key: "epic",
        label: "Epic",
        accent: Color::Magenta,
        bold: false,
    },
    RarityTheme {
        key: "legendary",
        label: "Legendary",
        accent: Color::Color256(214),
        bold: true,
    },
    RarityTheme {
        key: "mythical",
        label: "Mythical",
        accent: Color::Red,
        bold: true,
    },
    RarityTheme {
        key: "hero",
        label: "Hero",
        accent: Color::Color256(42),
        bold: true,
    },
];

pub fn default_theme() -> &'static RarityTheme {
    &THEMES[0]
}

pub fn theme_for(rarity: &Rarity) -> &'static RarityTheme {
    match rarity {
        Rarity::Common => &THEMES[0],
        Rarity::Rare => &THEMES[1],
        Rarity::Epic => &THEMES[2],
        Rarity::Legendary => &THEMES[3],
        Rarity::Mythical => &THEMES[4],
        Rarity::Hero => &THEMES[5],
        Rarity::Unknown(_) => default_theme(),
    }
}

/// Badge text for a rarity, shared by grid tiles and the detail view.
pub fn badge(rarity: &Rarity) -> String {
    match rarity {
        Rarity::Unknown(raw) if !raw.trim().is_empty() => raw.clone(),
        other => theme_for(other).label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_rarity_has_its_own_theme() {
        for rarity in Rarity::KNOWN.iter() {
            assert_eq!(theme_for(rarity).key, rarity.as_str());
        }
    }

    #[test]
    fn unknown_rarity_falls_back_to_common() {
        let theme = theme_for(&Rarity::parse("uncommon"));
        assert_eq!(theme, default_theme());
        assert_eq!(theme.label, "Common");
        assert_eq!(theme_for(&Rarity::parse("")).key, "common");
    }

    #[test]
    fn badge_keeps_unknown_tags_as_written() {
        assert_eq!(badge(&Rarity::Legendary), "Legendary");
        assert_eq!(badge(&Rarity::parse("uncommon")), "uncommon");
        assert_eq!(badge(&Rarity::parse("  ")), "Common");
    }

    #[test]
    fn style_names_are_prefixed() {
        assert_eq!(theme_for(&Rarity::Hero).style_name(), "rarity_hero");
    }
}
