//! # Card Detail Viewer
//!
//! An explicit state machine for the expanded card view.
//!
//! ```text
//!            select(card)
//!   Closed ───────────────▶ Open { slide: Info, image: Normal }
//!     ▲                        │  next/prev/go_to   (Info ⇄ Stats, wraps mod 2)
//!     │ close()                │  toggle_fullscreen (Normal ⇄ Fullscreen)
//!     └────────────────────────┘  request_dismiss   (ignored while Fullscreen)
//! ```
//!
//! `close()` works from any state and always resets to the info slide with
//! the image in normal mode. Navigation and overlay events do nothing while
//! the viewer is closed.
//!
//! The stats slide shows `total_power`, the live sum of the six stats,
//! next to the total cached in the store. The two may differ.

use crate::model::Card;
use crate::theme::{badge, theme_for, RarityTheme};
use serde::{Deserialize, Serialize};

pub const SLIDE_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slide {
    #[default]
    Info,
    Stats,
}

impl Slide {
    pub fn index(self) -> usize {
        match self {
            Slide::Info => 0,
            Slide::Stats => 1,
        }
    }

    pub fn from_index(index: usize) -> Slide {
        match index % SLIDE_COUNT {
            0 => Slide::Info,
            _ => Slide::Stats,
        }
    }

    pub fn next(self) -> Slide {
        Slide::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Slide {
        Slide::from_index(self.index() + SLIDE_COUNT - 1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    #[default]
    Normal,
    Fullscreen,
}

/// The whole viewer state. Serializable so a client can persist or ship it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerState {
    pub card: Option<Card>,
    pub slide: Slide,
    pub image: ImageMode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailViewer {
    state: ViewerState,
}

impl DetailViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: ViewerState) -> Self {
        let mut viewer = Self { state };
        if viewer.state.card.is_none() {
            viewer.close();
        }
        viewer
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.card.is_some()
    }

    pub fn card(&self) -> Option<&Card> {
        self.state.card.as_ref()
    }

    pub fn slide(&self) -> Slide {
        self.state.slide
    }

    pub fn image(&self) -> ImageMode {
        self.state.image
    }

    pub fn select(&mut self, card: Card) {
        self.state = ViewerState {
            card: Some(card),
            slide: Slide::Info,
            image: ImageMode::Normal,
        };
    }

    pub fn close(&mut self) {
        self.state = ViewerState::default();
    }

    pub fn next_slide(&mut self) {
        if self.is_open() {
            self.state.slide = self.state.slide.next();
        }
    }

    pub fn prev_slide(&mut self) {
        if self.is_open() {
            self.state.slide = self.state.slide.prev();
        }
    }

    /// Jump straight to a slide (the indicator dots).
    pub fn go_to(&mut self, slide: Slide) {
        if self.is_open() {
            self.state.slide = slide;
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if !self.is_open() {
            return;
        }
        self.state.image = match self.state.image {
            ImageMode::Normal => ImageMode::Fullscreen,
            ImageMode::Fullscreen => ImageMode::Normal,
        };
    }

    /// An interaction outside the view. Returns whether the viewer closed.
    pub fn request_dismiss(&mut self) -> bool {
        if !self.is_open() || self.state.image == ImageMode::Fullscreen {
            return false;
        }
        self.close();
        true
    }

    /// Display model for the current card, `None` while closed.
    pub fn view(&self) -> Option<DetailView> {
        self.card().map(|card| DetailView::of(card, self.slide(), self.image()))
    }
}

/// One bar on the stats slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    pub label: &'static str,
    pub value: i64,
    pub max: i64,
    /// Bar fill, clamped to 0..=100.
    pub percent: f64,
}

impl StatRow {
    fn new(label: &'static str, value: i64, max: i64) -> Self {
        let percent = (value as f64 / max as f64 * 100.0).clamp(0.0, 100.0);
        Self {
            label,
            value,
            max,
            percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub id: u64,
    pub name: String,
    pub rarity: String,
    pub theme: &'static str,
    pub class: String,
    pub range: String,
    pub lore: String,
    pub image: String,
    pub slide: Slide,
    pub slide_index: usize,
    pub fullscreen: bool,
    /// Live sum of the six stats.
    pub total_power: i64,
    /// The total stored with the card.
    pub cached_total: i64,
    pub stats: Vec<StatRow>,
}

impl DetailView {
    pub fn of(card: &Card, slide: Slide, image: ImageMode) -> Self {
        let theme: &RarityTheme = theme_for(&card.rarity);
        let s = &card.stats;
        Self {
            id: card.id,
            name: card.name.clone(),
            rarity: badge(&card.rarity),
            theme: theme.key,
            class: s.kind.clone(),
            range: s.range.clone(),
            lore: card.lore.clone(),
            image: card.image.clone(),
            slide,
            slide_index: slide.index(),
            fullscreen: image == ImageMode::Fullscreen,
            total_power: card.live_total(),
            cached_total: s.total,
            stats: vec![
                StatRow::new("Health", s.hp, 10_000),
                StatRow::new("Attack", s.attack, 2_000),
                StatRow::new("Defense", s.defense, 2_000),
                StatRow::new("Mana", s.mana, 1_000),
                StatRow::new("Intelligence", s.intelligence, 500),
                StatRow::new("Speed", s.speed, 1_000),
            ],
        }
    }

    pub fn total_is_stale(&self) -> bool {
        self.total_power != self.cached_total
    }
}
