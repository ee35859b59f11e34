use console::Style;
use odyssey::theme::THEMES;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod names {
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
    pub const ID: &str = "card_id";
    pub const TITLE: &str = "title";
    pub const MUTED: &str = "muted";
    pub const BAR: &str = "bar";
    pub const STALE: &str = "stale";
}

const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Named styles for the template `style` filter.
///
/// An unknown name prefixes the text with `(!?)` so typos in templates
/// show up in the output instead of silently rendering plain.
#[derive(Clone, Default)]
pub struct Styles {
    styles: HashMap<String, Style>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static ODYSSEY_STYLES: Lazy<Styles> = Lazy::new(|| {
    let base = Styles::new()
        .add(names::INFO, Style::new().dim())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
        .add(names::ID, Style::new().yellow())
        .add(names::TITLE, Style::new().bold())
        .add(names::MUTED, Style::new().color256(245).italic())
        .add(names::BAR, Style::new().cyan())
        .add(names::STALE, Style::new().red().italic());

    THEMES
        .iter()
        .fold(base, |styles, theme| styles.add(&theme.style_name(), theme.style()))
});
