//! # Rendering
//!
//! Turns catalog tiles, detail views and command messages into styled
//! terminal text through the minijinja templates in `templates/`.
//!
//! Layout math stays here, where it can be unicode-width aware: names are
//! truncated and padded to a fixed column, stat bars are drawn to a fixed
//! length. Templates receive finished strings plus a style name and only
//! decide how lines are arranged and colored.

use super::styles::{names, ODYSSEY_STYLES};
use super::templates::{
    CATALOG_TEMPLATE, DETAIL_INFO_TEMPLATE, DETAIL_STATS_TEMPLATE, HEADER_TEMPLATE,
    MESSAGES_TEMPLATE,
};
use console::Term;
use minijinja::{Environment, Error, Value};
use odyssey::api::{CmdMessage, MessageLevel};
use odyssey::catalog::{Catalog, CardSummary};
use odyssey::form::SubmitStatus;
use odyssey::viewer::{DetailView, Slide, StatRow};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const NAME_WIDTH: usize = 24;
pub const RARITY_WIDTH: usize = 9;
pub const CLASS_WIDTH: usize = 10;
pub const STAT_LABEL_WIDTH: usize = 12;
pub const BAR_WIDTH: usize = 20;

/// Colors only when asked for and the terminal supports them.
pub fn use_color(no_color: bool) -> bool {
    !no_color && Term::stdout().features().colors_supported()
}

fn environment(use_color: bool) -> Result<Environment<'static>, Error> {
    let mut env = Environment::new();
    let styles = ODYSSEY_STYLES.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        styles.apply(&name, &value.to_string(), use_color)
    });
    env.add_template("header", HEADER_TEMPLATE)?;
    env.add_template("catalog", CATALOG_TEMPLATE)?;
    env.add_template("detail_info", DETAIL_INFO_TEMPLATE)?;
    env.add_template("detail_stats", DETAIL_STATS_TEMPLATE)?;
    env.add_template("messages", MESSAGES_TEMPLATE)?;
    Ok(env)
}

fn render<T: Serialize>(name: &str, data: &T, use_color: bool) -> Result<String, Error> {
    let env = environment(use_color)?;
    let template = env.get_template(name)?;
    template.render(data)
}

fn rarity_style(theme_key: &str) -> String {
    format!("rarity_{}", theme_key)
}

#[derive(Serialize)]
struct TileData {
    id: String,
    name: String,
    padding: String,
    rarity: String,
    style: String,
    class: String,
    attack: String,
    defense: String,
    power: String,
}

impl TileData {
    fn of(summary: &CardSummary) -> Self {
        let name = truncate_to_width(&summary.name, NAME_WIDTH);
        let padding = " ".repeat(NAME_WIDTH.saturating_sub(name.width()));
        Self {
            id: format!("{:>4}", format!("#{}", summary.id)),
            name,
            padding,
            rarity: pad_to_width(&summary.rarity, RARITY_WIDTH),
            style: rarity_style(summary.theme),
            class: pad_to_width(&truncate_to_width(&summary.class, CLASS_WIDTH), CLASS_WIDTH),
            attack: format!("{:>5}", summary.attack),
            defense: format!("{:>5}", summary.defense),
            power: format!("{:>6}", summary.power),
        }
    }
}

#[derive(Serialize)]
struct CatalogData {
    empty: bool,
    tiles: Vec<TileData>,
    summary: String,
}

pub fn render_catalog(catalog: &Catalog, use_color: bool) -> String {
    let tiles: Vec<TileData> = catalog.summaries().iter().map(TileData::of).collect();
    let count = tiles.len();
    let data = CatalogData {
        empty: tiles.is_empty(),
        tiles,
        summary: match count {
            1 => "1 card".to_string(),
            n => format!("{} cards", n),
        },
    };
    render("catalog", &data, use_color).unwrap_or_else(|e| format!("Render error: {}\n", e))
}

#[derive(Serialize)]
struct HeaderData {
    id: String,
    name: String,
    rarity: String,
    style: String,
    dots: String,
    subtitle: String,
}

impl HeaderData {
    fn of(view: &DetailView) -> Self {
        let subtitle = [view.class.as_str(), view.range.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" · ");
        Self {
            id: format!("#{}", view.id),
            name: view.name.clone(),
            rarity: view.rarity.clone(),
            style: rarity_style(view.theme),
            dots: slide_dots(view.slide),
            subtitle,
        }
    }
}

#[derive(Serialize)]
struct InfoData {
    header: HeaderData,
    image: String,
    lore: String,
    fullscreen: bool,
}

#[derive(Serialize)]
struct StatLine {
    label: String,
    bar: String,
    value: i64,
}

#[derive(Serialize)]
struct StatsData {
    header: HeaderData,
    rows: Vec<StatLine>,
    total_power: i64,
    stale: Option<String>,
}

fn slide_dots(current: Slide) -> String {
    [Slide::Info, Slide::Stats]
        .iter()
        .map(|s| if *s == current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn stat_bar(row: &StatRow) -> String {
    let filled = ((row.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn render_detail(view: &DetailView, use_color: bool) -> String {
    let header = HeaderData::of(view);
    let rendered = match view.slide {
        Slide::Info => render(
            "detail_info",
            &InfoData {
                header,
                image: view.image.clone(),
                lore: view.lore.clone(),
                fullscreen: view.fullscreen,
            },
            use_color,
        ),
        Slide::Stats => render(
            "detail_stats",
            &StatsData {
                header,
                rows: view
                    .stats
                    .iter()
                    .map(|row| StatLine {
                        label: pad_to_width(row.label, STAT_LABEL_WIDTH),
                        bar: stat_bar(row),
                        value: row.value,
                    })
                    .collect(),
                total_power: view.total_power,
                stale: view.total_is_stale().then(|| {
                    format!("Stored total is {}, stats add up to {}", view.cached_total, view.total_power)
                }),
            },
            use_color,
        ),
    };
    rendered.unwrap_or_else(|e| format!("Render error: {}\n", e))
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };

    render("messages", &data, use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

pub fn print_messages(messages: &[CmdMessage], use_color: bool) {
    let output = render_messages(messages, use_color);
    if !output.is_empty() {
        print!("{}", output);
    }
}

/// The single status line of a form submission, as a message.
pub fn status_message(status: &SubmitStatus) -> Option<CmdMessage> {
    let text = status.message();
    match status {
        SubmitStatus::Idle => None,
        SubmitStatus::Saving => Some(CmdMessage::info(text)),
        SubmitStatus::Saved(_) => Some(CmdMessage::success(text)),
        SubmitStatus::Invalid(_) | SubmitStatus::Failed(_) => Some(CmdMessage::error(text)),
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
