//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as stand-alone
//! files next to this module and embedded at compile time.
//!
//! Templates emit explicit line breaks (`{{ "\n" }}`) rather than relying on
//! the layout of the template source, so whitespace stays predictable inside
//! loops and conditionals. Width math (truncation, padding, bar length) is
//! done in Rust and handed to the template as ready strings; templates only
//! pick styles and arrange lines.

pub const HEADER_TEMPLATE: &str = include_str!("templates/header.tmp");
pub const CATALOG_TEMPLATE: &str = include_str!("templates/catalog.tmp");
pub const DETAIL_INFO_TEMPLATE: &str = include_str!("templates/detail_info.tmp");
pub const DETAIL_STATS_TEMPLATE: &str = include_str!("templates/detail_stats.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
