//! # Terminal Client
//!
//! One UI client for the card library, not the library itself.
//!
//! - `odyssey list` renders the catalog grid from a one-time snapshot of the store
//! - `odyssey view <id>` drives the detail viewer to the requested slide
//! - `odyssey add ...` fills the submission form and posts it to the card server
//! - `odyssey serve` runs the card server itself
//!
//! ## Module Structure
//!
//! - `commands`: per-command handlers that call the API and print results
//! - `render`: template rendering for catalog, detail and messages
//! - `setup`: argument parsing via clap
//! - `styles`: named terminal styles, including one per rarity theme
//! - `templates`: embedded template sources

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
