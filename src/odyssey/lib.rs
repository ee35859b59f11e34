//! # Odyssey Architecture
//!
//! Odyssey is the card catalog of Conqueror's Odyssey: a browsable grid of
//! cards, a two-slide detail view, a form for submitting new cards, and a
//! small HTTP service that appends submitted cards to a JSON document.
//!
//! It is a **library first**. The terminal client in `cli/` and the HTTP
//! service in [`server`] are both thin shells around the same core.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Clients: cli/ (terminal), server.rs (HTTP), client.rs      │
//! │  - Parse input, render output, speak HTTP                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation models: catalog.rs, viewer.rs, form.rs        │
//! │  - Grid tiles, viewer state machine, submission form        │
//! │  - No terminal or network assumptions                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, returns Result<CmdResult>     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - append, list, view, init, doctor, config                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - CardStore trait                                          │
//! │  - JsonFileStore (production), InMemoryStore (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Card Store
//!
//! All cards live in one JSON array document, pretty-printed with two-space
//! indentation. Appending rewrites the whole document through a temp file
//! and a rename, so readers see either the old or the new array. The HTTP
//! service is the only writer and applies appends one at a time.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never prints and never exits. Logging goes
//! through `tracing`; the binary decides where it ends up.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: unit tests against `InMemoryStore`, which can fail reads
//!    or writes on demand and hold a raw (possibly corrupt) document.
//! 2. **Presentation models**: plain unit tests, the form with fake sinks.
//! 3. **HTTP**: `tests/server_http.rs` runs the router on a random port.
//! 4. **CLI**: `tests/cli_integration.rs` drives the binary with `assert_cmd`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Card`, `NewCard`, `Rarity`
//! - [`catalog`]: Grid tiles and selection
//! - [`viewer`]: Detail viewer state machine
//! - [`form`]: Submission form and its statuses
//! - [`client`]: `CardSink` and the HTTP client
//! - [`server`]: The persistence service
//! - [`theme`]: Rarity themes
//! - [`config`]: Configuration management
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Error types
//! - `cli`: the terminal client (binary only)

pub mod api;
pub mod catalog;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod model;
pub mod server;
pub mod store;
pub mod theme;
pub mod viewer;
