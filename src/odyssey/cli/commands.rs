//! # CLI Layer
//!
//! The terminal client. This is the only place that parses arguments,
//! writes to stdout and decides exit codes; everything it does goes through
//! [`OdysseyApi`] or the library's form, catalog and viewer types.
//!
//! ## Structure
//!
//! - `run()`: parse, set up logging, build the context, dispatch
//! - `init_context()`: working root, config, store and API
//! - `handle_*()`: one handler per subcommand
//!
//! The working root is `ODYSSEY_HOME` when set, otherwise the current
//! directory. `odyssey.json` and the card store live under it.

use super::render::{
    print_messages, render_catalog, render_detail, status_message, use_color,
};
use super::setup::{AddArgs, Cli, Commands};
use clap::Parser;
use odyssey::api::{ConfigAction, OdysseyApi, OdysseyPaths};
use odyssey::catalog::Catalog;
use odyssey::client::{CardSink, HttpCardClient};
use odyssey::config::OdysseyConfig;
use odyssey::error::{OdysseyError, Result};
use odyssey::form::{CardForm, SubmitStatus};
use odyssey::logging::init_tracing;
use odyssey::server;
use odyssey::store::fs::JsonFileStore;
use odyssey::store::CardStore;
use odyssey::viewer::{DetailViewer, Slide};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const HOME_ENV: &str = "ODYSSEY_HOME";

struct AppContext {
    api: OdysseyApi<JsonFileStore>,
    config: OdysseyConfig,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Some(Commands::Serve { .. }) => "info",
        _ => "warn",
    };
    init_tracing(default_level, cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Init) => handle_init(&mut ctx),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::View {
            id,
            stats,
            fullscreen,
        }) => handle_view(&ctx, id, stats, fullscreen),
        Some(Commands::Add(args)) => handle_add(&ctx, args),
        Some(Commands::Serve { bind }) => handle_serve(ctx, bind),
        Some(Commands::Doctor) => handle_doctor(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn working_root() -> Result<PathBuf> {
    match std::env::var_os(HOME_ENV) {
        Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
        _ => Ok(std::env::current_dir()?),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let paths = OdysseyPaths::new(working_root()?);
    let config = OdysseyConfig::load(paths.config_dir())?;
    let store = JsonFileStore::new(paths.resolve(&config.data_file));
    tracing::debug!(root = %paths.root.display(), store = %store.location(), "context ready");

    let api = OdysseyApi::new(store, paths).with_corrupt_store_policy(config.corrupt_store);

    Ok(AppContext {
        api,
        config,
        use_color: use_color(cli.no_color),
    })
}

/// Read commands need an existing store; point at `init` instead of an io error.
fn require_store(ctx: &AppContext) -> Result<()> {
    let store = ctx.api.store();
    if store.exists() {
        return Ok(());
    }
    Err(OdysseyError::Api(format!(
        "No card store at {}. Run `odyssey init` to create one.",
        store.location()
    )))
}

fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    require_store(ctx)?;
    let result = ctx.api.list_cards()?;
    let catalog = Catalog::from_cards(result.listed_cards);
    print!("{}", render_catalog(&catalog, ctx.use_color));
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: u64, stats: bool, fullscreen: bool) -> Result<()> {
    require_store(ctx)?;
    let catalog = Catalog::load(ctx.api.store())?;
    let selection = catalog.select(id).ok_or(OdysseyError::CardNotFound(id))?;

    let mut viewer = DetailViewer::new();
    viewer.select(selection.card);
    if stats {
        viewer.go_to(Slide::Stats);
    }
    if fullscreen {
        viewer.toggle_fullscreen();
    }

    if let Some(view) = viewer.view() {
        print!("{}", render_detail(&view, ctx.use_color));
    }
    Ok(())
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

fn handle_add(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let mut form = CardForm::new();
    for (field, value) in args.fields() {
        form.set(field, value).map_err(OdysseyError::Validation)?;
    }

    let Some(candidate) = form.begin_submit() else {
        return match form.status() {
            SubmitStatus::Invalid(reason) => Err(OdysseyError::Validation(reason.clone())),
            other => Err(OdysseyError::Api(other.message())),
        };
    };
    if let Some(saving) = status_message(form.status()) {
        print_messages(&[saving], ctx.use_color);
    }

    let server_url = args.server.unwrap_or_else(|| ctx.config.server_url.clone());
    let client = HttpCardClient::new(server_url);
    let outcome = runtime()?.block_on(client.append(&candidate));
    form.finish_submit(outcome);

    if let Some(message) = status_message(form.status()) {
        print_messages(&[message], ctx.use_color);
    }
    match form.status() {
        SubmitStatus::Saved(card) => {
            tracing::debug!(id = card.id, "card saved");
            Ok(())
        }
        SubmitStatus::Failed(failure) => Err(OdysseyError::Api(failure.to_string())),
        other => Err(OdysseyError::Api(other.message())),
    }
}

fn handle_serve(ctx: AppContext, bind: Option<SocketAddr>) -> Result<()> {
    let addr = match bind {
        Some(addr) => addr,
        None => ctx.config.bind.parse::<SocketAddr>().map_err(|e| {
            OdysseyError::Config(format!("bind address '{}': {}", ctx.config.bind, e))
        })?,
    };
    runtime()?.block_on(server::serve(addr, ctx.api))
}

fn handle_doctor(ctx: &AppContext) -> Result<()> {
    require_store(ctx)?;
    let result = ctx.api.doctor()?;
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for (key, value) in config.entries() {
                println!("{} = {}", key, value);
            }
        }
    }
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}
