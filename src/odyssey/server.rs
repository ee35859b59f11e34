//! # Persistence Service
//!
//! HTTP front for [`OdysseyApi::append`]. One route:
//!
//! - `POST /add-card`: JSON candidate in, `{ message, card }` out.
//!
//! The service owns a single `OdysseyApi` behind a mutex. Each append takes
//! the lock on a blocking task and runs its whole read-modify-write cycle
//! before releasing it, so concurrent requests are applied one at a time.
//!
//! Storage failures answer 500 with a short plain-text body. Every response
//! carries `access-control-allow-origin: *` and preflight requests are
//! answered directly with 204.

use crate::api::OdysseyApi;
use crate::client::{AddCardResponse, ADD_CARD_PATH};
use crate::error::{OdysseyError, Result};
use crate::model::NewCard;
use crate::store::CardStore;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Method, Request, StatusCode};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::net::TcpListener;

pub const SUCCESS_MESSAGE: &str = "Card added successfully!";

pub struct AppState<S: CardStore> {
    api: Arc<Mutex<OdysseyApi<S>>>,
}

// Derive would demand S: Clone.
impl<S: CardStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<S: CardStore> AppState<S> {
    pub fn new(api: OdysseyApi<S>) -> Self {
        Self {
            api: Arc::new(Mutex::new(api)),
        }
    }

    /// Runs `f` with exclusive access to the API.
    ///
    /// A panic in an earlier holder does not lock the service out. Every
    /// append either replaced the document or left it alone, so the API is
    /// still consistent.
    pub fn with_api<T>(&self, f: impl FnOnce(&mut OdysseyApi<S>) -> Result<T>) -> Result<T> {
        let mut api = self.api.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut api)
    }
}

pub fn router<S: CardStore + Send + 'static>(api: OdysseyApi<S>) -> Router {
    router_with_state(AppState::new(api))
}

pub fn router_with_state<S: CardStore + Send + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route(ADD_CARD_PATH, post(add_card::<S>))
        .layer(from_fn(cors_middleware))
        .layer(from_fn(request_log_middleware))
        .with_state(state)
}

async fn add_card<S: CardStore + Send + 'static>(
    State(state): State<AppState<S>>,
    Json(candidate): Json<NewCard>,
) -> Response {
    let outcome =
        tokio::task::spawn_blocking(move || state.with_api(|api| api.append(candidate))).await;

    match outcome {
        Ok(Ok(card)) => Json(AddCardResponse {
            message: SUCCESS_MESSAGE.to_string(),
            card,
        })
        .into_response(),
        Ok(Err(e)) => error_response(&e),
        Err(e) => {
            tracing::error!(error = %e, "append task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error saving card").into_response()
        }
    }
}

fn error_response(err: &OdysseyError) -> Response {
    tracing::error!(error = %err, "append failed");
    let (status, body) = match err {
        OdysseyError::StoreRead(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Error reading file"),
        OdysseyError::StoreWrite(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Error writing file"),
        OdysseyError::CorruptStore(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Error parsing card store")
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "Error saving card"),
    };
    (status, body).into_response()
}

async fn cors_middleware(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        let headers = resp.headers_mut();
        headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
        headers.insert(
            "access-control-allow-methods",
            HeaderValue::from_static("POST,OPTIONS"),
        );
        headers.insert(
            "access-control-allow-headers",
            HeaderValue::from_static("content-type"),
        );
        return resp;
    }

    let mut resp = next.run(req).await;
    resp.headers_mut()
        .insert("access-control-allow-origin", HeaderValue::from_static("*"));
    resp
}

async fn request_log_middleware(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let resp = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = resp.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    resp
}

/// Binds `addr` and serves until ctrl-c.
pub async fn serve<S: CardStore + Send + 'static>(addr: SocketAddr, api: OdysseyApi<S>) -> Result<()> {
    let store = api.store().location();
    let app = router(api);
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, store = %store, "card server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("card server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::OdysseyPaths;
    use crate::store::memory::fixtures::ember_wyrm;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn panicking_holder_does_not_block_later_appends() {
        let state = AppState::new(OdysseyApi::new(
            InMemoryStore::new(),
            OdysseyPaths::new(std::env::temp_dir()),
        ));

        let holder = state.clone();
        let crashed = std::thread::spawn(move || {
            holder.with_api::<()>(|_| panic!("append blew up"))
        })
        .join();
        assert!(crashed.is_err());

        let card = state.with_api(|api| api.append(ember_wyrm())).unwrap();
        assert_eq!(card.id, 1);
    }
}
