//! Client side of the append endpoint.
//!
//! The submission form talks to the persistence service through [`CardSink`].
//! [`HttpCardClient`] is the real implementation; tests substitute their own.

use crate::model::{Card, NewCard};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

pub const ADD_CARD_PATH: &str = "/add-card";

/// Why a submission did not produce a stored card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// The service answered, but not with success.
    Rejected { status: u16, body: String },
    /// The service could not be reached at all.
    Unreachable(String),
}

impl fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitFailure::Rejected { status, body } if body.is_empty() => {
                write!(f, "server answered {}", status)
            }
            SubmitFailure::Rejected { status, body } => {
                write!(f, "server answered {}: {}", status, body)
            }
            SubmitFailure::Unreachable(reason) => write!(f, "server unreachable: {}", reason),
        }
    }
}

/// Body of a successful `POST /add-card`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCardResponse {
    pub message: String,
    pub card: Card,
}

pub trait CardSink {
    fn append(&self, candidate: &NewCard) -> impl Future<Output = Result<Card, SubmitFailure>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpCardClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, ADD_CARD_PATH)
    }
}

impl CardSink for HttpCardClient {
    async fn append(&self, candidate: &NewCard) -> Result<Card, SubmitFailure> {
        let url = self.endpoint();
        tracing::debug!(%url, name = %candidate.name, "posting card");

        let response = self
            .client
            .post(&url)
            .json(candidate)
            .send()
            .await
            .map_err(|e| SubmitFailure::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitFailure::Unreachable(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "card rejected by server");
            return Err(SubmitFailure::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<AddCardResponse>(&body)
            .map(|parsed| parsed.card)
            .map_err(|_| SubmitFailure::Rejected {
                status: status.as_u16(),
                body,
            })
    }
}
