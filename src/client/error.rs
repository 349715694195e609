use thiserror::Error;

use crate::domain::entities::FavoriteKind;

/// Failures of a toggle submission. The button is never changed when one occurs.
#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no {kind} toggle form with id {id}")]
    UnknownForm { kind: FavoriteKind, id: i64 },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
