//! DTOs for the favorite toggle endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{FavoriteKind, ToggleOutcome};

/// Body returned by `POST /users/toggle-favorite-{kind}/{id}`.
///
/// ```json
/// { "kind": "team", "id": 42, "status": "added", "favorite": true }
/// ```
///
/// The toggle client deserializes the same type to learn the server's view of
/// the favorite after the flip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleStatus {
    pub kind: FavoriteKind,
    pub id: i64,
    pub status: ToggleOutcome,
    pub favorite: bool,
}

impl ToggleStatus {
    pub fn new(kind: FavoriteKind, id: i64, outcome: ToggleOutcome) -> Self {
        Self {
            kind,
            id,
            status: outcome,
            favorite: outcome.is_favorite(),
        }
    }
}
