//! The toggle handler: submit a form, then update its button.

use std::sync::Arc;

use super::button::{ButtonRegistry, ButtonState};
use super::error::ToggleError;
use super::transport::{Classified, ToggleTransport, classify};
use crate::api::dto::favorite::ToggleStatus;
use crate::domain::entities::FavoriteKind;

/// A toggle form being submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleForm {
    pub kind: FavoriteKind,
    pub id: i64,
}

impl ToggleForm {
    pub fn team(id: i64) -> Self {
        Self {
            kind: FavoriteKind::Team,
            id,
        }
    }

    pub fn player(id: i64) -> Self {
        Self {
            kind: FavoriteKind::Player,
            id,
        }
    }
}

/// What happened to the button after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleResult {
    /// The button flipped to `state`. `server` is the server's own report when
    /// it sent one; it may disagree with `state` after overlapping submissions.
    Toggled {
        state: ButtonState,
        server: Option<ToggleStatus>,
    },
    /// The server refused; the button is unchanged.
    Unauthorized,
}

/// Intercepts toggle form submissions and keeps buttons in step.
///
/// Submissions are independent: several may be in flight on one button, each
/// flipping it once when its response arrives. Clones share the registry.
#[derive(Clone)]
pub struct ToggleHandler {
    transport: Arc<dyn ToggleTransport>,
    buttons: ButtonRegistry,
}

impl ToggleHandler {
    pub fn new(transport: Arc<dyn ToggleTransport>, buttons: ButtonRegistry) -> Self {
        Self { transport, buttons }
    }

    pub fn buttons(&self) -> &ButtonRegistry {
        &self.buttons
    }

    /// Submits `form` and flips its button unless the server answered
    /// Unauthorized.
    ///
    /// # Errors
    ///
    /// - [`ToggleError::UnknownForm`] if no button is registered for the form
    /// - [`ToggleError::Transport`] if the request failed
    /// - [`ToggleError::Status`] for a non-2xx, non-401 response
    ///
    /// The button is left unchanged on every error.
    pub async fn handle_submit(&self, form: ToggleForm) -> Result<ToggleResult, ToggleError> {
        let ToggleForm { kind, id } = form;

        if !self.buttons.contains(kind, id) {
            return Err(ToggleError::UnknownForm { kind, id });
        }

        let response = self.transport.submit(kind, id).await?;

        match classify(&response)? {
            Classified::Unauthorized => {
                tracing::debug!(%kind, id, "Toggle refused: not signed in");
                Ok(ToggleResult::Unauthorized)
            }
            Classified::Toggled(server) => {
                let state = self
                    .buttons
                    .flip(kind, id)
                    .ok_or(ToggleError::UnknownForm { kind, id })?;

                if let Some(status) = &server
                    && status.favorite != state.is_active()
                {
                    tracing::debug!(%kind, id, %state, "Button differs from server state");
                }

                Ok(ToggleResult::Toggled { state, server })
            }
        }
    }
}
