//! Favorite toggle client.
//!
//! Mirrors the favorite buttons of a rendered page and keeps them in step with
//! toggle submissions: each accepted submission flips its button between
//! `btn-secondary` and `btn-danger`; an Unauthorized answer leaves it alone.
//!
//! ```no_run
//! use std::sync::Arc;
//! use gridiron_favorites::client::{ButtonRegistry, HttpToggleTransport, ToggleForm, ToggleHandler};
//!
//! # async fn run(page_html: &str) -> Result<(), gridiron_favorites::client::ToggleError> {
//! let transport = HttpToggleTransport::new("http://localhost:3000", Some("1.1760000000.abcd".into()))?;
//! let handler = ToggleHandler::new(Arc::new(transport), ButtonRegistry::from_html(page_html));
//! handler.handle_submit(ToggleForm::team(42)).await?;
//! # Ok(())
//! # }
//! ```

mod button;
mod error;
mod handler;
mod transport;

pub use button::{ACTIVE_CLASS, ButtonRegistry, ButtonState, FavoriteButton, INACTIVE_CLASS, element_id};
pub use error::ToggleError;
pub use handler::{ToggleForm, ToggleHandler, ToggleResult};
pub use transport::{Classified, HttpToggleTransport, ToggleResponse, ToggleTransport, classify};
