//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `/`, `/signup`, `/login`, `/users/*`, `/teams/*`, `/players/*` - HTML pages
//! - `POST /users/toggle-favorite-{team|player}/{id}` - Favorite toggles
//! - `GET  /health` - Health check: database, cache
//! - `/static/*` - Static assets
//!
//! # Middleware
//!
//! - **Session** - Resolves the `session` cookie to the current user
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, session, tracing};
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Pages, toggles and health check with the session middleware, without
/// rate limiting or static files. Integration tests drive this router.
pub fn site_routes(state: AppState) -> Router {
    Router::new()
        .merge(web::routes::page_routes())
        .merge(api::routes::favorite_routes())
        .route("/health", get(health_handler))
        .layer(middleware::from_fn_with_state(state.clone(), session::layer))
        .with_state(state)
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let router = rate_limit::apply(site_routes(state), behind_proxy)
        .nest_service("/static", ServeDir::new("static"))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
