//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, cache and provider selection, and
//! the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    PgFavoriteRepository, PgPlayerRepository, PgTeamRepository, PgUserRepository,
};
use crate::infrastructure::sports_data::{
    ApiSportsClient, ApiSportsConfig, NullProvider, SportsDataProvider,
};
use crate::routes::app_router;
use crate::state::{AppState, Repositories, StateSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL pool using the configured sizing and timeouts.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Applies pending migrations from `migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    Ok(())
}

/// Builds repositories backed by `pool`.
pub fn pg_repositories(pool: PgPool) -> Repositories {
    let pool = Arc::new(pool);

    Repositories {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        teams: Arc::new(PgTeamRepository::new(pool.clone())),
        players: Arc::new(PgPlayerRepository::new(pool.clone())),
        favorites: Arc::new(PgFavoriteRepository::new(pool)),
    }
}

/// Selects the API-Sports client when a key is configured, the null provider otherwise.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn sports_provider(config: &Config) -> Result<Arc<dyn SportsDataProvider>> {
    match &config.sports_api_key {
        Some(key) => {
            let client = ApiSportsClient::new(ApiSportsConfig::new(&config.sports_api_url, key))
                .context("Failed to build sports-data client")?;
            tracing::info!("Sports data enabled (API-Sports)");
            Ok(Arc::new(client))
        }
        None => {
            tracing::info!("Sports data disabled (NullProvider)");
            Ok(Arc::new(NullProvider::new()))
        }
    }
}

async fn stats_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.stats_cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    migrate(&pool).await?;

    let cache = stats_cache(&config).await;
    let provider = sports_provider(&config)?;

    let state = AppState::new(
        pg_repositories(pool),
        provider,
        cache,
        StateSettings {
            session_secret: config.session_secret.clone(),
            season: config.season,
            stats_cache_ttl_seconds: Some(config.stats_cache_ttl_seconds),
        },
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
