//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{
    AuthService, CatalogService, FavoriteService, PlayerStatsService, UserService,
};
use crate::domain::repositories::{
    FavoriteRepository, PlayerRepository, TeamRepository, UserRepository,
};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::sports_data::SportsDataProvider;

/// Repository implementations the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub players: Arc<dyn PlayerRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
}

/// Settings that shape service behavior but not wiring.
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub session_secret: String,
    pub season: i32,
    pub stats_cache_ttl_seconds: Option<u64>,
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub catalog_service: Arc<CatalogService>,
    pub favorite_service: Arc<FavoriteService>,
    pub stats_service: Arc<PlayerStatsService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Builds every service from one set of repositories.
    pub fn new(
        repositories: Repositories,
        provider: Arc<dyn SportsDataProvider>,
        cache: Arc<dyn CacheService>,
        settings: StateSettings,
    ) -> Self {
        let Repositories {
            users,
            teams,
            players,
            favorites,
        } = repositories;

        Self {
            auth_service: Arc::new(AuthService::new(users.clone(), settings.session_secret)),
            user_service: Arc::new(UserService::new(users, favorites.clone())),
            catalog_service: Arc::new(CatalogService::new(teams.clone(), players.clone())),
            favorite_service: Arc::new(FavoriteService::new(favorites, teams, players)),
            stats_service: Arc::new(PlayerStatsService::new(
                provider,
                cache.clone(),
                settings.season,
                settings.stats_cache_ttl_seconds,
            )),
            cache,
        }
    }
}
