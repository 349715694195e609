//! Player season statistics with a read-through cache.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::Player;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::sports_data::{SportsDataProvider, StatGroup};

/// Fetches statistics from the sports-data provider, caching them per
/// player and season.
pub struct PlayerStatsService {
    provider: Arc<dyn SportsDataProvider>,
    cache: Arc<dyn CacheService>,
    season: i32,
    cache_ttl_seconds: Option<u64>,
}

impl PlayerStatsService {
    pub fn new(
        provider: Arc<dyn SportsDataProvider>,
        cache: Arc<dyn CacheService>,
        season: i32,
        cache_ttl_seconds: Option<u64>,
    ) -> Self {
        Self {
            provider,
            cache,
            season,
            cache_ttl_seconds,
        }
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    /// Statistics groups for `player` in the configured season.
    ///
    /// Players without a provider id have no statistics. Cache errors are
    /// treated as misses.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the provider request fails.
    pub async fn statistics(&self, player: &Player) -> Result<Vec<StatGroup>, AppError> {
        let Some(lookup_id) = player.lookup_id else {
            return Ok(Vec::new());
        };

        match self.cache.get_stats(lookup_id, self.season).await {
            Ok(Some(groups)) => {
                tracing::debug!(lookup_id, season = self.season, "Stats cache hit");
                return Ok(groups);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(lookup_id, "Stats cache read failed: {}", e),
        }

        let groups = self
            .provider
            .player_statistics(lookup_id, self.season)
            .await
            .map_err(|e| {
                AppError::upstream(
                    "Statistics provider unavailable",
                    json!({"player": lookup_id, "reason": e.to_string()}),
                )
            })?;

        if let Err(e) = self
            .cache
            .set_stats(lookup_id, self.season, &groups, self.cache_ttl_seconds)
            .await
        {
            tracing::warn!(lookup_id, "Stats cache write failed: {}", e);
        }

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DEFAULT_IMAGE_URL, PlayerGroup};
    use crate::infrastructure::cache::NullCache;
    use crate::infrastructure::sports_data::{MockSportsDataProvider, ProviderError, Stat};

    fn test_player(lookup_id: Option<i64>) -> Player {
        Player {
            id: 1,
            name: "Derek Carr".to_string(),
            age: Some(32),
            height: "6' 3\"".to_string(),
            weight: "215 lbs".to_string(),
            college: "Fresno State".to_string(),
            group: PlayerGroup::Offense,
            position: "QB".to_string(),
            number: Some(4),
            salary: "$30,000,000".to_string(),
            seasons: Some(10),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            lookup_id,
        }
    }

    fn passing() -> Vec<StatGroup> {
        vec![StatGroup {
            name: "Passing".to_string(),
            statistics: vec![Stat {
                name: "yards".to_string(),
                value: Some("3878".to_string()),
            }],
        }]
    }

    #[tokio::test]
    async fn test_player_without_lookup_id() {
        let mut provider = MockSportsDataProvider::new();
        provider.expect_player_statistics().times(0);

        let service =
            PlayerStatsService::new(Arc::new(provider), Arc::new(NullCache::new()), 2023, None);

        let groups = service.statistics(&test_player(None)).await.unwrap();
        assert!(groups.is_empty());
    }

    #[tokio::test]
    async fn test_fetches_from_provider_on_miss() {
        let mut provider = MockSportsDataProvider::new();
        provider
            .expect_player_statistics()
            .withf(|id, season| *id == 5555 && *season == 2023)
            .times(1)
            .returning(|_, _| Ok(passing()));

        let service =
            PlayerStatsService::new(Arc::new(provider), Arc::new(NullCache::new()), 2023, None);

        let groups = service.statistics(&test_player(Some(5555))).await.unwrap();
        assert_eq!(groups, passing());
    }

    #[tokio::test]
    async fn test_provider_failure_is_upstream() {
        let mut provider = MockSportsDataProvider::new();
        provider.expect_player_statistics().returning(|_, _| {
            Err(ProviderError::HttpStatus {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let service =
            PlayerStatsService::new(Arc::new(provider), Arc::new(NullCache::new()), 2023, None);

        let err = service
            .statistics(&test_player(Some(5555)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream { .. }));
    }
}
