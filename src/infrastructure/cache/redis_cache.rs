//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use crate::infrastructure::sports_data::StatGroup;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache for player statistics.
///
/// Values are JSON-encoded stat groups under `stats:{season}:{lookup_id}`.
/// All operations are fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "stats:".to_string(),
        })
    }

    fn build_key(&self, player_lookup_id: i64, season: i32) -> String {
        format!("{}{}:{}", self.key_prefix, season, player_lookup_id)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_stats(
        &self,
        player_lookup_id: i64,
        season: i32,
    ) -> CacheResult<Option<Vec<StatGroup>>> {
        let key = self.build_key(player_lookup_id, season);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<StatGroup>>(&raw) {
                Ok(groups) => {
                    debug!("Cache HIT: {}", key);
                    Ok(Some(groups))
                }
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}: {}", key, e);
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set_stats(
        &self,
        player_lookup_id: i64,
        season: i32,
        groups: &[StatGroup],
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = self.build_key(player_lookup_id, season);
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);
        let payload = serde_json::to_string(groups)
            .map_err(|e| CacheError::OperationError(e.to_string()))?;
        let mut conn = self.client.clone();

        match conn.set_ex::<_, _, ()>(&key, payload, ttl).await {
            Ok(_) => {
                debug!("Cache SET: {} (TTL: {}s)", key, ttl);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", key, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
