//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

use crate::infrastructure::sports_data::StatGroup;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching player statistics fetched from the sports-data provider.
///
/// The provider is rate limited per day, so statistics are cached per
/// `(player lookup id, season)`. Implementations are fail-open: errors are
/// logged and behave like a miss.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns cached statistics, `Ok(None)` on a miss.
    async fn get_stats(&self, player_lookup_id: i64, season: i32)
    -> CacheResult<Option<Vec<StatGroup>>>;

    /// Stores statistics with an optional TTL (implementation default if `None`).
    async fn set_stats(
        &self,
        player_lookup_id: i64,
        season: i32,
        groups: &[StatGroup],
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
