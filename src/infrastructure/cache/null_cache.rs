//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, CacheService};
use crate::infrastructure::sports_data::StatGroup;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is not configured or the connection fails at startup.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_stats(
        &self,
        _player_lookup_id: i64,
        _season: i32,
    ) -> CacheResult<Option<Vec<StatGroup>>> {
        Ok(None)
    }

    async fn set_stats(
        &self,
        _player_lookup_id: i64,
        _season: i32,
        _groups: &[StatGroup],
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
