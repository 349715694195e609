//! No-op provider used when no API key is configured.

use async_trait::async_trait;
use tracing::debug;

use super::service::{ProviderPlayer, ProviderResult, ProviderTeam, SportsDataProvider, StatGroup};

/// A provider that knows no teams, players or statistics.
///
/// Player pages render without statistics and `admin seed` imports nothing.
pub struct NullProvider;

impl NullProvider {
    pub fn new() -> Self {
        debug!("Using NullProvider (sports data disabled)");
        Self
    }
}

impl Default for NullProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SportsDataProvider for NullProvider {
    async fn teams(&self, _league: u32, _season: i32) -> ProviderResult<Vec<ProviderTeam>> {
        Ok(Vec::new())
    }

    async fn players(
        &self,
        _team_lookup_id: i64,
        _season: i32,
    ) -> ProviderResult<Vec<ProviderPlayer>> {
        Ok(Vec::new())
    }

    async fn player_statistics(
        &self,
        _player_lookup_id: i64,
        _season: i32,
    ) -> ProviderResult<Vec<StatGroup>> {
        Ok(Vec::new())
    }
}
