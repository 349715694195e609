//! Provider trait, payload types and errors.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors raised while talking to the sports-data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Provider rejected the request: {0}")]
    Api(String),

    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A team as listed by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderTeam {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub coach: Option<String>,
    pub owner: Option<String>,
    pub stadium: Option<String>,
    pub established: Option<i32>,
    pub logo: Option<String>,
}

/// A rostered player as listed by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderPlayer {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub college: Option<String>,
    pub group: Option<String>,
    pub position: Option<String>,
    pub number: Option<i32>,
    pub salary: Option<String>,
    pub experience: Option<i32>,
    pub image: Option<String>,
}

/// A named group of season statistics, e.g. "Passing".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatGroup {
    pub name: String,
    #[serde(default)]
    pub statistics: Vec<Stat>,
}

/// One statistic; the provider mixes numbers, strings and nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    #[serde(default, deserialize_with = "stat_value")]
    pub value: Option<String>,
}

fn stat_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Source of team, roster and statistics data.
///
/// # Implementations
///
/// - [`crate::infrastructure::sports_data::ApiSportsClient`] - HTTP client with retries
/// - [`crate::infrastructure::sports_data::NullProvider`] - Empty results
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SportsDataProvider: Send + Sync {
    /// Teams of a league for a season.
    async fn teams(&self, league: u32, season: i32) -> ProviderResult<Vec<ProviderTeam>>;

    /// Roster of a team (provider team id) for a season.
    async fn players(&self, team_lookup_id: i64, season: i32)
    -> ProviderResult<Vec<ProviderPlayer>>;

    /// Statistics groups of a player (provider player id) for a season.
    ///
    /// Returns an empty list when the provider has no statistics.
    async fn player_statistics(
        &self,
        player_lookup_id: i64,
        season: i32,
    ) -> ProviderResult<Vec<StatGroup>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stat_values_are_stringified() {
        let group: StatGroup = serde_json::from_value(json!({
            "name": "Passing",
            "statistics": [
                {"name": "yards", "value": 4183},
                {"name": "comp att", "value": "322/515"},
                {"name": "rating", "value": null}
            ]
        }))
        .unwrap();

        assert_eq!(group.statistics[0].value.as_deref(), Some("4183"));
        assert_eq!(group.statistics[1].value.as_deref(), Some("322/515"));
        assert_eq!(group.statistics[2].value, None);
    }

    #[test]
    fn test_team_tolerates_missing_fields() {
        let team: ProviderTeam =
            serde_json::from_value(json!({"id": 32, "name": "AFC", "city": null})).unwrap();
        assert!(team.city.is_none());
        assert!(team.coach.is_none());
    }
}
