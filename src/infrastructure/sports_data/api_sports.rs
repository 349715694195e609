//! API-Sports American Football client.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};
use url::Url;

use super::service::{
    ProviderError, ProviderPlayer, ProviderResult, ProviderTeam, SportsDataProvider, StatGroup,
};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-apisports-key";

/// Connection settings for [`ApiSportsClient`].
#[derive(Debug, Clone)]
pub struct ApiSportsConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Retries after the first failed attempt.
    pub max_retries: usize,
}

impl ApiSportsConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
        }
    }
}

/// Standard API-Sports response envelope.
///
/// `errors` is an empty array on success and an object of messages on failure.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    errors: serde_json::Value,
    #[serde(default = "Vec::new")]
    response: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct PlayerStatistics {
    #[serde(default)]
    teams: Vec<TeamStatistics>,
}

#[derive(Debug, Deserialize)]
struct TeamStatistics {
    #[serde(default)]
    groups: Vec<StatGroup>,
}

/// HTTP client for `https://v1.american-football.api-sports.io`.
///
/// Transient failures (transport errors and 5xx/429 responses) are retried with
/// jittered exponential backoff.
pub struct ApiSportsClient {
    client: Client,
    base_url: Url,
    max_retries: usize,
}

impl ApiSportsClient {
    /// Builds a client with the API key installed as a default header.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidUrl`] for a malformed base URL or API key
    /// and [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ApiSportsConfig) -> ProviderResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&config.api_key)
                .map_err(|_| ProviderError::InvalidUrl("API key is not a valid header".into()))?,
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries,
        })
    }

    fn endpoint(&self, path: &str) -> ProviderResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// GETs `path` with `params` and unwraps the `response` array.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ProviderResult<Vec<T>> {
        let url = self.endpoint(path)?;
        let strategy = ExponentialBackoff::from_millis(200)
            .map(jitter)
            .take(self.max_retries);

        let client = &self.client;
        let url = &url;

        let envelope: Envelope<T> = Retry::spawn(strategy, move || async move {
            debug!("GET {} {:?}", url, params);
            let response = client
                .get(url.clone())
                .query(params)
                .send()
                .await
                .inspect_err(|e| warn!("Provider request failed: {}", e))?;

            let status = response.status();
            if !status.is_success() {
                warn!("Provider answered {} for {}", status, url.path());
                return Err(ProviderError::HttpStatus {
                    status: status.as_u16(),
                    message: status.canonical_reason().unwrap_or("Unknown").to_string(),
                });
            }

            Ok::<_, ProviderError>(response.json::<Envelope<T>>().await?)
        })
        .await?;

        if has_errors(&envelope.errors) {
            return Err(ProviderError::Api(envelope.errors.to_string()));
        }

        Ok(envelope.response)
    }
}

/// Whether the envelope's `errors` field reports anything.
fn has_errors(errors: &serde_json::Value) -> bool {
    match errors {
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Object(map) => !map.is_empty(),
        serde_json::Value::Null => false,
        _ => true,
    }
}

#[async_trait]
impl SportsDataProvider for ApiSportsClient {
    async fn teams(&self, league: u32, season: i32) -> ProviderResult<Vec<ProviderTeam>> {
        let teams: Vec<ProviderTeam> = self
            .get(
                "teams",
                &[("league", league.to_string()), ("season", season.to_string())],
            )
            .await?;
        info!("Fetched {} teams for season {}", teams.len(), season);
        Ok(teams)
    }

    async fn players(
        &self,
        team_lookup_id: i64,
        season: i32,
    ) -> ProviderResult<Vec<ProviderPlayer>> {
        self.get(
            "players",
            &[
                ("team", team_lookup_id.to_string()),
                ("season", season.to_string()),
            ],
        )
        .await
    }

    async fn player_statistics(
        &self,
        player_lookup_id: i64,
        season: i32,
    ) -> ProviderResult<Vec<StatGroup>> {
        let entries: Vec<PlayerStatistics> = self
            .get(
                "players/statistics",
                &[
                    ("id", player_lookup_id.to_string()),
                    ("season", season.to_string()),
                ],
            )
            .await?;

        Ok(entries
            .into_iter()
            .next()
            .and_then(|entry| entry.teams.into_iter().next())
            .map(|team| team.groups)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_errors() {
        assert!(!has_errors(&json!([])));
        assert!(!has_errors(&json!(null)));
        assert!(!has_errors(&json!({})));
        assert!(has_errors(&json!({"token": "Error/Missing application key."})));
        assert!(has_errors(&json!(["rate limit"])));
    }

    #[test]
    fn test_envelope_parsing() {
        let envelope: Envelope<PlayerStatistics> = serde_json::from_value(json!({
            "get": "players/statistics",
            "errors": [],
            "results": 1,
            "response": [{
                "player": {"id": 5555, "name": "Player One"},
                "teams": [{
                    "team": {"id": 1},
                    "groups": [{"name": "Passing", "statistics": [{"name": "yards", "value": 100}]}]
                }]
            }]
        }))
        .unwrap();

        assert!(!has_errors(&envelope.errors));
        assert_eq!(envelope.response[0].teams[0].groups[0].name, "Passing");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiSportsClient::new(ApiSportsConfig::new("not a url", "key"));
        assert!(matches!(result, Err(ProviderError::InvalidUrl(_))));
    }

    #[test]
    fn test_endpoint_join() {
        let client =
            ApiSportsClient::new(ApiSportsConfig::new("https://v1.example.test/", "key")).unwrap();
        assert_eq!(
            client.endpoint("players/statistics").unwrap().as_str(),
            "https://v1.example.test/players/statistics"
        );
    }
}
