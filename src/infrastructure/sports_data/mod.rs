//! External sports-data provider used for seeding and player statistics.
//!
//! Provides a [`SportsDataProvider`] trait with two implementations:
//! - [`ApiSportsClient`] - API-Sports American Football v1 over HTTPS
//! - [`NullProvider`] - Returns empty results when no API key is configured

mod api_sports;
mod null_provider;
mod service;

pub use api_sports::{ApiSportsClient, ApiSportsConfig};
pub use null_provider::NullProvider;
pub use service::{
    ProviderError, ProviderPlayer, ProviderResult, ProviderTeam, SportsDataProvider, Stat,
    StatGroup,
};

#[cfg(test)]
pub use service::MockSportsDataProvider;
