//! Catalog import from the sports-data provider.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewPlayer, NewTeam, PlayerGroup};
use crate::domain::repositories::{PlayerRepository, TeamRepository};
use crate::error::AppError;
use crate::infrastructure::sports_data::{ProviderPlayer, ProviderTeam, SportsDataProvider};

/// League id of the NFL in the provider.
pub const NFL_LEAGUE: u32 = 1;

/// Options for one import run.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub season: i32,
    /// Remove all teams, players, rosters and favorites first.
    pub reset: bool,
    /// Pause between teams; the provider's free tier allows ~10 requests/minute.
    pub team_delay: Duration,
}

/// Counts reported after an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub teams_imported: usize,
    pub teams_skipped: usize,
    pub players_imported: usize,
}

/// Imports teams and rosters into the catalog.
pub struct SeedService {
    provider: Arc<dyn SportsDataProvider>,
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl SeedService {
    pub fn new(
        provider: Arc<dyn SportsDataProvider>,
        teams: Arc<dyn TeamRepository>,
        players: Arc<dyn PlayerRepository>,
    ) -> Self {
        Self {
            provider,
            teams,
            players,
        }
    }

    /// Runs an import.
    ///
    /// Teams without a city (conference placeholders) are skipped, as are teams
    /// that collide with an existing name or coach.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the provider fails, or a database error.
    pub async fn run(&self, options: &SeedOptions) -> Result<SeedReport, AppError> {
        if options.reset {
            self.teams.reset_catalog().await?;
            tracing::warn!("Catalog reset before import");
        }

        let provider_teams = self
            .provider
            .teams(NFL_LEAGUE, options.season)
            .await
            .map_err(upstream)?;

        let mut report = SeedReport::default();
        let mut first = true;

        for provider_team in provider_teams {
            let Some(new_team) = to_new_team(&provider_team) else {
                tracing::debug!(team = %provider_team.name, "Skipping team without city");
                report.teams_skipped += 1;
                continue;
            };

            if !first && !options.team_delay.is_zero() {
                tokio::time::sleep(options.team_delay).await;
            }
            first = false;

            let team = match self.teams.create(new_team).await {
                Ok(team) => team,
                Err(AppError::Conflict { .. }) => {
                    tracing::warn!(team = %provider_team.name, "Team already exists, skipping");
                    report.teams_skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            report.teams_imported += 1;

            let roster = self
                .provider
                .players(provider_team.id, options.season)
                .await
                .map_err(upstream)?;

            for provider_player in roster {
                let player = self.players.create(to_new_player(provider_player)).await?;
                self.teams.add_player(team.id, player.id).await?;
                report.players_imported += 1;
            }

            tracing::info!(team = %team.name, "Imported team roster");
        }

        Ok(report)
    }
}

fn upstream(e: crate::infrastructure::sports_data::ProviderError) -> AppError {
    AppError::upstream(
        "Sports data provider failed",
        json!({"reason": e.to_string()}),
    )
}

fn unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| "Unknown".to_string())
}

fn to_new_team(team: &ProviderTeam) -> Option<NewTeam> {
    let city = team.city.clone()?;

    Some(NewTeam {
        name: team.name.clone(),
        city,
        coach: unknown(team.coach.clone()),
        owner: team.owner.clone(),
        stadium: unknown(team.stadium.clone()),
        established: team.established,
        lookup_id: Some(team.id),
        logo: team.logo.clone(),
    })
}

fn to_new_player(player: ProviderPlayer) -> NewPlayer {
    let group = player
        .group
        .as_deref()
        .map(|g| g.parse().unwrap_or(PlayerGroup::Unknown))
        .unwrap_or(PlayerGroup::Unknown);

    NewPlayer {
        name: player.name,
        age: player.age,
        height: player.height,
        weight: player.weight,
        college: player.college,
        group,
        position: player.position,
        number: player.number,
        salary: player.salary,
        seasons: player.experience,
        image_url: player.image,
        lookup_id: Some(player.id),
    }
}
