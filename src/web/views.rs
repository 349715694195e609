//! Display models handed to templates. Optional values are rendered to text
//! here so templates only print fields.

use std::collections::HashSet;

use crate::application::services::GroupedPlayers;
use crate::client::ButtonState;
use crate::domain::entities::{Player, Team, User};
use crate::infrastructure::sports_data::StatGroup;

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "Unknown".to_string(), |v| v.to_string())
}

fn button_class(id: i64, favorites: &HashSet<i64>) -> &'static str {
    ButtonState::from_favorite(favorites.contains(&id)).css_class()
}

pub struct TeamCard {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub coach: String,
    pub owner: String,
    pub stadium: String,
    pub established: String,
    pub logo: String,
    pub button_class: &'static str,
}

impl TeamCard {
    pub fn new(team: &Team, favorites: &HashSet<i64>) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            city: team.city.clone(),
            coach: team.coach.clone(),
            owner: or_unknown(team.owner.as_deref()),
            stadium: team.stadium.clone(),
            established: or_unknown(team.established),
            logo: team.logo.clone(),
            button_class: button_class(team.id, favorites),
        }
    }

    pub fn list(teams: &[Team], favorites: &HashSet<i64>) -> Vec<Self> {
        teams.iter().map(|t| Self::new(t, favorites)).collect()
    }
}

pub struct PlayerRow {
    pub id: i64,
    pub name: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub college: String,
    pub group: String,
    pub position: String,
    pub number: String,
    pub salary: String,
    pub seasons: String,
    pub image_url: String,
    pub button_class: &'static str,
}

impl PlayerRow {
    pub fn new(player: &Player, favorites: &HashSet<i64>) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            age: or_unknown(player.age),
            height: player.height.clone(),
            weight: player.weight.clone(),
            college: player.college.clone(),
            group: player.group.to_string(),
            position: player.position.clone(),
            number: player.number.map_or_else(|| "-".to_string(), |n| n.to_string()),
            salary: player.salary.clone(),
            seasons: or_unknown(player.seasons),
            image_url: player.image_url.clone(),
            button_class: button_class(player.id, favorites),
        }
    }

    pub fn list(players: &[Player], favorites: &HashSet<i64>) -> Vec<Self> {
        players.iter().map(|p| Self::new(p, favorites)).collect()
    }
}

/// One titled block of the favorite-players page.
pub struct RosterSection {
    pub title: &'static str,
    pub players: Vec<PlayerRow>,
}

impl RosterSection {
    pub fn grouped(players: &GroupedPlayers, favorites: &HashSet<i64>) -> Vec<Self> {
        vec![
            Self {
                title: "Offense",
                players: PlayerRow::list(&players.offense, favorites),
            },
            Self {
                title: "Defense",
                players: PlayerRow::list(&players.defense, favorites),
            },
            Self {
                title: "Special Teams",
                players: PlayerRow::list(&players.special_teams, favorites),
            },
        ]
    }
}

pub struct UserCard {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub image_url: String,
}

impl From<&User> for UserCard {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            image_url: user.image_url.clone(),
        }
    }
}

pub struct StatRow {
    pub name: String,
    pub value: String,
}

pub struct StatGroupView {
    pub name: String,
    pub rows: Vec<StatRow>,
}

impl From<&StatGroup> for StatGroupView {
    fn from(group: &StatGroup) -> Self {
        Self {
            name: group.name.clone(),
            rows: group
                .statistics
                .iter()
                .map(|s| StatRow {
                    name: s.name.clone(),
                    value: s.value.clone().unwrap_or_else(|| "-".to_string()),
                })
                .collect(),
        }
    }
}
