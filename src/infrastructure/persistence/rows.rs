//! Row types decoded by `sqlx::query_as` and their entity conversions.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::entities::{Player, PlayerGroup, Team, User};

pub(crate) const USER_COLUMNS: &str = "id, username, email, password_hash, image_url, created_at";

pub(crate) const TEAM_COLUMNS: &str =
    "id, name, city, coach, owner, stadium, established, lookup_id, logo";

pub(crate) const PLAYER_COLUMNS: &str = "id, name, age, height, weight, college, player_group, \
     position, number, salary, seasons, image_url, lookup_id";

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    image_url: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User::new(
            r.id,
            r.username,
            r.email,
            r.password_hash,
            r.image_url,
            r.created_at,
        )
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct TeamRow {
    id: i64,
    name: String,
    city: String,
    coach: String,
    owner: Option<String>,
    stadium: String,
    established: Option<i32>,
    lookup_id: Option<i64>,
    logo: String,
}

impl From<TeamRow> for Team {
    fn from(r: TeamRow) -> Self {
        Team {
            id: r.id,
            name: r.name,
            city: r.city,
            coach: r.coach,
            owner: r.owner,
            stadium: r.stadium,
            established: r.established,
            lookup_id: r.lookup_id,
            logo: r.logo,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct PlayerRow {
    id: i64,
    name: String,
    age: Option<i32>,
    height: String,
    weight: String,
    college: String,
    player_group: String,
    position: String,
    number: Option<i32>,
    salary: String,
    seasons: Option<i32>,
    image_url: String,
    lookup_id: Option<i64>,
}

impl From<PlayerRow> for Player {
    fn from(r: PlayerRow) -> Self {
        let group = r
            .player_group
            .parse::<PlayerGroup>()
            .unwrap_or(PlayerGroup::Unknown);

        Player {
            id: r.id,
            name: r.name,
            age: r.age,
            height: r.height,
            weight: r.weight,
            college: r.college,
            group,
            position: r.position,
            number: r.number,
            salary: r.salary,
            seasons: r.seasons,
            image_url: r.image_url,
            lookup_id: r.lookup_id,
        }
    }
}

/// Escapes `%`, `_` and `\` so user input is matched literally inside `LIKE`.
pub(crate) fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Qualifies a comma-separated column list with a table alias.
pub(crate) fn prefixed(alias: &str, columns: &str) -> String {
    columns
        .split(',')
        .map(|c| format!("{}.{}", alias, c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
