//! Player entity and roster groups.

use std::fmt;
use std::str::FromStr;

/// The unit a player belongs to on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerGroup {
    Offense,
    Defense,
    SpecialTeams,
    Unknown,
}

impl PlayerGroup {
    /// Label stored in the database and used by the sports-data API.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerGroup::Offense => "Offense",
            PlayerGroup::Defense => "Defense",
            PlayerGroup::SpecialTeams => "Special Teams",
            PlayerGroup::Unknown => "Unknown",
        }
    }

    /// Path segment used by the team roster pages.
    pub fn slug(&self) -> &'static str {
        match self {
            PlayerGroup::Offense => "offense",
            PlayerGroup::Defense => "defense",
            PlayerGroup::SpecialTeams => "special-teams",
            PlayerGroup::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PlayerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerGroup {
    type Err = std::convert::Infallible;

    /// Unrecognized labels map to [`PlayerGroup::Unknown`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "Offense" => PlayerGroup::Offense,
            "Defense" => PlayerGroup::Defense,
            "Special Teams" => PlayerGroup::SpecialTeams,
            _ => PlayerGroup::Unknown,
        })
    }
}

/// A rostered player.
///
/// Text attributes default to `"Unknown"` when the provider omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
    pub height: String,
    pub weight: String,
    pub college: String,
    pub group: PlayerGroup,
    pub position: String,
    pub number: Option<i32>,
    pub salary: String,
    pub seasons: Option<i32>,
    pub image_url: String,
    /// Identifier of the player in the external sports-data API.
    pub lookup_id: Option<i64>,
}

/// Input data for inserting a player.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub name: String,
    pub age: Option<i32>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub college: Option<String>,
    pub group: PlayerGroup,
    pub position: Option<String>,
    pub number: Option<i32>,
    pub salary: Option<String>,
    pub seasons: Option<i32>,
    pub image_url: Option<String>,
    pub lookup_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_parsing() {
        assert_eq!("Offense".parse::<PlayerGroup>().unwrap(), PlayerGroup::Offense);
        assert_eq!(
            "Special Teams".parse::<PlayerGroup>().unwrap(),
            PlayerGroup::SpecialTeams
        );
        assert_eq!("Coaching".parse::<PlayerGroup>().unwrap(), PlayerGroup::Unknown);
    }

    #[test]
    fn test_group_labels() {
        assert_eq!(PlayerGroup::SpecialTeams.as_str(), "Special Teams");
        assert_eq!(PlayerGroup::SpecialTeams.slug(), "special-teams");
        assert_eq!(PlayerGroup::Defense.to_string(), "Defense");
    }
}
