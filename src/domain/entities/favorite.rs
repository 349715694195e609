//! Favorite toggling vocabulary shared by the server and the toggle client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of entity a favorite refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Team,
    Player,
}

impl FavoriteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteKind::Team => "team",
            FavoriteKind::Player => "player",
        }
    }

    /// Path of the toggle endpoint for an entity of this kind.
    ///
    /// ```
    /// use gridiron_favorites::domain::entities::FavoriteKind;
    ///
    /// assert_eq!(FavoriteKind::Team.toggle_path(42), "/users/toggle-favorite-team/42");
    /// ```
    pub fn toggle_path(&self, id: i64) -> String {
        format!("/users/toggle-favorite-{}/{}", self.as_str(), id)
    }

    /// CSS class carried by toggle forms of this kind in rendered pages.
    pub fn form_class(&self) -> &'static str {
        match self {
            FavoriteKind::Team => "team-fav",
            FavoriteKind::Player => "player-fav",
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FavoriteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "team" => Ok(FavoriteKind::Team),
            "player" => Ok(FavoriteKind::Player),
            other => Err(format!("unknown favorite kind '{other}'")),
        }
    }
}

/// Result of toggling a favorite on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    /// Whether the entity is a favorite after the toggle.
    pub fn is_favorite(&self) -> bool {
        matches!(self, ToggleOutcome::Added)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleOutcome::Added => "added",
            ToggleOutcome::Removed => "removed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_paths() {
        assert_eq!(
            FavoriteKind::Team.toggle_path(42),
            "/users/toggle-favorite-team/42"
        );
        assert_eq!(
            FavoriteKind::Player.toggle_path(7),
            "/users/toggle-favorite-player/7"
        );
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Team".parse::<FavoriteKind>(), Ok(FavoriteKind::Team));
        assert_eq!("player".parse::<FavoriteKind>(), Ok(FavoriteKind::Player));
        assert!("coach".parse::<FavoriteKind>().is_err());
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&ToggleOutcome::Removed).unwrap(),
            "\"removed\""
        );
        assert!(ToggleOutcome::Added.is_favorite());
        assert!(!ToggleOutcome::Removed.is_favorite());
    }
}
