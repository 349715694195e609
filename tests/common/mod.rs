#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use gridiron_favorites::application::services::Registration;
use gridiron_favorites::domain::entities::{
    DEFAULT_IMAGE_URL, FavoriteKind, NewPlayer, NewTeam, NewUser, Player, PlayerGroup, Team,
    ToggleOutcome, UpdateUser, User,
};
use gridiron_favorites::domain::repositories::{
    FavoriteRepository, PlayerRepository, TeamRepository, UserRepository,
};
use gridiron_favorites::error::AppError;
use gridiron_favorites::infrastructure::cache::NullCache;
use gridiron_favorites::infrastructure::sports_data::NullProvider;
use gridiron_favorites::state::{AppState, Repositories, StateSettings};
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

pub const TEST_SECRET: &str = "test-session-secret";

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: HashMap<i64, User>,
    teams: HashMap<i64, Team>,
    players: HashMap<i64, Player>,
    team_players: Vec<(i64, i64)>,
    favorite_teams: BTreeSet<(i64, i64)>,
    favorite_players: BTreeSet<(i64, i64)>,
}

impl Tables {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory stand-in for the PostgreSQL repositories.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(self.clone()),
            teams: Arc::new(self.clone()),
            players: Arc::new(self.clone()),
            favorites: Arc::new(self.clone()),
        }
    }

    pub fn insert_team(&self, name: &str) -> Team {
        let mut t = self.tables.lock().unwrap();
        let team = Team {
            id: t.id(),
            name: name.to_string(),
            city: "Kansas City".to_string(),
            coach: "Andy Reid".to_string(),
            owner: None,
            stadium: "Arrowhead Stadium".to_string(),
            established: Some(1960),
            lookup_id: None,
            logo: DEFAULT_IMAGE_URL.to_string(),
        };
        t.teams.insert(team.id, team.clone());
        team
    }

    pub fn insert_player(&self, team_id: i64, name: &str, group: PlayerGroup) -> Player {
        let mut t = self.tables.lock().unwrap();
        let player = Player {
            id: t.id(),
            name: name.to_string(),
            age: Some(28),
            height: "6' 2\"".to_string(),
            weight: "225 lbs".to_string(),
            college: "Texas Tech".to_string(),
            group,
            position: "QB".to_string(),
            number: Some(15),
            salary: "$45,000,000".to_string(),
            seasons: Some(7),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            lookup_id: None,
        };
        t.players.insert(player.id, player.clone());
        t.team_players.push((team_id, player.id));
        player
    }

    pub fn is_favorite(&self, user_id: i64, kind: FavoriteKind, id: i64) -> bool {
        let t = self.tables.lock().unwrap();
        match kind {
            FavoriteKind::Team => t.favorite_teams.contains(&(user_id, id)),
            FavoriteKind::Player => t.favorite_players.contains(&(user_id, id)),
        }
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }
}

fn sorted_by_name<T: Clone>(items: impl Iterator<Item = T>, name: impl Fn(&T) -> String) -> Vec<T> {
    let mut items: Vec<T> = items.collect();
    items.sort_by_key(|item| name(item));
    items
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut t = self.tables.lock().unwrap();
        if t
            .users
            .values()
            .any(|u| u.username == new_user.username || u.email == new_user.email)
        {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }
        let user = User::new(
            t.id(),
            new_user.username,
            new_user.email,
            new_user.password_hash,
            new_user.image_url,
            Utc::now(),
        );
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.values().find(|u| u.username == username).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(sorted_by_name(t.users.values().cloned(), |u| u.username.clone()))
    }

    async fn search(&self, fragment: &str) -> Result<Vec<User>, AppError> {
        let t = self.tables.lock().unwrap();
        let fragment = fragment.to_lowercase();
        Ok(sorted_by_name(
            t.users
                .values()
                .filter(|u| u.username.to_lowercase().contains(&fragment))
                .cloned(),
            |u| u.username.clone(),
        ))
    }

    async fn update(&self, id: i64, update: UpdateUser) -> Result<User, AppError> {
        let mut t = self.tables.lock().unwrap();
        if t
            .users
            .values()
            .any(|u| u.id != id && (u.username == update.username || u.email == update.email))
        {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }
        let user = t
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found", json!({"id": id})))?;
        user.username = update.username;
        user.email = update.email;
        user.image_url = update.image_url;
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tables.lock().unwrap();
        t.users.remove(&id);
        t.favorite_teams.retain(|(user, _)| *user != id);
        t.favorite_players.retain(|(user, _)| *user != id);
        Ok(())
    }
}

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn create(&self, new_team: NewTeam) -> Result<Team, AppError> {
        let mut t = self.tables.lock().unwrap();
        if t.teams.values().any(|team| team.name == new_team.name) {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }
        let team = Team {
            id: t.id(),
            name: new_team.name,
            city: new_team.city,
            coach: new_team.coach,
            owner: new_team.owner,
            stadium: new_team.stadium,
            established: new_team.established,
            lookup_id: new_team.lookup_id,
            logo: new_team.logo.unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
        };
        t.teams.insert(team.id, team.clone());
        Ok(team)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, AppError> {
        Ok(self.tables.lock().unwrap().teams.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Team>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(sorted_by_name(t.teams.values().cloned(), |team| team.name.clone()))
    }

    async fn find_by_player(&self, player_id: i64) -> Result<Option<Team>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .team_players
            .iter()
            .find(|(_, player)| *player == player_id)
            .and_then(|(team, _)| t.teams.get(team).cloned()))
    }

    async fn add_player(&self, team_id: i64, player_id: i64) -> Result<(), AppError> {
        self.tables
            .lock()
            .unwrap()
            .team_players
            .push((team_id, player_id));
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.lock().unwrap().teams.len() as i64)
    }

    async fn reset_catalog(&self) -> Result<(), AppError> {
        let mut t = self.tables.lock().unwrap();
        t.teams.clear();
        t.players.clear();
        t.team_players.clear();
        t.favorite_teams.clear();
        t.favorite_players.clear();
        Ok(())
    }
}

#[async_trait]
impl PlayerRepository for MemoryStore {
    async fn create(&self, new_player: NewPlayer) -> Result<Player, AppError> {
        let mut t = self.tables.lock().unwrap();
        let unknown = || "Unknown".to_string();
        let player = Player {
            id: t.id(),
            name: new_player.name,
            age: new_player.age,
            height: new_player.height.unwrap_or_else(unknown),
            weight: new_player.weight.unwrap_or_else(unknown),
            college: new_player.college.unwrap_or_else(unknown),
            group: new_player.group,
            position: new_player.position.unwrap_or_else(unknown),
            number: new_player.number,
            salary: new_player.salary.unwrap_or_else(unknown),
            seasons: new_player.seasons,
            image_url: new_player
                .image_url
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            lookup_id: new_player.lookup_id,
        };
        t.players.insert(player.id, player.clone());
        Ok(player)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, AppError> {
        Ok(self.tables.lock().unwrap().players.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Player>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(sorted_by_name(t.players.values().cloned(), |p| p.name.clone()))
    }

    async fn search(&self, fragment: &str) -> Result<Vec<Player>, AppError> {
        let t = self.tables.lock().unwrap();
        let fragment = fragment.to_lowercase();
        Ok(sorted_by_name(
            t.players
                .values()
                .filter(|p| p.name.to_lowercase().contains(&fragment))
                .cloned(),
            |p| p.name.clone(),
        ))
    }

    async fn list_by_team(
        &self,
        team_id: i64,
        group: PlayerGroup,
    ) -> Result<Vec<Player>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(sorted_by_name(
            t.team_players
                .iter()
                .filter(|(team, _)| *team == team_id)
                .filter_map(|(_, player)| t.players.get(player))
                .filter(|p| p.group == group)
                .cloned(),
            |p| p.name.clone(),
        ))
    }
}

#[async_trait]
impl FavoriteRepository for MemoryStore {
    async fn toggle(
        &self,
        user_id: i64,
        kind: FavoriteKind,
        entity_id: i64,
    ) -> Result<ToggleOutcome, AppError> {
        let mut t = self.tables.lock().unwrap();
        let set = match kind {
            FavoriteKind::Team => &mut t.favorite_teams,
            FavoriteKind::Player => &mut t.favorite_players,
        };
        if set.remove(&(user_id, entity_id)) {
            Ok(ToggleOutcome::Removed)
        } else {
            set.insert((user_id, entity_id));
            Ok(ToggleOutcome::Added)
        }
    }

    async fn favorite_ids(&self, user_id: i64, kind: FavoriteKind) -> Result<Vec<i64>, AppError> {
        let t = self.tables.lock().unwrap();
        let set = match kind {
            FavoriteKind::Team => &t.favorite_teams,
            FavoriteKind::Player => &t.favorite_players,
        };
        Ok(set
            .iter()
            .filter(|(user, _)| *user == user_id)
            .map(|(_, id)| *id)
            .collect())
    }

    async fn favorite_teams(&self, user_id: i64) -> Result<Vec<Team>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(sorted_by_name(
            t.favorite_teams
                .iter()
                .filter(|(user, _)| *user == user_id)
                .filter_map(|(_, id)| t.teams.get(id).cloned()),
            |team| team.name.clone(),
        ))
    }

    async fn favorite_players(&self, user_id: i64) -> Result<Vec<Player>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(sorted_by_name(
            t.favorite_players
                .iter()
                .filter(|(user, _)| *user == user_id)
                .filter_map(|(_, id)| t.players.get(id).cloned()),
            |p| p.name.clone(),
        ))
    }
}

/// State over an empty in-memory store, with statistics and caching disabled.
pub fn create_test_state() -> (AppState, MemoryStore) {
    let store = MemoryStore::default();
    let state = AppState::new(
        store.repositories(),
        Arc::new(NullProvider::new()),
        Arc::new(NullCache::new()),
        StateSettings {
            session_secret: TEST_SECRET.to_string(),
            season: 2023,
            stats_cache_ttl_seconds: None,
        },
    );
    (state, store)
}

/// Registers a user and returns it with a `Cookie` header value for its session.
pub async fn signed_in_user(state: &AppState, username: &str) -> (User, String) {
    let user = state
        .auth_service
        .register(Registration {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "secret123".to_string(),
            image_url: None,
        })
        .await
        .unwrap();
    let cookie = format!("session={}", state.auth_service.issue_session(&user));
    (user, cookie)
}
