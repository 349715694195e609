//! User entity and the inputs used to create or edit one.

use chrono::{DateTime, Utc};

/// Image shown for users, teams and players without their own picture.
pub const DEFAULT_IMAGE_URL: &str = "/static/default-pic.png";

/// A registered user.
///
/// `password_hash` holds an argon2id PHC string and never leaves the server.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(
        id: i64,
        username: String,
        email: String,
        password_hash: String,
        image_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            image_url,
            created_at,
        }
    }
}

/// Input data for registering a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub image_url: String,
}

/// Profile fields a user may change.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub username: String,
    pub email: String,
    pub image_url: String,
}
