//! Registration, login and signed session tokens.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use regex::Regex;
use serde_json::json;
use sha2::Sha256;
use std::sync::{Arc, LazyLock};
use validator::Validate;

use crate::domain::entities::{DEFAULT_IMAGE_URL, NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password;

type HmacSha256 = Hmac<Sha256>;

/// How long a session token stays valid after it is issued, in seconds.
pub const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

pub(crate) static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("username pattern is valid"));

/// Sign-up data submitted by a visitor.
#[derive(Debug, Clone, Validate)]
pub struct Registration {
    #[validate(length(min = 1, max = 30), regex(path = *USERNAME_RE))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// Service for accounts and sessions.
///
/// Sessions are stateless. The cookie value is `<user_id>.<issued_at>.<hex mac>`,
/// where the mac is HMAC-SHA256 keyed by `signing_secret` over the user id,
/// the issue time (unix seconds) and the user's current password hash.
/// A token expires [`SESSION_TTL_SECS`] after issue and stops resolving once the
/// password hash changes.
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
    signing_secret: String,
    session_ttl: Duration,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - user repository
    /// - `signing_secret` - HMAC key for session tokens
    pub fn new(repository: Arc<dyn UserRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
            session_ttl: Duration::seconds(SESSION_TTL_SECS),
        }
    }

    /// Overrides how long issued sessions stay valid.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    fn session_mac(&self, user_id: i64, issued_at: i64, password_hash: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(format!("{user_id}.{issued_at}.").as_bytes());
        mac.update(password_hash.as_bytes());
        mac
    }

    /// Registers a user with an argon2id-hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the registration data is invalid.
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        registration.validate().map_err(|errors| {
            AppError::bad_request("Invalid registration", json!(errors.field_errors()))
        })?;

        let password_hash = password::hash_password(registration.password)
            .await
            .map_err(|e| AppError::internal("Password hashing failed", json!({"reason": e.to_string()})))?;

        let user = self
            .repository
            .create(NewUser {
                username: registration.username,
                email: registration.email,
                password_hash,
                image_url: registration
                    .image_url
                    .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Returns the user if the credentials match, `None` otherwise.
    pub async fn authenticate(&self, username: &str, pwd: &str) -> Result<Option<User>, AppError> {
        let Some(user) = self.repository.find_by_username(username).await? else {
            return Ok(None);
        };

        if self.check_password(&user, pwd).await? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Checks `pwd` against the user's stored hash.
    pub async fn check_password(&self, user: &User, pwd: &str) -> Result<bool, AppError> {
        password::verify_password(pwd.to_string(), user.password_hash.clone())
            .await
            .map_err(|e| AppError::internal("Password verification failed", json!({"reason": e.to_string()})))
    }

    /// Issues a session token for `user`, valid from now.
    pub fn issue_session(&self, user: &User) -> String {
        self.issue_session_at(user, Utc::now().timestamp())
    }

    fn issue_session_at(&self, user: &User, issued_at: i64) -> String {
        let mac = self.session_mac(user.id, issued_at, &user.password_hash);
        format!(
            "{}.{}.{}",
            user.id,
            issued_at,
            hex::encode(mac.finalize().into_bytes())
        )
    }

    /// Checks that `token` was issued for `user` with their current password
    /// and has not expired.
    pub fn verify_session(&self, token: &str, user: &User) -> bool {
        self.verify_session_at(token, user, Utc::now().timestamp())
    }

    fn verify_session_at(&self, token: &str, user: &User, now: i64) -> bool {
        let Some((user_id, issued_at, signature)) = parse_session(token) else {
            return false;
        };
        if user_id != user.id || !self.is_fresh(issued_at, now) {
            return false;
        }

        self.session_mac(user_id, issued_at, &user.password_hash)
            .verify_slice(&signature)
            .is_ok()
    }

    fn is_fresh(&self, issued_at: i64, now: i64) -> bool {
        issued_at <= now + 60 && now - issued_at < self.session_ttl.num_seconds()
    }

    /// Resolves a session token to the current user.
    ///
    /// Malformed, expired or forged tokens, tokens issued before a password
    /// change, and deleted users all resolve to `None`.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<User>, AppError> {
        let Some((user_id, issued_at, _)) = parse_session(token) else {
            return Ok(None);
        };
        if !self.is_fresh(issued_at, Utc::now().timestamp()) {
            return Ok(None);
        }

        let user = self.repository.find_by_id(user_id).await?;
        Ok(user.filter(|user| self.verify_session(token, user)))
    }
}

/// Splits a token into user id, issue time and raw signature.
fn parse_session(token: &str) -> Option<(i64, i64, Vec<u8>)> {
    let mut parts = token.splitn(3, '.');
    let user_id = parts.next()?.parse::<i64>().ok()?;
    let issued_at = parts.next()?.parse::<i64>().ok()?;
    let signature = hex::decode(parts.next()?).ok()?;
    Some((user_id, issued_at, signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn registration() -> Registration {
        Registration {
            username: "testuser".to_string(),
            email: "test@test.com".to_string(),
            password: "testuser".to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_user| {
                new_user.username == "testuser"
                    && new_user.password_hash.starts_with("$argon2id$")
                    && new_user.image_url == DEFAULT_IMAGE_URL
            })
            .times(1)
            .returning(|new_user| {
                Ok(User::new(
                    1,
                    new_user.username,
                    new_user.email,
                    new_user.password_hash,
                    new_user.image_url,
                    Utc::now(),
                ))
            });

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let user = service.register(registration()).await.unwrap();

        assert_eq!(user.id, 1);
        assert_ne!(user.password_hash, "testuser");
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let mock_repo = MockUserRepository::new();
        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let mut bad = registration();
        bad.email = "not-an-email".to_string();

        let result = service.register(bad).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_username() {
        let mock_repo = MockUserRepository::new();
        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let mut bad = registration();
        bad.username = "has spaces".to_string();

        let result = service.register(bad).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_conflict_propagates() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Username already taken", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.register(registration()).await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let hash = password::hash_password("secret1".to_string()).await.unwrap();
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_username()
            .returning(move |username| {
                Ok((username == "testuser").then(|| {
                    User::new(
                        5,
                        "testuser".to_string(),
                        "test@test.com".to_string(),
                        hash.clone(),
                        DEFAULT_IMAGE_URL.to_string(),
                        Utc::now(),
                    )
                }))
            });

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        assert!(service.authenticate("testuser", "secret1").await.unwrap().is_some());
        assert!(service.authenticate("testuser", "wrong").await.unwrap().is_none());
        assert!(service.authenticate("nobody", "secret1").await.unwrap().is_none());
    }

    fn session_user(id: i64, password_hash: &str) -> User {
        User::new(
            id,
            "testuser".to_string(),
            "test@test.com".to_string(),
            password_hash.to_string(),
            DEFAULT_IMAGE_URL.to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn test_session_round_trip() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_secret());
        let user = session_user(1234, "$argon2id$hash-a");

        let token = service.issue_session(&user);

        assert!(token.starts_with("1234."));
        assert!(service.verify_session(&token, &user));
    }

    #[test]
    fn test_session_tampering_rejected() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_secret());
        let user = session_user(1234, "$argon2id$hash-a");
        let other = session_user(1235, "$argon2id$hash-a");

        let token = service.issue_session(&user);
        let (_, rest) = token.split_once('.').unwrap();
        let forged = format!("1235.{rest}");

        assert!(!service.verify_session(&forged, &other));
        assert!(!service.verify_session(&token, &other));
        assert!(!service.verify_session("1234", &user));
        assert!(!service.verify_session("1234.1700000000.zz", &user));

        let (head, signature) = token.rsplit_once('.').unwrap();
        let (_, issued_at) = head.split_once('.').unwrap();
        let backdated = format!("1234.{}.{signature}", issued_at.parse::<i64>().unwrap() + 1);
        assert!(!service.verify_session(&backdated, &user));
    }

    #[test]
    fn test_session_secret_matters() {
        let a = AuthService::new(Arc::new(MockUserRepository::new()), "secret-a".to_string());
        let b = AuthService::new(Arc::new(MockUserRepository::new()), "secret-b".to_string());
        let user = session_user(9, "$argon2id$hash-a");

        let token = a.issue_session(&user);
        assert!(!b.verify_session(&token, &user));
    }

    #[test]
    fn test_session_expires() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_secret())
            .with_session_ttl(Duration::hours(1));
        let user = session_user(7, "$argon2id$hash-a");
        let issued_at = 1_700_000_000;

        let token = service.issue_session_at(&user, issued_at);

        assert!(service.verify_session_at(&token, &user, issued_at + 3599));
        assert!(!service.verify_session_at(&token, &user, issued_at + 3600));
        assert!(!service.verify_session_at(&token, &user, issued_at - 3600));
    }

    #[test]
    fn test_password_change_revokes_session() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_secret());
        let user = session_user(7, "$argon2id$hash-a");
        let token = service.issue_session(&user);

        let changed = session_user(7, "$argon2id$hash-b");
        assert!(!service.verify_session(&token, &changed));
    }

    #[tokio::test]
    async fn test_resolve_session() {
        let user = session_user(3, "$argon2id$hash-a");
        let stored = user.clone();
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |id| Ok((id == 3).then(|| stored.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());
        let token = service.issue_session(&user);

        let resolved = service.resolve_session(&token).await.unwrap();
        assert_eq!(resolved.map(|u| u.id), Some(3));

        let stale = service.issue_session_at(&user, Utc::now().timestamp() - SESSION_TTL_SECS);
        assert!(service.resolve_session(&stale).await.unwrap().is_none());
        assert!(service.resolve_session("3.garbage").await.unwrap().is_none());
    }
}
