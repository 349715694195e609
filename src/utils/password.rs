//! Argon2id password hashing on the blocking thread pool.

use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use password_hash::{Error, SaltString, rand_core::OsRng};
use thiserror::Error;
use tokio::task;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Password hashing failed: {0}")]
    HashFailed(#[from] Error),
    #[error("Hashing task failed: {0}")]
    TaskFailed(#[from] task::JoinError),
}

fn hasher() -> Result<Argon2<'static>, Error> {
    let params = Params::new(19456, 2, 1, None).map_err(|_| Error::Crypto)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password into a PHC string.
pub async fn hash_password(password: String) -> Result<String, HashError> {
    let hash_string = task::spawn_blocking(move || -> Result<String, Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = hasher()?.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    })
    .await??;

    Ok(hash_string)
}

/// Checks a password against a PHC string. A mismatch is `Ok(false)`.
pub async fn verify_password(password: String, hash_str: String) -> Result<bool, HashError> {
    let is_valid = task::spawn_blocking(move || -> Result<bool, Error> {
        let parsed_hash = PasswordHash::new(&hash_str)?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    })
    .await??;

    Ok(is_valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("testuser".to_string()).await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("testuser".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salts_differ() {
        let a = hash_password("same".to_string()).await.unwrap();
        let b = hash_password("same".to_string()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_error() {
        let result = verify_password("pw".to_string(), "not-a-phc-string".to_string()).await;
        assert!(matches!(result, Err(HashError::HashFailed(_))));
    }
}
