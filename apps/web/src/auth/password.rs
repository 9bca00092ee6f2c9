use anyhow::Context;
use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::errors::AppError;

fn hasher(memory_kib: u32) -> Result<Argon2<'static>, password_hash::Error> {
    let params = Params::new(
        memory_kib,
        Params::DEFAULT_T_COST,
        Params::DEFAULT_P_COST,
        None,
    )?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password with Argon2id on the blocking pool.
/// Salt and parameters are embedded in the PHC string; the whole password is hashed.
pub async fn hash_password(password: String, memory_kib: u32) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || -> Result<String, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(hasher(memory_kib)?
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    })
    .await
    .context("password hashing task failed")??;
    Ok(hash)
}

/// Checks a password against a stored PHC hash, using the parameters recorded in it.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let matches = tokio::task::spawn_blocking(move || -> Result<bool, password_hash::Error> {
        let parsed = PasswordHash::new(&hash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    })
    .await
    .context("password verification task failed")??;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MEMORY_KIB: u32 = 64;

    #[tokio::test]
    async fn test_hash_is_salted_and_verifies() {
        let first = hash_password("hunter2".into(), TEST_MEMORY_KIB).await.unwrap();
        let second = hash_password("hunter2".into(), TEST_MEMORY_KIB).await.unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(verify_password("hunter2".into(), first).await.unwrap());
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let hash = hash_password("hunter2".into(), TEST_MEMORY_KIB).await.unwrap();
        assert!(!verify_password("hunter3".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_passwords_differing_after_byte_72_are_distinct() {
        let right = format!("{}RIGHT", "a".repeat(72));
        let wrong = format!("{}WRONG", "a".repeat(72));
        let hash = hash_password(right.clone(), TEST_MEMORY_KIB).await.unwrap();

        assert!(verify_password(right, hash.clone()).await.unwrap());
        assert!(!verify_password(wrong, hash.clone()).await.unwrap());
        assert!(!verify_password("a".repeat(72), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_long_password_round_trips() {
        let long = "x".repeat(1024);
        let hash = hash_password(long.clone(), TEST_MEMORY_KIB).await.unwrap();
        assert!(verify_password(long, hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        let result = verify_password("hunter2".into(), "not-a-hash".into()).await;
        assert!(matches!(result, Err(AppError::PasswordHash(_))));
    }
}
