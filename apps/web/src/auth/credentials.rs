use anyhow::anyhow;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::auth::{password, store};
use crate::config::{AdminSeed, Config};
use crate::errors::AppError;
use crate::models::user::User;

/// Creates a regular user with an Argon2-hashed password.
/// Self-registration never grants the admin role.
pub async fn register(
    pool: &SqlitePool,
    config: &Config,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    if store::find_user_by_username(pool, username).await?.is_some() {
        return Err(AppError::DuplicateUsername);
    }

    let hash = password::hash_password(password.to_owned(), config.password_memory_kib).await?;

    // A concurrent registration can still win the race; the unique index catches it.
    match store::insert_user(pool, username, &hash, false).await {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(AppError::DuplicateUsername)
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolves a username/password pair to a user.
/// Unknown usernames and wrong passwords are indistinguishable to the caller.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let Some(user) = store::find_user_by_username(pool, username).await? else {
        debug!("Login attempt for unknown username");
        return Err(AppError::InvalidCredentials);
    };

    if !password::verify_password(password.to_owned(), user.password.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }
    Ok(user)
}

/// Provisions the operator's admin account at startup.
///
/// Creates it when absent. An existing regular account under the same name is
/// promoted only if it already holds the operator's password; otherwise the
/// name was claimed by someone else and startup fails.
pub async fn ensure_admin(
    pool: &SqlitePool,
    config: &Config,
    seed: &AdminSeed,
) -> Result<User, AppError> {
    match store::find_user_by_username(pool, &seed.username).await? {
        Some(user) if user.is_admin => Ok(user),
        Some(user) => {
            if !password::verify_password(seed.password.clone(), user.password.clone()).await? {
                return Err(AppError::Internal(anyhow!(
                    "username '{}' belongs to a regular account with a different password; \
                     refusing to promote it to admin",
                    seed.username
                )));
            }
            store::promote_to_admin(pool, user.id).await?;
            info!("Promoted existing user {} to admin", user.username);
            Ok(User {
                is_admin: true,
                ..user
            })
        }
        None => {
            let hash =
                password::hash_password(seed.password.clone(), config.password_memory_kib).await?;
            let user = store::insert_user(pool, &seed.username, &hash, true).await?;
            info!("Created admin account {}", user.username);
            Ok(user)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    async fn user_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn seed(username: &str, password: &str) -> AdminSeed {
        AdminSeed {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_without_new_row() {
        let pool = test_pool().await;
        let config = Config::for_tests();
        register(&pool, &config, "alice", "pw1").await.unwrap();

        let second = register(&pool, &config, "alice", "pw2").await;
        assert!(matches!(second, Err(AppError::DuplicateUsername)));
        assert_eq!(user_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let pool = test_pool().await;
        let user = register(&pool, &Config::for_tests(), "alice", "pw1")
            .await
            .unwrap();
        assert_ne!(user.password, "pw1");
        assert!(user.password.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_registration_never_grants_admin() {
        let pool = test_pool().await;
        let config = Config::for_tests();
        // Same name as the configured admin, but registered through the public form.
        let user = register(&pool, &config, "admin", "guess").await.unwrap();
        assert!(!user.is_admin);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let pool = test_pool().await;
        let registered = register(&pool, &Config::for_tests(), "alice", "s3cret")
            .await
            .unwrap();

        let user = authenticate(&pool, "alice", "s3cret").await.unwrap();
        assert_eq!(user.id, registered.id);

        assert!(matches!(
            authenticate(&pool, "alice", "wrong").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate(&pool, "bob", "s3cret").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_suffix_past_72_bytes() {
        let pool = test_pool().await;
        let right = format!("{}RIGHT", "a".repeat(72));
        let wrong = format!("{}WRONG", "a".repeat(72));
        register(&pool, &Config::for_tests(), "alice", &right)
            .await
            .unwrap();

        assert!(authenticate(&pool, "alice", &right).await.is_ok());
        assert!(matches!(
            authenticate(&pool, "alice", &wrong).await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_ensure_admin_creates_account_once() {
        let pool = test_pool().await;
        let config = Config::for_tests();
        let admin = ensure_admin(&pool, &config, &seed("root", "rootpw"))
            .await
            .unwrap();
        assert!(admin.is_admin);

        let again = ensure_admin(&pool, &config, &seed("root", "rootpw"))
            .await
            .unwrap();
        assert_eq!(again.id, admin.id);
        assert_eq!(user_count(&pool).await, 1);
        assert!(authenticate(&pool, "root", "rootpw").await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_admin_promotes_own_account() {
        let pool = test_pool().await;
        let config = Config::for_tests();
        register(&pool, &config, "root", "rootpw").await.unwrap();

        let admin = ensure_admin(&pool, &config, &seed("root", "rootpw"))
            .await
            .unwrap();
        assert!(admin.is_admin);
        let stored = store::find_user_by_id(&pool, admin.id).await.unwrap().unwrap();
        assert!(stored.is_admin);
    }

    #[tokio::test]
    async fn test_ensure_admin_refuses_squatted_username() {
        let pool = test_pool().await;
        let config = Config::for_tests();
        let squatter = register(&pool, &config, "root", "squatter-pw").await.unwrap();

        let result = ensure_admin(&pool, &config, &seed("root", "rootpw")).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
        let stored = store::find_user_by_id(&pool, squatter.id).await.unwrap().unwrap();
        assert!(!stored.is_admin);
    }
}
