use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::SqlitePool;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    /// Signing key for the session and flash cookies, derived from `SESSION_SECRET`.
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        let cookie_key = Key::derive_from(config.session_secret.as_bytes());
        AppState {
            db,
            config,
            cookie_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Fresh in-memory state with the configured admin provisioned, as at startup.
#[cfg(test)]
pub async fn test_state() -> AppState {
    let config = Config::for_tests();
    let db = crate::db::test_pool().await;
    if let Some(seed) = &config.admin {
        crate::auth::credentials::ensure_admin(&db, &config, seed)
            .await
            .expect("admin seed");
    }
    AppState::new(db, config)
}
