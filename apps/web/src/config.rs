use std::fmt;

use anyhow::{bail, Context, Result};

/// Minimum length of `SESSION_SECRET`; the cookie key is derived from it.
const MIN_SESSION_SECRET_LEN: usize = 32;

/// Operator-provisioned admin account, created or promoted at startup.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub admin: Option<AdminSeed>,
    /// Argon2 memory cost in KiB for newly hashed passwords.
    pub password_memory_kib: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_secret = require_env("SESSION_SECRET")?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            bail!("SESSION_SECRET must be at least {MIN_SESSION_SECRET_LEN} bytes long");
        }

        let password_memory_kib = match std::env::var("PASSWORD_MEMORY_KIB") {
            Ok(raw) => parse_memory_kib(&raw)?,
            Err(_) => argon2::Params::DEFAULT_M_COST,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            session_secret,
            admin: admin_seed(
                std::env::var("ADMIN_USERNAME").ok(),
                std::env::var("ADMIN_PASSWORD").ok(),
            )?,
            password_memory_kib,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn admin_seed(username: Option<String>, password: Option<String>) -> Result<Option<AdminSeed>> {
    let username = username.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
    let password = password.filter(|p| !p.is_empty());
    match (username, password) {
        (Some(username), Some(password)) => Ok(Some(AdminSeed { username, password })),
        (None, None) => Ok(None),
        _ => bail!("ADMIN_USERNAME and ADMIN_PASSWORD must be set together"),
    }
}

fn parse_memory_kib(raw: &str) -> Result<u32> {
    let kib = raw
        .trim()
        .parse::<u32>()
        .context("PASSWORD_MEMORY_KIB must be an integer")?;
    if kib < argon2::Params::MIN_M_COST {
        bail!(
            "PASSWORD_MEMORY_KIB must be at least {}, got {kib}",
            argon2::Params::MIN_M_COST
        );
    }
    Ok(kib)
}

#[cfg(test)]
impl Config {
    /// Config for tests: in-memory store, cheap hashing, seeded `admin` account.
    pub fn for_tests() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            session_secret: "test-secret-test-secret-test-secret-0123456789".to_string(),
            admin: Some(AdminSeed {
                username: "admin".to_string(),
                password: "admin-pw".to_string(),
            }),
            password_memory_kib: 64,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
