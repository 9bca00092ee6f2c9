mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod jobs;
mod models;
mod resume;
mod routes;
mod state;
mod suggestions;
mod views;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::credentials::ensure_admin;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerHub v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite and apply migrations
    let db = create_pool(&config.database_url).await?;

    // Provision the operator's admin account before serving any request
    match &config.admin {
        Some(seed) => {
            ensure_admin(&db, &config, seed).await?;
        }
        None => info!("ADMIN_USERNAME not set; no admin account provisioned"),
    }

    let state = AppState::new(db, config.clone());

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
