pub mod health;
pub mod index;


use axum::{routing::get, Router};

use crate::auth::handlers as auth;
use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/health", get(health::health_handler))
        // Auth
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        // Résumé (protected)
        .route("/dashboard", get(resume::dashboard))
        .route(
            "/resume",
            get(resume::resume_form).post(resume::create_resume),
        )
        // Public lookups
        .route(
            "/suggestion",
            get(suggestions::suggestion_form).post(suggestions::lookup),
        )
        .route("/jobs", get(jobs::list))
        // Admin (role-gated)
        .route("/admin/jobs", get(jobs::admin_list).post(jobs::admin_create))
        .route(
            "/admin/suggestions",
            get(suggestions::admin_list).post(suggestions::admin_create),
        )
        .with_state(state)
}
