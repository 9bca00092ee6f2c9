use axum::{extract::State, response::Html, response::Redirect};
use tracing::info;

use crate::auth::session::CurrentUser;
use crate::errors::AppError;
use crate::extract::ValidForm;
use crate::models::resume::NewResume;
use crate::resume::store;
use crate::state::AppState;
use crate::views::{render, DashboardPage, ResumePage};

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let resume = store::first_resume_for_user(&state.db, user.id).await?;
    render(&DashboardPage {
        username: user.username,
        resume,
    })
}

/// GET /resume
pub async fn resume_form(CurrentUser(user): CurrentUser) -> Result<Html<String>, AppError> {
    render(&ResumePage {
        username: user.username,
    })
}

/// POST /resume
pub async fn create_resume(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidForm(form): ValidForm<NewResume>,
) -> Result<Redirect, AppError> {
    let resume = store::insert_resume(&state.db, user.id, &form).await?;
    info!("User {} saved resume {}", user.username, resume.id);
    Ok(Redirect::to("/dashboard"))
}
