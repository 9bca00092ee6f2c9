use axum::{
    extract::State,
    response::{Html, Redirect},
};
use tracing::info;

use crate::auth::session::AdminUser;
use crate::errors::AppError;
use crate::extract::ValidForm;
use crate::jobs::store;
use crate::models::job::NewJob;
use crate::state::AppState;
use crate::views::{render, AdminJobsPage, JobsPage};

/// GET /jobs
pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let jobs = store::list_jobs(&state.db).await?;
    render(&JobsPage { jobs })
}

/// GET /admin/jobs
pub async fn admin_list(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Html<String>, AppError> {
    let jobs = store::list_jobs(&state.db).await?;
    render(&AdminJobsPage { jobs })
}

/// POST /admin/jobs
pub async fn admin_create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidForm(form): ValidForm<NewJob>,
) -> Result<Redirect, AppError> {
    let job = store::insert_job(&state.db, &form).await?;
    info!("Admin {} posted job {} ({})", admin.username, job.id, job.title);
    Ok(Redirect::to("/admin/jobs"))
}
