use axum::{
    extract::State,
    response::{Html, Redirect},
};
use serde::Deserialize;
use tracing::info;

use crate::auth::session::AdminUser;
use crate::errors::AppError;
use crate::extract::ValidForm;
use crate::models::suggestion::NewSuggestion;
use crate::state::AppState;
use crate::suggestions::store;
use crate::views::{render, AdminSuggestionsPage, SuggestionPage};

#[derive(Deserialize)]
pub struct LookupForm {
    pub interest: String,
}

fn empty_form() -> Result<Html<String>, AppError> {
    render(&SuggestionPage {
        interest: None,
        suggestion: None,
    })
}

/// GET /suggestion
pub async fn suggestion_form() -> Result<Html<String>, AppError> {
    empty_form()
}

/// POST /suggestion
pub async fn lookup(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<LookupForm>,
) -> Result<Html<String>, AppError> {
    if form.interest.is_empty() {
        return empty_form();
    }
    let suggestion = store::find_by_interest(&state.db, &form.interest).await?;
    render(&SuggestionPage {
        interest: Some(form.interest),
        suggestion,
    })
}

/// GET /admin/suggestions
pub async fn admin_list(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Html<String>, AppError> {
    let suggestions = store::list_suggestions(&state.db).await?;
    render(&AdminSuggestionsPage { suggestions })
}

/// POST /admin/suggestions
pub async fn admin_create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidForm(form): ValidForm<NewSuggestion>,
) -> Result<Redirect, AppError> {
    let created = store::insert_suggestion(&state.db, &form).await?;
    info!(
        "Admin {} added suggestion {} for interest '{}'",
        admin.username, created.id, created.interest
    );
    Ok(Redirect::to("/admin/suggestions"))
}
