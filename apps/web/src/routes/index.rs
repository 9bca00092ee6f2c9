use axum::response::Html;

use crate::auth::session::CurrentUser;
use crate::errors::AppError;
use crate::views::{render, IndexPage};

/// GET /
/// Anonymous visitors get the public page; store failures still surface.
pub async fn index(user: Result<CurrentUser, AppError>) -> Result<Html<String>, AppError> {
    let username = match user {
        Ok(CurrentUser(user)) => Some(user.username),
        Err(AppError::Unauthenticated) => None,
        Err(e) => return Err(e),
    };
    render(&IndexPage { username })
}
