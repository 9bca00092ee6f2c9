use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::credentials;
use crate::auth::session::{end_session, set_flash, start_session, take_flash, CurrentUser};
use crate::errors::AppError;
use crate::extract::ValidForm;
use crate::state::AppState;
use crate::views::{render, LoginPage, RegisterPage};

#[derive(Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// GET /register
pub async fn register_page(
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let (jar, flash) = take_flash(jar);
    Ok((jar, render(&RegisterPage { flash })?))
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ValidForm(form): ValidForm<CredentialsForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    match credentials::register(&state.db, &state.config, &form.username, &form.password).await {
        Ok(user) => {
            info!("Registered user {} (admin: {})", user.username, user.is_admin);
            Ok((
                set_flash(jar, "Registered successfully"),
                Redirect::to("/login"),
            ))
        }
        Err(AppError::DuplicateUsername) => {
            warn!("Registration rejected, username '{}' taken", form.username);
            Ok((
                set_flash(jar, "Username already exists"),
                Redirect::to("/register"),
            ))
        }
        Err(e) => Err(e),
    }
}

/// GET /login
pub async fn login_page(
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let (jar, flash) = take_flash(jar);
    Ok((jar, render(&LoginPage { flash })?))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ValidForm(form): ValidForm<CredentialsForm>,
) -> Result<Response, AppError> {
    match credentials::authenticate(&state.db, &form.username, &form.password).await {
        Ok(user) => {
            info!("User {} logged in", user.username);
            Ok((start_session(jar, user.id), Redirect::to("/dashboard")).into_response())
        }
        Err(AppError::InvalidCredentials) => {
            warn!("Failed login for '{}'", form.username);
            let page = render(&LoginPage {
                flash: Some(AppError::InvalidCredentials.to_string()),
            })?;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /logout
pub async fn logout(
    CurrentUser(user): CurrentUser,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Redirect) {
    info!("User {} logged out", user.username);
    (end_session(jar), Redirect::to("/"))
}
