use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use tracing::warn;

use crate::auth::store;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

fn cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

/// Binds the session to `user_id`.
pub fn start_session(jar: SignedCookieJar, user_id: i64) -> SignedCookieJar {
    jar.add(cookie(SESSION_COOKIE, user_id.to_string()))
}

pub fn end_session(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(removal(SESSION_COOKIE))
}

/// User id carried by a validly signed session cookie, if any.
pub fn session_user_id(jar: &SignedCookieJar) -> Option<i64> {
    jar.get(SESSION_COOKIE)?.value().parse().ok()
}

/// Queues a one-shot notice for the next rendered page.
pub fn set_flash(jar: SignedCookieJar, message: &str) -> SignedCookieJar {
    jar.add(cookie(FLASH_COOKIE, message.to_string()))
}

/// Consumes the pending notice, clearing it from the client.
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(flash) => {
            let message = flash.value().to_string();
            (jar.remove(removal(FLASH_COOKIE)), Some(message))
        }
        None => (jar, None),
    }
}

/// The authenticated user of a protected route.
/// Rejects with `AppError::Unauthenticated`, which redirects to `/login`.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, state.cookie_key.clone());
        let user_id = session_user_id(&jar).ok_or(AppError::Unauthenticated)?;
        // A session can outlive its user row when the database is reset.
        let user = store::find_user_by_id(&state.db, user_id)
            .await?
            .ok_or(AppError::Unauthenticated)?;
        Ok(CurrentUser(user))
    }
}

/// An authenticated user holding the admin role.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            warn!("User {} denied access to {}", user.username, parts.uri.path());
            return Err(AppError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    };
    use axum::response::IntoResponse;
    use axum_extra::extract::cookie::Key;

    fn key() -> Key {
        Key::derive_from(b"0123456789abcdef0123456789abcdef-session-tests")
    }

    fn empty_jar() -> SignedCookieJar {
        SignedCookieJar::new(key())
    }

    /// `name=value` pairs a response built from `jar` would set.
    fn set_cookies(jar: SignedCookieJar) -> Vec<String> {
        let response = (jar, ()).into_response();
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| {
                let raw = v.to_str().unwrap();
                raw.split(';').next().unwrap().to_string()
            })
            .collect()
    }

    /// Replays the cookies of `jar` as the next request would carry them.
    fn replay(jar: SignedCookieJar) -> SignedCookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&set_cookies(jar).join("; ")).unwrap(),
        );
        SignedCookieJar::from_headers(&headers, key())
    }

    #[test]
    fn test_session_round_trip() {
        let jar = replay(start_session(empty_jar(), 42));
        assert_eq!(session_user_id(&jar), Some(42));
    }

    #[test]
    fn test_unsigned_session_cookie_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session=42"));
        let jar = SignedCookieJar::from_headers(&headers, key());
        assert_eq!(session_user_id(&jar), None);
    }

    #[test]
    fn test_cookie_signed_with_other_key_ignored() {
        let jar = start_session(SignedCookieJar::new(Key::generate()), 7);
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&set_cookies(jar).join("; ")).unwrap(),
        );
        let jar = SignedCookieJar::from_headers(&headers, key());
        assert_eq!(session_user_id(&jar), None);
    }

    #[test]
    fn test_end_session_clears_cookie() {
        let jar = end_session(replay(start_session(empty_jar(), 42)));
        assert_eq!(session_user_id(&jar), None);
        assert_eq!(set_cookies(jar), vec!["session=".to_string()]);
    }

    #[test]
    fn test_flash_is_one_shot() {
        let jar = replay(set_flash(empty_jar(), "Registered successfully"));
        let (jar, message) = take_flash(jar);
        assert_eq!(message.as_deref(), Some("Registered successfully"));

        let (_, again) = take_flash(jar);
        assert_eq!(again, None);
    }

    #[test]
    fn test_take_flash_without_notice() {
        let (jar, message) = take_flash(empty_jar());
        assert_eq!(message, None);
        assert!(set_cookies(jar).is_empty());
    }
}
