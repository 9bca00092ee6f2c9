use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Form` whose rejection (absent field, wrong content type) is an `AppError`.
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct ValidForm<T>(pub T);
