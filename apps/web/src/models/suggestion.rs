use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Suggestion {
    pub id: i64,
    pub interest: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSuggestion {
    pub interest: String,
    pub text: String,
}
