use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Resume {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub user_id: i64,
}

/// Résumé form body; every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct NewResume {
    pub name: String,
    pub email: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
}
