use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2id PHC string, salt and parameters embedded.
    pub password: String,
    pub is_admin: bool,
}
