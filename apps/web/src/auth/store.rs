use sqlx::SqlitePool;

use crate::models::user::User;

pub async fn find_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password, is_admin FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT id, username, password, is_admin FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Inserts a user row. `password_hash` must already be hashed.
pub async fn insert_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    is_admin: bool,
) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password, is_admin)
        VALUES (?, ?, ?)
        RETURNING id, username, password, is_admin
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(is_admin)
    .fetch_one(pool)
    .await
}

pub async fn promote_to_admin(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
