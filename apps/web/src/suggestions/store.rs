use sqlx::SqlitePool;

use crate::models::suggestion::{NewSuggestion, Suggestion};

pub async fn insert_suggestion(
    pool: &SqlitePool,
    suggestion: &NewSuggestion,
) -> sqlx::Result<Suggestion> {
    sqlx::query_as::<_, Suggestion>(
        "INSERT INTO suggestions (interest, suggestion) VALUES (?, ?) RETURNING id, interest, suggestion",
    )
    .bind(&suggestion.interest)
    .bind(&suggestion.text)
    .fetch_one(pool)
    .await
}

/// Case-sensitive exact match on `interest`; the oldest row wins among duplicates.
pub async fn find_by_interest(
    pool: &SqlitePool,
    interest: &str,
) -> sqlx::Result<Option<Suggestion>> {
    sqlx::query_as::<_, Suggestion>(
        r#"
        SELECT id, interest, suggestion
        FROM suggestions
        WHERE interest = ?
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .bind(interest)
    .fetch_optional(pool)
    .await
}

pub async fn list_suggestions(pool: &SqlitePool) -> sqlx::Result<Vec<Suggestion>> {
    sqlx::query_as::<_, Suggestion>("SELECT id, interest, suggestion FROM suggestions ORDER BY id ASC")
        .fetch_all(pool)
        .await
}
