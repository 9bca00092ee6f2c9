use sqlx::SqlitePool;

use crate::models::resume::{NewResume, Resume};

/// Inserts a résumé for `user_id`. Existing résumés are left in place,
/// so repeated submissions accumulate rows.
pub async fn insert_resume(
    pool: &SqlitePool,
    user_id: i64,
    resume: &NewResume,
) -> sqlx::Result<Resume> {
    sqlx::query_as::<_, Resume>(
        r#"
        INSERT INTO resumes (name, email, skills, experience, education, user_id)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, name, email, skills, experience, education, user_id
        "#,
    )
    .bind(&resume.name)
    .bind(&resume.email)
    .bind(&resume.skills)
    .bind(&resume.experience)
    .bind(&resume.education)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// The earliest résumé owned by `user_id`.
pub async fn first_resume_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> sqlx::Result<Option<Resume>> {
    sqlx::query_as::<_, Resume>(
        r#"
        SELECT id, name, email, skills, experience, education, user_id
        FROM resumes
        WHERE user_id = ?
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
