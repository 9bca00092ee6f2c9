use sqlx::SqlitePool;

use crate::models::job::{Job, NewJob};

pub async fn insert_job(pool: &SqlitePool, job: &NewJob) -> sqlx::Result<Job> {
    sqlx::query_as::<_, Job>(
        r#"
        INSERT INTO jobs (title, company, location, description, link)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, title, company, location, description, link
        "#,
    )
    .bind(&job.title)
    .bind(&job.company)
    .bind(&job.location)
    .bind(&job.description)
    .bind(&job.link)
    .fetch_one(pool)
    .await
}

/// All jobs in insertion order.
pub async fn list_jobs(pool: &SqlitePool) -> sqlx::Result<Vec<Job>> {
    sqlx::query_as::<_, Job>(
        "SELECT id, title, company, location, description, link FROM jobs ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
}
