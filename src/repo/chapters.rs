// src/repo/chapters.rs

use sqlx::PgPool;

use crate::models::chapter::Chapter;

pub async fn all(pool: &PgPool) -> Result<Vec<Chapter>, sqlx::Error> {
    sqlx::query_as::<_, Chapter>(
        "SELECT chapter_index, chapter_name FROM chapters ORDER BY chapter_index",
    )
    .fetch_all(pool)
    .await
}
