// src/repo/classrooms.rs

use sqlx::PgPool;

use crate::models::classroom::Classroom;

pub async fn fetch(pool: &PgPool, class_code: &str) -> Result<Option<Classroom>, sqlx::Error> {
    sqlx::query_as::<_, Classroom>(
        r#"
        SELECT class_code, current_chapter, daily_exp_base, max_multiplier,
               number_dailies_allowed, daily_point_value,
               daily_number_of_questions, registration_open
        FROM classrooms
        WHERE class_code = $1
        "#,
    )
    .bind(class_code)
    .fetch_optional(pool)
    .await
}

pub async fn set_current_chapter(
    pool: &PgPool,
    class_code: &str,
    chapter_index: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE classrooms SET current_chapter = $2 WHERE class_code = $1")
        .bind(class_code)
        .bind(chapter_index)
        .execute(pool)
        .await?;

    Ok(())
}
