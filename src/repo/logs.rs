// src/repo/logs.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::log::{ActivityLogDraft, QuestLogDraft};

/// Daily quests this user completed inside the given window (the current
/// local calendar day). Feeds the eligibility checks.
pub async fn dailies_completed_between(
    pool: &PgPool,
    user_id: &str,
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM quest_log
        WHERE user_id = $1
          AND is_daily
          AND datetime_quest_completed BETWEEN $2 AND $3
        "#,
    )
    .bind(user_id)
    .bind(day_start)
    .bind(day_end)
    .fetch_one(pool)
    .await
}

pub async fn insert_activity(pool: &PgPool, entry: &ActivityLogDraft) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO activity_log
            (user_id, correct, question_index, answer_index, datetime,
             datetime_quest_started, datetime_question_started, is_daily,
             is_timed, number_of_questions, device_family, device_model,
             device_type, ip_address)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#,
    )
    .bind(&entry.user_id)
    .bind(entry.correct)
    .bind(entry.question_index)
    .bind(entry.answer_index)
    .bind(entry.datetime)
    .bind(entry.datetime_quest_started)
    .bind(entry.datetime_question_started)
    .bind(entry.is_daily)
    .bind(entry.is_timed)
    .bind(entry.number_of_questions)
    .bind(&entry.device_family)
    .bind(&entry.device_model)
    .bind(entry.device_type)
    .bind(&entry.ip_address)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn insert_quest(pool: &PgPool, entry: &QuestLogDraft) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO quest_log
            (user_id, chapter_index, cumulative, datetime_quest_started,
             datetime_quest_completed, is_daily, is_timed, number_correct,
             number_of_questions, device_family, device_model, device_type,
             ip_address)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(&entry.user_id)
    .bind(entry.chapter_index)
    .bind(entry.cumulative)
    .bind(entry.datetime_quest_started)
    .bind(entry.datetime_quest_completed)
    .bind(entry.is_daily)
    .bind(entry.is_timed)
    .bind(entry.number_correct)
    .bind(entry.number_of_questions)
    .bind(&entry.device_family)
    .bind(&entry.device_model)
    .bind(entry.device_type)
    .bind(&entry.ip_address)
    .execute(pool)
    .await?;

    Ok(())
}
