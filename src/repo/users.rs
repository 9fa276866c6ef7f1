// src/repo/users.rs

use sqlx::PgPool;

use crate::models::user::{LeaderboardEntry, User};

const USER_COLUMNS: &str = r#"
    user_id, first_name, last_name, e_mail, class_code, user_role,
    research_agreement_status, reward_level, total_points, multiplier,
    chapter_index, completion_points, cumulative, current_progress,
    number_correct, current_answer_index, current_question_index,
    datetime_quest_started, datetime_question_started, is_on_daily,
    is_timed, number_of_questions, points_earned_current_quest,
    points_per_question, question_type
"#;

pub async fn fetch(pool: &PgPool, user_id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Writes the full mutable state of a user row back. The quest engine
/// mutates users in memory; this is the single persistence point afterwards.
pub async fn save(pool: &PgPool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users SET
            first_name = $2,
            last_name = $3,
            e_mail = $4,
            class_code = $5,
            user_role = $6,
            research_agreement_status = $7,
            reward_level = $8,
            total_points = $9,
            multiplier = $10,
            chapter_index = $11,
            completion_points = $12,
            cumulative = $13,
            current_progress = $14,
            number_correct = $15,
            current_answer_index = $16,
            current_question_index = $17,
            datetime_quest_started = $18,
            datetime_question_started = $19,
            is_on_daily = $20,
            is_timed = $21,
            number_of_questions = $22,
            points_earned_current_quest = $23,
            points_per_question = $24,
            question_type = $25
        WHERE user_id = $1
        "#,
    )
    .bind(&user.user_id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.e_mail)
    .bind(&user.class_code)
    .bind(user.user_role)
    .bind(user.research_agreement_status)
    .bind(user.reward_level)
    .bind(user.total_points)
    .bind(user.multiplier)
    .bind(user.chapter_index)
    .bind(user.completion_points)
    .bind(user.cumulative)
    .bind(user.current_progress)
    .bind(user.number_correct)
    .bind(user.current_answer_index)
    .bind(user.current_question_index)
    .bind(user.datetime_quest_started)
    .bind(user.datetime_question_started)
    .bind(user.is_on_daily)
    .bind(user.is_timed)
    .bind(user.number_of_questions)
    .bind(user.points_earned_current_quest)
    .bind(user.points_per_question)
    .bind(user.question_type)
    .execute(pool)
    .await?;

    Ok(())
}

/// Creates the user record for a freshly authenticated identity and returns
/// the stored row.
pub async fn create(
    pool: &PgPool,
    user_id: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
    e_mail: &str,
    class_code: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users
            (user_id, first_name, last_name, e_mail, class_code,
             total_points, reward_level, multiplier, user_role,
             research_agreement_status, current_progress, number_correct,
             points_earned_current_quest)
        VALUES ($1, $2, $3, $4, $5, 0, 0, 1, 0, 0, 0, 0, 0)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(first_name)
    .bind(last_name)
    .bind(e_mail)
    .bind(class_code)
    .fetch_one(pool)
    .await
}

/// Class standings by lifetime points.
pub async fn leaderboard(
    pool: &PgPool,
    class_code: &str,
) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
    sqlx::query_as::<_, LeaderboardEntry>(
        r#"
        SELECT first_name, total_points
        FROM users
        WHERE class_code = $1
        ORDER BY total_points DESC
        LIMIT 25
        "#,
    )
    .bind(class_code)
    .fetch_all(pool)
    .await
}
