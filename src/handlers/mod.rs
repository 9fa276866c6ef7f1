// src/handlers/mod.rs

pub mod account;
pub mod classroom;
pub mod quest;
pub mod status;

use sqlx::PgPool;

use crate::error::AppError;
use crate::models::chapter::QuestOptions;
use crate::models::classroom::{Classroom, DailyStatus};
use crate::models::user::User;
use crate::quest::QUESTION_COUNT_OPTIONS;
use crate::repo;
use crate::utils::time::local_day_bounds;

// Shared lookups used across the route handlers.

pub(crate) async fn load_user(pool: &PgPool, user_id: &str) -> Result<User, AppError> {
    repo::users::fetch(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))
}

pub(crate) async fn load_classroom(pool: &PgPool, user: &User) -> Result<Classroom, AppError> {
    let class_code = user.class_code.as_deref().ok_or_else(|| {
        AppError::BadRequest("user is not enrolled in a classroom".to_string())
    })?;
    repo::classrooms::fetch(pool, class_code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("classroom '{}' not found", class_code)))
}

pub(crate) async fn dailies_completed_today(
    pool: &PgPool,
    user_id: &str,
) -> Result<i64, AppError> {
    let (day_start, day_end) = local_day_bounds();
    Ok(repo::logs::dailies_completed_between(pool, user_id, day_start, day_end).await?)
}

pub(crate) async fn daily_status(pool: &PgPool, user: &User) -> Result<DailyStatus, AppError> {
    let classroom = load_classroom(pool, user).await?;
    let dailies_complete = dailies_completed_today(pool, &user.user_id).await?;
    Ok(DailyStatus {
        dailies_complete,
        dailies_allowed: classroom.number_dailies_allowed,
        daily_chapter: classroom.current_chapter,
    })
}

pub(crate) async fn quest_options(pool: &PgPool) -> Result<QuestOptions, AppError> {
    Ok(QuestOptions {
        chapter_options: repo::chapters::all(pool).await?,
        number_of_questions_options: QUESTION_COUNT_OPTIONS.to_vec(),
    })
}
