// src/handlers/classroom.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::classroom::SetChapterRequest,
    repo,
    utils::jwt::Claims,
};

use super::{load_classroom, load_user};

/// Instructor route: moves the classroom's current chapter pointer, which
/// daily quests draw from.
pub async fn set_current_chapter(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SetChapterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = load_user(&pool, &claims.sub).await?;
    if user.user_role < 1 {
        return Err(AppError::Forbidden("instructor role required".to_string()));
    }

    let classroom = load_classroom(&pool, &user).await?;
    repo::classrooms::set_current_chapter(&pool, &classroom.class_code, payload.chapter_index)
        .await?;

    tracing::info!(
        "Classroom {} moved to chapter {}",
        classroom.class_code,
        payload.chapter_index
    );

    let updated = repo::classrooms::fetch(&pool, &classroom.class_code)
        .await?
        .ok_or_else(|| AppError::NotFound("classroom not found".to_string()))?;

    Ok(Json(json!({ "classroom": updated })))
}
