// src/handlers/status.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    error::AppError,
    repo,
    utils::jwt::Claims,
};

use super::{daily_status, load_classroom, load_user, quest_options};

/// Returns the authenticated user's full standing: profile summary, daily
/// quest status, classroom rewards and the valid quest parameters.
pub async fn get_status(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = load_user(&pool, &claims.sub).await?;
    let daily = daily_status(&pool, &user).await?;
    let classroom = load_classroom(&pool, &user).await?;
    let rewards: Vec<_> = repo::rewards::for_class(&pool, &classroom.class_code)
        .await?
        .iter()
        .map(|r| r.view())
        .collect();
    let options = quest_options(&pool).await?;

    Ok(Json(json!({
        "user": user.summary(),
        "daily_status": daily,
        "rewards": rewards,
        "quest_options": options,
    })))
}

/// Returns just the daily quest standing.
pub async fn get_daily(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = load_user(&pool, &claims.sub).await?;
    let daily = daily_status(&pool, &user).await?;

    Ok(Json(json!({ "daily_status": daily })))
}

/// Returns the valid quest parameters for the selection screen.
pub async fn get_quests(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = load_user(&pool, &claims.sub).await?;
    let options = quest_options(&pool).await?;

    Ok(Json(json!({
        "user": user.summary(),
        "quest_options": options,
    })))
}

/// Class standings by lifetime points.
pub async fn get_leaderboard(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = load_user(&pool, &claims.sub).await?;
    let classroom = load_classroom(&pool, &user).await?;
    let leaderboard = repo::users::leaderboard(&pool, &classroom.class_code).await?;

    Ok(Json(json!({ "leaderboard": leaderboard })))
}
