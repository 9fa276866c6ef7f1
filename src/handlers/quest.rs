// src/handlers/quest.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    quest::{
        QUESTION_TYPE_RANDOM,
        session::{self, PracticeParams, QuestEngine, QuestMode, StartQuestRequest},
    },
    repo::{self, PgContentRepository},
    utils::jwt::Claims,
};

use super::{daily_status, dailies_completed_today, load_classroom, load_user};

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    /// Identifier of the chosen answer; absent when the client timed out.
    pub user_answer: Option<i64>,
}

/// Starts a daily or practice quest and serves the first question.
///
/// Daily quest parameters come from the classroom; starting one past the
/// per-day cap is rejected with 409. Practice parameters come from the
/// request body.
pub async fn start_quest(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<StartQuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut user = load_user(&pool, &claims.sub).await?;
    let classroom = load_classroom(&pool, &user).await?;

    let mode = if payload.is_daily {
        QuestMode::Daily
    } else {
        QuestMode::Practice(PracticeParams {
            chapter_index: payload.chapter_index.ok_or_else(|| {
                AppError::BadRequest("chapter_index is required for practice quests".to_string())
            })?,
            number_of_questions: payload.number_of_questions.ok_or_else(|| {
                AppError::BadRequest(
                    "number_of_questions is required for practice quests".to_string(),
                )
            })?,
            is_timed: payload.is_timed.unwrap_or(false),
            cumulative: payload.cumulative.unwrap_or(false),
            question_type: payload.question_type.unwrap_or(QUESTION_TYPE_RANDOM),
        })
    };

    let dailies_today = dailies_completed_today(&pool, &user.user_id).await?;

    let content = PgContentRepository::new(pool.clone());
    let engine = QuestEngine::new(&content);
    engine.start_quest(&mut user, &classroom, &mode, dailies_today, Utc::now())?;

    let mut rng = StdRng::from_os_rng();
    let question = engine.next_question(&mut user, &mut rng, Utc::now()).await?;

    repo::users::save(&pool, &user).await?;

    tracing::info!("Quest started for user {}", user.user_id);

    Ok(Json(json!({
        "question": question.public(),
        "user": user.summary(),
    })))
}

/// Re-issues a question for the active quest after client-side state was
/// lost (phone reboot, app restart). Progress is untouched. Watch the logs
/// for abuse: this can also be used to skip a hard question.
pub async fn resume_quest(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = load_user(&pool, &claims.sub).await?;

    let content = PgContentRepository::new(pool.clone());
    let engine = QuestEngine::new(&content);
    let mut rng = StdRng::from_os_rng();
    let question = engine.next_question(&mut user, &mut rng, Utc::now()).await?;

    repo::users::save(&pool, &user).await?;

    Ok(Json(json!({
        "user": user.summary(),
        "question": question.public(),
    })))
}

/// Discards the active quest. Points already earned stay; the streak resets.
pub async fn drop_quest(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = load_user(&pool, &claims.sub).await?;

    session::drop_quest(&mut user);
    repo::users::save(&pool, &user).await?;

    Ok(Json(json!({ "user": user.summary() })))
}

/// Scores a submitted answer. Mid-quest the response carries the next
/// question; on the terminal answer it carries the performance breakdown and
/// refreshed daily status instead.
pub async fn submit_question(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = load_user(&pool, &claims.sub).await?;
    let classroom = load_classroom(&pool, &user).await?;
    let dailies_before = dailies_completed_today(&pool, &user.user_id).await?;

    let content = PgContentRepository::new(pool.clone());
    let engine = QuestEngine::new(&content);
    let mut rng = StdRng::from_os_rng();

    let outcome = engine
        .submit_answer(
            &mut user,
            &classroom,
            payload.user_answer,
            dailies_before,
            &mut rng,
            Utc::now(),
        )
        .await?;

    repo::users::save(&pool, &user).await?;

    // Log entries are best-effort telemetry; scoring is never rolled back
    // when recording them fails.
    if let Err(e) = repo::logs::insert_activity(&pool, &outcome.activity).await {
        tracing::warn!("failed to record activity log entry: {}", e);
    }
    if let Some(quest_log) = &outcome.quest_log {
        if let Err(e) = repo::logs::insert_quest(&pool, quest_log).await {
            tracing::warn!("failed to record quest log entry: {}", e);
        }
    }

    if outcome.quest_complete {
        let daily = daily_status(&pool, &user).await?;
        Ok(Json(json!({
            "user": user.summary(),
            "feedback": outcome.feedback,
            "quest_complete": true,
            "user_performance": outcome.performance,
            "daily_status": daily,
        })))
    } else {
        Ok(Json(json!({
            "user": user.summary(),
            "feedback": outcome.feedback,
            "question": outcome.next_question.as_ref().map(|q| q.public()),
            "quest_complete": false,
        })))
    }
}
