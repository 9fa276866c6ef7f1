// src/handlers/account.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{CreateAccountRequest, SignAgreementRequest},
    repo,
    utils::jwt::Claims,
};

use super::{daily_status, load_user, quest_options};

/// Creates the user record behind the authenticated identity and enrolls it
/// in a classroom. Returns 201 with the same payload as the status route so
/// the client lands fully initialized.
pub async fn create_account(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if repo::users::fetch(&pool, &claims.sub).await?.is_some() {
        return Err(AppError::Conflict("account already exists".to_string()));
    }

    let classroom = repo::classrooms::fetch(&pool, &payload.class_code)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("classroom '{}' not found", payload.class_code))
        })?;
    if !classroom.registration_open {
        return Err(AppError::Conflict(
            "registration is closed for this classroom".to_string(),
        ));
    }

    let user = repo::users::create(
        &pool,
        &claims.sub,
        payload.first_name.as_deref(),
        payload.last_name.as_deref(),
        &payload.e_mail,
        &payload.class_code,
    )
    .await?;

    tracing::info!("Created account for user {}", user.user_id);

    let daily = daily_status(&pool, &user).await?;
    let rewards: Vec<_> = repo::rewards::for_class(&pool, &payload.class_code)
        .await?
        .iter()
        .map(|r| r.view())
        .collect();
    let options = quest_options(&pool).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": user.summary(),
            "daily_status": daily,
            "rewards": rewards,
            "quest_options": options,
        })),
    ))
}

/// Records the user's research agreement choice.
pub async fn sign_agreement(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SignAgreementRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut user = load_user(&pool, &claims.sub).await?;
    user.research_agreement_status = payload.agreement_choice;
    repo::users::save(&pool, &user).await?;

    Ok(Json(json!({ "user": user.summary() })))
}
