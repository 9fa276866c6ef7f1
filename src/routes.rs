// src/routes.rs

use axum::{Router, http::Method, middleware, routing::post};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{account, classroom, quest, status},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * All routes are POST and bearer-authenticated, matching the mobile
///   client's protocol.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let api_routes = Router::new()
        .route("/status/get", post(status::get_status))
        .route("/quests/get", post(status::get_quests))
        .route("/daily/get", post(status::get_daily))
        .route("/leaderboard/get", post(status::get_leaderboard))
        .route("/quest/start", post(quest::start_quest))
        .route("/quest/resume", post(quest::resume_quest))
        .route("/quest/drop", post(quest::drop_quest))
        .route("/question/submit", post(quest::submit_question))
        .route("/account/create", post(account::create_account))
        .route("/agreement/sign", post(account::sign_agreement))
        // Instructor routes
        .route("/current_chapter/set", post(classroom::set_current_chapter))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/v1", api_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
