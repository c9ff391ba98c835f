//! services/api/src/web/rest.rs
//!
//! Shared pieces of the REST API: the master definition for the OpenAPI
//! specification, the error mapping used by every handler and the health check.

use axum::{http::StatusCode, Json};
use reflection_core::ports::PortError;
use serde::Serialize;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

use crate::web::{auth, insights, profile, prompts, reflections};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        auth::signup_handler,
        auth::login_handler,
        auth::logout_handler,
        auth::me_handler,
        reflections::list_reflections_handler,
        reflections::create_reflection_handler,
        reflections::update_reflection_handler,
        reflections::delete_reflection_handler,
        reflections::search_reflections_handler,
        insights::stats_handler,
        insights::streaks_handler,
        insights::analytics_handler,
        prompts::list_prompts_handler,
        prompts::create_prompt_handler,
        prompts::delete_prompt_handler,
        profile::get_profile_handler,
        profile::update_profile_handler,
    ),
    components(
        schemas(
            MessageResponse,
            auth::SignupRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            reflections::CreateReflectionRequest,
            reflections::UpdateReflectionRequest,
            reflections::ReflectionResponse,
            insights::StatsResponse,
            insights::StreakResponse,
            insights::AnalyticsResponse,
            insights::MoodCountResponse,
            insights::MoodPointResponse,
            insights::WordCountResponse,
            insights::MonthCountResponse,
            prompts::CreatePromptRequest,
            prompts::PromptResponse,
            profile::UpdateProfileRequest,
            profile::ProfileResponse,
        )
    ),
    tags(
        (name = "Daily Reflection API", description = "Journal entries, prompts and writing analytics.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Types and Helpers
//=========================================================================================

/// The error half of every handler's result.
pub type HandlerError = (StatusCode, String);

/// A plain confirmation message.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Maps a port failure onto a status code and a client-safe message.
///
/// `subject` names the thing being looked up ("Reflection", "Prompt") and is
/// used for 404 messages. Unexpected failures are logged and reported
/// generically.
pub fn port_error(subject: &str, e: PortError) -> HandlerError {
    match e {
        PortError::NotFound(_) => (StatusCode::NOT_FOUND, format!("{} not found", subject)),
        PortError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        PortError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        PortError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        PortError::Unexpected(msg) => {
            error!("{} operation failed: {}", subject, msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

//=========================================================================================
// Health
//=========================================================================================

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = MessageResponse))
)]
pub async fn health_handler() -> Json<MessageResponse> {
    MessageResponse::new("ok")
}
