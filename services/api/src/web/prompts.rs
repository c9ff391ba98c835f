//! services/api/src/web/prompts.rs
//!
//! Writing prompt endpoints: the built-in catalog plus user-created prompts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use reflection_core::domain::Prompt;
use reflection_core::prompts::{catalog, is_default_prompt_id, normalize_new_prompt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::rest::{port_error, HandlerError, MessageResponse};
use crate::web::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct CreatePromptRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    pub id: String,
    pub text: String,
    pub category: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Prompt> for PromptResponse {
    fn from(p: Prompt) -> Self {
        Self {
            id: p.id,
            text: p.text,
            category: p.category,
            is_default: p.is_default,
            created_at: p.created_at,
        }
    }
}

/// GET /prompts - Built-in prompts followed by the user's own, newest first
#[utoipa::path(
    get,
    path = "/prompts",
    responses(
        (status = 200, description = "Prompt catalog", body = [PromptResponse]),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_prompts_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<PromptResponse>>, HandlerError> {
    let custom = state
        .db
        .list_custom_prompts(user_id)
        .await
        .map_err(|e| port_error("Prompt", e))?;

    let prompts = catalog(custom, state.clock.now());
    Ok(Json(prompts.into_iter().map(PromptResponse::from).collect()))
}

/// POST /prompts - Save a custom prompt
#[utoipa::path(
    post,
    path = "/prompts",
    request_body = CreatePromptRequest,
    responses(
        (status = 201, description = "Prompt created", body = PromptResponse),
        (status = 400, description = "Prompt text is required"),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_prompt_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<CreatePromptRequest>,
) -> Result<(StatusCode, Json<PromptResponse>), HandlerError> {
    let (text, category) =
        normalize_new_prompt(req.text.as_deref().unwrap_or_default(), req.category.as_deref())
            .map_err(|e| port_error("Prompt", e))?;

    let prompt = state
        .db
        .create_prompt(user_id, &text, &category, state.clock.now())
        .await
        .map_err(|e| port_error("Prompt", e))?;

    Ok((StatusCode::CREATED, Json(prompt.into())))
}

/// DELETE /prompts/{id} - Remove a custom prompt
#[utoipa::path(
    delete,
    path = "/prompts/{id}",
    params(("id" = String, Path, description = "Prompt id")),
    responses(
        (status = 200, description = "Prompt deleted", body = MessageResponse),
        (status = 400, description = "Built-in prompts cannot be deleted"),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Prompt not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_prompt_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(prompt_id): Path<String>,
) -> Result<Json<MessageResponse>, HandlerError> {
    if is_default_prompt_id(&prompt_id) {
        return Err((
            StatusCode::BAD_REQUEST,
            "Cannot delete default prompts".to_string(),
        ));
    }
    let prompt_id = Uuid::parse_str(&prompt_id)
        .map_err(|_| (StatusCode::NOT_FOUND, "Prompt not found".to_string()))?;

    state
        .db
        .delete_prompt(user_id, prompt_id)
        .await
        .map_err(|e| port_error("Prompt", e))?;

    Ok(MessageResponse::new("Prompt deleted successfully"))
}
