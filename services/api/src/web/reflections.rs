//! services/api/src/web/reflections.rs
//!
//! CRUD and search endpoints for journal entries.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use reflection_core::domain::{normalize_content, NewReflection, Reflection};
use reflection_core::search::SearchQuery;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::web::rest::{port_error, HandlerError, MessageResponse};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateReflectionRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateReflectionRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct SearchParams {
    /// Text to look for in the body, mood or tags.
    pub q: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionResponse {
    pub id: Uuid,
    pub content: String,
    pub mood: Option<String>,
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Reflection> for ReflectionResponse {
    fn from(r: Reflection) -> Self {
        Self {
            id: r.id,
            content: r.content,
            mood: r.mood,
            tags: r.tags,
            date: r.date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

fn to_responses(list: Vec<Reflection>) -> Json<Vec<ReflectionResponse>> {
    Json(list.into_iter().map(ReflectionResponse::from).collect())
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /reflections - All of the user's reflections, newest first
#[utoipa::path(
    get,
    path = "/reflections",
    responses(
        (status = 200, description = "Reflections, newest first", body = [ReflectionResponse]),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_reflections_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<ReflectionResponse>>, HandlerError> {
    let list = state
        .db
        .list_reflections(user_id)
        .await
        .map_err(|e| port_error("Reflection", e))?;
    Ok(to_responses(list))
}

/// POST /reflections - Write a new reflection dated today
#[utoipa::path(
    post,
    path = "/reflections",
    request_body = CreateReflectionRequest,
    responses(
        (status = 201, description = "Reflection created", body = ReflectionResponse),
        (status = 400, description = "Content is required"),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_reflection_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<CreateReflectionRequest>,
) -> Result<(StatusCode, Json<ReflectionResponse>), HandlerError> {
    let new = NewReflection::new(
        user_id,
        req.content.as_deref().unwrap_or_default(),
        req.mood.as_deref(),
        req.tags.as_deref().unwrap_or_default(),
        state.clock.now(),
    )
    .map_err(|e| port_error("Reflection", e))?;

    let stored = state
        .db
        .create_reflection(new)
        .await
        .map_err(|e| port_error("Reflection", e))?;
    info!(%user_id, reflection_id = %stored.id, "Reflection created");

    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// PUT /reflections/{id} - Replace the body of a reflection
#[utoipa::path(
    put,
    path = "/reflections/{id}",
    request_body = UpdateReflectionRequest,
    params(("id" = Uuid, Path, description = "Reflection id")),
    responses(
        (status = 200, description = "Reflection updated", body = ReflectionResponse),
        (status = 400, description = "Content is required"),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Reflection not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_reflection_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(reflection_id): Path<Uuid>,
    Json(req): Json<UpdateReflectionRequest>,
) -> Result<Json<ReflectionResponse>, HandlerError> {
    let content = normalize_content(req.content.as_deref().unwrap_or_default())
        .map_err(|e| port_error("Reflection", e))?;

    let updated = state
        .db
        .update_reflection_content(user_id, reflection_id, &content, state.clock.now())
        .await
        .map_err(|e| port_error("Reflection", e))?;

    Ok(Json(updated.into()))
}

/// DELETE /reflections/{id} - Remove a reflection
#[utoipa::path(
    delete,
    path = "/reflections/{id}",
    params(("id" = Uuid, Path, description = "Reflection id")),
    responses(
        (status = 200, description = "Reflection deleted", body = MessageResponse),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Reflection not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_reflection_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(reflection_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, HandlerError> {
    state
        .db
        .delete_reflection(user_id, reflection_id)
        .await
        .map_err(|e| port_error("Reflection", e))?;
    info!(%user_id, %reflection_id, "Reflection deleted");

    Ok(MessageResponse::new("Reflection deleted successfully"))
}

/// GET /reflections/search - Case-insensitive search over body, mood and tags
#[utoipa::path(
    get,
    path = "/reflections/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching reflections, newest first", body = [ReflectionResponse]),
        (status = 400, description = "Search query is required"),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_reflections_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ReflectionResponse>>, HandlerError> {
    let query = SearchQuery::parse(params.q.as_deref().unwrap_or_default())
        .map_err(|e| port_error("Reflection", e))?;

    let list = state
        .db
        .list_reflections(user_id)
        .await
        .map_err(|e| port_error("Reflection", e))?;

    Ok(to_responses(query.filter(list)))
}
