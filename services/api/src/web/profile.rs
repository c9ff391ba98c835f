//! services/api/src/web/profile.rs
//!
//! Profile endpoints. Every response carries fresh reflection totals and
//! streaks alongside the account fields.

use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use reflection_core::domain::User;
use reflection_core::stats::streaks_for;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::rest::{port_error, HandlerError};
use crate::web::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub total_reflections: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Trimmed text, or `None` when nothing is left.
fn cleared_if_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

async fn build_profile(state: &AppState, user: User) -> Result<ProfileResponse, HandlerError> {
    let list = state
        .db
        .list_reflections_since(user.user_id, None)
        .await
        .map_err(|e| port_error("Reflection", e))?;
    let streaks = streaks_for(&list, state.clock.now().date_naive());

    Ok(ProfileResponse {
        id: user.user_id,
        email: user.email,
        name: user.name,
        bio: user.bio,
        created_at: user.created_at,
        total_reflections: list.len(),
        current_streak: streaks.current_streak,
        longest_streak: streaks.longest_streak,
    })
}

/// GET /profile - Account details with journaling totals
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<ProfileResponse>, HandlerError> {
    let user = state
        .db
        .get_user_by_id(user_id)
        .await
        .map_err(|e| port_error("User", e))?;

    Ok(Json(build_profile(&state, user).await?))
}

/// PUT /profile - Update name and bio; blank values clear the field
#[utoipa::path(
    put,
    path = "/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, HandlerError> {
    let user = state
        .db
        .update_user_profile(
            user_id,
            cleared_if_blank(req.name.as_deref()),
            cleared_if_blank(req.bio.as_deref()),
        )
        .await
        .map_err(|e| port_error("User", e))?;

    Ok(Json(build_profile(&state, user).await?))
}
