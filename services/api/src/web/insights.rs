//! services/api/src/web/insights.rs
//!
//! Read-only endpoints that turn a user's reflections into statistics:
//! the lifetime summary, streaks and windowed analytics.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use reflection_core::analytics::{aggregate, AnalyticsResult, TimeRange};
use reflection_core::stats::{streaks_for, summarize};
use reflection_core::streaks::StreakResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::web::rest::{port_error, HandlerError};
use crate::web::state::AppState;

//=========================================================================================
// Response Types
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_reflections: usize,
    pub total_words: usize,
    pub average_words_per_reflection: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub recent_activity: Vec<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreakResponse {
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl From<StreakResult> for StreakResponse {
    fn from(s: StreakResult) -> Self {
        Self {
            current_streak: s.current_streak,
            longest_streak: s.longest_streak,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct MoodCountResponse {
    pub mood: String,
    pub count: usize,
}

#[derive(Serialize, ToSchema)]
pub struct MoodPointResponse {
    pub date: NaiveDate,
    pub mood: String,
}

#[derive(Serialize, ToSchema)]
pub struct WordCountResponse {
    pub word: String,
    pub count: usize,
}

#[derive(Serialize, ToSchema)]
pub struct MonthCountResponse {
    pub month: String,
    pub count: usize,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_words: usize,
    /// Average words per reflection in the window.
    pub average_words_per_day: f64,
    pub longest_reflection: usize,
    pub most_active_day: String,
    pub mood_distribution: Vec<MoodCountResponse>,
    pub mood_over_time: Vec<MoodPointResponse>,
    pub word_frequency: Vec<WordCountResponse>,
    pub reflections_by_month: Vec<MonthCountResponse>,
}

impl From<AnalyticsResult> for AnalyticsResponse {
    fn from(a: AnalyticsResult) -> Self {
        Self {
            total_words: a.total_words,
            average_words_per_day: a.average_words_per_day,
            longest_reflection: a.longest_reflection,
            most_active_day: a.most_active_day,
            mood_distribution: a
                .mood_distribution
                .into_iter()
                .map(|m| MoodCountResponse { mood: m.mood, count: m.count })
                .collect(),
            mood_over_time: a
                .mood_over_time
                .into_iter()
                .map(|m| MoodPointResponse { date: m.date, mood: m.mood })
                .collect(),
            word_frequency: a
                .word_frequency
                .into_iter()
                .map(|w| WordCountResponse { word: w.word, count: w.count })
                .collect(),
            reflections_by_month: a
                .reflections_by_month
                .into_iter()
                .map(|m| MonthCountResponse { month: m.month, count: m.count })
                .collect(),
        }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct AnalyticsParams {
    /// Trailing window in days: 7, 30, 90, 365 or `all`. Defaults to 30.
    pub days: Option<String>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /reflections/stats - Lifetime totals, streaks and recent activity
#[utoipa::path(
    get,
    path = "/reflections/stats",
    responses(
        (status = 200, description = "Summary statistics", body = StatsResponse),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<StatsResponse>, HandlerError> {
    let list = state
        .db
        .list_reflections_since(user_id, None)
        .await
        .map_err(|e| port_error("Reflection", e))?;

    let stats = summarize(&list, state.clock.now().date_naive());
    Ok(Json(StatsResponse {
        total_reflections: stats.total_reflections,
        total_words: stats.total_words,
        average_words_per_reflection: stats.average_words_per_reflection,
        current_streak: stats.streaks.current_streak,
        longest_streak: stats.streaks.longest_streak,
        recent_activity: stats.recent_activity,
    }))
}

/// GET /reflections/streaks - Current and longest writing streaks
#[utoipa::path(
    get,
    path = "/reflections/streaks",
    responses(
        (status = 200, description = "Streak day counts", body = StreakResponse),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn streaks_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<StreakResponse>, HandlerError> {
    let list = state
        .db
        .list_reflections_since(user_id, None)
        .await
        .map_err(|e| port_error("Reflection", e))?;

    Ok(Json(streaks_for(&list, state.clock.now().date_naive()).into()))
}

/// GET /analytics - Writing analytics over a trailing window
#[utoipa::path(
    get,
    path = "/analytics",
    params(AnalyticsParams),
    responses(
        (status = 200, description = "Aggregated analytics", body = AnalyticsResponse),
        (status = 400, description = "Unsupported time range"),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn analytics_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<AnalyticsResponse>, HandlerError> {
    // An absent or empty `days` means the default window.
    let range = match params.days.as_deref().map(str::trim) {
        Some(days) if !days.is_empty() => days
            .parse::<TimeRange>()
            .map_err(|e| port_error("Analytics", e))?,
        _ => TimeRange::default(),
    };

    let list = state
        .db
        .list_reflections_since(user_id, range.since(state.clock.now()))
        .await
        .map_err(|e| port_error("Reflection", e))?;

    Ok(Json(aggregate(&list).into()))
}
