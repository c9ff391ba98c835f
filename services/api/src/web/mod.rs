pub mod auth;
pub mod insights;
pub mod middleware;
pub mod profile;
pub mod prompts;
pub mod reflections;
pub mod rest;
pub mod state;

pub use middleware::require_auth;
pub use rest::ApiDoc;
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::parse_cors_origin;
use crate::error::ApiError;

/// Largest request body accepted by any route.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the full API router around the shared state.
pub fn router(app_state: Arc<AppState>) -> Result<Router, ApiError> {
    let origin = parse_cors_origin(&app_state.config.cors_origin)?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(rest::health_handler))
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/reflections",
            get(reflections::list_reflections_handler).post(reflections::create_reflection_handler),
        )
        .route("/reflections/search", get(reflections::search_reflections_handler))
        .route("/reflections/stats", get(insights::stats_handler))
        .route("/reflections/streaks", get(insights::streaks_handler))
        .route(
            "/reflections/{id}",
            put(reflections::update_reflection_handler)
                .delete(reflections::delete_reflection_handler),
        )
        .route("/analytics", get(insights::analytics_handler))
        .route(
            "/prompts",
            get(prompts::list_prompts_handler).post(prompts::create_prompt_handler),
        )
        .route("/prompts/{id}", delete(prompts::delete_prompt_handler))
        .route(
            "/profile",
            get(profile::get_profile_handler).put(profile::update_profile_handler),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
