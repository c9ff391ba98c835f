//! crates/reflection_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or clocks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AuthSession, NewReflection, Prompt, Reflection, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Users ---
    async fn create_user_with_email(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> PortResult<User>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<User>;

    /// Overwrites both profile fields; `None` clears a field.
    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        bio: Option<&str>,
    ) -> PortResult<User>;

    // --- Auth Sessions ---
    async fn create_auth_session(&self, session: &AuthSession) -> PortResult<()>;

    /// Returns the owner of a live session, or `Unauthorized` when the token
    /// is unknown or expired.
    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid>;

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;

    // --- Reflections ---
    async fn create_reflection(&self, reflection: NewReflection) -> PortResult<Reflection>;

    /// All of a user's reflections, newest first.
    async fn list_reflections(&self, user_id: Uuid) -> PortResult<Vec<Reflection>>;

    /// A user's reflections created at or after `since` (all of them when
    /// `None`), oldest first.
    async fn list_reflections_since(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> PortResult<Vec<Reflection>>;

    async fn update_reflection_content(
        &self,
        user_id: Uuid,
        reflection_id: Uuid,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> PortResult<Reflection>;

    async fn delete_reflection(&self, user_id: Uuid, reflection_id: Uuid) -> PortResult<()>;

    // --- Custom Prompts ---
    /// A user's own prompts, newest first.
    async fn list_custom_prompts(&self, user_id: Uuid) -> PortResult<Vec<Prompt>>;

    async fn create_prompt(
        &self,
        user_id: Uuid,
        text: &str,
        category: &str,
        created_at: DateTime<Utc>,
    ) -> PortResult<Prompt>;

    async fn delete_prompt(&self, user_id: Uuid, prompt_id: Uuid) -> PortResult<()>;
}

/// Source of the current time. Handlers derive "today" from it.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
