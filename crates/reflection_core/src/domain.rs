//! crates/reflection_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::ports::{PortError, PortResult};

/// A single dated journal entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Reflection {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub mood: Option<String>,
    pub tags: Vec<String>,
    /// Calendar day the entry was written on. Fixed at creation.
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A validated reflection that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewReflection {
    pub user_id: Uuid,
    pub content: String,
    pub mood: Option<String>,
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl NewReflection {
    /// Normalizes user input and stamps the entry with `now`.
    ///
    /// Content is trimmed and must not be empty. A blank mood is dropped, as
    /// are blank tags.
    pub fn new(
        user_id: Uuid,
        content: &str,
        mood: Option<&str>,
        tags: &[String],
        now: DateTime<Utc>,
    ) -> PortResult<Self> {
        let content = normalize_content(content)?;
        let mood = mood
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        let tags = tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            user_id,
            content,
            mood,
            tags,
            date: now.date_naive(),
            created_at: now,
        })
    }
}

/// Trims reflection content, rejecting bodies that are empty afterwards.
pub fn normalize_content(content: &str) -> PortResult<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(PortError::InvalidInput("Content is required".to_string()));
    }
    Ok(trimmed.to_string())
}

// Represents a user - used throughout app
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub email: String,
    pub hashed_password: String,
}

// Represents a browser login session (auth cookie)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// A writing prompt. Built-in prompts have no owner and are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub id: String,
    pub user_id: Option<Uuid>,
    pub text: String,
    pub category: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}
