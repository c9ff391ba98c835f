//! services/api/src/adapters/memory.rs
//!
//! A process-local implementation of the `DatabaseService` port. It backs the
//! test suite and `DATABASE_URL=memory://` runs; nothing survives a restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reflection_core::domain::{
    AuthSession, NewReflection, Prompt, Reflection, User, UserCredentials,
};
use reflection_core::ports::{Clock, DatabaseService, PortError, PortResult, SystemClock};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, (User, String)>,
    auth_sessions: HashMap<String, AuthSession>,
    // Kept in insertion order, which is creation order.
    reflections: Vec<Reflection>,
    prompts: Vec<Prompt>,
}

/// In-memory store guarded by a single async lock.
pub struct InMemoryAdapter {
    tables: RwLock<Tables>,
    clock: Arc<dyn Clock>,
}

impl InMemoryAdapter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Uses `clock` for account timestamps and session expiry checks.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            clock,
        }
    }
}

impl Default for InMemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn user_not_found(user_id: Uuid) -> PortError {
    PortError::NotFound(format!("User {} not found", user_id))
}

#[async_trait]
impl DatabaseService for InMemoryAdapter {
    async fn create_user_with_email(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> PortResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|(u, _)| u.email == email) {
            return Err(PortError::Conflict(format!(
                "An account for {} already exists",
                email
            )));
        }
        let user = User {
            user_id: Uuid::new_v4(),
            email: email.to_string(),
            name: None,
            bio: None,
            created_at: self.clock.now(),
        };
        tables
            .users
            .insert(user.user_id, (user.clone(), hashed_password.to_string()));
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let tables = self.tables.read().await;
        tables
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, hash)| UserCredentials {
                user_id: u.user_id,
                email: u.email.clone(),
                hashed_password: hash.clone(),
            })
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", email)))
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&user_id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        bio: Option<&str>,
    ) -> PortResult<User> {
        let mut tables = self.tables.write().await;
        let (user, _) = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        user.name = name.map(str::to_string);
        user.bio = bio.map(str::to_string);
        Ok(user.clone())
    }

    async fn create_auth_session(&self, session: &AuthSession) -> PortResult<()> {
        let now = self.clock.now();
        let mut tables = self.tables.write().await;
        tables.auth_sessions.retain(|_, s| s.expires_at > now);
        tables
            .auth_sessions
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        let now = self.clock.now();
        let mut tables = self.tables.write().await;
        match tables.auth_sessions.get(session_id) {
            Some(session) if session.expires_at > now => Ok(session.user_id),
            Some(_) => {
                tables.auth_sessions.remove(session_id);
                Err(PortError::Unauthorized)
            }
            None => Err(PortError::Unauthorized),
        }
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        self.tables.write().await.auth_sessions.remove(session_id);
        Ok(())
    }

    async fn create_reflection(&self, reflection: NewReflection) -> PortResult<Reflection> {
        let stored = Reflection {
            id: Uuid::new_v4(),
            user_id: reflection.user_id,
            content: reflection.content,
            mood: reflection.mood,
            tags: reflection.tags,
            date: reflection.date,
            created_at: reflection.created_at,
            updated_at: None,
        };
        self.tables.write().await.reflections.push(stored.clone());
        Ok(stored)
    }

    async fn list_reflections(&self, user_id: Uuid) -> PortResult<Vec<Reflection>> {
        let mut list = self.list_reflections_since(user_id, None).await?;
        list.reverse();
        Ok(list)
    }

    async fn list_reflections_since(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> PortResult<Vec<Reflection>> {
        let tables = self.tables.read().await;
        let mut list: Vec<Reflection> = tables
            .reflections
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| since.map_or(true, |since| r.created_at >= since))
            .cloned()
            .collect();
        list.sort_by_key(|r| r.created_at);
        Ok(list)
    }

    async fn update_reflection_content(
        &self,
        user_id: Uuid,
        reflection_id: Uuid,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> PortResult<Reflection> {
        let mut tables = self.tables.write().await;
        let reflection = tables
            .reflections
            .iter_mut()
            .find(|r| r.id == reflection_id && r.user_id == user_id)
            .ok_or_else(|| {
                PortError::NotFound(format!("Reflection {} not found", reflection_id))
            })?;
        reflection.content = content.to_string();
        reflection.updated_at = Some(updated_at);
        Ok(reflection.clone())
    }

    async fn delete_reflection(&self, user_id: Uuid, reflection_id: Uuid) -> PortResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.reflections.len();
        tables
            .reflections
            .retain(|r| !(r.id == reflection_id && r.user_id == user_id));
        if tables.reflections.len() == before {
            return Err(PortError::NotFound(format!(
                "Reflection {} not found",
                reflection_id
            )));
        }
        Ok(())
    }

    async fn list_custom_prompts(&self, user_id: Uuid) -> PortResult<Vec<Prompt>> {
        let tables = self.tables.read().await;
        let mut list: Vec<Prompt> = tables
            .prompts
            .iter()
            .filter(|p| p.user_id == Some(user_id))
            .cloned()
            .collect();
        // Newest first; later inserts win ties on equal timestamps.
        list.reverse();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn create_prompt(
        &self,
        user_id: Uuid,
        text: &str,
        category: &str,
        created_at: DateTime<Utc>,
    ) -> PortResult<Prompt> {
        let prompt = Prompt {
            id: Uuid::new_v4().to_string(),
            user_id: Some(user_id),
            text: text.to_string(),
            category: category.to_string(),
            is_default: false,
            created_at,
        };
        self.tables.write().await.prompts.push(prompt.clone());
        Ok(prompt)
    }

    async fn delete_prompt(&self, user_id: Uuid, prompt_id: Uuid) -> PortResult<()> {
        let id = prompt_id.to_string();
        let mut tables = self.tables.write().await;
        let before = tables.prompts.len();
        tables
            .prompts
            .retain(|p| !(p.id == id && p.user_id == Some(user_id)));
        if tables.prompts.len() == before {
            return Err(PortError::NotFound(format!("Prompt {} not found", prompt_id)));
        }
        Ok(())
    }
}
