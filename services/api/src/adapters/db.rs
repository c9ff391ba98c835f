//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reflection_core::domain::{
    AuthSession, NewReflection, Prompt, Reflection, User, UserCredentials,
};
use reflection_core::ports::{DatabaseService, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn not_found_or_unexpected(e: sqlx::Error, what: String) -> PortError {
    match e {
        sqlx::Error::RowNotFound => PortError::NotFound(what),
        _ => unexpected(e),
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

const USER_COLUMNS: &str = "user_id, email, name, bio, created_at";
const REFLECTION_COLUMNS: &str = "id, user_id, content, mood, tags, date, created_at, updated_at";
const PROMPT_COLUMNS: &str = "id, user_id, text, category, created_at";

#[derive(FromRow)]
struct UserRecord {
    user_id: Uuid,
    email: String,
    name: Option<String>,
    bio: Option<String>,
    created_at: DateTime<Utc>,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            user_id: self.user_id,
            email: self.email,
            name: self.name,
            bio: self.bio,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRecord {
    user_id: Uuid,
    email: String,
    hashed_password: String,
}
impl CredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            user_id: self.user_id,
            email: self.email,
            hashed_password: self.hashed_password,
        }
    }
}

#[derive(FromRow)]
struct ReflectionRecord {
    id: Uuid,
    user_id: Uuid,
    content: String,
    mood: Option<String>,
    tags: Vec<String>,
    date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}
impl ReflectionRecord {
    fn to_domain(self) -> Reflection {
        Reflection {
            id: self.id,
            user_id: self.user_id,
            content: self.content,
            mood: self.mood,
            tags: self.tags,
            date: self.date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct PromptRecord {
    id: Uuid,
    user_id: Uuid,
    text: String,
    category: String,
    created_at: DateTime<Utc>,
}
impl PromptRecord {
    fn to_domain(self) -> Prompt {
        Prompt {
            id: self.id.to_string(),
            user_id: Some(self.user_id),
            text: self.text,
            category: self.category,
            is_default: false,
            created_at: self.created_at,
        }
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_user_with_email(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> PortResult<User> {
        let sql = format!(
            "INSERT INTO users (user_id, email, hashed_password) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        );
        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(email)
            .bind(hashed_password)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    PortError::Conflict(format!("An account for {} already exists", email))
                }
                _ => unexpected(e),
            })?;
        Ok(record.to_domain())
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT user_id, email, hashed_password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| not_found_or_unexpected(e, format!("User {} not found", email)))?;
        Ok(record.to_domain())
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| not_found_or_unexpected(e, format!("User {} not found", user_id)))?;
        Ok(record.to_domain())
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        bio: Option<&str>,
    ) -> PortResult<User> {
        let sql = format!(
            "UPDATE users SET name = $1, bio = $2, updated_at = NOW() WHERE user_id = $3 RETURNING {USER_COLUMNS}"
        );
        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(name)
            .bind(bio)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| not_found_or_unexpected(e, format!("User {} not found", user_id)))?;
        Ok(record.to_domain())
    }

    async fn create_auth_session(&self, session: &AuthSession) -> PortResult<()> {
        // Sweep expired sessions so the table only holds live ones.
        sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        sqlx::query("INSERT INTO auth_sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(&session.id)
            .bind(session.user_id)
            .bind(session.expires_at)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        let user_id: Option<Uuid> = sqlx::query_scalar(
            "SELECT user_id FROM auth_sessions WHERE id = $1 AND expires_at > NOW()",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        user_id.ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn create_reflection(&self, reflection: NewReflection) -> PortResult<Reflection> {
        let sql = format!(
            "INSERT INTO reflections (id, user_id, content, mood, tags, date, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {REFLECTION_COLUMNS}"
        );
        let record = sqlx::query_as::<_, ReflectionRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(reflection.user_id)
            .bind(&reflection.content)
            .bind(&reflection.mood)
            .bind(&reflection.tags)
            .bind(reflection.date)
            .bind(reflection.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn list_reflections(&self, user_id: Uuid) -> PortResult<Vec<Reflection>> {
        let sql = format!(
            "SELECT {REFLECTION_COLUMNS} FROM reflections WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let records = sqlx::query_as::<_, ReflectionRecord>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn list_reflections_since(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> PortResult<Vec<Reflection>> {
        let sql = format!(
            "SELECT {REFLECTION_COLUMNS} FROM reflections \
             WHERE user_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2) \
             ORDER BY created_at ASC"
        );
        let records = sqlx::query_as::<_, ReflectionRecord>(&sql)
            .bind(user_id)
            .bind(since)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn update_reflection_content(
        &self,
        user_id: Uuid,
        reflection_id: Uuid,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> PortResult<Reflection> {
        let sql = format!(
            "UPDATE reflections SET content = $1, updated_at = $2 \
             WHERE id = $3 AND user_id = $4 RETURNING {REFLECTION_COLUMNS}"
        );
        let record = sqlx::query_as::<_, ReflectionRecord>(&sql)
            .bind(content)
            .bind(updated_at)
            .bind(reflection_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                not_found_or_unexpected(e, format!("Reflection {} not found", reflection_id))
            })?;
        Ok(record.to_domain())
    }

    async fn delete_reflection(&self, user_id: Uuid, reflection_id: Uuid) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM reflections WHERE id = $1 AND user_id = $2")
            .bind(reflection_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Reflection {} not found",
                reflection_id
            )));
        }
        Ok(())
    }

    async fn list_custom_prompts(&self, user_id: Uuid) -> PortResult<Vec<Prompt>> {
        let sql = format!(
            "SELECT {PROMPT_COLUMNS} FROM prompts WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let records = sqlx::query_as::<_, PromptRecord>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn create_prompt(
        &self,
        user_id: Uuid,
        text: &str,
        category: &str,
        created_at: DateTime<Utc>,
    ) -> PortResult<Prompt> {
        let sql = format!(
            "INSERT INTO prompts (id, user_id, text, category, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PROMPT_COLUMNS}"
        );
        let record = sqlx::query_as::<_, PromptRecord>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(text)
            .bind(category)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.to_domain())
    }

    async fn delete_prompt(&self, user_id: Uuid, prompt_id: Uuid) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = $1 AND user_id = $2")
            .bind(prompt_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Prompt {} not found", prompt_id)));
        }
        Ok(())
    }
}
