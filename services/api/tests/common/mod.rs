//! Shared helpers for driving the router in-process over the in-memory store.

#![allow(dead_code)]

use api_lib::adapters::InMemoryAdapter;
use api_lib::config::Config;
use api_lib::web::{self, AppState};
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use reflection_core::domain::NewReflection;
use reflection_core::ports::{Clock, DatabaseService};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use tracing::Level;
use uuid::Uuid;

/// A clock stuck at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Saturday 2024-06-15, 12:00 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        database_url: "memory://".to_string(),
        database_max_connections: 1,
        log_level: Level::INFO,
        session_ttl_days: 7,
        cors_origin: "http://localhost:3000".to_string(),
        cookie_secure: false,
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: Arc<InMemoryAdapter>,
}

impl TestApp {
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock(fixed_now()));
        let db = Arc::new(InMemoryAdapter::with_clock(clock.clone()));
        let state = Arc::new(AppState {
            db: db.clone(),
            config: Arc::new(test_config()),
            clock,
        });
        let router = web::router(state).unwrap();
        Self { router, db }
    }

    /// Sends a request and returns the status, headers and JSON body
    /// (`Value::Null` for empty or non-JSON bodies).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, json)
    }

    pub async fn get(&self, uri: &str, cookie: &str) -> (StatusCode, Value) {
        let (status, _, json) = self.send(Method::GET, uri, Some(cookie), None).await;
        (status, json)
    }

    /// Signs up `email` and returns the `Cookie` header value and user id.
    pub async fn signup(&self, email: &str) -> (String, Uuid) {
        let (status, headers, json) = self
            .send(
                Method::POST,
                "/auth/signup",
                None,
                Some(serde_json::json!({ "email": email, "password": "correct horse" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = Uuid::parse_str(json["id"].as_str().unwrap()).unwrap();
        (session_cookie(&headers), user_id)
    }

    /// Stores a reflection written `days_ago` days before the fixed clock.
    pub async fn seed(&self, user_id: Uuid, days_ago: i64, content: &str, mood: Option<&str>) {
        let written_at = fixed_now() - chrono::Duration::days(days_ago);
        let new = NewReflection::new(user_id, content, mood, &[], written_at).unwrap();
        self.db.create_reflection(new).await.unwrap();
    }
}

/// Turns a `Set-Cookie` header into the matching `Cookie` header value.
pub fn session_cookie(headers: &HeaderMap) -> String {
    let set_cookie = headers
        .get(header::SET_COOKIE)
        .expect("missing Set-Cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}
