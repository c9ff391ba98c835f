mod common;

use axum::http::{Method, StatusCode};
use common::{session_cookie, TestApp};
use serde_json::json;

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, _, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "ok");
}

#[tokio::test]
async fn protected_routes_reject_missing_or_unknown_sessions() {
    let app = TestApp::new();

    let (status, _, _) = app.send(Method::GET, "/reflections", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = app
        .send(Method::GET, "/analytics", Some("session=not-a-real-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unauthenticated_stats_are_not_zero_stats() {
    let app = TestApp::new();
    let (status, _, body) = app.send(Method::GET, "/reflections/streaks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("currentStreak").is_none());
}

#[tokio::test]
async fn signup_sets_a_session_cookie() {
    let app = TestApp::new();
    let (status, headers, body) = app
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({ "email": "  Writer@Example.com ", "password": "secret123" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "writer@example.com");
    let set_cookie = headers.get("set-cookie").unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=604800"));

    let cookie = session_cookie(&headers);
    let (status, me) = app.get("/auth/me", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "writer@example.com");
    assert_eq!(me["id"], body["id"]);
}

#[tokio::test]
async fn signup_validates_input_and_rejects_duplicates() {
    let app = TestApp::new();

    let (status, _, _) = app
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({ "email": "no-at-sign", "password": "secret123" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({ "email": "a@example.com", "password": "123" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.signup("a@example.com").await;
    let (status, _, _) = app
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({ "email": "A@example.com", "password": "another one" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_checks_the_password() {
    let app = TestApp::new();
    app.signup("reader@example.com").await;

    let (status, _, _) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "reader@example.com", "password": "wrong password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "correct horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, headers, body) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "reader@example.com", "password": "correct horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "reader@example.com");

    let (status, _) = app.get("/reflections", &session_cookie(&headers)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = TestApp::new();
    let (cookie, _) = app.signup("leaving@example.com").await;

    let (status, headers, _) = app
        .send(Method::POST, "/auth/logout", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let cleared = headers.get("set-cookie").unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let (status, _) = app.get("/auth/me", &cookie).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = app.send(Method::POST, "/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
