mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;
use uuid::Uuid;

/// Three entries: today (Saturday), yesterday and ten days ago.
async fn seeded_journal(app: &TestApp, user_id: Uuid) {
    app.seed(user_id, 10, "old cat story", Some("happy")).await;
    app.seed(user_id, 1, "dog walk today", Some("calm")).await;
    app.seed(user_id, 0, "The cat and the dog ran", Some("happy")).await;
}

#[tokio::test]
async fn streaks_count_back_from_today() {
    let app = TestApp::new();
    let (cookie, user_id) = app.signup("streaky@example.com").await;
    for days_ago in [0, 1, 2, 5, 9, 10, 11, 12] {
        app.seed(user_id, days_ago, "entry", None).await;
    }
    // A second entry on the same day does not extend anything.
    app.seed(user_id, 0, "another entry", None).await;

    let (status, body) = app.get("/reflections/streaks", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "currentStreak": 3, "longestStreak": 4 }));
}

#[tokio::test]
async fn streak_is_broken_without_an_entry_today() {
    let app = TestApp::new();
    let (cookie, user_id) = app.signup("lapsed@example.com").await;
    app.seed(user_id, 1, "yesterday", None).await;
    app.seed(user_id, 2, "the day before", None).await;

    let (_, body) = app.get("/reflections/streaks", &cookie).await;
    assert_eq!(body["currentStreak"], 0);
    assert_eq!(body["longestStreak"], 2);
}

#[tokio::test]
async fn stats_summarize_the_whole_journal() {
    let app = TestApp::new();
    let (cookie, user_id) = app.signup("stats@example.com").await;
    seeded_journal(&app, user_id).await;

    let (status, body) = app.get("/reflections/stats", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalReflections"], 3);
    assert_eq!(body["totalWords"], 12);
    assert_eq!(body["averageWordsPerReflection"].as_f64(), Some(4.0));
    assert_eq!(body["currentStreak"], 2);
    assert_eq!(body["longestStreak"], 2);
    assert_eq!(body["recentActivity"][0], "6/15/2024: Wrote 6 words");
    assert_eq!(body["recentActivity"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn analytics_on_an_empty_journal_are_zeroed() {
    let app = TestApp::new();
    let (cookie, _) = app.signup("empty@example.com").await;

    let (status, body) = app.get("/analytics", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalWords"], 0);
    assert_eq!(body["averageWordsPerDay"].as_f64(), Some(0.0));
    assert_eq!(body["longestReflection"], 0);
    assert_eq!(body["mostActiveDay"], "None");
    assert_eq!(body["moodDistribution"], json!([]));
    assert_eq!(body["wordFrequency"], json!([]));
}

#[tokio::test]
async fn analytics_respect_the_time_range() {
    let app = TestApp::new();
    let (cookie, user_id) = app.signup("ranges@example.com").await;
    seeded_journal(&app, user_id).await;

    let (status, week) = app.get("/analytics?days=7", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(week["totalWords"], 9);
    assert_eq!(week["longestReflection"], 6);
    assert_eq!(week["averageWordsPerDay"].as_f64(), Some(4.5));
    // Friday and Saturday tie; the earlier entry wins.
    assert_eq!(week["mostActiveDay"], "Friday");
    assert_eq!(
        week["moodDistribution"],
        json!([{ "mood": "calm", "count": 1 }, { "mood": "happy", "count": 1 }])
    );
    assert_eq!(
        week["moodOverTime"],
        json!([
            { "date": "2024-06-14", "mood": "calm" },
            { "date": "2024-06-15", "mood": "happy" }
        ])
    );
    assert_eq!(week["wordFrequency"][0], json!({ "word": "dog", "count": 2 }));
    let words: Vec<&str> = week["wordFrequency"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["word"].as_str().unwrap())
        .collect();
    assert!(!words.contains(&"the"));
    assert!(!words.contains(&"and"));
    assert_eq!(week["reflectionsByMonth"], json!([{ "month": "Jun 2024", "count": 2 }]));

    let (status, all) = app.get("/analytics?days=all", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["totalWords"], 12);
    assert_eq!(all["moodDistribution"][0], json!({ "mood": "happy", "count": 2 }));
    assert_eq!(all["wordFrequency"][0]["count"], 2);
}

#[tokio::test]
async fn unsupported_ranges_are_rejected() {
    let app = TestApp::new();
    let (cookie, _) = app.signup("picky@example.com").await;

    for uri in ["/analytics?days=14", "/analytics?days=forever", "/analytics?days=-7"] {
        let (status, _) = app.get(uri, &cookie).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn empty_range_falls_back_to_thirty_days() {
    let app = TestApp::new();
    let (cookie, user_id) = app.signup("blank@example.com").await;
    app.seed(user_id, 20, "inside the month", None).await;
    app.seed(user_id, 45, "outside the month", None).await;

    for uri in ["/analytics?days=", "/analytics?days=%20", "/analytics"] {
        let (status, body) = app.get(uri, &cookie).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["totalWords"], 3, "{}", uri);
    }
}

#[tokio::test]
async fn insights_never_mix_users() {
    let app = TestApp::new();
    let (alice, alice_id) = app.signup("alice@example.com").await;
    let (bob, _) = app.signup("bob@example.com").await;
    seeded_journal(&app, alice_id).await;

    let (_, stats) = app.get("/reflections/stats", &bob).await;
    assert_eq!(stats["totalReflections"], 0);
    assert_eq!(stats["recentActivity"], json!([]));

    let (_, analytics) = app.get("/analytics?days=all", &alice).await;
    assert_eq!(analytics["totalWords"], 12);
}
