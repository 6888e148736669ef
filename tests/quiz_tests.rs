// tests/quiz_tests.rs

use std::sync::Arc;
use std::time::Duration;

use prephub::{config::Config, question_bank::QuestionBank, routes, state::AppState};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

async fn spawn_app() -> String {
    let db_path = std::env::temp_dir().join(format!("prephub_test_{}.db", uuid::Uuid::new_v4()));

    let connect_options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
        .expect("Failed to open test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: format!("sqlite://{}", db_path.display()),
        rust_log: "error".to_string(),
        port: 0,
        public_dir: "public".to_string(),
    };

    let questions = Arc::new(
        QuestionBank::load(&config.questions_path()).expect("Failed to load question bank"),
    );

    let state = AppState {
        pool,
        config,
        questions,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn unique_email() -> String {
    format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8])
}

async fn register(client: &reqwest::Client, address: &str, email: &str) {
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Test User",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Register failed");
    assert_eq!(response.status().as_u16(), 201);
}

async fn submit(
    client: &reqwest::Client,
    address: &str,
    email: &str,
    subject: &str,
    score: i64,
    total: i64,
) -> reqwest::Response {
    client
        .post(&format!("{}/api/quiz/submit", address))
        .json(&serde_json::json!({
            "email": email,
            "subject": subject,
            "score": score,
            "total": total
        }))
        .send()
        .await
        .expect("Submit failed")
}

#[tokio::test]
async fn subjects_are_listed() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/subjects", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let subjects: Vec<&str> = body["subjects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    for subject in ["Geography", "History", "Polity", "Economics", "Science"] {
        assert!(subjects.contains(&subject), "missing subject {}", subject);
    }
}

#[tokio::test]
async fn questions_endpoint_returns_a_paper() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/questions/Geography", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let paper: Vec<serde_json::Value> = response.json().await.unwrap();
    assert!(!paper.is_empty());
    assert!(paper.len() <= 20);
    for q in &paper {
        assert!(q["question"].is_string());
        assert!(q["options"].is_array());
        assert!(q["answer"].is_string());
    }
}

#[tokio::test]
async fn questions_endpoint_unknown_subject_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/questions/Astronomy", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn first_submission_end_to_end() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();
    register(&client, &address, &email).await;

    // Act: 16/20 -> 80% -> 100 XP
    let response = submit(&client, &address, &email, "Geography", 16, 20).await;

    // Assert the recorder response
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["xpEarned"], 100);
    assert_eq!(body["totalXP"], 100);
    assert_eq!(body["level"], 1); // 100 < 200
    assert_eq!(body["streak"], 1);
    assert_eq!(body["rank"]["name"], "Bronze");
    assert_eq!(body["xpForNext"], 200);
    assert_eq!(body["xpForCurrent"], 0);
    let badge_ids: Vec<&str> = body["badges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert!(badge_ids.contains(&"first"));
    assert!(badge_ids.contains(&"scholar")); // 80 >= 80

    // Round-trip: stats immediately reflect the submission
    let stats: serde_json::Value = client
        .get(&format!("{}/api/quiz/stats/{}", address, email))
        .send()
        .await
        .expect("Stats failed")
        .json()
        .await
        .unwrap();

    assert_eq!(stats["success"], true);
    assert_eq!(stats["xp"], 100);
    assert_eq!(stats["level"], 1);
    assert_eq!(stats["streak"], 1);
    assert_eq!(stats["totalQuizzes"], 1);
    assert_eq!(stats["recentHistory"].as_array().unwrap().len(), 1);
    assert_eq!(stats["recentHistory"][0]["percentage"], 80);
    assert_eq!(stats["recentHistory"][0]["xpEarned"], 100);
    let geo = &stats["subjectStats"]["Geography"];
    assert_eq!(geo["attempts"], 1);
    assert_eq!(geo["best"], 80);
    assert_eq!(geo["latest"], 80);
    assert_eq!(geo["trend"], "same"); // single attempt is always 'same'
    let polity = &stats["subjectStats"]["Polity"];
    assert_eq!(polity["attempts"], 0);
    assert_eq!(polity["trend"], "none");
}

#[tokio::test]
async fn xp_accumulates_and_levels_up() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();
    register(&client, &address, &email).await;

    // Act: two 80%+ quizzes, 100 XP each
    submit(&client, &address, &email, "Geography", 16, 20).await;
    let response = submit(&client, &address, &email, "History", 18, 20).await;

    // Assert: 200 XP crosses the level-2 threshold
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["totalXP"], 200);
    assert_eq!(body["level"], 2);
    assert_eq!(body["xpForNext"], 500);
    assert_eq!(body["xpForCurrent"], 200);
    // Same-day repeat: streak unchanged
    assert_eq!(body["streak"], 1);

    // History lists both attempts in insertion order
    let history: serde_json::Value = client
        .get(&format!("{}/api/quiz/history/{}", address, email))
        .send()
        .await
        .expect("History failed")
        .json()
        .await
        .unwrap();

    let attempts = history["quizHistory"].as_array().unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0]["subject"], "Geography");
    assert_eq!(attempts[1]["subject"], "History");
    assert_eq!(history["xp"], 200);
    assert_eq!(history["level"], 2);
}

#[tokio::test]
async fn percentage_is_rounded() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();
    register(&client, &address, &email).await;

    // 2/3 -> 66.67 -> rounds to 67 -> 70 XP band
    let response = submit(&client, &address, &email, "Science", 2, 3).await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["xpEarned"], 70);

    let stats: serde_json::Value = client
        .get(&format!("{}/api/quiz/stats/{}", address, email))
        .send()
        .await
        .expect("Stats failed")
        .json()
        .await
        .unwrap();
    assert_eq!(stats["subjectStats"]["Science"]["latest"], 67);
}

#[tokio::test]
async fn submit_rejects_invalid_payloads() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();
    register(&client, &address, &email).await;

    // total = 0
    let response = submit(&client, &address, &email, "Geography", 0, 0).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);

    // missing score
    let response = client
        .post(&format!("{}/api/quiz/submit", address))
        .json(&serde_json::json!({
            "email": email,
            "subject": "Geography",
            "total": 20
        }))
        .send()
        .await
        .expect("Submit failed");
    assert_eq!(response.status().as_u16(), 400);

    // negative score
    let response = submit(&client, &address, &email, "Geography", -1, 20).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn submit_unknown_user_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = submit(&client, &address, &unique_email(), "Geography", 10, 20).await;

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn concurrent_submissions_are_both_recorded() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();
    register(&client, &address, &email).await;

    // Act: two near-simultaneous submissions for the same user
    // (100 XP and 40 XP awards)
    let (a, b) = tokio::join!(
        submit(&client, &address, &email, "Geography", 16, 20),
        submit(&client, &address, &email, "History", 9, 20),
    );

    // Assert: neither request was dropped
    assert_eq!(a.status().as_u16(), 200);
    assert_eq!(b.status().as_u16(), 200);

    let stats: serde_json::Value = client
        .get(&format!("{}/api/quiz/stats/{}", address, email))
        .send()
        .await
        .expect("Stats failed")
        .json()
        .await
        .unwrap();

    // Both attempts recorded, xp is the sum of both awards
    assert_eq!(stats["totalQuizzes"], 2);
    assert_eq!(stats["xp"], 140);
    // Both landed on the same day, so the streak is still 1
    assert_eq!(stats["streak"], 1);
}

#[tokio::test]
async fn history_unknown_user_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/quiz/history/{}", address, unique_email()))
        .send()
        .await
        .expect("History failed");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn recent_history_caps_at_ten() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();
    register(&client, &address, &email).await;

    for i in 0..12i64 {
        let response = submit(&client, &address, &email, "Polity", 10 + (i % 5), 20).await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let stats: serde_json::Value = client
        .get(&format!("{}/api/quiz/stats/{}", address, email))
        .send()
        .await
        .expect("Stats failed")
        .json()
        .await
        .unwrap();

    assert_eq!(stats["totalQuizzes"], 12);
    assert_eq!(stats["recentHistory"].as_array().unwrap().len(), 10);

    // The full history endpoint is uncapped
    let history: serde_json::Value = client
        .get(&format!("{}/api/quiz/history/{}", address, email))
        .send()
        .await
        .expect("History failed")
        .json()
        .await
        .unwrap();
    assert_eq!(history["quizHistory"].as_array().unwrap().len(), 12);
}
