// src/bin/seed.rs
//
// Seeds the database with sample users and backdated quiz histories.
// Run: cargo run --bin seed

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dotenvy::dotenv;
use prephub::config::Config;
use prephub::gamification::{levels::xp_for_percentage, streak::update_streak};
use prephub::utils::hash::hash_password;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

struct SeedAttempt {
    subject: &'static str,
    score: i64,
    total: i64,
    date: &'static str,
}

struct SeedUser {
    name: &'static str,
    email: &'static str,
    attempts: &'static [SeedAttempt],
}

const SEED_PASSWORD: &str = "password123";

const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        name: "Aarav Sharma",
        email: "aarav@upsc.com",
        attempts: &[
            SeedAttempt { subject: "Geography", score: 16, total: 20, date: "2026-02-20T00:00:00Z" },
            SeedAttempt { subject: "History", score: 14, total: 20, date: "2026-02-21T00:00:00Z" },
            SeedAttempt { subject: "Polity", score: 18, total: 20, date: "2026-02-22T00:00:00Z" },
        ],
    },
    SeedUser {
        name: "Priya Patel",
        email: "priya@upsc.com",
        attempts: &[
            SeedAttempt { subject: "Economics", score: 12, total: 20, date: "2026-02-19T00:00:00Z" },
            SeedAttempt { subject: "Science", score: 17, total: 20, date: "2026-02-23T00:00:00Z" },
        ],
    },
    SeedUser {
        name: "Test User",
        email: "testuser@upsc.com",
        attempts: &[
            SeedAttempt { subject: "Geography", score: 10, total: 20, date: "2026-02-18T00:00:00Z" },
            SeedAttempt { subject: "Polity", score: 15, total: 20, date: "2026-02-20T00:00:00Z" },
            SeedAttempt { subject: "History", score: 19, total: 20, date: "2026-02-24T00:00:00Z" },
            SeedAttempt { subject: "Economics", score: 8, total: 20, date: "2026-02-25T00:00:00Z" },
        ],
    },
];

#[tokio::main]
async fn main() {
    dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.rust_log))
        .with(fmt::layer().with_target(false))
        .init();

    let connect_options = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    seed(&pool).await.expect("Seeding failed");

    tracing::info!("Database seeding complete.");
    tracing::info!("Login with any seeded user using password: {}", SEED_PASSWORD);
    tracing::info!("Example: testuser@upsc.com / {}", SEED_PASSWORD);
}

async fn seed(pool: &SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
    // Clear existing data (attempts first, then users).
    sqlx::query("DELETE FROM quiz_attempts").execute(pool).await?;
    sqlx::query("DELETE FROM users").execute(pool).await?;
    tracing::info!("Cleared existing users");

    for seed_user in SEED_USERS {
        let hashed_password = hash_password(SEED_PASSWORD)?;

        // Replay the history through the scoring rules so the stored xp,
        // streak and last_quiz_date are consistent with the attempts.
        let mut xp = 0;
        let mut streak = 0;
        let mut last_quiz_date: Option<DateTime<Utc>> = None;

        let user_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, password, xp, streak, created_at)
            VALUES (?1, ?2, ?3, 0, 0, ?4)
            RETURNING id
            "#,
        )
        .bind(seed_user.name)
        .bind(seed_user.email)
        .bind(&hashed_password)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        for attempt in seed_user.attempts {
            let date: DateTime<Utc> = attempt.date.parse()?;
            let percentage =
                ((attempt.score as f64 / attempt.total as f64) * 100.0).round() as i64;
            let xp_earned = xp_for_percentage(percentage);

            sqlx::query(
                r#"
                INSERT INTO quiz_attempts
                    (user_id, subject, score, total, percentage, xp_earned, date)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(user_id)
            .bind(attempt.subject)
            .bind(attempt.score)
            .bind(attempt.total)
            .bind(percentage)
            .bind(xp_earned)
            .bind(date)
            .execute(pool)
            .await?;

            xp += xp_earned;
            streak = update_streak(last_quiz_date, streak, date);
            last_quiz_date = Some(date);
        }

        sqlx::query(
            r#"
            UPDATE users
            SET xp = ?1, streak = ?2, last_quiz_date = ?3
            WHERE id = ?4
            "#,
        )
        .bind(xp)
        .bind(streak)
        .bind(last_quiz_date)
        .bind(user_id)
        .execute(pool)
        .await?;

        tracing::info!(
            "Seeded {} ({}) with {} quiz results",
            seed_user.name,
            seed_user.email,
            seed_user.attempts.len()
        );
    }

    Ok(())
}
