// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    gamification::{
        badges::unlocked_badges,
        levels::{level_for, xp_for_current_level, xp_for_next_level},
        rank::rank_for,
    },
    models::{
        attempt::QuizAttempt,
        user::{LoginRequest, RegisterRequest, User},
    },
    utils::hash::{hash_password, verify_password},
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it. The email is
/// lowercased so it acts as a case-insensitive identity key.
/// Returns 201 Created, 409 if the email is already taken.
pub async fn register(
    State(pool): State<SqlitePool>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let name = payload.name.unwrap_or_default();
    let email = payload.email.unwrap_or_default().trim().to_lowercase();
    let password = payload.password.unwrap_or_default();

    let hashed_password = hash_password(&password)?;

    sqlx::query(
        r#"
        INSERT INTO users (name, email, password, xp, streak, created_at)
        VALUES (?1, ?2, ?3, 0, 0, ?4)
        "#,
    )
    .bind(&name)
    .bind(&email)
    .bind(&hashed_password)
    .bind(chrono::Utc::now())
    .execute(&pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("An account with this email already exists.".to_string())
        }
        _ => {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": format!("Welcome {}! Registration successful.", name),
            "user": { "name": name, "email": email },
        })),
    ))
}

/// Authenticates a user.
///
/// Verifies the email and password against the database; unknown email and
/// wrong password return the same message so neither case is
/// distinguishable. On success the response carries the full derived
/// profile (level, rank, badges, history, level-progress bounds).
pub async fn login(
    State(pool): State<SqlitePool>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let email = payload.email.unwrap_or_default().trim().to_lowercase();
    let password = payload.password.unwrap_or_default();

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password, xp, streak, last_quiz_date, created_at
        FROM users
        WHERE email = ?1
        "#,
    )
    .bind(&email)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let user = user.ok_or(AppError::AuthError("Invalid email or password.".to_string()))?;

    let is_valid = verify_password(&password, &user.password)?;

    if !is_valid {
        return Err(AppError::AuthError("Invalid email or password.".to_string()));
    }

    let history = sqlx::query_as::<_, QuizAttempt>(
        r#"
        SELECT id, user_id, subject, score, total, percentage, xp_earned, date
        FROM quiz_attempts
        WHERE user_id = ?1
        ORDER BY id
        "#,
    )
    .bind(user.id)
    .fetch_all(&pool)
    .await?;

    let level = level_for(user.xp);

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "user": {
            "name": user.name,
            "email": user.email,
            "xp": user.xp,
            "level": level,
            "streak": user.streak,
            "rank": rank_for(level),
            "badges": unlocked_badges(&history, user.xp, user.streak),
            "quizHistory": history,
            "xpForNext": xp_for_next_level(level),
            "xpForCurrent": xp_for_current_level(level),
        },
    })))
}
