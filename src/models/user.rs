// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
///
/// `level`, `rank` and `badges` are intentionally not stored: they are pure
/// functions of `xp`, `streak` and the quiz history, recomputed on every
/// read so the stored record can never drift from the derived view.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub name: String,

    /// Unique login identity, stored lowercased (case-insensitive).
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    /// Accumulated experience points. Only ever increases.
    pub xp: i64,

    /// Consecutive-day activity streak.
    pub streak: i64,

    /// Timestamp of the most recent quiz submission, if any.
    pub last_quiz_date: Option<chrono::DateTime<chrono::Utc>>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Public identity subset embedded in quiz/stats responses.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "All fields are required."),
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "All fields are required."),
        email(message = "A valid email address is required.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "All fields are required."),
        length(
            min = 4,
            max = 128,
            message = "Password length must be between 4 and 128 characters."
        )
    )]
    pub password: Option<String>,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "Email and password are required."))]
    pub email: Option<String>,
    #[validate(required(message = "Email and password are required."))]
    pub password: Option<String>,
}
