// src/models/attempt.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::gamification::{
    badges::Badge,
    rank::Rank,
    stats::SubjectStats,
};
use crate::models::user::UserSummary;

/// Represents one row of the 'quiz_attempts' table.
///
/// Attempts are append-only: once recorded they are never mutated or
/// removed. Row order (insertion order) is the chronological tiebreak for
/// attempts sharing a date.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    #[serde(skip)]
    pub id: i64,

    #[serde(skip)]
    pub user_id: i64,

    pub subject: String,

    /// Raw number of correct answers.
    pub score: i64,

    /// Number of questions in the quiz.
    pub total: i64,

    /// `round(score / total * 100)`, fixed at submission time.
    pub percentage: i64,

    pub xp_earned: i64,

    pub date: chrono::DateTime<chrono::Utc>,
}

/// DTO for submitting a finished quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(
        required(message = "Missing required fields."),
        email(message = "A valid email address is required.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Missing required fields."),
        length(min = 1, max = 100, message = "Subject must not be empty.")
    )]
    pub subject: Option<String>,
    #[validate(
        required(message = "Missing required fields."),
        range(min = 0, message = "Score must not be negative.")
    )]
    pub score: Option<i64>,
    #[validate(
        required(message = "Missing required fields."),
        range(min = 1, message = "Total must be greater than zero.")
    )]
    pub total: Option<i64>,
}

/// Response for a recorded quiz submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultResponse {
    pub success: bool,
    pub message: String,
    pub xp_earned: i64,
    #[serde(rename = "totalXP")]
    pub total_xp: i64,
    pub level: i64,
    pub streak: i64,
    pub rank: Rank,
    pub badges: Vec<Badge>,
    pub xp_for_next: i64,
    pub xp_for_current: i64,
}

/// Full quiz history of a user, with the derived gamification view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    pub user: UserSummary,
    pub xp: i64,
    pub level: i64,
    pub streak: i64,
    pub rank: Rank,
    pub badges: Vec<Badge>,
    pub quiz_history: Vec<QuizAttempt>,
    pub xp_for_next: i64,
    pub xp_for_current: i64,
}

/// Dashboard statistics: per-subject aggregates plus recent activity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    pub user: UserSummary,
    pub xp: i64,
    pub level: i64,
    pub streak: i64,
    pub rank: Rank,
    pub badges: Vec<Badge>,
    pub subject_stats: BTreeMap<&'static str, SubjectStats>,
    pub recent_history: Vec<QuizAttempt>,
    pub total_quizzes: usize,
    pub xp_for_next: i64,
    pub xp_for_current: i64,
}
