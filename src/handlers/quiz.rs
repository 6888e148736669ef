// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    gamification::{
        badges::unlocked_badges,
        levels::{level_for, xp_for_current_level, xp_for_next_level, xp_for_percentage},
        rank::rank_for,
        stats::{recent_history, subject_stats},
        streak::update_streak,
    },
    models::{
        attempt::{HistoryResponse, QuizAttempt, QuizResultResponse, StatsResponse, SubmitQuizRequest},
        user::{User, UserSummary},
    },
};

async fn fetch_user(
    executor: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
    email: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password, xp, streak, last_quiz_date, created_at
        FROM users
        WHERE email = ?1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

async fn fetch_history(
    executor: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
    user_id: i64,
) -> Result<Vec<QuizAttempt>, AppError> {
    let history = sqlx::query_as::<_, QuizAttempt>(
        r#"
        SELECT id, user_id, subject, score, total, percentage, xp_earned, date
        FROM quiz_attempts
        WHERE user_id = ?1
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    Ok(history)
}

/// Records a finished quiz for a user.
///
/// Derives percentage, XP award, streak and level, appends the attempt and
/// updates the user row in one transaction. The success response is only
/// built after the transaction commits, so a failed write can never have
/// reported success.
pub async fn submit_quiz(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let email = payload.email.unwrap_or_default().trim().to_lowercase();
    let subject = payload.subject.unwrap_or_default();
    let score = payload.score.unwrap_or_default();
    let total = payload.total.unwrap_or(1);

    let percentage = ((score as f64 / total as f64) * 100.0).round() as i64;
    let xp_earned = xp_for_percentage(percentage);
    let now = chrono::Utc::now();

    let mut tx = pool.begin().await?;

    // The INSERT goes first so this transaction holds the write lock before
    // user state is read; a concurrent submission for the same user queues
    // up here instead of computing streak/xp from a stale row. The
    // INSERT..SELECT also resolves the user id, so an unknown email
    // affects zero rows.
    let inserted = sqlx::query(
        r#"
        INSERT INTO quiz_attempts (user_id, subject, score, total, percentage, xp_earned, date)
        SELECT id, ?2, ?3, ?4, ?5, ?6, ?7 FROM users WHERE email = ?1
        "#,
    )
    .bind(&email)
    .bind(&subject)
    .bind(score)
    .bind(total)
    .bind(percentage)
    .bind(xp_earned)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    if inserted.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found.".to_string()));
    }

    let user = fetch_user(&mut *tx, &email)
        .await?
        .ok_or(AppError::NotFound("User not found.".to_string()))?;

    let new_streak = update_streak(user.last_quiz_date, user.streak, now);
    let new_xp = user.xp + xp_earned;
    let new_level = level_for(new_xp);

    sqlx::query(
        r#"
        UPDATE users
        SET xp = ?1, streak = ?2, last_quiz_date = ?3
        WHERE id = ?4
        "#,
    )
    .bind(new_xp)
    .bind(new_streak)
    .bind(now)
    .bind(user.id)
    .execute(&mut *tx)
    .await?;

    // History including the attempt inserted above, for badge evaluation.
    let history = fetch_history(&mut *tx, user.id).await?;

    tx.commit().await.map_err(|e| {
        tracing::error!("Failed to commit quiz submission: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(QuizResultResponse {
        success: true,
        message: "Quiz result saved.".to_string(),
        xp_earned,
        total_xp: new_xp,
        level: new_level,
        streak: new_streak,
        rank: rank_for(new_level),
        badges: unlocked_badges(&history, new_xp, new_streak),
        xp_for_next: xp_for_next_level(new_level),
        xp_for_current: xp_for_current_level(new_level),
    }))
}

/// Returns a user's full quiz history with the derived gamification view.
pub async fn get_history(
    State(pool): State<SqlitePool>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let email = email.trim().to_lowercase();

    let user = fetch_user(&pool, &email)
        .await?
        .ok_or(AppError::NotFound("User not found.".to_string()))?;

    let history = fetch_history(&pool, user.id).await?;
    let level = level_for(user.xp);

    Ok(Json(HistoryResponse {
        success: true,
        user: UserSummary {
            name: user.name,
            email: user.email,
        },
        xp: user.xp,
        level,
        streak: user.streak,
        rank: rank_for(level),
        badges: unlocked_badges(&history, user.xp, user.streak),
        quiz_history: history,
        xp_for_next: xp_for_next_level(level),
        xp_for_current: xp_for_current_level(level),
    }))
}

/// Returns dashboard statistics: per-subject aggregates, the ten most
/// recent attempts and the derived gamification view.
pub async fn get_stats(
    State(pool): State<SqlitePool>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let email = email.trim().to_lowercase();

    let user = fetch_user(&pool, &email)
        .await?
        .ok_or(AppError::NotFound("User not found.".to_string()))?;

    let history = fetch_history(&pool, user.id).await?;
    let level = level_for(user.xp);

    Ok(Json(StatsResponse {
        success: true,
        user: UserSummary {
            name: user.name,
            email: user.email,
        },
        xp: user.xp,
        level,
        streak: user.streak,
        rank: rank_for(level),
        badges: unlocked_badges(&history, user.xp, user.streak),
        subject_stats: subject_stats(&history),
        recent_history: recent_history(&history),
        total_quizzes: history.len(),
        xp_for_next: xp_for_next_level(level),
        xp_for_current: xp_for_current_level(level),
    }))
}
