// src/gamification/streak.rs

use chrono::{DateTime, Utc};

/// Updates the consecutive-day streak after a quiz submission.
///
/// Day granularity is elapsed wall-clock time, not calendar-date
/// boundaries: a full 24h must pass before a day counts as crossed.
/// The branch order (0, then 1, else reset) is part of the contract.
pub fn update_streak(
    last_quiz_date: Option<DateTime<Utc>>,
    current_streak: i64,
    now: DateTime<Utc>,
) -> i64 {
    let Some(last) = last_quiz_date else {
        // First-ever quiz.
        return 1;
    };

    // Euclidean division floors: 23h elapsed is 0 days, and a last date
    // even 1ms in the future is -1 days, never 0.
    let diff_days = (now - last).num_milliseconds().div_euclid(86_400_000);

    if diff_days == 0 {
        current_streak
    } else if diff_days == 1 {
        current_streak + 1
    } else {
        1
    }
}
