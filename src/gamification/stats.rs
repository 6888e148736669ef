// src/gamification/stats.rs

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::attempt::QuizAttempt;

/// The fixed subject set the dashboard reports on.
pub const SUBJECTS: [&str; 5] = ["Geography", "History", "Polity", "Economics", "Science"];

/// How many attempts `recent_history` returns.
pub const RECENT_HISTORY_LIMIT: usize = 10;

/// Direction of change between a subject's latest attempt and the one
/// before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Same,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubjectStats {
    pub attempts: usize,
    pub best: i64,
    pub latest: i64,
    pub trend: Trend,
}

/// Per-subject aggregates over the full quiz history.
///
/// Attempts are stable-sorted by date, so two attempts on the same
/// timestamp keep their insertion order. A subject with a single attempt
/// always reports `trend: same`.
pub fn subject_stats(history: &[QuizAttempt]) -> BTreeMap<&'static str, SubjectStats> {
    SUBJECTS
        .iter()
        .map(|&subject| {
            let mut attempts: Vec<&QuizAttempt> =
                history.iter().filter(|a| a.subject == subject).collect();

            let stats = if attempts.is_empty() {
                SubjectStats {
                    attempts: 0,
                    best: 0,
                    latest: 0,
                    trend: Trend::None,
                }
            } else {
                attempts.sort_by_key(|a| a.date);
                let best = attempts.iter().map(|a| a.percentage).max().unwrap_or(0);
                let latest = attempts[attempts.len() - 1].percentage;
                let prev = if attempts.len() > 1 {
                    attempts[attempts.len() - 2].percentage
                } else {
                    latest
                };
                let trend = if latest > prev {
                    Trend::Up
                } else if latest < prev {
                    Trend::Down
                } else {
                    Trend::Same
                };
                SubjectStats {
                    attempts: attempts.len(),
                    best,
                    latest,
                    trend,
                }
            };

            (subject, stats)
        })
        .collect()
}

/// The most recent attempts across all subjects, newest first.
pub fn recent_history(history: &[QuizAttempt]) -> Vec<QuizAttempt> {
    let mut recent = history.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(RECENT_HISTORY_LIMIT);
    recent
}
