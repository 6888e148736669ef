// src/gamification/badges.rs

use std::collections::HashSet;

use serde::Serialize;

use crate::models::attempt::QuizAttempt;

/// A named achievement. Badges are derived data: the set is recomputed from
/// the quiz history on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub icon: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Evaluates every badge rule against the user's history and current stats.
/// Each rule is independent; the result keeps the fixed rule order.
pub fn unlocked_badges(history: &[QuizAttempt], xp: i64, streak: i64) -> Vec<Badge> {
    let total_quizzes = history.len();
    // Distinct subjects use exact, case-sensitive matching on the label
    // recorded at attempt time.
    let subjects: HashSet<&str> = history.iter().map(|a| a.subject.as_str()).collect();
    let has_excellent = history.iter().any(|a| a.percentage >= 80);
    let has_perfect = history.iter().any(|a| a.percentage == 100);

    let mut badges = Vec::new();
    if total_quizzes >= 1 {
        badges.push(Badge {
            id: "first",
            icon: "🎯",
            name: "First Quiz",
            description: "Completed your first quiz",
        });
    }
    if total_quizzes >= 5 {
        badges.push(Badge {
            id: "quizzer",
            icon: "📝",
            name: "Quizzer",
            description: "5 quizzes completed",
        });
    }
    if total_quizzes >= 20 {
        badges.push(Badge {
            id: "dedicated",
            icon: "💪",
            name: "Dedicated",
            description: "20 quizzes completed",
        });
    }
    if has_excellent {
        badges.push(Badge {
            id: "scholar",
            icon: "🏆",
            name: "Scholar",
            description: "Scored 80%+ in a quiz",
        });
    }
    if has_perfect {
        badges.push(Badge {
            id: "perfect",
            icon: "⭐",
            name: "Perfect Score",
            description: "Scored 100% in a quiz",
        });
    }
    if subjects.len() >= 3 {
        badges.push(Badge {
            id: "explorer",
            icon: "🌍",
            name: "Explorer",
            description: "Tried 3+ subjects",
        });
    }
    if subjects.len() >= 5 {
        badges.push(Badge {
            id: "allrounder",
            icon: "🎓",
            name: "All-Rounder",
            description: "Tried all 5 subjects",
        });
    }
    if streak >= 3 {
        badges.push(Badge {
            id: "streak3",
            icon: "🔥",
            name: "On Fire",
            description: "3-day streak",
        });
    }
    if streak >= 7 {
        badges.push(Badge {
            id: "streak7",
            icon: "⚡",
            name: "Lightning",
            description: "7-day streak",
        });
    }
    if xp >= 1000 {
        badges.push(Badge {
            id: "xp1k",
            icon: "💎",
            name: "Diamond Mind",
            description: "1000+ XP earned",
        });
    }
    badges
}
