// src/gamification/rank.rs

use serde::Serialize;

/// Cosmetic rank tier derived from the level. Pure display data, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rank {
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

pub fn rank_for(level: i64) -> Rank {
    if level >= 10 {
        Rank { name: "Platinum", color: "#8ecae6", icon: "💠" }
    } else if level >= 7 {
        Rank { name: "Gold", color: "#f39c12", icon: "🥇" }
    } else if level >= 4 {
        Rank { name: "Silver", color: "#95a5a6", icon: "🥈" }
    } else {
        Rank { name: "Bronze", color: "#cd7f32", icon: "🥉" }
    }
}
