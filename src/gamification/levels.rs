// src/gamification/levels.rs

/// Cumulative XP required to reach each level, indexed by level - 1.
/// Level 1 starts at 0 XP; level 10 is terminal (XP past the top threshold
/// no longer changes the level).
pub const LEVEL_THRESHOLDS: [i64; 10] = [0, 200, 500, 1000, 2000, 3500, 5500, 8000, 11000, 15000];

pub const MAX_LEVEL: i64 = 10;

/// The highest level whose threshold is covered by `xp`.
pub fn level_for(xp: i64) -> i64 {
    for (i, threshold) in LEVEL_THRESHOLDS.iter().enumerate().rev() {
        if xp >= *threshold {
            return (i + 1) as i64;
        }
    }
    1
}

/// Threshold to reach `level + 1`, clamped to the top threshold once the
/// level cap is reached. At level 10 this equals the level-10 threshold;
/// callers treat that level as terminal.
pub fn xp_for_next_level(level: i64) -> i64 {
    LEVEL_THRESHOLDS
        .get(level.max(0) as usize)
        .copied()
        .unwrap_or(LEVEL_THRESHOLDS[LEVEL_THRESHOLDS.len() - 1])
}

/// Threshold required to have reached `level`; 0 for level 1.
pub fn xp_for_current_level(level: i64) -> i64 {
    LEVEL_THRESHOLDS
        .get((level - 1).max(0) as usize)
        .copied()
        .unwrap_or(0)
}

/// Banded XP award for a quiz percentage score.
/// The percentage must already be rounded to the nearest integer.
pub fn xp_for_percentage(percentage: i64) -> i64 {
    if percentage >= 80 {
        100
    } else if percentage >= 60 {
        70
    } else if percentage >= 40 {
        40
    } else {
        20
    }
}
