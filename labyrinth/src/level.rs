// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Character level engine.
//!
//! Levels are a step function over the cumulative number of bytes a user has
//! written in a language. Four ascending thresholds split the byte axis into
//! five brackets; reaching a threshold promotes the character to the next
//! level. The engine also reports progress inside the current bracket so the
//! dashboard can draw experience bars.

use serde::Serialize;

/// Ascending byte thresholds: `[Lv.1→2, Lv.2→3, Lv.3→4, Lv.4→5]`.
pub const LEVEL_THRESHOLDS: [u64; 4] = [10_000, 50_000, 200_000, 1_000_000];

/// Lowest reachable level.
pub const MIN_LEVEL: u8 = 1;

/// Highest reachable level.
pub const MAX_LEVEL: u8 = 5;

/// Progress of a character inside its current level bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    /// Current level in `1..=5`.
    pub level:    u8,
    /// Bytes earned within the current bracket. At max level this is the
    /// full byte count.
    pub current:  u64,
    /// Bytes spanned by the current bracket, `0` at max level.
    pub required: u64,
    /// Progress ratio in `[0, 1]`.
    pub ratio:    f64,
    /// Whether the character already reached the final level.
    pub is_max:   bool
}

/// Maps a cumulative byte count to a level in `1..=5`.
///
/// A byte count at or above a threshold reaches the level that threshold
/// unlocks; anything below the first threshold is level 1.
///
/// # Examples
///
/// ```
/// use labyrinth::compute_level;
///
/// assert_eq!(compute_level(0), 1);
/// assert_eq!(compute_level(10_000), 2);
/// assert_eq!(compute_level(75_000), 3);
/// assert_eq!(compute_level(5_000_000), 5);
/// ```
pub fn compute_level(total_bytes: u64) -> u8 {
    let reached = LEVEL_THRESHOLDS
        .iter()
        .take_while(|threshold| total_bytes >= **threshold)
        .count();
    MIN_LEVEL + reached as u8
}

/// Computes the level together with the progress inside its bracket.
///
/// # Examples
///
/// ```
/// use labyrinth::compute_level_progress;
///
/// let progress = compute_level_progress(75_000);
/// assert_eq!(progress.level, 3);
/// assert_eq!(progress.current, 25_000);
/// assert_eq!(progress.required, 150_000);
/// assert!(!progress.is_max);
/// ```
pub fn compute_level_progress(total_bytes: u64) -> LevelProgress {
    let level = compute_level(total_bytes);

    if level >= MAX_LEVEL {
        return LevelProgress {
            level:    MAX_LEVEL,
            current:  total_bytes,
            required: 0,
            ratio:    1.0,
            is_max:   true
        };
    }

    let lower = bracket_floor(level);
    let upper = LEVEL_THRESHOLDS[usize::from(level - MIN_LEVEL)];

    let current = total_bytes - lower;
    let required = upper - lower;
    let ratio = if required > 0 {
        (current as f64 / required as f64).min(1.0)
    } else {
        1.0
    };

    LevelProgress {
        level,
        current,
        required,
        ratio,
        is_max: false
    }
}

fn bracket_floor(level: u8) -> u64 {
    match level {
        0 | 1 => 0,
        other => LEVEL_THRESHOLDS[usize::from(other - 2)]
    }
}
