// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Contribution streak calculation over a GitHub contribution calendar.
//!
//! The calendar arrives as weeks of days in no guaranteed order. Days are
//! flattened, ordered most recent first, and walked once. A zero-count entry
//! for the current day is skipped so that a streak is not considered broken
//! before the day is over.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Contribution count for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    /// Calendar day in ISO format.
    pub date:               NaiveDate,
    /// Number of contributions recorded on that day.
    pub contribution_count: u32
}

impl ContributionDay {
    /// Creates a contribution day entry.
    pub fn new(date: NaiveDate, contribution_count: u32) -> Self {
        Self {
            date,
            contribution_count
        }
    }
}

/// One week column of the contribution calendar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    /// Days belonging to the week.
    #[serde(default)]
    pub contribution_days: Vec<ContributionDay>
}

/// Current and longest streak lengths in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    /// Active days counted back from the present.
    pub current_streak: u32,
    /// Longest run of active days in the window.
    pub longest_streak: u32
}

/// Computes streaks from an unordered list of contribution days.
///
/// `today` is the current UTC calendar date; it is passed in so the
/// computation stays pure.
///
/// A zero-count day (after the optional grace skip for today) fixes the
/// current streak to the run that precedes it. A current streak of zero is
/// treated as not yet fixed: a later zero-count day, or the end of the walk,
/// fills it with the run seen at that point. `current_streak <= longest_streak`
/// is the intended relationship, but gapped calendars without explicit
/// zero-count days are not corrected for.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use labyrinth::{ContributionDay, compute_streaks};
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
/// let days = vec![
///     ContributionDay::new(today, 0),
///     ContributionDay::new(today.pred_opt().unwrap(), 3),
/// ];
/// let summary = compute_streaks(&days, today);
/// assert_eq!(summary.current_streak, 1);
/// ```
pub fn compute_streaks(days: &[ContributionDay], today: NaiveDate) -> StreakSummary {
    let mut ordered = days.to_vec();
    ordered.sort_by(|left, right| right.date.cmp(&left.date));

    let mut walk = ordered.iter().peekable();
    while walk
        .next_if(|day| day.date == today && day.contribution_count == 0)
        .is_some()
    {}

    let mut current = 0u32;
    let mut longest = 0u32;
    let mut running = 0u32;

    for day in walk {
        if day.contribution_count > 0 {
            running += 1;
            continue;
        }

        if current == 0 {
            current = running;
        }
        longest = longest.max(running);
        running = 0;
    }

    if current == 0 {
        current = running;
    }

    StreakSummary {
        current_streak: current,
        longest_streak: longest.max(running)
    }
}

/// Flattens calendar weeks and computes streaks over all their days.
pub fn compute_streaks_from_weeks(weeks: &[ContributionWeek], today: NaiveDate) -> StreakSummary {
    let days: Vec<ContributionDay> = weeks
        .iter()
        .flat_map(|week| week.contribution_days.iter().copied())
        .collect();
    compute_streaks(&days, today)
}
