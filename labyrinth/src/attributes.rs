// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Mapping of raw GitHub statistics onto RPG attributes.
//!
//! Each attribute is a linear normalization of one raw metric against a cap
//! that defines what a score of 100 means. Values past the cap clamp at 100.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Immutable snapshot of a user's GitHub statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubStats {
    /// Stars across owned repositories.
    pub total_stars:         u64,
    /// Commit contributions including restricted ones.
    pub total_commits:       u64,
    /// Pull requests opened by the user.
    #[serde(rename = "totalPRs")]
    pub total_prs:           u64,
    /// Issues opened by the user.
    pub total_issues:        u64,
    /// Most common primary language among owned repositories.
    #[serde(default)]
    pub top_language:        Option<String>,
    /// Current contribution streak in days.
    pub current_streak:      u32,
    /// Longest contribution streak in days.
    pub longest_streak:      u32,
    /// Follower count.
    pub followers:           u64,
    /// Account creation timestamp.
    pub created_at:          DateTime<Utc>,
    /// Contributions over the trailing year.
    pub total_contributions: u64,
    /// Repositories the user committed to over the trailing year.
    pub contributed_repos:   u64
}

/// The five attribute kinds in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Vitality, driven by the current streak.
    Vit,
    /// Charisma, driven by followers.
    Cha,
    /// Wisdom, driven by account age.
    Wis,
    /// Strength, driven by yearly contributions.
    Str,
    /// Agility, driven by contributed repositories.
    Agi
}

impl Attribute {
    /// All attributes in the order they are displayed.
    pub const ALL: [Attribute; 5] = [
        Attribute::Vit,
        Attribute::Cha,
        Attribute::Wis,
        Attribute::Str,
        Attribute::Agi
    ];

    /// Upper-case label shown on cards.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Vit => "VIT",
            Attribute::Cha => "CHA",
            Attribute::Wis => "WIS",
            Attribute::Str => "STR",
            Attribute::Agi => "AGI"
        }
    }

    /// Raw value that maps to a score of 100.
    pub fn cap(self) -> u64 {
        match self {
            Attribute::Vit => 365,
            Attribute::Cha => 1_000,
            Attribute::Wis => 3_650,
            Attribute::Str => 5_000,
            Attribute::Agi => 50
        }
    }

    /// Bar color used by the card renderer.
    pub fn color(self) -> &'static str {
        match self {
            Attribute::Vit => "#c2783c",
            Attribute::Cha => "#d4a843",
            Attribute::Wis => "#5b8abf",
            Attribute::Str => "#bf4545",
            Attribute::Agi => "#4dab6d"
        }
    }
}

/// Normalized attribute scores, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RpgAttributes {
    pub vit: u8,
    pub cha: u8,
    pub wis: u8,
    pub str: u8,
    pub agi: u8
}

impl RpgAttributes {
    /// Returns the score for a single attribute.
    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Vit => self.vit,
            Attribute::Cha => self.cha,
            Attribute::Wis => self.wis,
            Attribute::Str => self.str,
            Attribute::Agi => self.agi
        }
    }
}

/// Attributes plus the raw values that drive the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpgAttributesMeta {
    pub attributes:       RpgAttributes,
    pub current_streak:   u32,
    pub longest_streak:   u32,
    /// Whole days between account creation and `now`.
    pub account_age_days: i64,
    /// `true` while the current streak is at least one day.
    pub is_kindled:       bool
}

/// Scales `raw` against `cap` into `0..=100`, rounding half up.
pub fn scale_attribute(raw: i64, cap: u64) -> u8 {
    let scaled = (raw as f64 / cap as f64 * 100.0).round();
    scaled.clamp(0.0, 100.0) as u8
}

/// Whole days elapsed between `created_at` and `now`, floored.
pub fn account_age_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

/// Derives RPG attributes from a statistics snapshot.
///
/// `now` anchors the account-age computation; the result drifts with it.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use labyrinth::{GithubStats, compute_attributes};
///
/// let stats = GithubStats {
///     total_stars:         0,
///     total_commits:       0,
///     total_prs:           0,
///     total_issues:        0,
///     top_language:        None,
///     current_streak:      0,
///     longest_streak:      0,
///     followers:           2_000,
///     created_at:          Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
///     total_contributions: 0,
///     contributed_repos:   0
/// };
/// let meta = compute_attributes(&stats, Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
/// assert_eq!(meta.attributes.cha, 100);
/// assert_eq!(meta.account_age_days, 366);
/// ```
pub fn compute_attributes(stats: &GithubStats, now: DateTime<Utc>) -> RpgAttributesMeta {
    let age_days = account_age_days(stats.created_at, now);
    let saturating = |value: u64| i64::try_from(value).unwrap_or(i64::MAX);

    let attributes = RpgAttributes {
        vit: scale_attribute(i64::from(stats.current_streak), Attribute::Vit.cap()),
        cha: scale_attribute(saturating(stats.followers), Attribute::Cha.cap()),
        wis: scale_attribute(age_days, Attribute::Wis.cap()),
        str: scale_attribute(saturating(stats.total_contributions), Attribute::Str.cap()),
        agi: scale_attribute(saturating(stats.contributed_repos), Attribute::Agi.cap())
    };

    RpgAttributesMeta {
        attributes,
        current_streak: stats.current_streak,
        longest_streak: stats.longest_streak,
        account_age_days: age_days,
        is_kindled: stats.current_streak >= 1
    }
}
