// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Turn GitHub activity into an RPG character sheet.
//!
//! The core is a set of pure functions: contribution streaks, five 0–100
//! attributes, a byte-driven level curve, the language → job table and SVG
//! card builders. Around it sit the I/O edges: the GitHub GraphQL client,
//! caches, asset loading, YAML profile documents and card composition.
//!
//! ```
//! use labyrinth::{compute_level, compute_level_progress};
//!
//! assert_eq!(compute_level(75_000), 3);
//! let progress = compute_level_progress(75_000);
//! assert_eq!(progress.required, 150_000);
//! ```

mod assets;
mod attributes;
mod cache;
mod compose;
mod config;
mod error;
mod github;
mod jobs;
mod level;
mod locale;
mod render;
mod retry;
mod roster;
mod streak;

pub use assets::{AssetStore, FONT_FILE};
pub use attributes::{
    Attribute, GithubStats, RpgAttributes, RpgAttributesMeta, account_age_days, compute_attributes,
    scale_attribute
};
pub use cache::{DEFAULT_TTL_SECS, StatsCache, TtlCache};
pub use compose::{compose_campfire_card, compose_fallback_card, compose_status_card, write_card};
pub use config::{Profile, load_profile, parse_profile};
pub use error::{Error, asset_io_error, card_io_error, io_error};
pub use github::{
    GraphqlEnvelope, GraphqlError, LanguagesUser, StatsUser, UserData, aggregate_language_bytes,
    build_client, fetch_github_stats, fetch_language_bytes, summarize_stats
};
pub use jobs::{
    BONFIRE_SPRITE, Job, JobClass, JobSprites, Pose, language_display_name, normalize_language,
    resolve_job_class, resolve_job_key, resolve_job_sprites, sprite_set
};
pub use level::{
    LEVEL_THRESHOLDS, LevelProgress, MAX_LEVEL, MIN_LEVEL, compute_level, compute_level_progress
};
pub use locale::{Locale, Translator};
pub use render::{
    CANVAS_HEIGHT, CANVAS_WIDTH, CampfireCardData, CampfireCharacter, SEATS, Seat, StatusCardData,
    bar_begin_delay, bar_fill_width, escape_xml, render_campfire_card, render_fallback_card,
    render_status_card
};
pub use retry::{RetryConfig, retry_with_backoff};
pub use roster::{
    RosterEntry, UserCharacter, campfire_party, needs_auto_equip, normalize_language_bytes,
    seat_party, select_auto_equip, sort_collection, sync_roster
};
pub use streak::{
    ContributionDay, ContributionWeek, StreakSummary, compute_streaks, compute_streaks_from_weeks
};
