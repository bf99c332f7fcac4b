// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Character roster derived from per-language byte counts.
//!
//! Every user owns one character per known job. Language characters unlock
//! once the user has written any bytes in that language; the novice is the
//! starter character and stays unlocked only while nothing else is.

use std::{cmp::Ordering, collections::BTreeMap};

use serde::{Deserialize, Serialize};

use crate::{
    jobs::{Job, normalize_language},
    level::{MIN_LEVEL, compute_level},
    render::{SEATS, Seat}
};

/// A character as stored for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCharacter {
    /// Storage identifier.
    pub id:          String,
    /// Job table key, e.g. `rust` or `csharp`.
    pub language:    String,
    pub level:       u8,
    pub total_bytes: u64,
    pub is_locked:   bool
}

/// Roster row computed from language bytes, before storage assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub job:         Job,
    pub level:       u8,
    pub total_bytes: u64,
    pub is_locked:   bool
}

impl RosterEntry {
    /// Attaches a storage id, producing a [`UserCharacter`].
    pub fn into_character(self, id: impl Into<String>) -> UserCharacter {
        UserCharacter {
            id:          id.into(),
            language:    self.job.key().to_owned(),
            level:       self.level,
            total_bytes: self.total_bytes,
            is_locked:   self.is_locked
        }
    }
}

/// Folds raw GitHub language names into the job key space, summing bytes of
/// names that normalize to the same key.
///
/// ```
/// use std::collections::BTreeMap;
///
/// use labyrinth::normalize_language_bytes;
///
/// let raw = BTreeMap::from([("C#".to_owned(), 10), ("c#".to_owned(), 5)]);
/// assert_eq!(normalize_language_bytes(&raw)["csharp"], 15);
/// ```
pub fn normalize_language_bytes(raw: &BTreeMap<String, u64>) -> BTreeMap<String, u64> {
    let mut normalized = BTreeMap::new();
    for (language, bytes) in raw {
        let entry = normalized
            .entry(normalize_language(language).into_owned())
            .or_insert(0u64);
        *entry = entry.saturating_add(*bytes);
    }
    normalized
}

/// Builds one roster entry per job except `default`.
///
/// Language names are normalized first; bytes in languages without a job do
/// not unlock anything but still count as activity for the novice.
pub fn sync_roster(language_bytes: &BTreeMap<String, u64>) -> Vec<RosterEntry> {
    let normalized = normalize_language_bytes(language_bytes);
    let has_activity = normalized.values().any(|bytes| *bytes > 0);

    Job::ALL
        .into_iter()
        .filter(|job| *job != Job::Default)
        .map(|job| {
            if job == Job::Novice {
                return RosterEntry {
                    job,
                    level: MIN_LEVEL,
                    total_bytes: 0,
                    is_locked: has_activity
                };
            }

            let total_bytes = normalized.get(job.key()).copied().unwrap_or(0);
            RosterEntry {
                job,
                level: if total_bytes > 0 {
                    compute_level(total_bytes)
                } else {
                    MIN_LEVEL
                },
                total_bytes,
                is_locked: total_bytes == 0
            }
        })
        .collect()
}

/// Ranking used for auto-equip and the campfire: level, then bytes, both
/// descending.
fn by_strength(left: &UserCharacter, right: &UserCharacter) -> Ordering {
    right
        .level
        .cmp(&left.level)
        .then_with(|| right.total_bytes.cmp(&left.total_bytes))
}

/// Whether a new character must be equipped: nothing is equipped or the
/// equipped character became locked.
pub fn needs_auto_equip(equipped: Option<&UserCharacter>) -> bool {
    equipped.is_none_or(|character| character.is_locked)
}

/// Picks the strongest unlocked character.
pub fn select_auto_equip(characters: &[UserCharacter]) -> Option<&UserCharacter> {
    characters
        .iter()
        .filter(|character| !character.is_locked)
        .min_by(|left, right| by_strength(left, right))
}

/// Orders a collection for display: unlocked first, then level and bytes
/// descending. The sort is stable.
pub fn sort_collection(characters: &mut [UserCharacter]) {
    characters.sort_by(|left, right| {
        left.is_locked
            .cmp(&right.is_locked)
            .then_with(|| by_strength(left, right))
    });
}

/// Unlocked characters ranked by level, at most one per seat.
pub fn campfire_party(characters: &[UserCharacter]) -> Vec<&UserCharacter> {
    let mut unlocked: Vec<&UserCharacter> = characters
        .iter()
        .filter(|character| !character.is_locked)
        .collect();
    unlocked.sort_by(|left, right| right.level.cmp(&left.level));
    unlocked.truncate(SEATS.len());
    unlocked
}

/// Pairs each party member with its seat.
pub fn seat_party<'a>(party: &[&'a UserCharacter]) -> Vec<(&'a UserCharacter, Seat)> {
    party
        .iter()
        .zip(SEATS)
        .map(|(character, seat)| (*character, seat))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs
            .iter()
            .map(|(language, count)| ((*language).to_owned(), *count))
            .collect()
    }

    fn character(language: &str, level: u8, total_bytes: u64, is_locked: bool) -> UserCharacter {
        UserCharacter {
            id: format!("id-{language}"),
            language: language.to_owned(),
            level,
            total_bytes,
            is_locked
        }
    }

    fn entry(roster: &[RosterEntry], job: Job) -> &RosterEntry {
        roster
            .iter()
            .find(|entry| entry.job == job)
            .expect("job present in roster")
    }

    #[test]
    fn roster_covers_every_job_but_default() {
        let roster = sync_roster(&BTreeMap::new());
        assert_eq!(roster.len(), Job::ALL.len() - 1);
        assert!(roster.iter().all(|entry| entry.job != Job::Default));
    }

    #[test]
    fn new_user_only_has_the_novice() {
        let roster = sync_roster(&BTreeMap::new());
        let unlocked: Vec<Job> = roster
            .iter()
            .filter(|entry| !entry.is_locked)
            .map(|entry| entry.job)
            .collect();
        assert_eq!(unlocked, vec![Job::Novice]);
    }

    #[test]
    fn languages_unlock_with_levels() {
        let roster = sync_roster(&bytes(&[("Rust", 75_000), ("C#", 4_000), ("c#", 8_000)]));
        let rust = entry(&roster, Job::Rust);
        assert_eq!(rust.level, 3);
        assert!(!rust.is_locked);

        let csharp = entry(&roster, Job::CSharp);
        assert_eq!(csharp.total_bytes, 12_000);
        assert_eq!(csharp.level, 2);

        assert!(entry(&roster, Job::Novice).is_locked);
        assert!(entry(&roster, Job::Go).is_locked);
        assert_eq!(entry(&roster, Job::Go).level, 1);
    }

    #[test]
    fn unknown_languages_lock_the_novice_without_unlocking_jobs() {
        let roster = sync_roster(&bytes(&[("COBOL", 500)]));
        assert!(roster.iter().all(|entry| entry.is_locked));
    }

    #[test]
    fn auto_equip_prefers_level_then_bytes() {
        let characters = vec![
            character("go", 3, 60_000, false),
            character("rust", 3, 90_000, false),
            character("java", 5, 2_000_000, true),
        ];
        let best = select_auto_equip(&characters).expect("an unlocked character");
        assert_eq!(best.language, "rust");
    }

    #[test]
    fn auto_equip_is_needed_for_missing_or_locked() {
        assert!(needs_auto_equip(None));
        assert!(needs_auto_equip(Some(&character("go", 1, 0, true))));
        assert!(!needs_auto_equip(Some(&character("go", 2, 10_000, false))));
    }

    #[test]
    fn collection_lists_unlocked_first() {
        let mut characters = vec![
            character("java", 1, 0, true),
            character("go", 2, 20_000, false),
            character("rust", 4, 300_000, false),
            character("python", 2, 30_000, false),
        ];
        sort_collection(&mut characters);
        let order: Vec<&str> = characters.iter().map(|c| c.language.as_str()).collect();
        assert_eq!(order, ["rust", "python", "go", "java"]);
    }

    #[test]
    fn campfire_party_is_capped_at_four() {
        let characters = vec![
            character("go", 2, 20_000, false),
            character("rust", 5, 2_000_000, false),
            character("java", 1, 0, true),
            character("python", 3, 60_000, false),
            character("ruby", 4, 300_000, false),
            character("php", 1, 100, false),
        ];
        let party = campfire_party(&characters);
        let order: Vec<&str> = party.iter().map(|c| c.language.as_str()).collect();
        assert_eq!(order, ["rust", "ruby", "python", "go"]);

        let seated = seat_party(&party);
        assert_eq!(seated.len(), 4);
        assert_eq!(seated[0].1, SEATS[0]);
        assert_eq!(seated[3].0.language, "go");
    }

    #[test]
    fn roster_entry_becomes_user_character() {
        let roster = sync_roster(&bytes(&[("Rust", 10_000)]));
        let rust = entry(&roster, Job::Rust).clone().into_character("abc");
        assert_eq!(rust.id, "abc");
        assert_eq!(rust.language, "rust");
        assert_eq!(rust.level, 2);
    }
}
