// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Profile documents describing one adventurer.
//!
//! A profile is the YAML counterpart of a stored user: the GitHub login, the
//! preferred locale, the equipped character and the cached GitHub snapshot.
//! Every field except the username is optional so a freshly registered user
//! can be described before any data was fetched.

use std::{collections::BTreeMap, fs, path::Path};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    attributes::GithubStats,
    error::{Error, io_error},
    jobs::normalize_language,
    roster::{UserCharacter, needs_auto_equip, select_auto_equip, sync_roster}
};

const LOGIN_PATTERN: &str = r"^[A-Za-z0-9](?:[A-Za-z0-9]|-[A-Za-z0-9]){0,38}$";

fn default_locale() -> String {
    "en".to_owned()
}

/// Profile document for one user.
///
/// # Examples
///
/// ```
/// use labyrinth::parse_profile;
///
/// let yaml = r#"
/// login: octocat
/// lang: ko
/// language-bytes:
///   Rust: 120000
/// "#;
/// let profile = parse_profile(yaml).expect("valid profile");
/// assert_eq!(profile.username, "octocat");
/// assert_eq!(profile.locale, "ko");
/// assert_eq!(profile.language_bytes["Rust"], 120_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// GitHub login.
    #[serde(alias = "user", alias = "login")]
    pub username: String,

    /// Language tag for card copy.
    #[serde(default = "default_locale", alias = "lang")]
    pub locale: String,

    /// Job key of the equipped character. Missing or locked selections are
    /// replaced by the strongest unlocked character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipped: Option<String>,

    /// Cached GitHub snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<GithubStats>,

    /// Raw per-language byte counts as reported by GitHub.
    #[serde(
        default,
        alias = "languageBytes",
        alias = "language-bytes",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub language_bytes: BTreeMap<String, u64>
}

impl Profile {
    /// Creates an empty profile for `username`.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username:       username.into(),
            locale:         default_locale(),
            equipped:       None,
            stats:          None,
            language_bytes: BTreeMap::new()
        }
    }

    /// Checks the username grammar and the locale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] describing the first violation.
    pub fn validate(&self) -> Result<(), Error> {
        let pattern = Regex::new(LOGIN_PATTERN)
            .map_err(|e| Error::validation(format!("invalid login pattern: {e}")))?;

        let username = self.username.trim();
        if username.is_empty() {
            return Err(Error::validation("username must not be empty"));
        }
        if !pattern.is_match(username) {
            return Err(Error::validation(format!(
                "username '{username}' is not a valid GitHub login"
            )));
        }
        if self.locale.trim().is_empty() {
            return Err(Error::validation("locale must not be empty"));
        }
        Ok(())
    }

    /// Character collection derived from the language bytes. Characters are
    /// identified by their job key.
    pub fn characters(&self) -> Vec<UserCharacter> {
        sync_roster(&self.language_bytes)
            .into_iter()
            .map(|entry| {
                let id = entry.job.key();
                entry.into_character(id)
            })
            .collect()
    }

    /// The equipped character, auto-equipping when the selection is missing
    /// or locked.
    pub fn equipped_character<'a>(
        &self,
        characters: &'a [UserCharacter]
    ) -> Option<&'a UserCharacter> {
        let selected = self.equipped.as_deref().and_then(|key| {
            let key = normalize_language(key.trim());
            characters.iter().find(|character| character.language == key)
        });

        if needs_auto_equip(selected) {
            select_auto_equip(characters)
        } else {
            selected
        }
    }

    /// Serializes the profile as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when serialization fails.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Parses and validates a profile document.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed YAML and [`Error::Validation`] for
/// invalid field values.
pub fn parse_profile(contents: &str) -> Result<Profile, Error> {
    let mut profile: Profile = serde_yaml::from_str(contents)?;
    profile.username = profile.username.trim().to_owned();
    profile.locale = profile.locale.trim().to_owned();
    profile.validate()?;
    Ok(profile)
}

/// Reads a profile document from disk.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, otherwise the errors of
/// [`parse_profile`].
pub fn load_profile(path: &Path) -> Result<Profile, Error> {
    let contents = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    parse_profile(&contents)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const FULL_PROFILE: &str = r#"
username: octocat
locale: en
equipped: rust
stats:
  totalStars: 10
  totalCommits: 420
  totalPRs: 12
  totalIssues: 3
  topLanguage: Rust
  currentStreak: 4
  longestStreak: 30
  followers: 99
  createdAt: 2015-01-01T00:00:00Z
  totalContributions: 500
  contributedRepos: 8
language_bytes:
  Rust: 120000
  C#: 5000
"#;

    #[test]
    fn parses_full_profile() {
        let profile = parse_profile(FULL_PROFILE).expect("valid profile");
        let stats = profile.stats.as_ref().expect("stats");
        assert_eq!(stats.total_prs, 12);
        assert_eq!(stats.top_language.as_deref(), Some("Rust"));
        assert_eq!(profile.equipped.as_deref(), Some("rust"));
        assert_eq!(profile.language_bytes.len(), 2);
    }

    #[test]
    fn locale_defaults_to_english() {
        let profile = parse_profile("user: octocat").expect("valid profile");
        assert_eq!(profile.locale, "en");
        assert!(profile.stats.is_none());
        assert!(profile.language_bytes.is_empty());
    }

    #[test]
    fn rejects_invalid_logins() {
        for login in ["-octocat", "octo--cat", "octocat-", "octo cat", "a".repeat(40).as_str()] {
            let yaml = format!("username: '{login}'");
            let error = parse_profile(&yaml).expect_err("invalid login");
            assert!(matches!(error, Error::Validation { .. }), "{login}: {error:?}");
        }
    }

    #[test]
    fn accepts_maximum_length_login() {
        let login = "a".repeat(39);
        assert!(parse_profile(&format!("username: {login}")).is_ok());
    }

    #[test]
    fn rejects_blank_locale() {
        let error = parse_profile("username: octocat\nlocale: '  '").expect_err("blank locale");
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let error = parse_profile("username: [").expect_err("malformed");
        assert!(matches!(error, Error::Parse { .. }));
    }

    #[test]
    fn equipped_selection_is_respected_when_unlocked() {
        let profile = Profile {
            equipped: Some("C#".to_owned()),
            language_bytes: BTreeMap::from([
                ("Rust".to_owned(), 120_000),
                ("C#".to_owned(), 5_000)
            ]),
            ..Profile::new("octocat")
        };
        let characters = profile.characters();
        let equipped = profile.equipped_character(&characters).expect("equipped");
        assert_eq!(equipped.language, "csharp");
        assert_eq!(equipped.id, "csharp");
    }

    #[test]
    fn locked_or_missing_selection_auto_equips() {
        let mut profile = Profile {
            equipped: Some("go".to_owned()),
            language_bytes: BTreeMap::from([
                ("Rust".to_owned(), 120_000),
                ("Python".to_owned(), 60_000)
            ]),
            ..Profile::new("octocat")
        };
        let characters = profile.characters();
        assert_eq!(
            profile.equipped_character(&characters).map(|c| c.language.as_str()),
            Some("rust")
        );

        profile.equipped = None;
        assert_eq!(
            profile.equipped_character(&characters).map(|c| c.language.as_str()),
            Some("rust")
        );
    }

    #[test]
    fn new_user_equips_the_novice() {
        let profile = Profile::new("octocat");
        let characters = profile.characters();
        let equipped = profile.equipped_character(&characters).expect("novice");
        assert_eq!(equipped.language, "novice");
    }

    #[test]
    fn yaml_round_trip_keeps_fields() {
        let profile = parse_profile(FULL_PROFILE).expect("valid profile");
        let yaml = profile.to_yaml().expect("serializes");
        assert_eq!(parse_profile(&yaml).expect("reparses"), profile);
    }

    #[test]
    fn loads_profile_from_disk() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(FULL_PROFILE.as_bytes()).expect("write profile");
        let profile = load_profile(file.path()).expect("loads");
        assert_eq!(profile.username, "octocat");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = load_profile(&dir.path().join("missing.yaml")).expect_err("missing file");
        assert!(matches!(error, Error::Io { .. }));
    }
}
