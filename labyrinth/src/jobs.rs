// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Job class resolution for programming languages.
//!
//! Every language resolves to a [`Job`]. Known languages map onto their own
//! class; anything else becomes [`Job::Default`], so resolution never fails.
//! Sprite lookup has a second fallback to the novice sprite set when a job's
//! asset key has no registered sprites.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// Cosmetic class assigned to a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Job {
    Python,
    #[serde(rename = "javascript")]
    JavaScript,
    #[serde(rename = "typescript")]
    TypeScript,
    Java,
    Kotlin,
    Swift,
    #[serde(rename = "c++")]
    Cpp,
    #[serde(rename = "csharp")]
    CSharp,
    Go,
    Rust,
    Php,
    Ruby,
    Novice,
    Default
}

impl Job {
    /// Every job, `Default` last.
    pub const ALL: [Job; 14] = [
        Job::Python,
        Job::JavaScript,
        Job::TypeScript,
        Job::Java,
        Job::Kotlin,
        Job::Swift,
        Job::Cpp,
        Job::CSharp,
        Job::Go,
        Job::Rust,
        Job::Php,
        Job::Ruby,
        Job::Novice,
        Job::Default
    ];

    /// Resolves a raw language name. Unknown names yield [`Job::Default`].
    ///
    /// # Examples
    ///
    /// ```
    /// use labyrinth::Job;
    ///
    /// assert_eq!(Job::from_language("C#"), Job::CSharp);
    /// assert_eq!(Job::from_language("TypeScript"), Job::TypeScript);
    /// assert_eq!(Job::from_language("COBOL"), Job::Default);
    /// ```
    pub fn from_language(language: &str) -> Self {
        let normalized = normalize_language(language);
        Self::ALL
            .into_iter()
            .find(|job| job.key() == normalized)
            .unwrap_or(Job::Default)
    }

    /// Normalized key in the job table key space.
    pub fn key(self) -> &'static str {
        match self {
            Job::Python => "python",
            Job::JavaScript => "javascript",
            Job::TypeScript => "typescript",
            Job::Java => "java",
            Job::Kotlin => "kotlin",
            Job::Swift => "swift",
            Job::Cpp => "c++",
            Job::CSharp => "csharp",
            Job::Go => "go",
            Job::Rust => "rust",
            Job::Php => "php",
            Job::Ruby => "ruby",
            Job::Novice => "novice",
            Job::Default => "default"
        }
    }

    /// Color and sprite set for the job.
    pub fn class(self) -> JobClass {
        let (color, asset_key) = match self {
            Job::Python => ("text-blue-400", "summoner"),
            Job::JavaScript => ("text-yellow-400", "bard"),
            Job::TypeScript => ("text-blue-600", "paladin"),
            Job::Java => ("text-orange-600", "knight"),
            Job::Kotlin => ("text-purple-500", "ranger"),
            Job::Swift => ("text-orange-500", "rogue"),
            Job::Cpp => ("text-blue-800", "berserker"),
            Job::CSharp => ("text-green-600", "spellsword"),
            Job::Go => ("text-cyan-500", "monk"),
            Job::Rust => ("text-orange-800", "blacksmith"),
            Job::Php => ("text-indigo-400", "necromancer"),
            Job::Ruby => ("text-red-600", "alchemist"),
            Job::Novice => ("text-gray-400", "novice"),
            Job::Default => ("text-slate-400", "novice")
        };
        JobClass {
            color,
            asset_key
        }
    }

    /// Whether the job is tied to a concrete language.
    pub fn is_language(self) -> bool {
        !matches!(self, Job::Novice | Job::Default)
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Display attributes of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobClass {
    /// Display color token.
    pub color:     &'static str,
    /// Sprite set identifier.
    pub asset_key: &'static str
}

impl JobClass {
    /// Hex color for vector output. Unknown tokens render gray.
    pub fn color_hex(&self) -> &'static str {
        match self.color {
            "text-blue-400" => "#60a5fa",
            "text-yellow-400" => "#facc15",
            "text-blue-600" => "#2563eb",
            "text-orange-600" => "#ea580c",
            "text-purple-500" => "#a855f7",
            "text-orange-500" => "#f97316",
            "text-blue-800" => "#1e40af",
            "text-green-600" => "#16a34a",
            "text-cyan-500" => "#06b6d4",
            "text-orange-800" => "#9a3412",
            "text-indigo-400" => "#818cf8",
            "text-red-600" => "#dc2626",
            "text-slate-400" => "#94a3b8",
            _ => "#9ca3af"
        }
    }
}

/// Sprite pose used by the card layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    /// Front-facing, used on the status card.
    Standing,
    /// Side view, seated.
    Sitting,
    /// Back view, seated.
    Back
}

/// Relative sprite paths for each pose of a sprite set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct JobSprites {
    pub standing: &'static str,
    pub sitting:  &'static str,
    pub back:     &'static str
}

impl JobSprites {
    /// Path of the sprite for `pose`.
    pub fn for_pose(&self, pose: Pose) -> &'static str {
        match pose {
            Pose::Standing => self.standing,
            Pose::Sitting => self.sitting,
            Pose::Back => self.back
        }
    }
}

macro_rules! sprite_set {
    ($key:literal) => {
        (
            $key,
            JobSprites {
                standing: concat!($key, "/", $key, "-1.png"),
                sitting:  concat!($key, "/", $key, "-2.png"),
                back:     concat!($key, "/", $key, "-3.png")
            }
        )
    };
}

const SPRITE_REGISTRY: [(&str, JobSprites); 13] = [
    sprite_set!("novice"),
    sprite_set!("bard"),
    sprite_set!("paladin"),
    sprite_set!("summoner"),
    sprite_set!("knight"),
    sprite_set!("ranger"),
    sprite_set!("rogue"),
    sprite_set!("berserker"),
    sprite_set!("spellsword"),
    sprite_set!("necromancer"),
    sprite_set!("alchemist"),
    sprite_set!("monk"),
    sprite_set!("blacksmith")
];

const DEFAULT_SPRITES: JobSprites = SPRITE_REGISTRY[0].1;

/// Relative path of the campfire centerpiece image.
pub const BONFIRE_SPRITE: &str = "bonfire.png";

/// Lowercases a language name and maps `c#` onto `csharp`.
pub fn normalize_language(language: &str) -> Cow<'_, str> {
    let lower = if language.chars().any(char::is_uppercase) {
        Cow::Owned(language.to_lowercase())
    } else {
        Cow::Borrowed(language)
    };

    if lower == "c#" {
        Cow::Borrowed("csharp")
    } else {
        lower
    }
}

/// Returns the job table key for a language, `"default"` when unknown.
pub fn resolve_job_key(language: &str) -> &'static str {
    Job::from_language(language).key()
}

/// Resolves the job class for a language. Never fails.
pub fn resolve_job_class(language: &str) -> JobClass {
    Job::from_language(language).class()
}

/// Looks up a sprite set by asset key.
pub fn sprite_set(asset_key: &str) -> Option<JobSprites> {
    SPRITE_REGISTRY
        .iter()
        .find(|(key, _)| *key == asset_key)
        .map(|(_, sprites)| *sprites)
}

/// Resolves the sprite set for a language, falling back to the novice set.
pub fn resolve_job_sprites(language: &str) -> JobSprites {
    sprite_set(resolve_job_class(language).asset_key).unwrap_or(DEFAULT_SPRITES)
}

/// Human-readable language name (`csharp` is shown as `c#`).
pub fn language_display_name(language: &str) -> Cow<'_, str> {
    if normalize_language(language) == "csharp" {
        Cow::Borrowed("c#")
    } else {
        Cow::Borrowed(language)
    }
}
