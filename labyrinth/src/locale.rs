// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Built-in localized copy for cards.
//!
//! Card builders treat every display string as opaque text. This module
//! supplies the default catalog (English and Korean); callers with their own
//! localization can implement [`Translator`] instead.

use serde::{Deserialize, Serialize};

use crate::jobs::Job;

/// Supported card locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Ko
}

impl Locale {
    /// Parses a language tag. Tags starting with `ko` select Korean; anything
    /// else is English.
    ///
    /// ```
    /// use labyrinth::Locale;
    ///
    /// assert_eq!(Locale::from_tag("ko-KR"), Locale::Ko);
    /// assert_eq!(Locale::from_tag("fr"), Locale::En);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("ko") {
            Locale::Ko
        } else {
            Locale::En
        }
    }

    /// Headline and call to action for the fallback card.
    pub fn fallback_lines(self) -> (&'static str, &'static str) {
        match self {
            Locale::En => (
                "This adventurer has not been registered yet.",
                "Visit the site to create your character!"
            ),
            Locale::Ko => (
                "아직 등록되지 않은 모험가입니다.",
                "사이트에 방문하여 캐릭터를 생성해 보세요!"
            )
        }
    }
}

/// Source of localized job names and weapon labels.
pub trait Translator {
    /// Localized class name, e.g. "Blacksmith".
    fn job_name(&self, job: Job) -> String;

    /// Localized weapon label, e.g. "Forge Hammer".
    fn job_weapon(&self, job: Job) -> String;
}

impl Translator for Locale {
    fn job_name(&self, job: Job) -> String {
        job_copy(*self, job).0.to_owned()
    }

    fn job_weapon(&self, job: Job) -> String {
        job_copy(*self, job).1.to_owned()
    }
}

fn job_copy(locale: Locale, job: Job) -> (&'static str, &'static str) {
    match locale {
        Locale::En => match job {
            Job::Python => ("Summoner", "Staff of Pythons"),
            Job::JavaScript => ("Bard", "Electric Lute"),
            Job::TypeScript => ("Paladin", "Shield of Interface"),
            Job::Java => ("Knight", "Greatsword"),
            Job::Kotlin => ("Ranger", "Composite Bow"),
            Job::Swift => ("Rogue", "Twin Daggers"),
            Job::Cpp => ("Berserker", "Giant Axe"),
            Job::CSharp => ("Spellsword", "Runeblade"),
            Job::Go => ("Monk", "Iron Fists"),
            Job::Rust => ("Blacksmith", "Forge Hammer"),
            Job::Php => ("Necromancer", "Bone Scythe"),
            Job::Ruby => ("Alchemist", "Philosopher Stone"),
            Job::Novice => ("Novice", "Wooden Stick"),
            Job::Default => ("Adventurer", "Rusty Sword")
        },
        Locale::Ko => match job {
            Job::Python => ("소환사", "파이썬의 지팡이"),
            Job::JavaScript => ("음유시인", "번개의 류트"),
            Job::TypeScript => ("성기사", "인터페이스의 방패"),
            Job::Java => ("기사", "대검"),
            Job::Kotlin => ("레인저", "복합 활"),
            Job::Swift => ("도적", "쌍단검"),
            Job::Cpp => ("광전사", "거대한 도끼"),
            Job::CSharp => ("마검사", "룬블레이드"),
            Job::Go => ("수도승", "철권"),
            Job::Rust => ("대장장이", "단조 망치"),
            Job::Php => ("강령술사", "뼈 낫"),
            Job::Ruby => ("연금술사", "현자의 돌"),
            Job::Novice => ("초보자", "나무 막대"),
            Job::Default => ("모험가", "녹슨 검")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_is_the_default_locale() {
        assert_eq!(Locale::default(), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
        assert_eq!(Locale::from_tag("en-US"), Locale::En);
    }

    #[test]
    fn korean_tags_are_case_insensitive() {
        assert_eq!(Locale::from_tag("KO"), Locale::Ko);
        assert_eq!(Locale::from_tag(" ko_kr"), Locale::Ko);
    }

    #[test]
    fn catalog_covers_every_job() {
        for locale in [Locale::En, Locale::Ko] {
            for job in Job::ALL {
                assert!(!locale.job_name(job).is_empty());
                assert!(!locale.job_weapon(job).is_empty());
            }
        }
    }

    #[test]
    fn unknown_languages_are_adventurers() {
        assert_eq!(Locale::En.job_name(Job::Default), "Adventurer");
        assert_eq!(Locale::Ko.job_weapon(Job::Rust), "단조 망치");
    }

    #[test]
    fn fallback_copy_is_localized() {
        assert!(Locale::Ko.fallback_lines().0.contains("모험가"));
        assert!(Locale::En.fallback_lines().1.contains("character"));
    }
}
