// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Turns a profile into a finished card.
//!
//! Composition resolves everything the renderers treat as opaque input: the
//! equipped character, localized copy, attributes and embedded assets. A
//! profile without stats, or without any character that can be equipped,
//! yields the fallback card.

use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    assets::AssetStore,
    attributes::compute_attributes,
    config::Profile,
    error::{Error, card_io_error},
    jobs::{Job, Pose, language_display_name},
    locale::Translator,
    render::{
        CampfireCardData, CampfireCharacter, StatusCardData, render_campfire_card,
        render_fallback_card, render_status_card
    },
    roster::{campfire_party, seat_party}
};

/// Renders the fallback card for `locale`.
///
/// # Errors
///
/// Returns [`Error::AssetIo`] when the font is missing.
pub fn compose_fallback_card(assets: &AssetStore, locale: &str) -> Result<String, Error> {
    let font = assets.font_base64()?;
    Ok(render_fallback_card(&font, locale))
}

/// Renders the status card of the profile's equipped character.
///
/// # Errors
///
/// Returns [`Error::AssetIo`] when the font or sprite cannot be loaded.
pub fn compose_status_card(
    profile: &Profile,
    assets: &AssetStore,
    translator: &dyn Translator,
    now: DateTime<Utc>
) -> Result<String, Error> {
    let characters = profile.characters();
    let (Some(stats), Some(character)) =
        (profile.stats.as_ref(), profile.equipped_character(&characters))
    else {
        debug!(username = %profile.username, "no stats or equipped character, using fallback");
        return compose_fallback_card(assets, &profile.locale);
    };

    let job = Job::from_language(&character.language);
    let meta = compute_attributes(stats, now);

    let data = StatusCardData {
        username:        profile.username.clone(),
        job_name:        translator.job_name(job),
        job_color:       job.class().color_hex().to_owned(),
        weapon:          translator.job_weapon(job),
        level:           character.level,
        language:        language_display_name(&character.language).into_owned(),
        attributes:      meta.attributes,
        current_streak:  meta.current_streak,
        sprite_data_uri: assets.job_sprite(&character.language, Pose::Standing)?,
        font_base64:     assets.font_base64()?
    };

    info!(username = %profile.username, job = %job, level = data.level, "composed status card");
    Ok(render_status_card(&data))
}

/// Renders the campfire scene with the profile's strongest characters.
///
/// # Errors
///
/// Returns [`Error::AssetIo`] when the font, bonfire or a sprite cannot be
/// loaded.
pub fn compose_campfire_card(
    profile: &Profile,
    assets: &AssetStore,
    translator: &dyn Translator
) -> Result<String, Error> {
    if profile.stats.is_none() {
        debug!(username = %profile.username, "no stats, using fallback");
        return compose_fallback_card(assets, &profile.locale);
    }

    let characters = profile.characters();
    let seated = seat_party(&campfire_party(&characters));

    let requests: Vec<(&str, Pose)> = seated
        .iter()
        .map(|(character, seat)| (character.language.as_str(), seat.pose))
        .collect();
    let sprites = assets.party_sprites(&requests)?;

    let party = seated
        .into_iter()
        .zip(sprites)
        .map(|((character, seat), sprite_data_uri)| CampfireCharacter {
            sprite_data_uri,
            level: character.level,
            job_name: translator.job_name(Job::from_language(&character.language)),
            seat
        })
        .collect::<Vec<_>>();

    let data = CampfireCardData {
        username:         profile.username.clone(),
        font_base64:      assets.font_base64()?,
        bonfire_data_uri: assets.bonfire_data_uri()?,
        characters:       party
    };

    info!(
        username = %profile.username,
        party = data.characters.len(),
        "composed campfire card"
    );
    Ok(render_campfire_card(&data))
}

/// Writes a rendered card, creating missing parent directories.
///
/// # Errors
///
/// Returns [`Error::CardIo`] when the directory or file cannot be written.
pub fn write_card(path: &Path, svg: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| card_io_error(parent, source))?;
    }
    fs::write(path, svg).map_err(|source| card_io_error(path, source))?;
    debug!(path = %path.display(), bytes = svg.len(), "wrote card");
    Ok(())
}
