// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Font and sprite loading for card composition.
//!
//! Assets live under a single root directory: the card font at the top level
//! and sprite sheets in one directory per asset key (see
//! [`crate::jobs::JobSprites`]). Every file is read once, base64-encoded and
//! kept for the lifetime of the store.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError}
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    error::{Error, asset_io_error},
    jobs::{BONFIRE_SPRITE, Pose, resolve_job_sprites}
};

/// File name of the embedded card font, relative to the asset root.
pub const FONT_FILE: &str = "Galmuri9.ttf";

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Get-or-load store of base64-encoded asset files.
#[derive(Debug)]
pub struct AssetStore {
    root:    PathBuf,
    encoded: Mutex<HashMap<PathBuf, String>>
}

impl AssetStore {
    /// Creates a store reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:    root.into(),
            encoded: Mutex::new(HashMap::new())
        }
    }

    /// Directory assets are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<PathBuf, String>> {
        self.encoded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads `relative` under the root and returns its base64 encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssetIo`] when the file cannot be read.
    pub fn load_base64(&self, relative: &str) -> Result<String, Error> {
        let path = self.root.join(relative);
        if let Some(encoded) = self.cache().get(&path) {
            return Ok(encoded.clone());
        }

        let bytes = fs::read(&path).map_err(|source| asset_io_error(&path, source))?;
        let encoded = STANDARD.encode(&bytes);
        debug!(path = %path.display(), bytes = bytes.len(), "loaded asset");

        self.cache().insert(path, encoded.clone());
        Ok(encoded)
    }

    /// Raw base64 of the card font.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssetIo`] when the font file is missing.
    pub fn font_base64(&self) -> Result<String, Error> {
        self.load_base64(FONT_FILE)
    }

    /// PNG at `relative` as a `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssetIo`] when the image cannot be read.
    pub fn sprite_data_uri(&self, relative: &str) -> Result<String, Error> {
        self.load_base64(relative)
            .map(|encoded| format!("{PNG_DATA_URI_PREFIX}{encoded}"))
    }

    /// Sprite for a language's job in the given pose.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssetIo`] when the sprite file is missing.
    pub fn job_sprite(&self, language: &str, pose: Pose) -> Result<String, Error> {
        self.sprite_data_uri(resolve_job_sprites(language).for_pose(pose))
    }

    /// Campfire centerpiece image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssetIo`] when the image is missing.
    pub fn bonfire_data_uri(&self) -> Result<String, Error> {
        self.sprite_data_uri(BONFIRE_SPRITE)
    }

    /// Loads several job sprites in parallel. The output follows the order of
    /// `requests`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::AssetIo`] encountered.
    pub fn party_sprites(&self, requests: &[(&str, Pose)]) -> Result<Vec<String>, Error> {
        requests
            .par_iter()
            .map(|(language, pose)| self.job_sprite(language, *pose))
            .collect()
    }
}
