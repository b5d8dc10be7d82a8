// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo picker service.

use super::media::IMAGE_EXTENSIONS;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickOptions {
    /// Offer crop/rotate before returning, where the platform supports it.
    pub allow_editing: bool,
    /// Requested quality between 0 and 1 for platforms that re-encode.
    pub quality: f32,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            allow_editing: true,
            quality: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedAsset {
    pub uri: PathBuf,
}

/// Outcome of one picker invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickResult {
    pub canceled: bool,
    pub assets: Vec<PickedAsset>,
}

impl PickResult {
    pub fn cancelled() -> Self {
        Self {
            canceled: true,
            assets: Vec::new(),
        }
    }

    pub fn picked(uri: PathBuf) -> Self {
        Self {
            canceled: false,
            assets: vec![PickedAsset { uri }],
        }
    }

    /// The chosen photo, or `None` if the user backed out.
    pub fn into_first_uri(self) -> Option<PathBuf> {
        if self.canceled {
            return None;
        }
        self.assets.into_iter().next().map(|asset| asset.uri)
    }
}

/// Lets the user choose a photo.
pub trait ImagePicker {
    fn pick_image(&self, options: &PickOptions) -> PickResult;
}

/// Native file dialog picker.
#[derive(Debug, Default)]
pub struct RfdImagePicker;

impl ImagePicker for RfdImagePicker {
    fn pick_image(&self, options: &PickOptions) -> PickResult {
        // The file dialog has no editing step and never re-encodes
        log::debug!("Opening photo picker with {:?}", options);
        match rfd::FileDialog::new()
            .set_title("Choose a photo")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            Some(path) => PickResult::picked(path),
            None => PickResult::cancelled(),
        }
    }
}
