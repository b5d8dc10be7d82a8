// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! User settings.
//!
//! Every field has a default, so a settings file only needs to mention
//! the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the Save action produces its artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStrategy {
    /// Capture to a local PNG and hand it to the photo library.
    Native,
    /// Rasterize to a JPEG data URL and trigger a download.
    Web,
}

impl Default for ExportStrategy {
    /// Web in the browser, Native everywhere else.
    fn default() -> Self {
        if cfg!(target_arch = "wasm32") {
            ExportStrategy::Web
        } else {
            ExportStrategy::Native
        }
    }
}

/// Largest accepted frame side in logical pixels.
pub const MAX_FRAME_SIDE: u32 = 4096;

/// Largest accepted capture height in pixels.
pub const MAX_CAPTURE_HEIGHT: u32 = 8192;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Edge length of a freshly placed sticker, in logical pixels.
    pub sticker_size: f32,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Pixel height of the native capture. Width follows the frame aspect.
    pub capture_height: u32,
    /// JPEG quality for the web export, between 0 and 1.
    pub jpeg_quality: f32,
    pub download_file_name: String,
    pub export_strategy: ExportStrategy,
    /// Photo library directory. Defaults to `<Pictures>/StickerSmash`.
    pub library_dir: Option<PathBuf>,
    /// Where web-style downloads land. Defaults to the user's downloads.
    pub downloads_dir: Option<PathBuf>,
    /// Directory of PNG files replacing the built-in stickers.
    pub sticker_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sticker_size: 40.0,
            frame_width: 320,
            frame_height: 440,
            capture_height: 440,
            jpeg_quality: 0.95,
            download_file_name: "sticker-smash.jpeg".to_string(),
            export_strategy: ExportStrategy::default(),
            library_dir: None,
            downloads_dir: None,
            sticker_dir: None,
        }
    }
}

impl Settings {
    /// Replace out-of-range values with their defaults, logging each one.
    pub fn validated(mut self) -> Self {
        let defaults = Settings::default();

        if !(self.sticker_size.is_finite() && self.sticker_size > 0.0) {
            log::warn!("Invalid sticker_size {}, using {}", self.sticker_size, defaults.sticker_size);
            self.sticker_size = defaults.sticker_size;
        }
        if !(1..=MAX_FRAME_SIDE).contains(&self.frame_width)
            || !(1..=MAX_FRAME_SIDE).contains(&self.frame_height)
        {
            log::warn!(
                "Invalid frame size {}x{}, using {}x{}",
                self.frame_width,
                self.frame_height,
                defaults.frame_width,
                defaults.frame_height
            );
            self.frame_width = defaults.frame_width;
            self.frame_height = defaults.frame_height;
        }
        if !(1..=MAX_CAPTURE_HEIGHT).contains(&self.capture_height) {
            log::warn!("Invalid capture_height {}, using {}", self.capture_height, defaults.capture_height);
            self.capture_height = defaults.capture_height;
        }
        if !(self.jpeg_quality > 0.0 && self.jpeg_quality <= 1.0) {
            log::warn!("Invalid jpeg_quality {}, using {}", self.jpeg_quality, defaults.jpeg_quality);
            self.jpeg_quality = defaults.jpeg_quality;
        }
        if self.download_file_name.trim().is_empty() {
            log::warn!("Empty download_file_name, using {}", defaults.download_file_name);
            self.download_file_name = defaults.download_file_name;
        }
        self
    }
}
