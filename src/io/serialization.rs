// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Settings file loading.
//!
//! This module reads user settings in YAML or JSON format, chosen by the
//! file extension.

use crate::models::settings::Settings;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "STICKER_SMASH_CONFIG";

/// Import settings from YAML format.
pub fn import_yaml(path: &Path) -> Result<Settings> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import settings from JSON format.
pub fn import_json(path: &Path) -> Result<Settings> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Import settings, picking the format from the extension. Out-of-range
/// values fall back to their defaults.
pub fn import_settings(path: &Path) -> Result<Settings> {
    let extension = path.extension().and_then(|s| s.to_str());
    let settings = match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported settings extension: {:?}", extension),
    };
    settings
        .map(Settings::validated)
        .with_context(|| format!("Failed to read settings from {}", path.display()))
}

/// Where settings are looked up when no explicit path is given.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sticker-smash").join("settings.yaml"))
}

/// Load settings from `$STICKER_SMASH_CONFIG` or the default location.
///
/// A missing default file yields the defaults. A file that exists but
/// cannot be parsed is logged and also yields the defaults.
pub fn load_settings() -> Settings {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let path = match explicit.or_else(default_settings_path) {
        Some(path) if path.exists() => path,
        Some(path) => {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Settings::default();
        }
        None => return Settings::default(),
    };

    match import_settings(&path) {
        Ok(settings) => {
            log::info!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            log::error!("{:#}", e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::ExportStrategy;

    #[test]
    fn test_import_yaml_overrides_some_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "sticker_size: 64\nexport_strategy: web\n").unwrap();

        let settings = import_settings(&path).unwrap();
        assert_eq!(settings.sticker_size, 64.0);
        assert_eq!(settings.export_strategy, ExportStrategy::Web);
        assert_eq!(settings.frame_height, 440);
        assert_eq!(settings.download_file_name, "sticker-smash.jpeg");
    }

    #[test]
    fn test_import_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "jpeg_quality": 0.5, "library_dir": "/tmp/lib" }"#).unwrap();

        let settings = import_settings(&path).unwrap();
        assert_eq!(settings.jpeg_quality, 0.5);
        assert_eq!(settings.library_dir, Some(PathBuf::from("/tmp/lib")));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "").unwrap();
        assert!(import_settings(&path).is_err());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        std::fs::write(&path, "sticker_size: [not a number").unwrap();
        assert!(import_settings(&path).is_err());
    }

    #[test]
    fn test_zero_frame_height_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "frame_height: 0\njpeg_quality: 0\nsticker_size: -10\n").unwrap();

        let settings = import_settings(&path).unwrap();
        assert_eq!(settings.frame_height, 440);
        assert_eq!(settings.jpeg_quality, 0.95);
        assert_eq!(settings.sticker_size, 40.0);
    }

    #[test]
    fn test_negative_frame_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "frame_width": -320 }"#).unwrap();
        assert!(import_settings(&path).is_err());
    }
}
