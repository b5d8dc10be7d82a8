// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Download trigger for the web export path.

use super::library::unique_path;
use anyhow::{anyhow, Context, Result};
use base64::Engine;
use std::path::PathBuf;

/// Hands a data URL to the user as a downloaded file.
pub trait Downloader: Send + Sync {
    fn download(&self, data_url: &str, file_name: &str) -> Result<PathBuf>;
}

/// Writes downloads into a directory, renaming instead of overwriting.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The user's download directory, falling back to the home directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::download_dir().or_else(dirs::home_dir)
    }
}

/// Decode the payload of a base64 `data:` URL.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| anyhow!("Not a data URL"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("Data URL has no payload"))?;
    if !header.ends_with(";base64") {
        return Err(anyhow!("Data URL is not base64 encoded"));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .context("Invalid base64 payload")
}

impl Downloader for DirectoryDownloader {
    fn download(&self, data_url: &str, file_name: &str) -> Result<PathBuf> {
        let bytes = decode_data_url(data_url)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create {}", self.dir.display()))?;
        let dest = unique_path(&self.dir.join(file_name));
        std::fs::write(&dest, bytes).with_context(|| format!("Failed to write {}", dest.display()))?;
        log::info!("Downloaded {}", dest.display());
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_url() {
        assert_eq!(decode_data_url("data:image/jpeg;base64,aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_rejects_other_urls() {
        assert!(decode_data_url("https://example.com/a.jpg").is_err());
        assert!(decode_data_url("data:text/plain,hello").is_err());
        assert!(decode_data_url("data:image/jpeg;base64").is_err());
    }

    #[test]
    fn test_download_renames_repeats() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = DirectoryDownloader::new(dir.path().to_path_buf());
        let first = downloader.download("data:image/jpeg;base64,aGVsbG8=", "sticker-smash.jpeg").unwrap();
        let second = downloader.download("data:image/jpeg;base64,aGVsbG8=", "sticker-smash.jpeg").unwrap();
        assert_eq!(first.file_name().unwrap(), "sticker-smash.jpeg");
        assert_eq!(second.file_name().unwrap(), "sticker-smash (1).jpeg");
        assert_eq!(std::fs::read(first).unwrap(), b"hello");
    }
}
