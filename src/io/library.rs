// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo library access.
//!
//! The library is a directory on disk. Permission is granted once the
//! directory exists and accepts writes.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Undetermined,
    Granted,
    Denied,
}

/// Media library permission.
pub trait PermissionService: Send + Sync {
    fn status(&self) -> PermissionStatus;
    fn request(&self) -> PermissionStatus;
}

/// Writes finished images into the media library.
pub trait MediaSaver: Send + Sync {
    /// Store the file at `local` and return where it ended up.
    fn save_to_library(&self, local: &Path) -> Result<PathBuf>;
}

#[derive(Debug)]
pub struct MediaLibrary {
    dir: PathBuf,
    status: Mutex<PermissionStatus>,
}

impl MediaLibrary {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            status: Mutex::new(PermissionStatus::Undetermined),
        }
    }

    /// `<Pictures>/StickerSmash`, falling back to the home directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::picture_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join("StickerSmash"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn set_status(&self, status: PermissionStatus) {
        *self.status.lock().unwrap_or_else(|p| p.into_inner()) = status;
    }

    fn probe(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create {}", self.dir.display()))?;
        let metadata = std::fs::metadata(&self.dir)?;
        if metadata.permissions().readonly() {
            bail!("{} is read-only", self.dir.display());
        }
        Ok(())
    }
}

impl PermissionService for MediaLibrary {
    fn status(&self) -> PermissionStatus {
        *self.status.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn request(&self) -> PermissionStatus {
        let status = match self.probe() {
            Ok(()) => PermissionStatus::Granted,
            Err(e) => {
                log::warn!("Photo library unavailable: {:#}", e);
                PermissionStatus::Denied
            }
        };
        log::info!("Photo library permission for {}: {:?}", self.dir().display(), status);
        self.set_status(status);
        status
    }
}

impl MediaSaver for MediaLibrary {
    fn save_to_library(&self, local: &Path) -> Result<PathBuf> {
        let name = local
            .file_name()
            .with_context(|| format!("{} has no file name", local.display()))?;
        let dest = unique_path(&self.dir.join(name));
        std::fs::copy(local, &dest)
            .with_context(|| format!("Failed to copy into {}", self.dir.display()))?;
        log::info!("Saved {} to photo library", dest.display());
        Ok(dest)
    }
}

/// `path`, or `stem (n).ext` for the first `n` that does not exist yet.
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().to_string());
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    (1..)
        .map(|n| {
            let name = match &ext {
                Some(ext) => format!("{stem} ({n}).{ext}"),
                None => format!("{stem} ({n})"),
            };
            parent.join(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_grants_and_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let library = MediaLibrary::new(root.path().join("lib"));
        assert_eq!(library.status(), PermissionStatus::Undetermined);
        assert_eq!(library.request(), PermissionStatus::Granted);
        assert_eq!(library.status(), PermissionStatus::Granted);
        assert!(library.dir().is_dir());
    }

    #[test]
    fn test_request_denied_when_path_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("lib");
        std::fs::write(&blocker, b"").unwrap();
        let library = MediaLibrary::new(blocker);
        assert_eq!(library.request(), PermissionStatus::Denied);
    }

    #[test]
    fn test_save_copies_without_overwriting() {
        let root = tempfile::tempdir().unwrap();
        let library = MediaLibrary::new(root.path().join("lib"));
        library.request();
        let local = root.path().join("capture.png");
        std::fs::write(&local, b"first").unwrap();

        let first = library.save_to_library(&local).unwrap();
        let second = library.save_to_library(&local).unwrap();
        assert_eq!(first.file_name().unwrap(), "capture.png");
        assert_eq!(second.file_name().unwrap(), "capture (1).png");
        assert_eq!(std::fs::read(second).unwrap(), b"first");
    }
}
