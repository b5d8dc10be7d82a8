// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor error taxonomy.
//!
//! None of these errors is fatal. Each one is reported to the user as a
//! notice and leaves the application state untouched so the action can be
//! retried.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("You didn't select any image.")]
    UserCancelled,
    #[error("Permission to save to the photo library was denied.")]
    PermissionDenied,
    #[error("Export failed: {0}")]
    ExportFailed(String),
    #[error("Could not load image: {0}")]
    Load(String),
}

impl EditorError {
    /// Wrap a lower level failure from the capture, save or download step.
    pub fn export(err: impl std::fmt::Display) -> Self {
        EditorError::ExportFailed(format!("{err:#}"))
    }
}
