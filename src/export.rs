// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Export pipeline.
//!
//! Turns the capture target into a saved artifact using one of two
//! strategies: capture to a local file and store it in the photo library,
//! or rasterize to a JPEG data URL and download it.

use crate::error::EditorError;
use crate::io::capture::{CaptureOptions, CaptureTarget, JpegOptions, ViewCapture, WebRasterizer};
use crate::io::download::Downloader;
use crate::io::library::{MediaSaver, PermissionService, PermissionStatus};
use crate::models::settings::{ExportStrategy, Settings};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportArtifact {
    Library(PathBuf),
    Download(PathBuf),
}

impl ExportArtifact {
    pub fn path(&self) -> &PathBuf {
        match self {
            ExportArtifact::Library(path) | ExportArtifact::Download(path) => path,
        }
    }

    /// Confirmation shown to the user.
    pub fn notice(&self) -> String {
        match self {
            ExportArtifact::Library(_) => "Saved!".to_string(),
            ExportArtifact::Download(path) => format!(
                "Downloaded {}",
                path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
            ),
        }
    }
}

pub type ExportResult = Result<ExportArtifact, EditorError>;

pub struct ExportPipeline {
    pub strategy: ExportStrategy,
    capture: Arc<dyn ViewCapture>,
    rasterizer: Arc<dyn WebRasterizer>,
    permission: Arc<dyn PermissionService>,
    saver: Arc<dyn MediaSaver>,
    downloader: Arc<dyn Downloader>,
    capture_height: u32,
    jpeg_quality: f32,
    download_file_name: String,
}

/// Collaborators used by the pipeline.
pub struct ExportServices {
    pub capture: Arc<dyn ViewCapture>,
    pub rasterizer: Arc<dyn WebRasterizer>,
    pub permission: Arc<dyn PermissionService>,
    pub saver: Arc<dyn MediaSaver>,
    pub downloader: Arc<dyn Downloader>,
}

impl ExportPipeline {
    pub fn new(settings: &Settings, services: ExportServices) -> Self {
        Self {
            strategy: settings.export_strategy,
            capture: services.capture,
            rasterizer: services.rasterizer,
            permission: services.permission,
            saver: services.saver,
            downloader: services.downloader,
            capture_height: settings.capture_height,
            jpeg_quality: settings.jpeg_quality,
            download_file_name: settings.download_file_name.clone(),
        }
    }

    /// Run the configured strategy to completion.
    pub fn export(&self, target: &CaptureTarget) -> ExportResult {
        let result = match self.strategy {
            ExportStrategy::Native => self.export_native(target),
            ExportStrategy::Web => self.export_web(target),
        };
        match &result {
            Ok(artifact) => log::info!("Export finished: {}", artifact.path().display()),
            Err(e) => log::error!("{}", e),
        }
        result
    }

    /// Run the export on a background thread.
    pub fn spawn(self: &Arc<Self>, target: CaptureTarget) -> Receiver<ExportResult> {
        let (sender, receiver) = channel();
        let pipeline = Arc::clone(self);
        std::thread::spawn(move || {
            let _ = sender.send(pipeline.export(&target));
        });
        receiver
    }

    fn ensure_permission(&self) -> Result<(), EditorError> {
        let status = match self.permission.status() {
            PermissionStatus::Undetermined => self.permission.request(),
            status => status,
        };
        match status {
            PermissionStatus::Granted => Ok(()),
            _ => Err(EditorError::PermissionDenied),
        }
    }

    fn export_native(&self, target: &CaptureTarget) -> ExportResult {
        self.ensure_permission()?;
        let options = CaptureOptions {
            height: self.capture_height,
            quality: 1.0,
        };
        let local = self.capture.capture(target, &options).map_err(EditorError::export)?;
        let saved = self.saver.save_to_library(&local);
        if let Err(e) = std::fs::remove_file(&local) {
            log::warn!("Could not remove capture file {}: {}", local.display(), e);
        }
        saved.map(ExportArtifact::Library).map_err(EditorError::export)
    }

    fn export_web(&self, target: &CaptureTarget) -> ExportResult {
        let options = JpegOptions {
            quality: self.jpeg_quality,
            width: target.frame_width,
            height: target.frame_height,
        };
        let data_url = self
            .rasterizer
            .render_to_jpeg(target, &options)
            .map_err(EditorError::export)?;
        self.downloader
            .download(&data_url, &self.download_file_name)
            .map(ExportArtifact::Download)
            .map_err(EditorError::export)
    }
}
