// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the composition root that implements the
//! egui::App trait. It owns the interaction state, wires the views'
//! actions back into it and talks to the picker, photo library and export
//! services.

use crate::assets::AssetSet;
use crate::error::EditorError;
use crate::export::{ExportPipeline, ExportResult, ExportServices};
use crate::io::capture::{CaptureTarget, Compositor};
use crate::io::download::DirectoryDownloader;
use crate::io::library::{MediaLibrary, PermissionService, PermissionStatus};
use crate::io::media::{self, LoadedImage};
use crate::io::picker::{ImagePicker, PickOptions, RfdImagePicker};
use crate::models::settings::Settings;
use crate::models::state::AppState;
use crate::models::sticker::StickerAsset;
use crate::ui::controls::{self, ControlsAction};
use crate::ui::notices::Notices;
use crate::ui::overlay::StickerOverlay;
use crate::ui::{picker_dialog, selector, surface};
use crate::util::geometry;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x25, 0x29, 0x2e);

/// Result of background photo loading.
struct LoadedPhoto {
    path: PathBuf,
    image: LoadedImage,
}

/// The photo currently shown in the frame.
struct DisplayedImage {
    pixels: Arc<RgbaImage>,
    texture: egui::TextureHandle,
}

impl DisplayedImage {
    /// Upload `image` as a texture, shrunk to the GPU's texture limit if
    /// needed. The full-resolution pixels are kept for export.
    fn new(ctx: &egui::Context, name: &str, image: &LoadedImage) -> Self {
        let max_side = ctx.input(|i| i.max_texture_side) as u32;
        let color_image = match geometry::fit_within(image.width, image.height, max_side) {
            Some((width, height)) => {
                log::info!(
                    "Downscaling {} from {}x{} to {}x{} for display",
                    name,
                    image.width,
                    image.height,
                    width,
                    height
                );
                LoadedImage::from(imageops::resize(&image.pixels, width, height, FilterType::Triangle))
                    .to_color_image()
            }
            None => image.to_color_image(),
        };
        let texture = ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR);
        Self {
            pixels: Arc::new(image.pixels.clone()),
            texture,
        }
    }
}

/// Main application state.
pub struct StickerSmashApp {
    settings: Settings,
    assets: AssetSet,

    /// Interaction state
    state: AppState,

    placeholder: DisplayedImage,
    photo: Option<DisplayedImage>,
    sticker_textures: Vec<(StickerAsset, egui::TextureHandle)>,
    overlay: Option<StickerOverlay>,

    picker: Box<dyn ImagePicker>,
    library: Arc<MediaLibrary>,
    pipeline: Arc<ExportPipeline>,

    /// Receiver for background photo loading
    image_loader: Option<Receiver<Result<LoadedPhoto, String>>>,

    /// Receiver for the running export
    export_job: Option<Receiver<ExportResult>>,

    /// Loading state message
    loading_message: Option<String>,

    notices: Notices,
}

impl StickerSmashApp {
    /// Create the application with the desktop services.
    pub fn new(ctx: &egui::Context, settings: Settings) -> Self {
        let library_dir = settings
            .library_dir
            .clone()
            .or_else(MediaLibrary::default_dir)
            .unwrap_or_else(|| PathBuf::from("StickerSmash"));
        let downloads_dir = settings
            .downloads_dir
            .clone()
            .or_else(DirectoryDownloader::default_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let library = Arc::new(MediaLibrary::new(library_dir));
        let compositor = Arc::new(Compositor);
        let pipeline = ExportPipeline::new(
            &settings,
            ExportServices {
                capture: compositor.clone(),
                rasterizer: compositor,
                permission: library.clone(),
                saver: library.clone(),
                downloader: Arc::new(DirectoryDownloader::new(downloads_dir)),
            },
        );

        Self::with_services(ctx, settings, Box::new(RfdImagePicker), library, pipeline)
    }

    fn with_services(
        ctx: &egui::Context,
        settings: Settings,
        picker: Box<dyn ImagePicker>,
        library: Arc<MediaLibrary>,
        pipeline: ExportPipeline,
    ) -> Self {
        let assets = match &settings.sticker_dir {
            Some(dir) => AssetSet::with_sticker_dir(settings.frame_width, settings.frame_height, dir),
            None => AssetSet::builtin(settings.frame_width, settings.frame_height),
        };
        let placeholder = DisplayedImage::new(ctx, "placeholder", &assets.placeholder);
        let sticker_textures = StickerAsset::all()
            .map(|asset| {
                let texture = ctx.load_texture(
                    format!("sticker_thumb_{}", asset.index()),
                    assets.sticker(asset).to_color_image(),
                    egui::TextureOptions::LINEAR,
                );
                (asset, texture)
            })
            .collect();

        let app = Self {
            settings,
            assets,
            state: AppState::new(),
            placeholder,
            photo: None,
            sticker_textures,
            overlay: None,
            picker,
            library,
            pipeline: Arc::new(pipeline),
            image_loader: None,
            export_job: None,
            loading_message: None,
            notices: Notices::default(),
        };
        app.request_library_permission();
        app
    }

    /// Ask for photo library access once, at startup.
    fn request_library_permission(&self) {
        if self.library.status() == PermissionStatus::Undetermined {
            self.library.request();
        }
    }

    fn now(ctx: &egui::Context) -> f64 {
        ctx.input(|i| i.time)
    }

    fn report(&mut self, ctx: &egui::Context, err: &EditorError) {
        let now = Self::now(ctx);
        match err {
            EditorError::UserCancelled => self.notices.info(err.to_string(), now),
            _ => {
                log::error!("{}", err);
                self.notices.error(err.to_string(), now);
            }
        }
    }

    /// Run the photo picker and load the chosen photo in the background.
    fn choose_photo(&mut self, ctx: &egui::Context) {
        if self.image_loader.is_some() {
            log::debug!("Photo still loading, ignoring pick");
            return;
        }
        let picked = self.picker.pick_image(&PickOptions::default()).into_first_uri();
        match picked {
            Some(path) => self.load_photo(path),
            None => {
                // Leaves the state as it was
                if let Err(e) = self.state.apply_pick(None) {
                    self.report(ctx, &e);
                }
            }
        }
    }

    /// Load a photo file (asynchronously).
    fn load_photo(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading photo...".to_string());

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = media::load_image(&path)
                .map(|image| {
                    log::info!("Loaded photo: {} ({}x{})", path.display(), image.width, image.height);
                    LoadedPhoto { path, image }
                })
                .map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    fn poll_image_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.image_loader else {
            return;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err("Photo loader stopped unexpectedly".to_string()),
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded) => {
                self.photo = Some(DisplayedImage::new(ctx, "photo", &loaded.image));
                if let Err(e) = self.state.apply_pick(Some(loaded.path)) {
                    self.report(ctx, &e);
                }
            }
            Err(e) => self.report(ctx, &EditorError::Load(e)),
        }
    }

    fn poll_export(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.export_job else {
            return;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                Err(EditorError::ExportFailed("export stopped unexpectedly".to_string()))
            }
        };
        self.export_job = None;
        self.state.finish_export();

        match result {
            Ok(artifact) => self.notices.info(artifact.notice(), Self::now(ctx)),
            Err(e) => self.report(ctx, &e),
        }
    }

    /// Snapshot of what is inside the photo frame.
    fn capture_target(&self) -> CaptureTarget {
        let base = self.photo.as_ref().unwrap_or(&self.placeholder);
        CaptureTarget {
            base: Arc::clone(&base.pixels),
            sticker: self.overlay.as_ref().map(StickerOverlay::layer),
            frame_width: self.settings.frame_width,
            frame_height: self.settings.frame_height,
        }
    }

    fn save(&mut self) {
        if !self.state.begin_export() {
            log::debug!("Export already running");
            return;
        }
        log::info!("Exporting with {:?} strategy", self.pipeline.strategy);
        self.export_job = Some(self.pipeline.spawn(self.capture_target()));
    }

    fn select_sticker(&mut self, ctx: &egui::Context, asset: StickerAsset) {
        self.state.select_sticker(asset);
        if let Some(previous) = &self.overlay {
            log::debug!("Replacing sticker {}", previous.asset().index());
        }
        self.overlay = Some(StickerOverlay::new(
            ctx,
            asset,
            self.assets.sticker(asset),
            self.settings.sticker_size,
        ));
    }

    fn handle_controls(&mut self, ctx: &egui::Context, action: ControlsAction) {
        match action {
            ControlsAction::ChoosePhoto => self.choose_photo(ctx),
            ControlsAction::UseThisPhoto => self.state.use_current_photo(),
            ControlsAction::Reset => self.state.reset(),
            ControlsAction::AddSticker => self.state.open_picker(),
            ControlsAction::Save => self.save(),
            ControlsAction::None => {}
        }
    }
}

impl eframe::App for StickerSmashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);
        self.poll_export(ctx);

        // Request repaint while background work is running
        if self.loading_message.is_some() || self.export_job.is_some() {
            ctx.request_repaint();
        }

        if self.state.picker_open && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.state.close_picker();
        }

        let frame_size = egui::vec2(self.settings.frame_width as f32, self.settings.frame_height as f32);
        let modal_open = self.state.picker_open;

        let controls_action = egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                ui.add_enabled_ui(!modal_open, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(50.0);

                        let texture = &self.photo.as_ref().unwrap_or(&self.placeholder).texture;
                        let frame_rect = surface::show(ui, texture, frame_size);
                        if let Some(overlay) = self.overlay.as_mut() {
                            overlay.show(ui, frame_rect);
                        }

                        if let Some(ref message) = self.loading_message {
                            ui.painter().rect_filled(
                                frame_rect,
                                crate::io::capture::FRAME_ROUNDING,
                                egui::Color32::from_black_alpha(140),
                            );
                            ui.put(frame_rect, egui::Spinner::new().size(32.0));
                            ui.label(egui::RichText::new(message).color(egui::Color32::from_gray(200)));
                        }

                        ui.add_space(40.0);
                        controls::show(ui, self.state.controls_mode, self.state.export_in_flight)
                    })
                    .inner
                })
                .inner
            })
            .inner;

        self.handle_controls(ctx, controls_action);

        let stickers = &self.sticker_textures;
        if let Some(response) =
            picker_dialog::show(ctx, self.state.picker_open, |ui| selector::show(ui, stickers))
        {
            if let Some(asset) = response.inner {
                self.select_sticker(ctx, asset);
            } else if response.close_requested {
                self.state.close_picker();
            }
        }

        self.notices.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::capture::{CaptureOptions, ViewCapture};
    use crate::io::picker::PickResult;
    use crate::models::state::ControlsMode;
    use std::cell::RefCell;

    /// Picker that replays a fixed list of outcomes.
    struct ScriptedPicker(RefCell<Vec<PickResult>>);

    impl ImagePicker for ScriptedPicker {
        fn pick_image(&self, _options: &PickOptions) -> PickResult {
            self.0.borrow_mut().pop().unwrap_or_else(PickResult::cancelled)
        }
    }

    /// Capture whose worker thread dies mid-export.
    struct PanickingCapture;

    impl ViewCapture for PanickingCapture {
        fn capture(&self, _target: &CaptureTarget, _options: &CaptureOptions) -> anyhow::Result<PathBuf> {
            panic!("capture backend crashed");
        }
    }

    fn app(dir: &std::path::Path, picks: Vec<PickResult>) -> StickerSmashApp {
        app_with_capture(dir, picks, Arc::new(Compositor))
    }

    fn app_with_capture(
        dir: &std::path::Path,
        picks: Vec<PickResult>,
        capture: Arc<dyn ViewCapture>,
    ) -> StickerSmashApp {
        let ctx = egui::Context::default();
        let settings = Settings {
            library_dir: Some(dir.join("library")),
            downloads_dir: Some(dir.join("downloads")),
            ..Settings::default()
        };
        let library = Arc::new(MediaLibrary::new(dir.join("library")));
        let compositor = Arc::new(Compositor);
        let pipeline = ExportPipeline::new(
            &settings,
            ExportServices {
                capture,
                rasterizer: compositor,
                permission: library.clone(),
                saver: library.clone(),
                downloader: Arc::new(DirectoryDownloader::new(dir.join("downloads"))),
            },
        );
        StickerSmashApp::with_services(
            &ctx,
            settings,
            Box::new(ScriptedPicker(RefCell::new(picks))),
            library,
            pipeline,
        )
    }

    fn wait_for_photo(app: &mut StickerSmashApp, ctx: &egui::Context) {
        while app.image_loader.is_some() {
            std::thread::sleep(std::time::Duration::from_millis(5));
            app.poll_image_loader(ctx);
        }
    }

    #[test]
    fn test_permission_requested_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), Vec::new());
        assert_eq!(app.library.status(), PermissionStatus::Granted);
    }

    #[test]
    fn test_cancelled_pick_keeps_initial_state() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = egui::Context::default();
        let mut app = app(dir.path(), vec![PickResult::cancelled()]);
        app.handle_controls(&ctx, ControlsAction::ChoosePhoto);
        assert_eq!(app.state, AppState::new());
        assert_eq!(app.notices.visible().len(), 1);
        assert_eq!(app.notices.visible()[0].text, "You didn't select any image.");
    }

    #[test]
    fn test_unreadable_photo_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = egui::Context::default();
        let bogus = dir.path().join("not-a-photo.png");
        std::fs::write(&bogus, b"nope").unwrap();
        let mut app = app(dir.path(), vec![PickResult::picked(bogus)]);

        app.handle_controls(&ctx, ControlsAction::ChoosePhoto);
        wait_for_photo(&mut app, &ctx);
        assert_eq!(app.state.controls_mode, ControlsMode::PickPrompt);
        assert!(app.photo.is_none());
        assert_eq!(app.notices.visible().len(), 1);
    }

    #[test]
    fn test_pick_sticker_drag_double_tap_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = egui::Context::default();
        let photo = dir.path().join("a.png");
        RgbaImage::from_pixel(320, 440, image::Rgba([0, 200, 0, 255]))
            .save(&photo)
            .unwrap();
        let mut app = app(dir.path(), vec![PickResult::picked(photo.clone())]);

        app.handle_controls(&ctx, ControlsAction::ChoosePhoto);
        wait_for_photo(&mut app, &ctx);
        assert_eq!(app.state.controls_mode, ControlsMode::Editing);
        assert_eq!(app.state.selected_image, Some(photo));

        app.handle_controls(&ctx, ControlsAction::AddSticker);
        assert!(app.state.picker_open);
        let asset = StickerAsset::from_index(0).unwrap();
        app.select_sticker(&ctx, asset);
        assert!(!app.state.picker_open);
        assert_eq!(app.state.active_sticker, Some(asset));

        let overlay = app.overlay.as_ref().unwrap();
        overlay.transform().apply(crate::models::sticker::GestureEvent::Pan { dx: 10.0, dy: -5.0 });
        overlay.transform().apply(crate::models::sticker::GestureEvent::DoubleTap);
        let transform = overlay.transform().snapshot();
        assert_eq!((transform.offset.dx, transform.offset.dy, transform.scale), (10.0, -5.0, 80.0));

        app.handle_controls(&ctx, ControlsAction::Save);
        assert!(app.state.export_in_flight);
        // A second save while the first runs is ignored
        app.handle_controls(&ctx, ControlsAction::Save);
        while app.export_job.is_some() {
            std::thread::sleep(std::time::Duration::from_millis(5));
            app.poll_export(&ctx);
        }
        assert!(!app.state.export_in_flight);
        assert_eq!(app.notices.visible().last().unwrap().text, "Saved!");

        let saved: Vec<_> = std::fs::read_dir(dir.path().join("library")).unwrap().flatten().collect();
        assert_eq!(saved.len(), 1);
        let image = image::open(saved[0].path()).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (320, 440));
        assert_eq!(image.get_pixel(300, 400), &image::Rgba([0, 200, 0, 255]));
    }

    #[test]
    fn test_reselecting_sticker_resets_transform() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = egui::Context::default();
        let mut app = app(dir.path(), Vec::new());
        let asset = StickerAsset::from_index(1).unwrap();
        app.select_sticker(&ctx, asset);
        app.overlay
            .as_ref()
            .unwrap()
            .transform()
            .apply(crate::models::sticker::GestureEvent::DoubleTap);
        app.select_sticker(&ctx, asset);
        assert_eq!(app.overlay.as_ref().unwrap().layer().transform.scale, 40.0);
    }

    #[test]
    fn test_photo_wider_than_texture_limit_is_downscaled_for_display() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = egui::Context::default();
        let max_side = ctx.input(|i| i.max_texture_side);
        let wide = dir.path().join("panorama.png");
        RgbaImage::from_pixel(max_side as u32 * 8, 2, image::Rgba([0, 0, 255, 255]))
            .save(&wide)
            .unwrap();
        let mut app = app(dir.path(), vec![PickResult::picked(wide.clone())]);

        app.handle_controls(&ctx, ControlsAction::ChoosePhoto);
        wait_for_photo(&mut app, &ctx);
        assert_eq!(app.state.selected_image, Some(wide));

        let photo = app.photo.as_ref().unwrap();
        let [width, height] = photo.texture.size();
        assert!(width <= max_side && height <= max_side);
        assert_eq!(height, 1);
        assert_eq!(photo.pixels.dimensions(), (max_side as u32 * 8, 2));
    }

    #[test]
    fn test_crashed_export_allows_retry() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = egui::Context::default();
        let mut app = app_with_capture(dir.path(), Vec::new(), Arc::new(PanickingCapture));

        app.handle_controls(&ctx, ControlsAction::Save);
        assert!(app.state.export_in_flight);
        while app.export_job.is_some() {
            std::thread::sleep(std::time::Duration::from_millis(5));
            app.poll_export(&ctx);
        }
        assert!(!app.state.export_in_flight);
        assert_eq!(app.notices.visible().len(), 1);
        assert!(app.notices.visible()[0].text.contains("export stopped unexpectedly"));

        // Save is accepted again
        app.handle_controls(&ctx, ControlsAction::Save);
        assert!(app.state.export_in_flight);
    }

    #[test]
    fn test_crashed_loader_allows_new_pick() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = egui::Context::default();
        let mut app = app(dir.path(), Vec::new());

        // A loader whose sender is gone without a result
        let (sender, receiver) = channel::<Result<LoadedPhoto, String>>();
        drop(sender);
        app.image_loader = Some(receiver);
        app.loading_message = Some("Loading photo...".to_string());

        app.poll_image_loader(&ctx);
        assert!(app.image_loader.is_none());
        assert!(app.loading_message.is_none());
        assert_eq!(app.state.controls_mode, ControlsMode::PickPrompt);
        assert_eq!(app.notices.visible().len(), 1);
    }
}
