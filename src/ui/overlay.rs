// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sticker overlay.
//!
//! Draws the active sticker over the photo frame and turns pointer input
//! into gesture events: dragging moves the sticker, double-clicking (or
//! double-tapping on touch screens) doubles its size once. Each overlay
//! owns its transform; picking a sticker creates a new overlay.

use crate::io::capture::StickerLayer;
use crate::io::media::LoadedImage;
use crate::models::sticker::{GestureEvent, StickerAsset, TransformHandle};
use crate::util::geometry::{contain_size, Placement};
use crate::util::spring::Spring;
use image::RgbaImage;
use std::sync::Arc;

pub struct StickerOverlay {
    asset: StickerAsset,
    texture: egui::TextureHandle,
    image: Arc<RgbaImage>,
    transform: TransformHandle,
    x: Spring,
    y: Spring,
    size: Spring,
    seen_revision: u64,
}

impl StickerOverlay {
    pub fn new(ctx: &egui::Context, asset: StickerAsset, sticker: &LoadedImage, base_size: f32) -> Self {
        let texture = ctx.load_texture(
            format!("sticker_{}", asset.index()),
            sticker.to_color_image(),
            egui::TextureOptions::LINEAR,
        );
        log::info!("Placed sticker {}", asset.index());

        Self {
            asset,
            texture,
            image: Arc::new(sticker.pixels.clone()),
            transform: TransformHandle::new(base_size),
            x: Spring::new(0.0),
            y: Spring::new(0.0),
            size: Spring::new(base_size),
            seen_revision: 0,
        }
    }

    pub fn asset(&self) -> StickerAsset {
        self.asset
    }

    pub fn transform(&self) -> &TransformHandle {
        &self.transform
    }

    /// The sticker as it should appear in an export: at its settled
    /// transform, not mid-animation.
    pub fn layer(&self) -> StickerLayer {
        StickerLayer {
            image: Arc::clone(&self.image),
            transform: self.transform.snapshot(),
        }
    }

    /// Feed the latest transform to the springs and advance them.
    fn animate(&mut self, dt: f32) {
        let revision = self.transform.revision();
        if revision != self.seen_revision {
            let target = self.transform.snapshot();
            self.x.set_target(target.offset.dx);
            self.y.set_target(target.offset.dy);
            self.size.set_target(target.scale);
            self.seen_revision = revision;
        }
        self.x.tick(dt);
        self.y.tick(dt);
        self.size.tick(dt);
    }

    fn is_animating(&self) -> bool {
        self.x.is_animating() || self.y.is_animating() || self.size.is_animating()
    }

    /// Draw the sticker relative to `frame` and handle its gestures.
    pub fn show(&mut self, ui: &mut egui::Ui, frame: egui::Rect) {
        let dt = ui.input(|i| i.stable_dt);
        self.animate(dt);

        let placement = Placement::from_parts(self.x.get(), self.y.get(), self.size.get());
        let rect = egui::Rect::from_min_size(
            frame.min + egui::vec2(placement.x, placement.y),
            egui::vec2(placement.size, placement.size),
        );

        let response = ui
            .interact(rect, ui.id().with("sticker_overlay"), egui::Sense::click_and_drag())
            .on_hover_cursor(egui::CursorIcon::Grab);

        if response.dragged() {
            let delta = response.drag_delta();
            if delta != egui::Vec2::ZERO {
                self.transform.apply(GestureEvent::Pan {
                    dx: delta.x,
                    dy: delta.y,
                });
            }
        }

        if response.double_clicked() {
            self.transform.apply(GestureEvent::DoubleTap);
            let transform = self.transform.snapshot();
            log::info!("Sticker size {} (doubled: {})", transform.scale, transform.is_doubled());
        }

        let [tex_width, tex_height] = self.texture.size();
        let (width, height) = contain_size(tex_width as u32, tex_height as u32, placement.size);
        let image_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(width, height));
        ui.painter().image(
            self.texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if self.is_animating() {
            ui.ctx().request_repaint();
        }
    }
}
