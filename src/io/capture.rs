// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Rendering the photo and sticker into a bitmap.
//!
//! Both export paths go through [`compose`], so the native PNG and the web
//! JPEG contain the same pixels at the same size.

use crate::models::sticker::StickerTransform;
use crate::util::geometry::{self, Placement};
use anyhow::{Context, Result};
use base64::Engine;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

/// Corner radius of the photo frame in logical pixels.
pub const FRAME_ROUNDING: f32 = 18.0;

/// Window background, used where the export format has no alpha.
pub const BACKGROUND: Rgb<u8> = Rgb([0x25, 0x29, 0x2e]);

/// The sticker layer of a capture.
#[derive(Debug, Clone)]
pub struct StickerLayer {
    pub image: Arc<RgbaImage>,
    pub transform: StickerTransform,
}

/// Everything visible inside the photo frame.
#[derive(Debug, Clone)]
pub struct CaptureTarget {
    pub base: Arc<RgbaImage>,
    pub sticker: Option<StickerLayer>,
    /// Logical frame size the transform is expressed in.
    pub frame_width: u32,
    pub frame_height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    pub height: u32,
    /// 1.0 captures lossless PNG, anything lower captures JPEG.
    pub quality: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JpegOptions {
    pub quality: f32,
    pub width: u32,
    pub height: u32,
}

/// Renders the capture target to a local file.
pub trait ViewCapture: Send + Sync {
    fn capture(&self, target: &CaptureTarget, options: &CaptureOptions) -> Result<PathBuf>;
}

/// Renders the capture target to a JPEG data URL.
pub trait WebRasterizer: Send + Sync {
    fn render_to_jpeg(&self, target: &CaptureTarget, options: &JpegOptions) -> Result<String>;
}

/// Capture and rasterizer backed by [`compose`].
#[derive(Debug, Default)]
pub struct Compositor;

impl ViewCapture for Compositor {
    fn capture(&self, target: &CaptureTarget, options: &CaptureOptions) -> Result<PathBuf> {
        let (width, height) =
            geometry::capture_size(target.frame_width, target.frame_height, options.height);
        let composed = compose(target, width, height);

        let lossless = options.quality >= 1.0;
        let suffix = if lossless { ".png" } else { ".jpg" };
        let file = tempfile::Builder::new()
            .prefix("sticker-smash-")
            .suffix(suffix)
            .tempfile()
            .context("Failed to create capture file")?;

        if lossless {
            composed
                .save_with_format(file.path(), ImageFormat::Png)
                .context("Failed to write PNG capture")?;
        } else {
            std::fs::write(file.path(), encode_jpeg(&composed, options.quality)?)
                .context("Failed to write JPEG capture")?;
        }

        let path = file.into_temp_path().keep().context("Failed to keep capture file")?;
        log::info!("Captured {}x{} to {}", width, height, path.display());
        Ok(path)
    }
}

impl WebRasterizer for Compositor {
    fn render_to_jpeg(&self, target: &CaptureTarget, options: &JpegOptions) -> Result<String> {
        let composed = compose(target, options.width, options.height);
        let jpeg = encode_jpeg(&composed, options.quality)?;
        log::info!("Rasterized {}x{} JPEG ({} bytes)", options.width, options.height, jpeg.len());
        Ok(format!(
            "data:image/jpeg;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(jpeg)
        ))
    }
}

/// Render the frame at `width` x `height` pixels.
///
/// The photo fills the frame (cropping the overflowing axis) with rounded
/// corners; the sticker is drawn on top at its transform, scaled from
/// logical frame pixels to output pixels, and clipped to the output.
pub fn compose(target: &CaptureTarget, width: u32, height: u32) -> RgbaImage {
    let mut canvas = fill_frame(&target.base, width, height);
    let factor = height as f32 / target.frame_height as f32;
    round_corners(&mut canvas, FRAME_ROUNDING * factor);

    if let Some(layer) = &target.sticker {
        let placement = Placement::from_transform(&layer.transform).scaled(factor);
        draw_sticker(&mut canvas, &layer.image, placement);
    }
    canvas
}

fn fill_frame(base: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (min_x, min_y, max_x, max_y) =
        geometry::cover_uv(base.width(), base.height(), width as f32, height as f32);
    let (bw, bh) = (base.width() as f32, base.height() as f32);
    let x = (min_x * bw).round() as u32;
    let y = (min_y * bh).round() as u32;
    let w = (((max_x - min_x) * bw).round() as u32).max(1);
    let h = (((max_y - min_y) * bh).round() as u32).max(1);
    let cropped = imageops::crop_imm(base, x, y, w, h).to_image();
    imageops::resize(&cropped, width, height, FilterType::Triangle)
}

/// Make pixels outside a rounded rectangle transparent, anti-aliased.
fn round_corners(img: &mut RgbaImage, radius: f32) {
    let (w, h) = (img.width() as f32, img.height() as f32);
    let radius = radius.min(w / 2.0).min(h / 2.0);
    if radius <= 0.0 {
        return;
    }
    for (x, y, px) in img.enumerate_pixels_mut() {
        let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
        let cx = fx.clamp(radius, w - radius);
        let cy = fy.clamp(radius, h - radius);
        let distance = ((fx - cx).powi(2) + (fy - cy).powi(2)).sqrt() - radius;
        let coverage = (0.5 - distance).clamp(0.0, 1.0);
        px[3] = (px[3] as f32 * coverage).round() as u8;
    }
}

fn draw_sticker(canvas: &mut RgbaImage, sticker: &RgbaImage, placement: Placement) {
    let (w, h) = geometry::contain_size(sticker.width(), sticker.height(), placement.size);
    let (w, h) = (w.round() as u32, h.round() as u32);
    if w == 0 || h == 0 {
        return;
    }
    let resized = imageops::resize(sticker, w, h, FilterType::Triangle);
    let x = placement.x + (placement.size - w as f32) / 2.0;
    let y = placement.y + (placement.size - h as f32) / 2.0;
    imageops::overlay(canvas, &resized, x.round() as i64, y.round() as i64);
}

/// Composite onto the window background and encode as JPEG.
pub fn encode_jpeg(img: &RgbaImage, quality: f32) -> Result<Vec<u8>> {
    let flat = flatten(img, BACKGROUND);
    let quality = (quality.clamp(0.01, 1.0) * 100.0).round() as u8;
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality)
        .encode_image(&flat)
        .context("Failed to encode JPEG")?;
    Ok(bytes)
}

fn flatten(img: &RgbaImage, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let Rgba([r, g, b, a]) = *img.get_pixel(x, y);
        let alpha = a as f32 / 255.0;
        let mix = |fg: u8, bg: u8| (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8;
        Rgb([mix(r, background[0]), mix(g, background[1]), mix(b, background[2])])
    })
}
