// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Built-in artwork.
//!
//! The placeholder photo and the six stickers are drawn at startup so the
//! binary carries no image files. A sticker directory from the settings
//! replaces the drawn stickers one for one.

use crate::io::media::{self, LoadedImage};
use crate::models::sticker::StickerAsset;
use image::{Rgba, RgbaImage};
use std::path::Path;

const STICKER_PX: u32 = 128;

/// The static asset set: one placeholder and the selectable stickers.
#[derive(Debug, Clone)]
pub struct AssetSet {
    pub placeholder: LoadedImage,
    stickers: Vec<LoadedImage>,
}

impl AssetSet {
    /// Drawn placeholder and stickers.
    pub fn builtin(frame_width: u32, frame_height: u32) -> Self {
        Self {
            placeholder: LoadedImage::from(draw_placeholder(frame_width, frame_height)),
            stickers: StickerAsset::all().map(|a| LoadedImage::from(draw_sticker(a))).collect(),
        }
    }

    /// Built-in set with stickers replaced by the PNG files in `dir`.
    ///
    /// Files are taken in name order. Missing or unreadable files keep the
    /// drawn sticker for that slot.
    pub fn with_sticker_dir(frame_width: u32, frame_height: u32, dir: &Path) -> Self {
        let mut set = Self::builtin(frame_width, frame_height);
        let files = match media::list_png_files(dir) {
            Ok(files) => files,
            Err(e) => {
                log::warn!("Ignoring sticker directory: {:#}", e);
                return set;
            }
        };
        for (slot, path) in set.stickers.iter_mut().zip(files) {
            match media::load_image(&path) {
                Ok(img) => {
                    log::info!("Loaded sticker {}", path.display());
                    *slot = img;
                }
                Err(e) => log::warn!("Keeping built-in sticker: {:#}", e),
            }
        }
        set
    }

    pub fn sticker(&self, asset: StickerAsset) -> &LoadedImage {
        &self.stickers[asset.index()]
    }
}

fn blend(dst: &mut Rgba<u8>, color: [u8; 3], coverage: f32) {
    let a = coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let src_alpha = a;
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    for c in 0..3 {
        let blended = (color[c] as f32 * src_alpha
            + dst[c] as f32 * dst_alpha * (1.0 - src_alpha))
            / out_alpha;
        dst[c] = blended.round() as u8;
    }
    dst[3] = (out_alpha * 255.0).round() as u8;
}

/// Paint every pixel whose signed distance (in pixels) is negative.
fn fill(img: &mut RgbaImage, color: [u8; 3], sdf: impl Fn(f32, f32) -> f32) {
    for (x, y, px) in img.enumerate_pixels_mut() {
        let d = sdf(x as f32 + 0.5, y as f32 + 0.5);
        blend(px, color, 0.5 - d);
    }
}

fn circle(cx: f32, cy: f32, r: f32) -> impl Fn(f32, f32) -> f32 {
    move |x, y| ((x - cx).powi(2) + (y - cy).powi(2)).sqrt() - r
}

fn ring(cx: f32, cy: f32, r: f32, width: f32, lower_half: bool) -> impl Fn(f32, f32) -> f32 {
    move |x, y| {
        if lower_half && y < cy {
            return f32::MAX;
        }
        (((x - cx).powi(2) + (y - cy).powi(2)).sqrt() - r).abs() - width / 2.0
    }
}

fn face(img: &mut RgbaImage, skin: [u8; 3], wink: bool) {
    let c = STICKER_PX as f32 / 2.0;
    let dark = [40, 30, 20];
    fill(img, skin, circle(c, c, c - 6.0));
    fill(img, dark, circle(c - 20.0, c - 14.0, 8.0));
    if wink {
        fill(img, dark, ring(c + 20.0, c - 10.0, 8.0, 4.0, true));
    } else {
        fill(img, dark, circle(c + 20.0, c - 14.0, 8.0));
    }
    fill(img, dark, ring(c, c + 4.0, 30.0, 6.0, true));
}

/// Draw one of the built-in stickers.
pub fn draw_sticker(asset: StickerAsset) -> RgbaImage {
    let mut img = RgbaImage::new(STICKER_PX, STICKER_PX);
    let c = STICKER_PX as f32 / 2.0;
    match asset.index() {
        0 => face(&mut img, [255, 204, 51], false),
        1 => fill(&mut img, [230, 40, 70], |x, y| {
            // Implicit heart curve, scaled to the sticker
            let u = (x - c) / 50.0;
            let v = (c - y) / 50.0 + 0.2;
            let f = (u * u + v * v - 1.0).powi(3) - u * u * v.powi(3);
            f * 40.0
        }),
        2 => fill(&mut img, [255, 215, 0], |x, y| {
            let (dx, dy) = (x - c, y - c);
            let r = (dx * dx + dy * dy).sqrt();
            let theta = dy.atan2(dx) + std::f32::consts::FRAC_PI_2;
            let edge = 36.0 + 20.0 * (5.0 * theta).cos();
            r - edge
        }),
        3 => face(&mut img, [120, 200, 90], true),
        4 => {
            fill(&mut img, [60, 140, 230], circle(c, c + 14.0, 38.0));
            fill(&mut img, [60, 140, 230], |x, y| {
                // Triangle tip above the round body
                let half = (y - 10.0).max(0.0) * 0.62;
                if y < 10.0 || y > c + 14.0 {
                    f32::MAX
                } else {
                    (x - c).abs() - half
                }
            });
        }
        _ => {
            let orange = [255, 150, 30];
            for i in 0..8 {
                let angle = i as f32 * std::f32::consts::FRAC_PI_4;
                let (rx, ry) = (c + angle.cos() * 48.0, c + angle.sin() * 48.0);
                fill(&mut img, orange, circle(rx, ry, 9.0));
            }
            fill(&mut img, [255, 190, 40], circle(c, c, 34.0));
        }
    }
    img
}

/// Draw the placeholder photo: a dusk sky over a hill.
pub fn draw_placeholder(width: u32, height: u32) -> RgbaImage {
    let top = [42.0, 54.0, 110.0];
    let bottom = [236.0, 140.0, 100.0];
    let mut img = RgbaImage::from_fn(width, height, |_, y| {
        let t = y as f32 / height.max(1) as f32;
        let mix = |i: usize| (top[i] + (bottom[i] - top[i]) * t).round() as u8;
        Rgba([mix(0), mix(1), mix(2), 255])
    });
    let (w, h) = (width as f32, height as f32);
    fill(&mut img, [255, 226, 150], circle(w * 0.7, h * 0.55, w * 0.12));
    fill(&mut img, [37, 41, 46], circle(w * 0.3, h * 1.25, h * 0.55));
    img
}
