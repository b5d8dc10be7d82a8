// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module maps the sticker transform, which lives in the logical
//! coordinates of the photo frame, onto screen rectangles and capture
//! bitmaps of any size.

use crate::models::sticker::StickerTransform;

/// Distance from the top of the frame to an untranslated sticker.
pub const STICKER_TOP: f32 = 90.0;

/// Square sticker box relative to the top-left corner of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Placement {
    /// Placement for the given transform in logical frame pixels.
    pub fn from_transform(transform: &StickerTransform) -> Self {
        Self::from_parts(transform.offset.dx, transform.offset.dy, transform.scale)
    }

    pub fn from_parts(dx: f32, dy: f32, size: f32) -> Self {
        Self {
            x: dx,
            y: STICKER_TOP + dy,
            size,
        }
    }

    /// The same placement in a bitmap `factor` times the logical frame.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            size: self.size * factor,
        }
    }
}

/// Pixel size of a capture with the given height, keeping the frame aspect.
pub fn capture_size(frame_width: u32, frame_height: u32, height: u32) -> (u32, u32) {
    let width = (frame_width as f64 * height as f64 / frame_height.max(1) as f64).round() as u32;
    (width.max(1), height.max(1))
}

/// Normalized source rectangle `(min_x, min_y, max_x, max_y)` that fills a
/// `dst_width` x `dst_height` box with a `src_width` x `src_height` image,
/// cropping the overflowing axis evenly on both sides.
pub fn cover_uv(src_width: u32, src_height: u32, dst_width: f32, dst_height: f32) -> (f32, f32, f32, f32) {
    let src_aspect = src_width as f32 / src_height as f32;
    let dst_aspect = dst_width / dst_height;

    if src_aspect > dst_aspect {
        // Source is wider - crop left and right
        let visible = dst_aspect / src_aspect;
        let margin = (1.0 - visible) / 2.0;
        (margin, 0.0, 1.0 - margin, 1.0)
    } else {
        // Source is taller - crop top and bottom
        let visible = src_aspect / dst_aspect;
        let margin = (1.0 - visible) / 2.0;
        (0.0, margin, 1.0, 1.0 - margin)
    }
}

/// Largest `(width, height)` with the source aspect that fits in a square
/// box of edge `size`.
pub fn contain_size(src_width: u32, src_height: u32, size: f32) -> (f32, f32) {
    let src_aspect = src_width as f32 / src_height as f32;
    if src_aspect >= 1.0 {
        (size, size / src_aspect)
    } else {
        (size * src_aspect, size)
    }
}

/// Size to shrink a `width` x `height` image to so neither side exceeds
/// `max_side`, keeping the aspect. `None` when it already fits.
pub fn fit_within(width: u32, height: u32, max_side: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= max_side {
        return None;
    }
    let factor = max_side as f64 / longest as f64;
    let fit = |side: u32| ((side as f64 * factor).round() as u32).clamp(1, max_side);
    Some((fit(width), fit(height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_at_rest() {
        let placement = Placement::from_transform(&StickerTransform::new(40.0));
        assert_eq!(placement, Placement { x: 0.0, y: STICKER_TOP, size: 40.0 });
    }

    #[test]
    fn test_placement_scales_with_capture() {
        let placement = Placement::from_parts(10.0, -5.0, 80.0).scaled(2.0);
        assert_eq!(placement.x, 20.0);
        assert_eq!(placement.y, (STICKER_TOP - 5.0) * 2.0);
        assert_eq!(placement.size, 160.0);
    }

    #[test]
    fn test_capture_size_keeps_frame_aspect() {
        assert_eq!(capture_size(320, 440, 440), (320, 440));
        assert_eq!(capture_size(320, 440, 880), (640, 880));
        assert_eq!(capture_size(320, 440, 220), (160, 220));
    }

    #[test]
    fn test_cover_uv_crops_wide_source() {
        // 2:1 source into a 1:1 box keeps the middle half
        let (min_x, min_y, max_x, max_y) = cover_uv(200, 100, 50.0, 50.0);
        assert!((min_x - 0.25).abs() < 1e-6);
        assert!((max_x - 0.75).abs() < 1e-6);
        assert_eq!((min_y, max_y), (0.0, 1.0));
    }

    #[test]
    fn test_cover_uv_crops_tall_source() {
        let (min_x, min_y, max_x, max_y) = cover_uv(100, 400, 100.0, 100.0);
        assert_eq!((min_x, max_x), (0.0, 1.0));
        assert!((min_y - 0.375).abs() < 1e-6);
        assert!((max_y - 0.625).abs() < 1e-6);
    }

    #[test]
    fn test_contain_size() {
        assert_eq!(contain_size(100, 50, 40.0), (40.0, 20.0));
        assert_eq!(contain_size(50, 100, 40.0), (20.0, 40.0));
        assert_eq!(contain_size(64, 64, 40.0), (40.0, 40.0));
    }

    #[test]
    fn test_fit_within() {
        assert_eq!(fit_within(320, 440, 2048), None);
        assert_eq!(fit_within(2048, 100, 2048), None);
        assert_eq!(fit_within(4096, 1000, 2048), Some((2048, 500)));
        assert_eq!(fit_within(1000, 8192, 2048), Some((250, 2048)));
        // Never collapses an axis to zero
        assert_eq!(fit_within(17000, 2, 2048), Some((2048, 1)));
    }
}
