// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo frame.
//!
//! Displays the placeholder or the chosen photo in a fixed, rounded frame.

use crate::io::capture::FRAME_ROUNDING;
use crate::util::geometry::cover_uv;

/// Allocate the frame and paint `texture` into it, filling the frame.
///
/// Returns the frame rectangle, which is the origin for the sticker.
pub fn show(ui: &mut egui::Ui, texture: &egui::TextureHandle, frame_size: egui::Vec2) -> egui::Rect {
    let (rect, _) = ui.allocate_exact_size(frame_size, egui::Sense::hover());

    let [tex_width, tex_height] = texture.size();
    let (min_x, min_y, max_x, max_y) =
        cover_uv(tex_width as u32, tex_height as u32, frame_size.x, frame_size.y);

    egui::Image::new((texture.id(), frame_size))
        .uv(egui::Rect::from_min_max(egui::pos2(min_x, min_y), egui::pos2(max_x, max_y)))
        .rounding(FRAME_ROUNDING)
        .paint_at(ui, rect);

    rect
}
