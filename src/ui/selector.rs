// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Horizontal list of stickers to choose from.

use crate::models::sticker::StickerAsset;

const THUMBNAIL: f32 = 100.0;

/// Show every sticker and return the one the user tapped, if any.
pub fn show(ui: &mut egui::Ui, stickers: &[(StickerAsset, egui::TextureHandle)]) -> Option<StickerAsset> {
    let mut selected = None;

    egui::ScrollArea::horizontal()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.add_space(20.0);
                ui.spacing_mut().item_spacing.x = 20.0;
                for (asset, texture) in stickers {
                    let button = egui::ImageButton::new((texture.id(), egui::vec2(THUMBNAIL, THUMBNAIL)))
                        .frame(false);
                    if ui.add(button).clicked() {
                        selected = Some(*asset);
                    }
                }
            });
        });

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::LoadedImage;
    use image::RgbaImage;

    #[test]
    fn test_nothing_selected_without_a_click() {
        let ctx = egui::Context::default();
        let stickers: Vec<_> = StickerAsset::all()
            .map(|asset| {
                let image = LoadedImage::from(RgbaImage::new(8, 8));
                let texture = ctx.load_texture(
                    format!("thumb_{}", asset.index()),
                    image.to_color_image(),
                    egui::TextureOptions::LINEAR,
                );
                (asset, texture)
            })
            .collect();

        let mut selected = Some(StickerAsset::all().next().unwrap());
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                selected = show(ui, &stickers);
            });
        });
        assert_eq!(selected, None);
    }
}
