// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bottom sheet hosting the sticker list.

const SHEET_BG: egui::Color32 = egui::Color32::from_rgb(0x25, 0x29, 0x2e);
const TITLE_BG: egui::Color32 = egui::Color32::from_rgb(0x46, 0x4c, 0x55);

/// What happened inside the dialog this frame.
pub struct DialogResponse<R> {
    /// The close control was pressed.
    pub close_requested: bool,
    pub inner: R,
}

/// Show the sheet along the bottom of the window with a "Choose a sticker"
/// title bar, a close control and `add_contents` below.
///
/// Returns `None` when `open` is false.
pub fn show<R>(
    ctx: &egui::Context,
    open: bool,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> Option<DialogResponse<R>> {
    if !open {
        return None;
    }

    let screen = ctx.screen_rect();
    let height = (screen.height() * 0.25).max(180.0);
    let top_rounding = egui::Rounding {
        nw: 18.0,
        ne: 18.0,
        sw: 0.0,
        se: 0.0,
    };

    let response = egui::Area::new(egui::Id::new("sticker_picker"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(screen.min.x, screen.max.y - height))
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(SHEET_BG)
                .rounding(top_rounding)
                .show(ui, |ui| {
                    ui.set_min_size(egui::vec2(screen.width(), height));
                    ui.set_max_width(screen.width());

                    let mut close_requested = false;
                    egui::Frame::none()
                        .fill(TITLE_BG)
                        .rounding(egui::Rounding {
                            nw: 10.0,
                            ne: 10.0,
                            sw: 0.0,
                            se: 0.0,
                        })
                        .inner_margin(egui::Margin::symmetric(20.0, 8.0))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new("Choose a sticker")
                                        .size(16.0)
                                        .color(egui::Color32::WHITE),
                                );
                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                    let close = egui::Button::new(
                                        egui::RichText::new("✖").size(18.0).color(egui::Color32::WHITE),
                                    )
                                    .frame(false);
                                    if ui.add(close).on_hover_text("Close").clicked() {
                                        close_requested = true;
                                    }
                                });
                            });
                        });

                    ui.add_space(12.0);
                    let inner = add_contents(ui);
                    DialogResponse {
                        close_requested,
                        inner,
                    }
                })
                .inner
        });

    Some(response.inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_dialog_shows_nothing() {
        let ctx = egui::Context::default();
        let mut called = false;
        let mut response = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = show(ctx, false, |_ui| called = true);
        });
        assert!(response.is_none());
        assert!(!called);
    }

    #[test]
    fn test_open_dialog_returns_contents() {
        let ctx = egui::Context::default();
        let mut response = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = show(ctx, true, |ui| {
                ui.label("stickers");
                42
            });
        });
        let response = response.unwrap();
        assert_eq!(response.inner, 42);
        assert!(!response.close_requested);
    }
}
