// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Control bars below the photo.
//!
//! Before editing starts the user can choose a photo or keep the current
//! one. While editing the bar offers reset, add sticker and save.

use crate::models::state::ControlsMode;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0xff, 0xd3, 0x3d);
const DARK: egui::Color32 = egui::Color32::from_rgb(0x25, 0x29, 0x2e);

/// Result of control bar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsAction {
    None,
    ChoosePhoto,
    UseThisPhoto,
    Reset,
    AddSticker,
    Save,
}

/// Visual variant of a labelled button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTheme {
    Primary,
    Default,
}

#[derive(Debug)]
pub struct ButtonStyle {
    pub fill: egui::Color32,
    pub text: egui::Color32,
    /// Border width and color around the button.
    pub border: Option<(f32, egui::Color32)>,
    /// Glyph drawn before the label.
    pub icon: Option<&'static str>,
}

static BUTTON_STYLES: [ButtonStyle; 2] = [
    // Primary
    ButtonStyle {
        fill: egui::Color32::WHITE,
        text: DARK,
        border: Some((4.0, ACCENT)),
        icon: Some("🖼"),
    },
    // Default
    ButtonStyle {
        fill: egui::Color32::TRANSPARENT,
        text: egui::Color32::WHITE,
        border: None,
        icon: None,
    },
];

impl ButtonTheme {
    pub fn style(self) -> &'static ButtonStyle {
        match self {
            ButtonTheme::Primary => &BUTTON_STYLES[0],
            ButtonTheme::Default => &BUTTON_STYLES[1],
        }
    }
}

/// Wide labelled button in the given theme.
fn themed_button(ui: &mut egui::Ui, theme: ButtonTheme, label: &str) -> egui::Response {
    let style = theme.style();
    let text = match style.icon {
        Some(icon) => format!("{icon}  {label}"),
        None => label.to_string(),
    };
    let mut button = egui::Button::new(egui::RichText::new(text).size(16.0).color(style.text))
        .fill(style.fill)
        .rounding(if style.border.is_some() { 18.0 } else { 10.0 })
        .min_size(egui::vec2(320.0, 68.0));
    button = match style.border {
        Some((width, color)) => button.stroke(egui::Stroke::new(width, color)),
        None => button.stroke(egui::Stroke::NONE),
    };
    ui.add(button)
}

/// Glyph with a caption underneath.
fn icon_button(ui: &mut egui::Ui, icon: &str, label: &str, enabled: bool) -> egui::Response {
    let text = format!("{icon}\n{label}");
    ui.add_enabled(
        enabled,
        egui::Button::new(egui::RichText::new(text).size(16.0).color(egui::Color32::WHITE))
            .frame(false)
            .min_size(egui::vec2(72.0, 64.0)),
    )
}

/// Round "+" button used to add a sticker.
fn circle_button(ui: &mut egui::Ui) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(84.0, 84.0), egui::Sense::click());
    let painter = ui.painter();
    let center = rect.center();
    painter.circle_stroke(center, 40.0, egui::Stroke::new(4.0, ACCENT));
    let fill = if response.hovered() {
        egui::Color32::from_gray(235)
    } else {
        egui::Color32::WHITE
    };
    painter.circle_filled(center, 36.0, fill);
    let arm = 12.0;
    let stroke = egui::Stroke::new(3.0, DARK);
    painter.line_segment([center - egui::vec2(arm, 0.0), center + egui::vec2(arm, 0.0)], stroke);
    painter.line_segment([center - egui::vec2(0.0, arm), center + egui::vec2(0.0, arm)], stroke);
    response.on_hover_text("Add sticker")
}

/// Display the control bar for `mode`. Save is disabled while `busy`.
pub fn show(ui: &mut egui::Ui, mode: ControlsMode, busy: bool) -> ControlsAction {
    let mut action = ControlsAction::None;

    match mode {
        ControlsMode::PickPrompt => {
            ui.vertical_centered(|ui| {
                if themed_button(ui, ButtonTheme::Primary, "Choose a photo").clicked() {
                    action = ControlsAction::ChoosePhoto;
                }
                if themed_button(ui, ButtonTheme::Default, "Use this photo").clicked() {
                    action = ControlsAction::UseThisPhoto;
                }
            });
        }
        ControlsMode::Editing => {
            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    // Center the 3-button row
                    let row_width = 72.0 * 2.0 + 84.0 + 2.0 * 60.0;
                    ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));
                    ui.spacing_mut().item_spacing.x = 60.0;
                    if icon_button(ui, "🔄", "Reset", true).clicked() {
                        action = ControlsAction::Reset;
                    }
                    if circle_button(ui).clicked() {
                        action = ControlsAction::AddSticker;
                    }
                    if icon_button(ui, "💾", "Save", !busy).clicked() {
                        action = ControlsAction::Save;
                    }
                });
            });
        }
    }

    action
}
