// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application state management.
//!
//! This module holds the interaction state owned by the top-level app:
//! the chosen photo, the active sticker, which control bar is shown and
//! whether the sticker picker is open.

use super::sticker::StickerAsset;
use crate::error::EditorError;
use std::path::PathBuf;

/// Which control bar is shown below the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlsMode {
    /// "Choose a photo" / "Use this photo".
    #[default]
    PickPrompt,
    /// Reset / add sticker / save.
    Editing,
}

/// Top-level interaction state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub selected_image: Option<PathBuf>,
    pub active_sticker: Option<StickerAsset>,
    pub controls_mode: ControlsMode,
    pub picker_open: bool,
    pub export_in_flight: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the outcome of the image picker.
    ///
    /// A cancelled pick (`None`) leaves the state unchanged.
    pub fn apply_pick(&mut self, picked: Option<PathBuf>) -> Result<(), EditorError> {
        let path = picked.ok_or(EditorError::UserCancelled)?;
        log::info!("Selected photo {}", path.display());
        self.selected_image = Some(path);
        self.controls_mode = ControlsMode::Editing;
        Ok(())
    }

    /// Start editing with whatever image is currently shown, which may be
    /// the placeholder.
    pub fn use_current_photo(&mut self) {
        self.controls_mode = ControlsMode::Editing;
    }

    /// Return to the pick prompt. The selected photo is kept.
    pub fn reset(&mut self) {
        self.controls_mode = ControlsMode::PickPrompt;
    }

    pub fn open_picker(&mut self) {
        self.picker_open = true;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    /// Make `asset` the active sticker and dismiss the picker in one step.
    pub fn select_sticker(&mut self, asset: StickerAsset) {
        self.active_sticker = Some(asset);
        self.picker_open = false;
    }

    /// Mark an export as running. Returns `false` if one already is.
    pub fn begin_export(&mut self) -> bool {
        if self.export_in_flight {
            return false;
        }
        self.export_in_flight = true;
        true
    }

    pub fn finish_export(&mut self) {
        self.export_in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert_eq!(state.controls_mode, ControlsMode::PickPrompt);
        assert!(state.selected_image.is_none());
        assert!(state.active_sticker.is_none());
        assert!(!state.picker_open);
    }

    #[test]
    fn test_cancelled_pick_leaves_state_unchanged() {
        let mut state = AppState::new();
        assert_eq!(state.apply_pick(None), Err(EditorError::UserCancelled));
        assert_eq!(state, AppState::new());
    }

    #[test]
    fn test_pick_enters_editing() {
        let mut state = AppState::new();
        state.apply_pick(Some(PathBuf::from("a.jpg"))).unwrap();
        assert_eq!(state.controls_mode, ControlsMode::Editing);
        assert_eq!(state.selected_image, Some(PathBuf::from("a.jpg")));
    }

    #[test]
    fn test_reset_keeps_photo() {
        let mut state = AppState::new();
        state.apply_pick(Some(PathBuf::from("a.jpg"))).unwrap();
        state.reset();
        assert_eq!(state.controls_mode, ControlsMode::PickPrompt);
        assert_eq!(state.selected_image, Some(PathBuf::from("a.jpg")));

        state.apply_pick(Some(PathBuf::from("b.jpg"))).unwrap();
        assert_eq!(state.controls_mode, ControlsMode::Editing);
        assert_eq!(state.selected_image, Some(PathBuf::from("b.jpg")));
    }

    #[test]
    fn test_use_current_photo_allows_placeholder() {
        let mut state = AppState::new();
        state.use_current_photo();
        assert_eq!(state.controls_mode, ControlsMode::Editing);
        assert!(state.selected_image.is_none());
    }

    #[test]
    fn test_selecting_sticker_closes_picker() {
        let mut state = AppState::new();
        state.open_picker();
        let asset = StickerAsset::from_index(2).unwrap();
        state.select_sticker(asset);
        assert_eq!(state.active_sticker, Some(asset));
        assert!(!state.picker_open);
    }

    #[test]
    fn test_export_busy_guard() {
        let mut state = AppState::new();
        assert!(state.begin_export());
        assert!(!state.begin_export());
        state.finish_export();
        assert!(state.begin_export());
    }
}
