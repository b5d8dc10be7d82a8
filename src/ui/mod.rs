// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Sticker Smash application.

pub mod controls;
pub mod notices;
pub mod overlay;
pub mod picker_dialog;
pub mod selector;
pub mod surface;
