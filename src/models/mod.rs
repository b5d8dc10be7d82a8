// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for the editor.

pub mod settings;
pub mod state;
pub mod sticker;
