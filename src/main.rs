// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sticker Smash
//!
//! A small desktop application for choosing a photo, placing a sticker on
//! it, moving and enlarging the sticker, and saving the result.

mod app;
mod assets;
mod error;
mod export;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::StickerSmashApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let settings = io::serialization::load_settings();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 780.0])
            .with_min_inner_size([360.0, 680.0])
            .with_title("Sticker Smash"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Sticker Smash",
        options,
        Box::new(move |cc| Ok(Box::new(StickerSmashApp::new(&cc.egui_ctx, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
