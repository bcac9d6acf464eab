// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Application entry point wiring egui/eframe to launch the Swarg Store UI.

use eframe::egui;
use egui_phosphor::Variant;

use crate::config::AppConfig;
use crate::ui::SwargStoreApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: AppConfig, config_warning: Option<String>) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([720.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Swarg Store",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            // Listing media and YouTube thumbnails load by URL.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            let app = SwargStoreApp::new(&config, config_warning)?;
            Ok(Box::new(app))
        }),
    )
}
