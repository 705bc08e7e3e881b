//! Doping in Professional Bicycle Racing
//!
//! Scatter chart of the fastest Alpe d'Huez ascents by year, colored by
//! doping allegations, with hover tooltips and SVG export.

mod charts;
mod config;
mod data;
mod gui;

use eframe::egui;
use gui::DopingChartApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 680.0])
            .with_min_inner_size([860.0, 640.0])
            .with_title("Doping in Professional Bicycle Racing"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Doping Chart",
        options,
        Box::new(|cc| Ok(Box::new(DopingChartApp::new(cc)))),
    )
}
