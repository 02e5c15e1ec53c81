mod app;
mod config;
mod data;
mod error;
mod projection;
mod session;
mod state;
mod ui;

use app::CrownMarkerApp;
use clap::Parser;
use config::Cli;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Crown Marker – Point Cloud Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(CrownMarkerApp::new(cc, &cli)))),
    )
}
