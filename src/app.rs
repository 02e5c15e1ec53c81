use eframe::egui;

use crate::config::{Cli, Settings, SETTINGS_KEY};
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CrownMarkerApp {
    pub state: AppState,
}

impl CrownMarkerApp {
    /// Restore persisted settings, apply command-line overrides, and scan the
    /// startup directory if there is one.
    pub fn new(cc: &eframe::CreationContext<'_>, cli: &Cli) -> Self {
        let persisted: Settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, SETTINGS_KEY))
            .unwrap_or_default();
        let startup_root = persisted.startup_root(cli);

        let mut state = AppState::new(persisted.with_cli(cli));
        if let Some(root) = startup_root {
            panels::scan_root(&mut state, &root);
        }
        Self { state }
    }
}

impl eframe::App for CrownMarkerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: threshold entry ----
        egui::TopBottomPanel::bottom("threshold_bar").show(ctx, |ui| {
            panels::threshold_bar(ui, &mut self.state);
        });

        // ---- Left side panel: discovered files ----
        egui::SidePanel::left("file_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::file_list(ui, &mut self.state);
            });

        // ---- Central panel: XZ / YZ plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::projection_plots(ui, &self.state);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, &self.state.settings);
    }
}
