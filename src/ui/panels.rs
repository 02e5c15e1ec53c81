use eframe::egui::{self, Color32, Key, RichText, ScrollArea, Ui};

use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Choose folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            let last_root = state.catalog.root().map(|p| p.to_path_buf());
            if ui
                .add_enabled(last_root.is_some(), egui::Button::new("Rescan"))
                .clicked()
            {
                if let Some(root) = last_root {
                    scan_root(state, &root);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        match state.catalog.root() {
            Some(root) => ui.label(root.display().to_string()),
            None => ui.label("No folder selected"),
        };

        ui.separator();

        match &state.status {
            Some(Status::Info(msg)) => {
                ui.label(msg);
            }
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – discovered files
// ---------------------------------------------------------------------------

/// Render the list of discovered files; clicking one loads it.
pub fn file_list(ui: &mut Ui, state: &mut AppState) {
    ui.heading("CSV files");
    ui.separator();

    if state.catalog.is_empty() {
        ui.label("No files.");
        return;
    }

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, entry) in state.catalog.entries().iter().enumerate() {
                let is_selected = state.selected == Some(i);
                if ui
                    .selectable_label(is_selected, entry.display_label(i))
                    .on_hover_text(entry.path.display().to_string())
                    .clicked()
                {
                    clicked = Some(i);
                }
            }
        });

    if let Some(index) = clicked {
        let result = state.select_index(index);
        state.report("Load", result, |n| format!("Loaded {n} points."));
    }
}

// ---------------------------------------------------------------------------
// Bottom bar – threshold entry and save
// ---------------------------------------------------------------------------

pub fn threshold_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Z value:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.threshold_input)
                .desired_width(120.0)
                .hint_text("e.g. 4.5"),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

        let has_session = state.session.is_some();
        if ui.add_enabled(has_session, egui::Button::new("Apply")).clicked() || entered {
            let result = state.apply_threshold();
            state.report("Threshold", result, |z| format!("Crown Z set to {z}."));
        }

        let can_save = state
            .session
            .as_ref()
            .is_some_and(|s| s.threshold().is_some());
        if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
            let result = state.save_current();
            state.report("Save", result, |path| {
                format!("Saved as {}", path.display())
            });
        }

        ui.separator();

        if let Some(session) = &state.session {
            let name = session
                .source()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mut summary = format!("{name}: {} points", session.cloud().len());
            if let Some((lo, hi)) = session.cloud().z_range() {
                summary.push_str(&format!(", Z {lo:.3} … {hi:.3}"));
            }
            match session.threshold() {
                Some(z) => summary.push_str(&format!(", crown Z = {z}")),
                None => summary.push_str(", no crown Z"),
            }
            ui.label(summary);
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let mut dialog = rfd::FileDialog::new().set_title("Choose point-cloud folder");
    if let Some(root) = state.catalog.root().or(state.settings.last_root.as_deref()) {
        dialog = dialog.set_directory(root);
    }

    if let Some(root) = dialog.pick_folder() {
        scan_root(state, &root);
    }
}

/// Scan `root` and report how many files were found.
pub fn scan_root(state: &mut AppState, root: &std::path::Path) {
    let result = state.choose_root(root);
    state.report("Scan", result, |n| format!("Found {n} CSV files."));
}
