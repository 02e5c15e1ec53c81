use eframe::egui::{Color32, Ui};
use egui_plot::{HLine, LineStyle, Plot, PlotPoints, Points};

use crate::projection::Projection;
use crate::state::AppState;

/// Scatter colours per panel, first XZ then YZ.
const SERIES_COLORS: [Color32; 2] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(44, 160, 44),
];
const THRESHOLD_COLOR: Color32 = Color32::RED;

// ---------------------------------------------------------------------------
// Elevation plots (central panel)
// ---------------------------------------------------------------------------

/// Render the XZ and YZ projections of the loaded cloud side by side.
pub fn projection_plots(ui: &mut Ui, state: &AppState) {
    let projections = state.projections();
    if projections.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Choose a folder and select a CSV file to view its profile");
        });
        return;
    }

    let radius = state.settings.point_radius;
    let generation = state.load_generation;

    ui.columns(projections.len(), |columns: &mut [Ui]| {
        for (i, (column, proj)) in columns.iter_mut().zip(projections).enumerate() {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            elevation_plot(column, proj, color, radius, generation);
        }
    });
}

fn elevation_plot(ui: &mut Ui, proj: Projection, color: Color32, radius: f32, generation: u64) {
    let title = proj.axes.title();
    let reference = proj.reference;
    let count = proj.points.len();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&title);
    });

    // Keying on the load generation gives each newly loaded file fresh
    // auto-bounds instead of the previous file's zoom.
    Plot::new((title.as_str(), generation))
        .x_axis_label(proj.axes.horizontal.label())
        .y_axis_label(proj.axes.vertical.label())
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let points = Points::new(PlotPoints::from(proj.points))
                .name(format!("{title} ({count} points)"))
                .color(color)
                .radius(radius);
            plot_ui.points(points);

            if let Some(z) = reference {
                plot_ui.hline(
                    HLine::new(z)
                        .name(format!("crown Z = {z}"))
                        .color(THRESHOLD_COLOR)
                        .style(LineStyle::dashed_loose())
                        .width(1.5),
                );
            }
        });
}
