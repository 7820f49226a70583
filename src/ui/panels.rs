use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::DropReason;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Left side panel – cleaning report and legend
// ---------------------------------------------------------------------------

/// Render the left panel: what was kept, what was dropped, and the legend.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Cleaning report");
    ui.separator();

    let Some(analysis) = &state.analysis else {
        ui.label("No dataset loaded.");
        return;
    };

    if let Some(source) = &state.source {
        ui.label(RichText::new(source.display().to_string()).small().weak());
    }

    let report = &analysis.report;
    egui::Grid::new("report_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Rows read");
            ui.label(report.input_rows.to_string());
            ui.end_row();

            ui.strong("Rows kept");
            ui.strong(report.kept_rows.to_string());
            ui.end_row();

            for reason in DropReason::ALL {
                ui.label(format!("Dropped: {reason}"));
                ui.label(report.dropped_for(reason).to_string());
                ui.end_row();
            }
        });

    ui.add_space(8.0);

    let Some((table, colors, spec)) = state.active_view() else {
        return;
    };

    ui.strong(spec.fill_label);
    ui.separator();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for series in &table.series {
                ui.label(RichText::new(format!("■ {series}")).color(colors.color_for(series)));
            }

            ui.add_space(8.0);
            ui.strong(format!("Totals by {}", spec.x_label.to_lowercase()));
            ui.separator();
            for (x, total) in table.x_categories.iter().zip(&table.totals) {
                ui.label(format!("{x}: {total:.2}"));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for kind in ChartKind::ALL {
            if ui
                .selectable_label(state.active_chart == kind, kind.label())
                .clicked()
            {
                state.active_chart = kind;
            }
        }

        ui.separator();

        if let Some(analysis) = &state.analysis {
            ui.label(format!(
                "{} valuations, {} usable",
                analysis.report.input_rows,
                analysis.records.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open valuation data")
        .add_filter("CSV", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
