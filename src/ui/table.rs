use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const HEADERS: [&str; 4] = ["Launch Site", "Payload Mass (kg)", "class", "Booster Version Category"];

/// Table of the launches currently passing the site and payload filters.
pub fn launch_table(ui: &mut Ui, state: &AppState) {
    let indices = state.visible_indices();
    if indices.is_empty() {
        ui.label(RichText::new("No launches match the current selection.").weak());
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(40.0))
        .column(Column::remainder())
        .max_scroll_height(260.0)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let record = &state.dataset.records[indices[row.index()]];
                row.col(|ui| {
                    ui.label(&record.launch_site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", record.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(record.outcome.to_string());
                });
                row.col(|ui| {
                    ui.colored_label(
                        state.booster_colors.color_for(&record.booster_category),
                        &record.booster_category,
                    );
                });
            });
        });
}
