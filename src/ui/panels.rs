use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::DashboardConfig;
use crate::data::{export, loader};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left control panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, config: &DashboardConfig) {
    ui.heading("Filters");
    ui.separator();

    // ---- Launch site dropdown ----
    ui.strong("Launch site");
    let current = state.selection().site.clone();
    let mut picked = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in state.dataset.sites.options() {
                let label = option.label().to_string();
                if ui.selectable_label(option == current, label).clicked() {
                    picked = Some(option);
                }
            }
        });
    if let Some(site) = picked {
        state.select_site(site);
    }

    ui.add_space(12.0);

    // ---- Payload range: two handles over the dataset bounds ----
    ui.strong("Payload range (Kg):");
    let bounds = state.selection().bounds();
    let range = state.selection().range();

    let mut low = range.low;
    let mut high = range.high;
    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, bounds.min..=bounds.max)
                .step_by(config.payload_step)
                .suffix(" kg")
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, bounds.min..=bounds.max)
                .step_by(config.payload_step)
                .suffix(" kg")
                .text("to"),
        )
        .changed();

    if low_changed {
        state.set_payload_low(low);
    }
    if high_changed {
        state.set_payload_high(high);
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for mark in bounds.marks(config.payload_step) {
            ui.label(RichText::new(format!("{mark:.0} kg")).small().weak());
        }
    });

    if ui.small_button("Reset range").clicked() {
        state.reset_payload_range();
    }

    ui.add_space(12.0);
    ui.strong("Booster version category");
    for (label, color) in state.booster_colors.legend_entries() {
        ui.label(RichText::new(format!("● {label}")).color(color));
    }
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
            if ui.button("Export filtered…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} shown",
            state.dataset.len(),
            state.visible_indices().len()
        ));

        ui.separator();

        ui.label(RichText::new(state.source.display().to_string()).weak());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        open_path(state, path);
    }
}

/// Replace the dataset with the one at `path`. On failure the current
/// dataset stays and the error is shown in the top bar.
pub fn open_path(state: &mut AppState, path: PathBuf) {
    match loader::load_file(&path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} launches from {} ({} sites)",
                dataset.len(),
                path.display(),
                dataset.sites.len()
            );
            state.set_dataset(dataset, path);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered launches")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .set_file_name("filtered_launches.csv")
        .save_file();

    let Some(path) = file else {
        return;
    };

    let records = state.visible_records();
    match export::save_records(&path, &records) {
        Ok(()) => {
            log::info!("Exported {} launches to {}", records.len(), path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;
    use std::io::Write;

    #[test]
    fn test_open_path_failure_keeps_dataset() {
        let mut state = AppState::new(sample_dataset(), PathBuf::from("launches.csv"));
        open_path(&mut state, PathBuf::from("missing/launches.csv"));
        assert_eq!(state.dataset.len(), 6);
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }

    #[test]
    fn test_open_path_replaces_dataset() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"Launch Site,Payload Mass (kg),class,Booster Version Category\nA,500,1,v1\n")
            .unwrap();

        let mut state = AppState::new(sample_dataset(), PathBuf::from("launches.csv"));
        state.status_message = Some("stale".into());
        open_path(&mut state, file.path().to_path_buf());
        assert_eq!(state.dataset.len(), 1);
        assert_eq!(state.source, file.path());
        assert!(state.status_message.is_none());
    }
}
