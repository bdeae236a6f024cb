use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
    config: DashboardConfig,
}

impl LaunchDashApp {
    pub fn new(state: AppState, config: DashboardConfig) -> Self {
        Self { state, config }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site and payload selection ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &self.config);
            });

        // ---- Central panel: heading, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.vertical_centered(|ui: &mut Ui| {
                        ui.label(
                            RichText::new(&self.config.heading)
                                .size(40.0)
                                .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
                        );
                    });
                    ui.add_space(8.0);

                    plot::pie_chart(ui, &self.state, self.config.chart_height);
                    ui.add_space(16.0);
                    plot::scatter_chart(ui, &self.state, self.config.chart_height);
                    ui.add_space(16.0);

                    egui::CollapsingHeader::new("Filtered launches")
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            table::launch_table(ui, &self.state);
                        });
                });
        });
    }
}
