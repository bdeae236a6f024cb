use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui, Vec2b};
use egui_plot::{Legend, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::data::aggregate::ScatterChart;
use crate::data::model::SiteSelection;
use crate::state::AppState;

/// Slices smaller than this share get no percentage label.
const MIN_LABELLED_FRACTION: f64 = 0.03;

/// Vertical padding around the 0/1 outcome rows of the scatter.
const SCATTER_Y_RANGE: [f64; 2] = [-0.25, 1.25];

fn chart_title(ui: &mut Ui, title: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(title).strong().size(18.0));
    });
}

fn no_data_hint(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new("No data for the current selection").weak());
    });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Outline of one pie wedge on the unit circle, as a closed polygon.
///
/// `start` and `end` are fractions of a full turn, measured clockwise from
/// twelve o'clock.
pub fn wedge(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = ((end - start) * 128.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let t = start + (end - start) * i as f64 / steps as f64;
        let angle = FRAC_PI_2 - TAU * t;
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

/// Render the pie panel.
pub fn pie_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let pie = state.pie();
    chart_title(ui, &pie.title);
    if pie.slices.is_empty() {
        no_data_hint(ui);
    }

    // Outcome labels are "0"/"1" only in single-site mode.
    let colors = if state.selection().site == SiteSelection::All {
        &state.site_colors
    } else {
        &state.outcome_colors
    };

    Plot::new("success_pie_chart")
        .height(height)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for (slice, fraction) in pie.slices.iter().zip(pie.fractions()) {
                let end = start + fraction;
                let points: PlotPoints = wedge(start, end).into();
                let color = colors.color_for(&slice.label);

                plot_ui.polygon(
                    Polygon::new(points)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE))
                        .name(format!("{} ({})", slice.label, slice.count)),
                );

                if fraction >= MIN_LABELLED_FRACTION {
                    let mid = FRAC_PI_2 - TAU * (start + end) / 2.0;
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                            RichText::new(format!("{:.1}%", fraction * 100.0)).strong(),
                        )
                        .color(Color32::WHITE)
                        .anchor(Align2::CENTER_CENTER),
                    );
                }
                start = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Initial view of the scatter: the chart's x window, whatever the data spans.
pub fn scatter_view(chart: &ScatterChart) -> PlotBounds {
    let [x_min, x_max] = chart.x_range;
    let [y_min, y_max] = SCATTER_Y_RANGE;
    PlotBounds::from_min_max([x_min, y_min], [x_max, y_max])
}

/// Render the payload vs. outcome scatter panel.
pub fn scatter_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let chart = state.scatter();
    chart_title(ui, &chart.title);
    if chart.points.is_empty() {
        no_data_hint(ui);
    }

    let view = scatter_view(chart);

    // x is not auto-fitted, so points past the window do not widen it.
    Plot::new("success_payload_scatter_chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(view.min()[0])
        .include_x(view.max()[0])
        .include_y(view.min()[1])
        .include_y(view.max()[1])
        .auto_bounds(Vec2b::new(false, true))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (booster, xy) in chart.series() {
                let points: PlotPoints = xy.into();
                plot_ui.points(
                    Points::new(points)
                        .color(state.booster_colors.color_for(booster))
                        .radius(4.0)
                        .name(booster),
                );
            }
        });
}
