//! Chart adapters: turn the dataset and the current selection into plain
//! chart data. Nothing in here knows about egui.

use super::filter::{filtered_indices, PayloadRange};
use super::model::{LaunchDataset, SiteSelection};

/// Visible x-axis window of the scatter chart. Data outside is kept.
pub const SCATTER_X_RANGE: [f64; 2] = [0.0, 10000.0];

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// Share of each slice in `[0, 1]`; all zeros for an empty chart.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| {
                if total == 0 {
                    0.0
                } else {
                    s.count as f64 / total as f64
                }
            })
            .collect()
    }
}

/// Build the pie chart for a site selection.
///
/// The payload range never influences this chart. With `All` the whole
/// dataset is counted per launch site; with a specific site that site's rows
/// are counted per outcome class (`"0"` / `"1"`). Largest slices come first.
pub fn pie_data(dataset: &LaunchDataset, site: &SiteSelection) -> PieChart {
    match site {
        SiteSelection::All => {
            let labels = dataset.records.iter().map(|r| r.launch_site.clone());
            PieChart {
                title: "Total Success Launches for All Sites".to_string(),
                slices: count_largest_first(labels),
            }
        }
        SiteSelection::Site(name) => {
            let labels = dataset
                .records
                .iter()
                .filter(|r| &r.launch_site == name)
                .map(|r| r.outcome.to_string());
            PieChart {
                title: format!("Success Launches for {name}"),
                slices: count_largest_first(labels),
            }
        }
    }
}

/// Count labels, largest first. Ties keep first-appearance order.
fn count_largest_first(labels: impl Iterator<Item = String>) -> Vec<PieSlice> {
    let mut slices: Vec<PieSlice> = Vec::new();
    for label in labels {
        match slices.iter_mut().find(|s| s.label == label) {
            Some(slice) => slice.count += 1,
            None => slices.push(PieSlice { label, count: 1 }),
        }
    }
    // `sort_by` is stable.
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Index of the source row in the dataset.
    pub row: usize,
    pub payload_mass_kg: f64,
    pub class: u8,
    pub booster_category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub points: Vec<ScatterPoint>,
    /// Display window for the x axis, not a data filter.
    pub x_range: [f64; 2],
}

impl ScatterChart {
    /// Points grouped by booster category, categories in first-appearance order.
    pub fn series(&self) -> Vec<(&str, Vec<[f64; 2]>)> {
        let mut series: Vec<(&str, Vec<[f64; 2]>)> = Vec::new();
        for p in &self.points {
            let xy = [p.payload_mass_kg, f64::from(p.class)];
            match series.iter_mut().find(|(b, _)| *b == p.booster_category) {
                Some((_, pts)) => pts.push(xy),
                None => series.push((p.booster_category.as_str(), vec![xy])),
            }
        }
        series
    }
}

/// Build the payload-vs-outcome scatter for a site selection and payload window.
pub fn scatter_data(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> ScatterChart {
    let points = filtered_indices(dataset, site, range)
        .into_iter()
        .map(|row| (row, &dataset.records[row]))
        .map(|(row, r)| ScatterPoint {
            row,
            payload_mass_kg: r.payload_mass_kg,
            class: r.outcome.class(),
            booster_category: r.booster_category.clone(),
        })
        .collect();

    let title = match site {
        SiteSelection::All => "Payload vs. Outcome for All Sites".to_string(),
        SiteSelection::Site(name) => format!("Payload vs. Outcome for site {name}"),
    };

    ScatterChart {
        title,
        points,
        x_range: SCATTER_X_RANGE,
    }
}
