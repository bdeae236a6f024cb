use std::path::PathBuf;

use crate::color::ColorMap;
use crate::data::aggregate::{pie_data, scatter_data, PieChart, ScatterChart};
use crate::data::filter::SelectionState;
use crate::data::model::{LaunchDataset, LaunchRecord, SiteSelection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything the dashboard shows, independent of rendering.
///
/// A site change recomputes both charts; a payload range change recomputes
/// only the scatter chart.
pub struct AppState {
    pub dataset: LaunchDataset,

    /// File the dataset was read from.
    pub source: PathBuf,

    selection: SelectionState,

    pie: PieChart,
    scatter: ScatterChart,

    /// Indices of launches passing the current site and payload filters.
    visible_indices: Vec<usize>,

    pub site_colors: ColorMap,
    pub booster_colors: ColorMap,
    pub outcome_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: LaunchDataset, source: PathBuf) -> Self {
        let selection = SelectionState::new(dataset.payload_bounds);
        let pie = pie_data(&dataset, &selection.site);
        let scatter = scatter_data(&dataset, &selection.site, selection.range());
        let visible_indices = scatter_rows(&scatter);

        Self {
            site_colors: ColorMap::new(dataset.sites.sites()),
            booster_colors: ColorMap::new(&dataset.booster_categories),
            outcome_colors: ColorMap::outcome(),
            dataset,
            source,
            selection,
            pie,
            scatter,
            visible_indices,
            status_message: None,
        }
    }

    /// Swap in a newly loaded dataset; selections reset to their defaults.
    pub fn set_dataset(&mut self, dataset: LaunchDataset, source: PathBuf) {
        *self = AppState::new(dataset, source);
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn pie(&self) -> &PieChart {
        &self.pie
    }

    pub fn scatter(&self) -> &ScatterChart {
        &self.scatter
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    pub fn visible_records(&self) -> Vec<&LaunchRecord> {
        self.visible_indices
            .iter()
            .map(|&i| &self.dataset.records[i])
            .collect()
    }

    pub fn select_site(&mut self, site: SiteSelection) {
        if self.selection.site == site {
            return;
        }
        log::debug!("Site selection changed to {}", site.value());
        self.selection.set_site(site);
        self.refresh_pie();
        self.refresh_scatter();
    }

    pub fn set_payload_low(&mut self, low: f64) {
        let before = self.selection.range();
        self.selection.set_low(low);
        if self.selection.range() != before {
            self.refresh_scatter();
        }
    }

    pub fn set_payload_high(&mut self, high: f64) {
        let before = self.selection.range();
        self.selection.set_high(high);
        if self.selection.range() != before {
            self.refresh_scatter();
        }
    }

    /// Put both handles back on the dataset bounds.
    pub fn reset_payload_range(&mut self) {
        let bounds = self.selection.bounds();
        self.selection.set_payload_range(bounds.min, bounds.max);
        self.refresh_scatter();
    }

    fn refresh_pie(&mut self) {
        self.pie = pie_data(&self.dataset, &self.selection.site);
        log::debug!("Pie recomputed: {} slices", self.pie.slices.len());
    }

    fn refresh_scatter(&mut self) {
        let range = self.selection.range();
        self.scatter = scatter_data(&self.dataset, &self.selection.site, range);
        self.visible_indices = scatter_rows(&self.scatter);
        log::debug!(
            "Scatter recomputed for [{}, {}] kg: {} points",
            range.low,
            range.high,
            self.scatter.points.len()
        );
    }
}

/// The scatter holds exactly the filtered rows, so the table reuses them.
fn scatter_rows(scatter: &ScatterChart) -> Vec<usize> {
    scatter.points.iter().map(|p| p.row).collect()
}
