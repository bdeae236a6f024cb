use super::model::{LaunchDataset, PayloadBounds, SiteSelection};

// ---------------------------------------------------------------------------
// Payload range: inclusive [low, high]
// ---------------------------------------------------------------------------

/// Inclusive payload mass window in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, payload: f64) -> bool {
        payload >= self.low && payload <= self.high
    }
}

impl From<PayloadBounds> for PayloadRange {
    fn from(b: PayloadBounds) -> Self {
        Self::new(b.min, b.max)
    }
}

// ---------------------------------------------------------------------------
// Selection state: what the user picked in the dropdown and the slider
// ---------------------------------------------------------------------------

/// Current dropdown and range-slider selections.
///
/// The setters keep `bounds.min <= low <= high <= bounds.max`, so the filter
/// functions never see an inverted range coming from the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub site: SiteSelection,
    range: PayloadRange,
    bounds: PayloadBounds,
}

impl SelectionState {
    /// `All` sites and the full payload range.
    pub fn new(bounds: PayloadBounds) -> Self {
        Self {
            site: SiteSelection::All,
            range: bounds.into(),
            bounds,
        }
    }

    pub fn range(&self) -> PayloadRange {
        self.range
    }

    pub fn bounds(&self) -> PayloadBounds {
        self.bounds
    }

    pub fn set_site(&mut self, site: SiteSelection) {
        self.site = site;
    }

    /// Move the lower handle; pushes the upper handle along if crossed.
    pub fn set_low(&mut self, low: f64) {
        let low = self.bounds.clamp(low);
        self.range.low = low;
        if self.range.high < low {
            self.range.high = low;
        }
    }

    /// Move the upper handle; pushes the lower handle along if crossed.
    pub fn set_high(&mut self, high: f64) {
        let high = self.bounds.clamp(high);
        self.range.high = high;
        if self.range.low > high {
            self.range.low = high;
        }
    }

    /// Set both handles at once. An inverted pair is reordered.
    pub fn set_payload_range(&mut self, a: f64, b: f64) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        self.range = PayloadRange::new(self.bounds.clamp(low), self.bounds.clamp(high));
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of launches passing both the site and payload predicates,
/// in dataset order.
///
/// A row passes when:
/// * `site` is `All`, or the row's site equals it exactly
/// * `range.low <= payload <= range.high`
pub fn filtered_indices(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    if let SiteSelection::Site(s) = site {
        if !dataset.sites.contains(s) {
            log::warn!("Site {s:?} is not in the catalog; nothing will match");
        }
    }

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| site.matches(&r.launch_site) && range.contains(r.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}
