use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire value of the synthetic "every site" dropdown entry.
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// The numeric class value.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Interpret a numeric cell. Only exact `0` and `1` are accepted.
    pub fn from_f64(v: f64) -> Option<Self> {
        if v == 0.0 {
            Some(Outcome::Failure)
        } else if v == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(format!("class must be 0 or 1, got {other}")),
        }
    }
}

impl From<Outcome> for u8 {
    fn from(o: Outcome) -> u8 {
        o.class()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the input table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub outcome: Outcome,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// SiteSelection – dropdown value
// ---------------------------------------------------------------------------

/// What the site dropdown currently points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Value as submitted by the dropdown.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(s) => s,
        }
    }

    /// Human-readable option label.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(s) => s,
        }
    }

    /// Whether a record's site passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SiteCatalog / PayloadBounds – derived once at load time
// ---------------------------------------------------------------------------

/// Distinct launch sites in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteCatalog {
    sites: Vec<String>,
}

impl SiteCatalog {
    pub fn from_records(records: &[LaunchRecord]) -> Self {
        Self {
            sites: distinct_in_order(records.iter().map(|r| r.launch_site.as_str())),
        }
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn contains(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Dropdown options: the `All` sentinel first, then every site.
    pub fn options(&self) -> Vec<SiteSelection> {
        std::iter::once(SiteSelection::All)
            .chain(self.sites.iter().cloned().map(SiteSelection::Site))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }
}

/// Minimum and maximum payload mass over the dataset (`min <= max`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    /// `None` for an empty record set.
    pub fn from_records(records: &[LaunchRecord]) -> Option<Self> {
        let mut iter = records.iter().map(|r| r.payload_mass_kg);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// Slider tick positions: `int(min)`, `int(min) + step`, … up to `max`.
    pub fn marks(&self, step: f64) -> Vec<f64> {
        if step <= 0.0 {
            return Vec::new();
        }
        let start = self.min.trunc();
        let end = self.max.trunc();
        let n = ((end - start) / step).floor() as usize;
        (0..=n).map(|i| start + i as f64 * step).collect()
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with its load-time summaries.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches (rows), in file order.
    pub records: Vec<LaunchRecord>,
    pub sites: SiteCatalog,
    pub payload_bounds: PayloadBounds,
    /// Distinct booster categories in order of first appearance.
    pub booster_categories: Vec<String>,
}

impl LaunchDataset {
    /// Derive the catalog and bounds. Returns `None` when `records` is empty.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        let payload_bounds = PayloadBounds::from_records(&records)?;
        let sites = SiteCatalog::from_records(&records);
        let booster_categories =
            distinct_in_order(records.iter().map(|r| r.booster_category.as_str()));
        Some(LaunchDataset {
            records,
            sites,
            payload_bounds,
            booster_categories,
        })
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    pub(crate) fn record(site: &str, payload: f64, class: u8, booster: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.into(),
            payload_mass_kg: payload,
            outcome: Outcome::try_from(class).unwrap(),
            booster_category: booster.into(),
        }
    }

    pub(crate) fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 0.0, 0, "v1.0"),
            record("VAFB SLC-4E", 500.0, 1, "v1.1"),
            record("CCAFS LC-40", 2500.0, 1, "FT"),
            record("KSC LC-39A", 5300.0, 1, "FT"),
            record("CCAFS LC-40", 9600.0, 0, "B4"),
            record("KSC LC-39A", 15600.0, 1, "B5"),
        ])
        .unwrap()
    }

    /// Non-empty datasets over a few sites and boosters, payloads up to 12 t.
    pub(crate) fn arb_dataset() -> impl Strategy<Value = LaunchDataset> {
        let site = prop::sample::select(vec!["A", "B", "C"]);
        let booster = prop::sample::select(vec!["v1", "FT", "B5"]);
        prop::collection::vec((site, 0.0..12000.0f64, 0u8..2, booster), 1..40).prop_map(
            |rows| {
                let records = rows
                    .into_iter()
                    .map(|(s, p, c, b)| record(s, p, c, b))
                    .collect();
                LaunchDataset::from_records(records).unwrap()
            },
        )
    }

    #[test]
    fn test_catalog_first_appearance_order() {
        let ds = sample_dataset();
        assert_eq!(
            ds.sites.sites(),
            &["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]
        );
        assert_eq!(ds.booster_categories, vec!["v1.0", "v1.1", "FT", "B4", "B5"]);
    }

    #[test]
    fn test_catalog_options_start_with_all() {
        let ds = sample_dataset();
        let options = ds.sites.options();
        assert_eq!(options.len(), 4);
        assert_eq!(options[0], SiteSelection::All);
        assert_eq!(options[0].value(), "ALL");
        assert_eq!(options[0].label(), "All Sites");
        assert!(!ds.sites.contains("ALL"));
    }

    #[test]
    fn test_payload_bounds() {
        let ds = sample_dataset();
        assert_eq!(ds.payload_bounds, PayloadBounds { min: 0.0, max: 15600.0 });
        assert!(LaunchDataset::from_records(Vec::new()).is_none());
    }

    #[test]
    fn test_payload_marks() {
        let bounds = PayloadBounds { min: 362.5, max: 3100.0 };
        assert_eq!(bounds.marks(1000.0), vec![362.0, 1362.0, 2362.0]);
        assert!(bounds.marks(0.0).is_empty());
    }

    #[test]
    fn test_site_selection_matching() {
        assert_eq!(SiteSelection::All.value(), ALL_SITES);
        let s = SiteSelection::Site("KSC LC-39A".into());
        assert_eq!(s.value(), "KSC LC-39A");
        assert!(s.matches("KSC LC-39A"));
        assert!(!s.matches("CCAFS LC-40"));
        assert!(SiteSelection::All.matches("anything"));
    }

    #[test]
    fn test_outcome_conversions() {
        assert_eq!(Outcome::from_f64(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_f64(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_f64(0.5), None);
        assert!(Outcome::try_from(2).is_err());
        assert_eq!(Outcome::Success.to_string(), "1");
    }
}
