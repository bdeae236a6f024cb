/// Data layer: core types, loading, filtering and chart aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset (+ sites, payload bounds)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site + payload predicates → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  pie slices / scatter points
///   └───────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
