use std::path::PathBuf;

/// Fixed dashboard settings. There are no CLI flags or config files; every
/// value here is a compile-time default.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Dataset loaded at startup, relative to the working directory.
    pub data_path: PathBuf,
    pub window_title: String,
    pub heading: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Step of the payload range handles, in kg.
    pub payload_step: f64,
    /// Height of each chart panel in points.
    pub chart_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            window_title: "Launch Records Dashboard".to_string(),
            heading: "SpaceX Launch Records Dashboard".to_string(),
            window_size: [1200.0, 900.0],
            min_window_size: [600.0, 400.0],
            payload_step: 1000.0,
            chart_height: 320.0,
        }
    }
}
