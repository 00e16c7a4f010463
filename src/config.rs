use std::path::PathBuf;

/// Fixed settings of the dashboard. There are no flags or config files; the
/// values below are the whole configuration surface.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Launch table, relative to the working directory.
    pub data_path: PathBuf,
    pub bind_addr: String,
    pub slider: SliderConfig,
}

/// Bounds of the payload range slider. Independent of the data: the handles
/// start at the dataset min/max but the track always spans these bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            bind_addr: "127.0.0.1:8050".to_string(),
            slider: SliderConfig::default(),
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10000.0,
            step: 1000.0,
        }
    }
}
