/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  spacex_launch_dash.csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset   (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site index, payload min/max
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site + payload range → row indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
