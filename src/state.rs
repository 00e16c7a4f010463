use serde::{Deserialize, Serialize};

use crate::color::ColorMap;
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::data::model::{LaunchDataset, Outcome, PayloadSummary};

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Everything the views read. Built once after loading and never mutated, so
/// it can be shared by reference across requests without locking.
pub struct DashboardState {
    pub dataset: LaunchDataset,
    /// Pie colours in the all-sites view.
    pub site_colors: ColorMap,
    /// Pie colours in the single-site view.
    pub outcome_colors: ColorMap,
    /// Scatter colours, keyed on booster version category.
    pub booster_colors: ColorMap,
}

impl DashboardState {
    pub fn new(dataset: LaunchDataset) -> Self {
        let outcome_labels = [Outcome::Success.to_string(), Outcome::Failure.to_string()];
        Self {
            site_colors: ColorMap::new(dataset.sites.as_slice()),
            outcome_colors: ColorMap::new(outcome_labels.as_slice()),
            booster_colors: ColorMap::new(dataset.booster_categories.as_slice()),
            dataset,
        }
    }

    /// Payload min/max used to seed the range slider.
    pub fn payload_summary(&self) -> PayloadSummary {
        self.dataset
            .payload
            .unwrap_or(PayloadSummary { min: 0.0, max: 0.0 })
    }

    /// The control values the page starts with: all sites, full payload range.
    pub fn initial_selection(&self) -> FilterSelection {
        let summary = self.payload_summary();
        FilterSelection {
            site: SiteSelection::All,
            payload: PayloadRange::new(summary.min, summary.max),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter selection
// ---------------------------------------------------------------------------

/// Current value of every input control. Rebuilt from each incoming event and
/// dropped once the charts are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}
