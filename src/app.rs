use anyhow::{Context, Result};

use crate::config::DashboardConfig;
use crate::controller::{ControlEvent, Controller, Outputs, RawEvent};
use crate::data::filter::SiteSelection;
use crate::data::model::LaunchDataset;
use crate::error::DispatchError;
use crate::state::DashboardState;
use crate::ui::layout::{self, PageLayout, PAYLOAD_SLIDER, PIE_CHART, SCATTER_CHART, SITE_DROPDOWN};
use crate::ui::{pie, scatter};

// ---------------------------------------------------------------------------
// Dashboard application
// ---------------------------------------------------------------------------

/// The loaded table, the static page and the view wiring. Built once at
/// startup; request handling only reads it.
pub struct DashboardApp {
    pub state: DashboardState,
    pub layout: PageLayout,
    pub controller: Controller,
    page_html: String,
}

impl DashboardApp {
    pub fn new(dataset: LaunchDataset, config: &DashboardConfig) -> Result<Self> {
        let state = DashboardState::new(dataset);
        let layout = layout::build_layout(&state, &config.slider);
        let page_html = layout::render_html(&layout).context("rendering dashboard page")?;

        let mut controller = Controller::new();
        controller
            .register(PIE_CHART, &[SITE_DROPDOWN], pie::success_pie_chart)
            .register(
                SCATTER_CHART,
                &[SITE_DROPDOWN, PAYLOAD_SLIDER],
                scatter::payload_scatter_chart,
            );

        Ok(Self {
            state,
            layout,
            controller,
            page_html,
        })
    }

    pub fn page_html(&self) -> &str {
        &self.page_html
    }

    /// Charts for the page as first shown.
    pub fn initial_outputs(&self) -> Result<Outputs, DispatchError> {
        self.controller
            .render_all(&self.state, &self.state.initial_selection())
    }

    /// Validate a posted event and recompute the charts that depend on it.
    pub fn handle_event(&self, raw: RawEvent) -> Result<Outputs, DispatchError> {
        let event = ControlEvent::try_from(raw)?;
        if let SiteSelection::Site(site) = &event.selection.site {
            if !self.state.dataset.has_site(site) {
                log::debug!("site '{site}' not in dataset, charts will be empty");
            }
        }
        self.controller.dispatch(&self.state, &event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::two_site_dataset;

    fn app() -> DashboardApp {
        DashboardApp::new(two_site_dataset(), &DashboardConfig::default()).unwrap()
    }

    fn raw(changed: &str, site: &str, low: f64, high: f64) -> RawEvent {
        serde_json::from_value(serde_json::json!({
            "changed": changed,
            "site": site,
            "payload": [low, high],
        }))
        .unwrap()
    }

    #[test]
    fn test_wiring() {
        let app = app();
        assert_eq!(app.controller.subscribers(SITE_DROPDOWN), vec![PIE_CHART, SCATTER_CHART]);
        assert_eq!(app.controller.subscribers(PAYLOAD_SLIDER), vec![SCATTER_CHART]);
    }

    #[test]
    fn test_initial_outputs_fill_both_regions() {
        let out = app().initial_outputs().unwrap();
        assert_eq!(out[PIE_CHART].segments(), vec![("A", 3)]);
        assert_eq!(out[SCATTER_CHART].points().len(), 6);
    }

    #[test]
    fn test_site_change_updates_both_charts() {
        let out = app()
            .handle_event(raw(SITE_DROPDOWN, "B", 0.0, 10000.0))
            .unwrap();
        assert_eq!(out[PIE_CHART].segments(), vec![("Success", 0), ("Failure", 2)]);
        assert_eq!(out[SCATTER_CHART].title(), "Payload vs. Outcome for B");
    }

    #[test]
    fn test_slider_change_updates_scatter_only() {
        let out = app()
            .handle_event(raw(PAYLOAD_SLIDER, "ALL", 2000.0, 5000.0))
            .unwrap();
        assert!(!out.contains_key(PIE_CHART));
        let masses: Vec<f64> = out[SCATTER_CHART].points().iter().map(|p| p.0).collect();
        assert_eq!(masses.len(), 3);
        assert!(masses.iter().all(|&m| (2000.0..=5000.0).contains(&m)));
    }

    #[test]
    fn test_page_html_is_prerendered() {
        assert!(app().page_html().contains(SCATTER_CHART));
    }
}
