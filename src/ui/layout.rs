use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::SliderConfig;
use crate::data::filter::ALL_SITES;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Component ids shared by the page and the controller
// ---------------------------------------------------------------------------

pub const SITE_DROPDOWN: &str = "site-dropdown";
pub const PAYLOAD_SLIDER: &str = "payload-slider";
pub const PIE_CHART: &str = "success-pie-chart";
pub const SCATTER_CHART: &str = "success-payload-scatter-chart";

const PAGE_HTML: &str = include_str!("page.html");

// ---------------------------------------------------------------------------
// Declarative page description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pub title: Heading,
    pub dropdown: Dropdown,
    pub pie_chart: String,
    pub payload_label: String,
    pub slider: RangeSlider,
    pub scatter_chart: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub text: String,
    pub color: String,
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown {
    pub id: String,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub id: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Tick position → label.
    pub marks: BTreeMap<String, String>,
    /// Initial handle positions.
    pub value: [f64; 2],
}

/// Build the static page: title, site dropdown, pie region, payload slider
/// and scatter region.
pub fn build_layout(state: &DashboardState, slider: &SliderConfig) -> PageLayout {
    let mut options = vec![DropdownOption {
        label: "All Sites".to_string(),
        value: ALL_SITES.to_string(),
    }];
    options.extend(state.dataset.sites.iter().map(|site| DropdownOption {
        label: site.clone(),
        value: site.clone(),
    }));

    let marks = [slider.min, slider.max]
        .iter()
        .map(|v| (v.to_string(), v.to_string()))
        .collect();
    let summary = state.payload_summary();

    PageLayout {
        title: Heading {
            text: "SpaceX Launch Records Dashboard".to_string(),
            color: "#503D36".to_string(),
            font_size: 40,
        },
        dropdown: Dropdown {
            id: SITE_DROPDOWN.to_string(),
            options,
            value: ALL_SITES.to_string(),
            placeholder: "Select a Launch Site here".to_string(),
            searchable: true,
        },
        pie_chart: PIE_CHART.to_string(),
        payload_label: "Payload range (Kg):".to_string(),
        slider: RangeSlider {
            id: PAYLOAD_SLIDER.to_string(),
            min: slider.min,
            max: slider.max,
            step: slider.step,
            marks,
            value: [summary.min, summary.max],
        },
        scatter_chart: SCATTER_CHART.to_string(),
    }
}

/// Render the page HTML. The layout is embedded as JSON and turned into
/// controls by the page script.
pub fn render_html(layout: &PageLayout) -> serde_json::Result<String> {
    // `</` would end the surrounding <script> element early.
    let json = serde_json::to_string(layout)?.replace("</", "<\\/");
    Ok(PAGE_HTML
        .replace("{{TITLE}}", &escape_html(&layout.title.text))
        .replace("{{LAYOUT_JSON}}", &json))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
