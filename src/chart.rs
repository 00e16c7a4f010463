//! Chart descriptions handed to the browser.
//!
//! A [`Figure`] serializes to the `{ data, layout }` shape Plotly accepts, so
//! the page only has to call `Plotly.react(region, figure.data, figure.layout)`.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie {
        labels: Vec<String>,
        values: Vec<u64>,
        marker: PieMarker,
    },
    Scatter {
        name: String,
        mode: &'static str,
        x: Vec<f64>,
        y: Vec<u8>,
        marker: ScatterMarker,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieMarker {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterMarker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Title { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureLayout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl FigureLayout {
    pub fn titled(text: impl Into<String>) -> Self {
        FigureLayout {
            title: Title::new(text),
            xaxis: None,
            yaxis: None,
            legend: None,
        }
    }
}

impl Figure {
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }
}

#[cfg(test)]
impl Figure {
    /// `(label, value)` for every pie segment.
    pub fn segments(&self) -> Vec<(&str, u64)> {
        self.data
            .iter()
            .flat_map(|t| match t {
                Trace::Pie { labels, values, .. } => labels
                    .iter()
                    .map(String::as_str)
                    .zip(values.iter().copied())
                    .collect::<Vec<_>>(),
                Trace::Scatter { .. } => Vec::new(),
            })
            .collect()
    }

    /// `(payload, class, series name)` for every scatter point.
    pub fn points(&self) -> Vec<(f64, u8, &str)> {
        self.data
            .iter()
            .flat_map(|t| match t {
                Trace::Scatter { name, x, y, .. } => x
                    .iter()
                    .zip(y)
                    .map(|(&px, &py)| (px, py, name.as_str()))
                    .collect::<Vec<_>>(),
                Trace::Pie { .. } => Vec::new(),
            })
            .collect()
    }
}
