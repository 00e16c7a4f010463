use crate::chart::{Axis, Figure, FigureLayout, Legend, ScatterMarker, Title, Trace};
use crate::data::filter::{SiteSelection, filtered_indices};
use crate::data::model::{COL_BOOSTER_CATEGORY, COL_CLASS, COL_PAYLOAD_MASS};
use crate::state::{DashboardState, FilterSelection};

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter chart
// ---------------------------------------------------------------------------

/// Correlation view for the `success-payload-scatter-chart` region.
///
/// Rows are restricted to the selected site (every row for `ALL`) and to the
/// inclusive payload range, then drawn as payload mass against class with one
/// series per booster version category.
pub fn payload_scatter_chart(state: &DashboardState, selection: &FilterSelection) -> Figure {
    let ds = &state.dataset;
    let title = match &selection.site {
        SiteSelection::All => "Correlation between Payload and Success for all sites".to_string(),
        SiteSelection::Site(site) => format!("Payload vs. Outcome for {site}"),
    };

    // One series per category, in order of first appearance among the rows.
    let mut series: Vec<(&str, Vec<f64>, Vec<u8>)> = Vec::new();
    for i in filtered_indices(ds, &selection.site, &selection.payload) {
        let rec = &ds.records[i];
        let pos = match series.iter().position(|(name, _, _)| *name == rec.booster_category) {
            Some(pos) => pos,
            None => {
                series.push((rec.booster_category.as_str(), Vec::new(), Vec::new()));
                series.len() - 1
            }
        };
        let (_, x, y) = &mut series[pos];
        x.push(rec.payload_mass_kg);
        y.push(rec.outcome.class());
    }

    let data = series
        .into_iter()
        .map(|(name, x, y)| Trace::Scatter {
            name: name.to_string(),
            mode: "markers",
            x,
            y,
            marker: ScatterMarker {
                color: state.booster_colors.color_for(name).to_string(),
            },
        })
        .collect();

    Figure {
        data,
        layout: FigureLayout {
            title: Title::new(title),
            xaxis: Some(Axis { title: Title::new(COL_PAYLOAD_MASS) }),
            yaxis: Some(Axis { title: Title::new(COL_CLASS) }),
            legend: Some(Legend { title: Title::new(COL_BOOSTER_CATEGORY) }),
        },
    }
}
