use crate::chart::{Figure, FigureLayout, PieMarker, Trace};
use crate::color::ColorMap;
use crate::data::filter::{SiteSelection, site_indices};
use crate::data::model::Outcome;
use crate::state::{DashboardState, FilterSelection};

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Proportion view for the `success-pie-chart` region.
///
/// * `ALL`  – successful launches counted per site, largest first; sites
///   without a success get no segment.
/// * a site – that site's success and failure counts, in that order.
pub fn success_pie_chart(state: &DashboardState, selection: &FilterSelection) -> Figure {
    match &selection.site {
        SiteSelection::All => successes_by_site(state),
        SiteSelection::Site(site) => outcome_split(state, &selection.site, site),
    }
}

fn successes_by_site(state: &DashboardState) -> Figure {
    let ds = &state.dataset;

    // `sites` is in first-appearance order; the stable sort keeps that order
    // among equal counts.
    let mut counts: Vec<(&str, u64)> = ds
        .sites
        .iter()
        .map(|site| {
            let n = ds.site_index[site]
                .iter()
                .filter(|&&i| ds.records[i].outcome.is_success())
                .count() as u64;
            (site.as_str(), n)
        })
        .filter(|&(_, n)| n > 0)
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    pie(
        "Total Success Launches By Site",
        counts,
        &state.site_colors,
    )
}

fn outcome_split(state: &DashboardState, selection: &SiteSelection, site: &str) -> Figure {
    let ds = &state.dataset;
    let rows = site_indices(ds, selection);
    let successes = rows
        .iter()
        .filter(|&&i| ds.records[i].outcome.is_success())
        .count() as u64;
    let failures = rows.len() as u64 - successes;

    // Unknown site: no rows, so no segments rather than a 0/0 pie.
    let segments = if rows.is_empty() {
        Vec::new()
    } else {
        let success = Outcome::Success.to_string();
        let failure = Outcome::Failure.to_string();
        vec![(success, successes), (failure, failures)]
    };

    pie(
        &format!("Total Success Launches for site {site}"),
        segments.iter().map(|(l, n)| (l.as_str(), *n)).collect(),
        &state.outcome_colors,
    )
}

fn pie(title: &str, segments: Vec<(&str, u64)>, colors: &ColorMap) -> Figure {
    let data = if segments.is_empty() {
        Vec::new()
    } else {
        vec![Trace::Pie {
            labels: segments.iter().map(|(l, _)| l.to_string()).collect(),
            values: segments.iter().map(|(_, n)| *n).collect(),
            marker: PieMarker {
                colors: segments
                    .iter()
                    .map(|(l, _)| colors.color_for(l).to_string())
                    .collect(),
            },
        }]
    };

    Figure {
        data,
        layout: FigureLayout::titled(title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::PayloadRange;
    use crate::data::model::LaunchDataset;
    use crate::data::model::tests::{record, two_site_dataset};

    fn select(site: &str) -> FilterSelection {
        FilterSelection {
            site: SiteSelection::from(site),
            payload: PayloadRange::new(0.0, 10000.0),
        }
    }

    #[test]
    fn test_all_sites_counts_successes_only() {
        let state = DashboardState::new(two_site_dataset());
        let fig = success_pie_chart(&state, &select("ALL"));
        assert_eq!(fig.title(), "Total Success Launches By Site");
        assert_eq!(fig.segments(), vec![("A", 3)]);
    }

    #[test]
    fn test_single_site_success_failure_split() {
        let state = DashboardState::new(two_site_dataset());

        let a = success_pie_chart(&state, &select("A"));
        assert_eq!(a.title(), "Total Success Launches for site A");
        assert_eq!(a.segments(), vec![("Success", 3), ("Failure", 1)]);

        let b = success_pie_chart(&state, &select("B"));
        assert_eq!(b.segments(), vec![("Success", 0), ("Failure", 2)]);
    }

    #[test]
    fn test_single_site_split_sums_to_site_total() {
        let state = DashboardState::new(two_site_dataset());
        for site in state.dataset.sites.clone() {
            let fig = success_pie_chart(&state, &select(&site));
            let total: u64 = fig.segments().iter().map(|(_, n)| n).sum();
            assert_eq!(total as usize, state.dataset.site_index[&site].len());
        }
    }

    #[test]
    fn test_all_sites_sum_equals_total_successes() {
        let ds = LaunchDataset::from_records(vec![
            record("X", 100.0, 1, "FT"),
            record("Y", 200.0, 1, "FT"),
            record("Y", 300.0, 1, "B4"),
            record("Z", 400.0, 0, "B4"),
            record("X", 500.0, 1, "FT"),
            record("W", 600.0, 1, "v1.1"),
        ]);
        let total_successes = ds.records.iter().filter(|r| r.outcome.is_success()).count() as u64;
        let state = DashboardState::new(ds);
        let fig = success_pie_chart(&state, &select("ALL"));

        let sum: u64 = fig.segments().iter().map(|(_, n)| n).sum();
        assert_eq!(sum, total_successes);
        // Largest first, ties in first-appearance order.
        assert_eq!(fig.segments(), vec![("X", 2), ("Y", 2), ("W", 1)]);
    }

    #[test]
    fn test_unknown_site_is_empty_chart() {
        let state = DashboardState::new(two_site_dataset());
        let fig = success_pie_chart(&state, &select("Boca Chica"));
        assert!(fig.data.is_empty());
        assert!(fig.segments().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let state = DashboardState::new(two_site_dataset());
        let sel = select("A");
        assert_eq!(success_pie_chart(&state, &sel), success_pie_chart(&state, &sel));
    }
}
