use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::LaunchDataset;

/// Dropdown value meaning "every launch site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// SiteSelection – the dropdown value
// ---------------------------------------------------------------------------

/// Either the `ALL` wildcard or one site name.
///
/// Site names are not checked against the dataset: an unknown name simply
/// matches no rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    All,
    Site(String),
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value)
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        SiteSelection::from(value.to_string())
    }
}

impl From<SiteSelection> for String {
    fn from(sel: SiteSelection) -> Self {
        sel.to_string()
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – the range slider value
// ---------------------------------------------------------------------------

/// Closed interval `[low, high]` on payload mass. `low > high` is allowed and
/// matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

impl From<[f64; 2]> for PayloadRange {
    fn from([low, high]: [f64; 2]) -> Self {
        PayloadRange { low, high }
    }
}

impl From<PayloadRange> for [f64; 2] {
    fn from(r: PayloadRange) -> Self {
        [r.low, r.high]
    }
}

// ---------------------------------------------------------------------------
// Row filtering
// ---------------------------------------------------------------------------

/// Return indices of launches at the selected site.
pub fn site_indices(dataset: &LaunchDataset, site: &SiteSelection) -> Vec<usize> {
    match site {
        SiteSelection::All => (0..dataset.len()).collect(),
        SiteSelection::Site(s) => dataset.site_index.get(s).cloned().unwrap_or_default(),
    }
}

/// Return indices of launches at the selected site whose payload mass lies
/// inside `range` (both ends inclusive).
pub fn filtered_indices(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: &PayloadRange,
) -> Vec<usize> {
    site_indices(dataset, site)
        .into_iter()
        .filter(|&i| range.contains(dataset.records[i].payload_mass_kg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::two_site_dataset;

    #[test]
    fn test_all_wildcard_parses() {
        assert_eq!(SiteSelection::from("ALL"), SiteSelection::All);
        assert_eq!(SiteSelection::from("A"), SiteSelection::Site("A".into()));
        assert_eq!(SiteSelection::All.to_string(), "ALL");
    }

    #[test]
    fn test_site_selection_json() {
        let sel: SiteSelection = serde_json::from_str("\"ALL\"").unwrap();
        assert_eq!(sel, SiteSelection::All);
        let sel: SiteSelection = serde_json::from_str("\"B\"").unwrap();
        assert_eq!(serde_json::to_string(&sel).unwrap(), "\"B\"");
    }

    #[test]
    fn test_range_is_inclusive() {
        let r = PayloadRange::new(500.0, 2500.0);
        assert!(r.contains(500.0));
        assert!(r.contains(2500.0));
        assert!(!r.contains(2500.1));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let ds = two_site_dataset();
        let r = PayloadRange::new(9000.0, 100.0);
        assert!(filtered_indices(&ds, &SiteSelection::All, &r).is_empty());
    }

    #[test]
    fn test_unknown_site_matches_nothing() {
        let ds = two_site_dataset();
        let sel = SiteSelection::from("Nowhere");
        assert!(site_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn test_filter_by_site_and_range() {
        let ds = two_site_dataset();
        let r = PayloadRange::new(1000.0, 5000.0);
        assert_eq!(filtered_indices(&ds, &SiteSelection::from("A"), &r), vec![1, 3]);
        assert_eq!(filtered_indices(&ds, &SiteSelection::All, &r), vec![1, 2, 3]);
    }
}
