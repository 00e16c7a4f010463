use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names of the launch table
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Mission outcome. Stored as `0`/`1` in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(format!("class must be 0 or 1, got {other}")),
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.class()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source CSV).
///
/// Only the columns the dashboard reads are kept; any extra columns in the
/// file (flight number, exact booster version, …) are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub outcome: Outcome,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// PayloadSummary – slider seed values
// ---------------------------------------------------------------------------

/// Minimum and maximum payload mass over the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadSummary {
    pub min: f64,
    pub max: f64,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed indices. Never mutated after load.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches (rows), in file order.
    pub records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    pub sites: Vec<String>,
    /// Distinct booster categories in order of first appearance.
    pub booster_categories: Vec<String>,
    /// Row indices per launch site.
    pub site_index: BTreeMap<String, Vec<usize>>,
    /// `None` only for an empty table.
    pub payload: Option<PayloadSummary>,
}

impl LaunchDataset {
    /// Build indices and summaries from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();
        let mut site_index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut payload: Option<PayloadSummary> = None;

        for (i, rec) in records.iter().enumerate() {
            let rows = site_index.entry(rec.launch_site.clone()).or_default();
            if rows.is_empty() {
                sites.push(rec.launch_site.clone());
            }
            rows.push(i);

            if !booster_categories.contains(&rec.booster_category) {
                booster_categories.push(rec.booster_category.clone());
            }

            let mass = rec.payload_mass_kg;
            payload = Some(match payload {
                None => PayloadSummary { min: mass, max: mass },
                Some(s) => PayloadSummary {
                    min: s.min.min(mass),
                    max: s.max.max(mass),
                },
            });
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
            site_index,
            payload,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `site` occurs in the `Launch Site` column.
    pub fn has_site(&self, site: &str) -> bool {
        self.site_index.contains_key(site)
    }
}
