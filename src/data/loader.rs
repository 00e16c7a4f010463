use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE, COL_PAYLOAD_MASS};
use super::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row naming at least the four dashboard columns
/// * `.json` – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
///
/// Any failure here is fatal for the dashboard: there is no recovery path.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    for (row, rec) in records.iter().enumerate() {
        validate(rec).with_context(|| format!("{}: row {row}", path.display()))?;
    }

    let dataset = LaunchDataset::from_records(records);
    if dataset.is_empty() {
        bail!("{}: dataset contains no launch records", path.display());
    }
    Ok(dataset)
}

fn validate(rec: &LaunchRecord) -> Result<()> {
    if !rec.payload_mass_kg.is_finite() || rec.payload_mass_kg < 0.0 {
        bail!(
            "'{COL_PAYLOAD_MASS}' must be a non-negative number, got {}",
            rec.payload_mass_kg
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. Columns other than
/// `Launch Site`, `Payload Mass (kg)`, `class` and `Booster Version Category`
/// are ignored.
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for required in [COL_LAUNCH_SITE, COL_PAYLOAD_MASS, COL_CLASS, COL_BOOSTER_CATEGORY] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    reader
        .deserialize::<LaunchRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the shape of `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON launch records")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::data::model::{Outcome, PayloadSummary};

    // ==========================================================================
    // LOADER TESTS
    // ==========================================================================
    //
    // The loader runs once at startup; every failure must surface as an error
    // so the process refuses to start.
    // ==========================================================================

    const HEADER: &str = "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n";

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_csv_ignores_extra_columns() {
        let file = write_file(
            ".csv",
            &format!(
                "{HEADER}1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
                 2,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1\n\
                 3,CCAFS LC-40,1,5300.0,F9 FT B1029.1,FT\n"
            ),
        );
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(ds.records[1].outcome, Outcome::Success);
        assert_eq!(ds.records[2].booster_category, "FT");
        assert_eq!(ds.payload, Some(PayloadSummary { min: 0.0, max: 5300.0 }));
    }

    #[test]
    fn test_load_json_records() {
        let file = write_file(
            ".json",
            r#"[
                {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490.0, "class": 1, "Booster Version Category": "FT"},
                {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 6070.0, "class": 0, "Booster Version Category": "B4"}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.sites, vec!["KSC LC-39A"]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(load_file(Path::new("/nonexistent/spacex_launch_dash.csv")).is_err());
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let file = write_file(".csv", "Launch Site,class\nA,1\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Payload Mass (kg)"));
    }

    #[test]
    fn test_invalid_class_is_fatal() {
        let file = write_file(".csv", &format!("{HEADER}1,A,2,100.0,F9,FT\n"));
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn test_negative_payload_is_fatal() {
        let file = write_file(".csv", &format!("{HEADER}1,A,1,-5.0,F9,FT\n"));
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn test_non_numeric_payload_is_fatal() {
        let file = write_file(".csv", &format!("{HEADER}1,A,1,heavy,F9,FT\n"));
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn test_header_only_is_fatal() {
        let file = write_file(".csv", HEADER);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_file(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }
}
