use std::io;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// One output row, in the column order of the course dataset.
#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "Flight Number")]
    flight_number: u32,
    #[serde(rename = "Launch Site")]
    launch_site: &'a str,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'a str,
}

// (category, booster version prefix, success probability, payload range kg)
const BOOSTERS: [(&str, &str, f64, (f64, f64)); 5] = [
    ("v1.0", "F9 v1.0  B00", 0.2, (0.0, 700.0)),
    ("v1.1", "F9 v1.1  B10", 0.35, (500.0, 4500.0)),
    ("FT", "F9 FT B10", 0.7, (1900.0, 9600.0)),
    ("B4", "F9 B4 B10", 0.6, (2200.0, 9600.0)),
    ("B5", "F9 B5 B10", 0.9, (3600.0, 9600.0)),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

const N_FLIGHTS: u32 = 56;
const SEED: u64 = 42;

/// Write `n_flights` launches as CSV. Same seed, same file.
fn write_sample<W: io::Write>(out: W, n_flights: u32, seed: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut writer = csv::Writer::from_writer(out);

    for flight in 1..=n_flights {
        // Later flights use later booster generations.
        let era = ((flight - 1) as usize * BOOSTERS.len()) / n_flights as usize;
        let (category, prefix, p_success, (lo, hi)) = BOOSTERS[era];

        let launch_site = *SITES.choose(&mut rng).context("no launch sites")?;
        writer.serialize(Row {
            flight_number: flight,
            launch_site,
            class: u8::from(rng.gen_bool(p_success)),
            payload_mass_kg: rng.gen_range(lo..=hi).round(),
            booster_version: format!("{prefix}{:02}", rng.gen_range(0..60)),
            booster_category: category,
        })?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    let output_path = "spacex_launch_dash.csv";
    let file = std::fs::File::create(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    write_sample(file, N_FLIGHTS, SEED)?;

    println!("Wrote {N_FLIGHTS} launches to {output_path}");
    Ok(())
}
