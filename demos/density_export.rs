//! Density export example: compute population density for several countries
//! and collect the results in one delimited file.
//!
//! Run from the project root:
//!   cargo run --example density_export

use std::path::Path;

use region_explorer::config::ExplorerConfig;
use region_explorer::io::{read_table, WriteMode};
use region_explorer::visualization::print_density_summary;
use region_explorer::Explorer;

fn main() {
    let explorer = Explorer::new(ExplorerConfig::default());
    let output = std::env::temp_dir().join("Density_Data.csv");

    for (i, country) in ["Kenya", "Chile", "Germany"].iter().enumerate() {
        let report = match explorer.population_density(2020, country) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Skipping {country}: {e}");
                continue;
            }
        };
        print_density_summary(&report);

        // First write truncates, later ones append
        let mode = WriteMode::from(i == 0);
        explorer
            .export_density(&report, &output, mode)
            .expect("Failed to write density file");
    }

    let saved = read_table(Path::new(&output), true).expect("Failed to read density file back");
    println!("\nSaved {} rows to {}", saved.len(), output.display());
    for row in &saved {
        let line: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        println!("  {}", line.join(", "));
    }
}
