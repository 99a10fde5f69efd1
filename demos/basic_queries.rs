//! Basic queries example: species averages, population change and extremes
//! for one sub-region of the bundled data.
//!
//! Run from the project root:
//!   cargo run --example basic_queries

use region_explorer::config::ExplorerConfig;
use region_explorer::models::Extreme;
use region_explorer::visualization::{
    print_extreme_summary, print_population_summary, print_region_list, print_species_chart,
    print_species_table,
};
use region_explorer::Explorer;

fn main() {
    let explorer = Explorer::new(ExplorerConfig::default());

    let regions = explorer.regions().expect("Failed to read country data");
    print_region_list(&regions);

    // Species averages with the chart
    match explorer.species_report("Eastern Africa", "Kenya") {
        Ok(report) => {
            print_species_table(&report);
            print_species_chart(&report);
        }
        Err(e) => eprintln!("Could not build species report: {e}"),
    }

    // Population change
    match explorer.population_report("Kenya", "Eastern Africa") {
        Ok(report) => print_population_summary(&report),
        Err(e) => eprintln!("Could not build population report: {e}"),
    }

    for extreme in [Extreme::Min, Extreme::Max] {
        match explorer.species_extreme("Eastern Africa", extreme) {
            Ok(report) => print_extreme_summary(&report),
            Err(e) => eprintln!("Could not find the {extreme} country: {e}"),
        }
    }
}
