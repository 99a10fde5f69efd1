use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{DensityReport, ExtremeReport, PopulationReport, SpeciesReport};
use crate::models::Extreme;

fn styled_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Format the per-country species averages of a sub-region as a string.
pub fn format_species_table(report: &SpeciesReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        "Average Threatened Species per Country".bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = styled_table(vec!["UN Sub-region", "Country", "Avg. Threatened Species"]);
    for kv in report.averages() {
        let name = if kv.key == report.selected_country {
            format!("{} *", kv.key)
        } else {
            kv.key
        };
        table.add_row(vec![
            Cell::new(&report.region),
            Cell::new(name),
            Cell::new(format!("{:.2}", kv.value)),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output.push_str(&format!(
        "\nThe average number of threatened species in the sub-region {} is: {}\n",
        report.region,
        format!("{:.2}", report.region_average).bold()
    ));
    output
}

/// Print the species averages table.
pub fn print_species_table(report: &SpeciesReport) {
    print!("{}", format_species_table(report));
}

/// Format the population change and average of a country as a string.
pub fn format_population_summary(report: &PopulationReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("Population of {}", report.country).bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = styled_table(vec!["Metric", "Value", "Unit"]);
    table.add_row(vec![
        Cell::new(format!(
            "Change {} to {}",
            report.earliest_year, report.latest_year
        )),
        Cell::new(format!("{:.0}", report.change)),
        Cell::new("people"),
    ]);
    table.add_row(vec![
        Cell::new(format!(
            "Average {}-{}",
            report.earliest_year, report.latest_year
        )),
        Cell::new(format!("{:.0}", report.average)),
        Cell::new("people"),
    ]);
    table.add_row(vec![
        Cell::new("Observed years"),
        Cell::new(format!("{}", report.series.len())),
        Cell::new(""),
    ]);

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the population summary.
pub fn print_population_summary(report: &PopulationReport) {
    print!("{}", format_population_summary(report));
}

/// Format a density result as a string.
pub fn format_density_summary(report: &DensityReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Population Density".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = styled_table(vec!["Metric", "Value", "Unit"]);
    table.add_row(vec![
        Cell::new(format!("Population {}", report.year)),
        Cell::new(format!("{:.0}", report.population)),
        Cell::new("people"),
    ]);
    table.add_row(vec![
        Cell::new("Land Area"),
        Cell::new(format!("{:.0}", report.land_area)),
        Cell::new("sq km"),
    ]);
    table.add_row(vec![
        Cell::new("Density"),
        Cell::new(format!("{:.2}", report.density)),
        Cell::new("people/sq km"),
    ]);

    output.push_str(&format!("{table}\n"));
    output.push_str(&format!(
        "\nThe population density for the year {} in {} is: {:.2} people per square kilometer\n",
        report.year, report.country, report.density
    ));
    output
}

/// Print a density result.
pub fn print_density_summary(report: &DensityReport) {
    print!("{}", format_density_summary(report));
}

/// Format the ranking of total threatened species in a sub-region.
pub fn format_extreme_summary(report: &ExtremeReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("Total Threatened Species in {}", report.region)
            .bold()
            .green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = styled_table(vec!["Country", "Total"]);
    for kv in &report.totals {
        let marker = if kv.key == report.selected.key { " <" } else { "" };
        table.add_row(vec![
            Cell::new(format!("{}{marker}", kv.key)),
            Cell::new(format!("{:.0}", kv.value)),
        ]);
    }
    output.push_str(&format!("{table}\n"));

    let wording = match report.extreme {
        Extreme::Min => "the least",
        Extreme::Max => "the greatest",
    };
    output.push_str(&format!(
        "\nThe country {} in the region {} has {wording} number of total threatened species.\n",
        report.selected.key.bold(),
        report.region
    ));
    output
}

/// Print the min/max ranking.
pub fn print_extreme_summary(report: &ExtremeReport) {
    print!("{}", format_extreme_summary(report));
}

/// Format the list of available sub-regions.
pub fn format_region_list(regions: &[String]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "UN Sub-regions".bold().green()));

    let mut table = styled_table(vec!["#", "Sub-region"]);
    for (i, region) in regions.iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(region)]);
    }
    output.push_str(&format!("{table}\n"));
    output
}

pub fn print_region_list(regions: &[String]) {
    print!("{}", format_region_list(regions));
}
