use colored::{Color, Colorize};

use crate::analysis::{PopulationReport, SpeciesReport};
use crate::models::KeyValue;

const BAR_WIDTH: usize = 40;
const CATEGORY_COLORS: [Color; 4] = [Color::Red, Color::BrightRed, Color::Blue, Color::Magenta];

fn bar(value: f64, max: f64) -> String {
    let len = if max > 0.0 && value > 0.0 {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    "\u{2588}".repeat(len)
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

/// Horizontal bars for a list of `(label, value)` pairs.
pub fn format_bar_chart(title: &str, values: &[KeyValue]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", title.bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if values.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max = values.iter().map(|kv| kv.value).fold(0.0f64, f64::max);
    let width = label_width(values.iter().map(|kv| kv.key.as_str()));

    for kv in values {
        output.push_str(&format!(
            "  {:<width$}  {:>14.0}  {}\n",
            kv.key,
            kv.value,
            bar(kv.value, max).green()
        ));
    }

    output.push('\n');
    output
}

/// Grouped bars of the species counts per category for every country.
pub fn format_species_chart(report: &SpeciesReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("Endangered Species in {}", report.region).bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if report.countries.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max = report
        .countries
        .iter()
        .flat_map(|c| c.counts.iter().copied())
        .fold(0.0f64, f64::max);
    let categories = report
        .countries
        .iter()
        .map(|c| c.counts.len())
        .max()
        .unwrap_or(0);
    let width = label_width(report.countries.iter().map(|c| c.country.as_str()));

    for i in 0..categories {
        let fallback = format!("#{}", i + 1);
        let category = report.categories.get(i).unwrap_or(&fallback);
        let color = CATEGORY_COLORS[i % CATEGORY_COLORS.len()];
        output.push_str(&format!("  {}\n", category.bold()));
        for kv in report.category_series(i) {
            output.push_str(&format!(
                "    {:<width$}  {:>6.0}  {}\n",
                kv.key,
                kv.value,
                bar(kv.value, max).color(color)
            ));
        }
    }

    output.push('\n');
    output
}

/// Population over time for the country, then latest population per country
/// of the sub-region.
pub fn format_population_chart(report: &PopulationReport) -> String {
    let series: Vec<KeyValue> = report
        .series
        .iter()
        .map(|(year, value)| KeyValue::new(year.to_string(), *value))
        .collect();

    let mut output = format_bar_chart(
        &format!(
            "Population of {} from {} to {}",
            report.country, report.earliest_year, report.latest_year
        ),
        &series,
    );
    output.push_str(&format_bar_chart(
        &format!(
            "Population of Each Country in {} ({})",
            report.region, report.latest_year
        ),
        &report.regional_latest,
    ));
    output
}

pub fn print_species_chart(report: &SpeciesReport) {
    print!("{}", format_species_chart(report));
}

pub fn print_population_chart(report: &PopulationReport) {
    print!("{}", format_population_chart(report));
}
