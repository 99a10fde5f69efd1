use serde::{Deserialize, Serialize};

use crate::models::{Extreme, KeyValue};

/// A validated sub-region / country pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub region: String,
    pub country: String,
}

/// Threatened species counts for one country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountrySpecies {
    pub country: String,
    /// Counts in category order
    pub counts: Vec<f64>,
    /// Row-mean of `counts`
    pub average: f64,
}

/// Average threatened species per country of a sub-region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesReport {
    pub region: String,
    pub selected_country: String,
    pub categories: Vec<String>,
    pub countries: Vec<CountrySpecies>,
    /// Mean of the per-country averages
    pub region_average: f64,
}

impl SpeciesReport {
    /// `(country, average)` pairs in table order.
    pub fn averages(&self) -> Vec<KeyValue> {
        self.countries
            .iter()
            .map(|c| KeyValue::new(c.country.clone(), c.average))
            .collect()
    }

    /// Counts of one category across the countries, for charting.
    pub fn category_series(&self, category: usize) -> Vec<KeyValue> {
        self.countries
            .iter()
            .map(|c| {
                KeyValue::new(
                    c.country.clone(),
                    c.counts.get(category).copied().unwrap_or(0.0),
                )
            })
            .collect()
    }
}

/// Population change and average for one country over the observed years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationReport {
    pub country: String,
    pub region: String,
    /// `(year, population)` in chronological order
    pub series: Vec<(i32, f64)>,
    pub earliest_year: i32,
    pub latest_year: i32,
    /// Latest minus earliest
    pub change: f64,
    pub average: f64,
    /// Latest-year population of every country in the sub-region
    pub regional_latest: Vec<KeyValue>,
}

/// Population density of a country for one year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityReport {
    pub country: String,
    pub year: i32,
    pub population: f64,
    pub land_area: f64,
    pub density: f64,
}

/// Country with the fewest or most threatened species in a sub-region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtremeReport {
    pub region: String,
    pub extreme: Extreme,
    /// Row-sum per country, in table order
    pub totals: Vec<KeyValue>,
    pub selected: KeyValue,
}
