use std::path::Path;

use crate::analysis::aggregate::{
    density, max_by_value, mean, min_by_value, numeric_values, population_delta, region_mean,
    round2, row_mean, row_sum,
};
use crate::analysis::lookup::{
    distinct_values, find_row_by_key, find_rows_by_predicate, find_year_column, year_columns,
};
use crate::analysis::{
    CountrySpecies, DensityReport, ExtremeReport, PopulationReport, Selection, SpeciesReport,
};
use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::io::{DelimitedFormat, TableReader, TableWriter, WriteMode};
use crate::models::{Cell, Extreme, KeyValue, Table};

/// Key column of the species and population tables.
const NAME_COLUMN: usize = 0;

/// Runs the sub-region queries against the configured data files.
///
/// Every query re-reads the tables it needs, so edits to the files are
/// picked up immediately and nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct Explorer {
    config: ExplorerConfig,
}

impl Explorer {
    pub fn new(config: ExplorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    fn load_countries(&self) -> Result<Table, ExplorerError> {
        DelimitedFormat::headerless().read(&self.config.data.countries)
    }

    fn load_species(&self) -> Result<Table, ExplorerError> {
        DelimitedFormat::headerless().read(&self.config.data.species)
    }

    /// The year labels in the header are needed, so it is kept.
    fn load_population(&self) -> Result<Table, ExplorerError> {
        DelimitedFormat::with_header().read(&self.config.data.population)
    }

    /// Distinct sub-regions of the country table, in file order.
    pub fn regions(&self) -> Result<Vec<String>, ExplorerError> {
        let countries = self.load_countries()?;
        Ok(distinct_values(&countries, self.config.columns.region))
    }

    /// Every country name in the country table, in file order.
    pub fn country_names(&self) -> Result<Vec<String>, ExplorerError> {
        let countries = self.load_countries()?;
        Ok(distinct_values(&countries, self.config.columns.country_key))
    }

    /// Check that the region exists and that the country belongs to it.
    pub fn resolve_selection(&self, region: &str, country: &str) -> Result<Selection, ExplorerError> {
        let columns = &self.config.columns;
        let countries = self.load_countries()?;

        if find_rows_by_predicate(&countries, columns.region, region).is_empty() {
            return Err(ExplorerError::NotFound(format!("sub-region '{region}'")));
        }

        let index = find_row_by_key(&countries, columns.country_key, country)?;
        let in_region = countries
            .cell(index, columns.region)
            .is_some_and(|cell| cell.matches(region));
        if !in_region {
            return Err(ExplorerError::NotInRegion {
                country: country.to_string(),
                region: region.to_string(),
            });
        }

        Ok(Selection {
            region: region.to_string(),
            country: country.to_string(),
        })
    }

    fn countries_in_region(&self, countries: &Table, region: &str) -> Vec<String> {
        let columns = &self.config.columns;
        find_rows_by_predicate(countries, columns.region, region)
            .into_iter()
            .filter_map(|index| countries.cell(index, columns.country_key))
            .map(Cell::to_string)
            .collect()
    }

    fn region_members(&self, countries: &Table, region: &str) -> Result<Vec<String>, ExplorerError> {
        let members = self.countries_in_region(countries, region);
        if members.is_empty() {
            return Err(ExplorerError::NotFound(format!("sub-region '{region}'")));
        }
        Ok(members)
    }

    /// Average threatened species per country of `region`, and the region average.
    pub fn species_report(&self, region: &str, country: &str) -> Result<SpeciesReport, ExplorerError> {
        let countries = self.load_countries()?;
        let species = self.load_species()?;
        let members = self.region_members(&countries, region)?;

        let mut rows = Vec::with_capacity(members.len());
        for name in members {
            let index = find_row_by_key(&species, NAME_COLUMN, &name)?;
            let row = &species.rows[index];
            rows.push(CountrySpecies {
                counts: numeric_values(row, NAME_COLUMN),
                average: row_mean(row, NAME_COLUMN)?,
                country: name,
            });
        }

        let averages: Vec<f64> = rows.iter().map(|r| r.average).collect();
        let region_average = region_mean(&averages)?;
        tracing::debug!(region, countries = rows.len(), region_average, "species report");

        Ok(SpeciesReport {
            region: region.to_string(),
            selected_country: country.to_string(),
            categories: self.config.species.categories.clone(),
            countries: rows,
            region_average,
        })
    }

    /// Population change (latest minus earliest year) and average for `country`.
    pub fn population_report(
        &self,
        country: &str,
        region: &str,
    ) -> Result<PopulationReport, ExplorerError> {
        let population = self.load_population()?;
        let header = population
            .header()
            .ok_or_else(|| ExplorerError::NotFound("population header row".to_string()))?;

        let mut columns = year_columns(header, &self.config.population.year_suffix);
        if columns.is_empty() {
            return Err(ExplorerError::NotFound(
                "year columns in the population header".to_string(),
            ));
        }
        columns.sort_by_key(|(year, _)| *year);

        let index = find_row_by_key(&population, NAME_COLUMN, country)?;
        let series = columns
            .iter()
            .map(|&(year, column)| Ok((year, population.number_at(index, column)?)))
            .collect::<Result<Vec<(i32, f64)>, ExplorerError>>()?;

        let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
        let average = mean(&values)?;
        let (earliest_year, earliest) = series[0];
        let (latest_year, latest) = series[series.len() - 1];
        let change = population_delta(latest, earliest);

        let latest_column = columns[columns.len() - 1].1;
        let countries = self.load_countries()?;
        let regional_latest = self
            .countries_in_region(&countries, region)
            .into_iter()
            .map(|name| {
                let row = find_row_by_key(&population, NAME_COLUMN, &name)?;
                Ok(KeyValue::new(name, population.number_at(row, latest_column)?))
            })
            .collect::<Result<Vec<KeyValue>, ExplorerError>>()?;

        Ok(PopulationReport {
            country: country.to_string(),
            region: region.to_string(),
            series,
            earliest_year,
            latest_year,
            change,
            average,
            regional_latest,
        })
    }

    /// Population for `year` divided by the country's land area.
    pub fn population_density(&self, year: i32, country: &str) -> Result<DensityReport, ExplorerError> {
        let population = self.load_population()?;
        let header = population
            .header()
            .ok_or_else(|| ExplorerError::NotFound("population header row".to_string()))?;
        let year_column = find_year_column(header, year, &self.config.population.year_suffix)?;
        let pop_row = find_row_by_key(&population, NAME_COLUMN, country)?;
        let total_population = population.number_at(pop_row, year_column)?;

        let columns = &self.config.columns;
        let countries = self.load_countries()?;
        let area_row = find_row_by_key(&countries, columns.country_key, country)?;
        let land_area = countries.number_at(area_row, columns.area)?;

        Ok(DensityReport {
            country: country.to_string(),
            year,
            population: total_population,
            land_area,
            density: density(total_population, land_area)?,
        })
    }

    /// Write `country,year,density` (density rounded to 2 places) to `path`.
    pub fn export_density(
        &self,
        report: &DensityReport,
        path: impl AsRef<Path>,
        mode: WriteMode,
    ) -> Result<(), ExplorerError> {
        let path = path.as_ref();
        let table = Table::from_rows(vec![vec![
            Cell::from(report.country.as_str()),
            Cell::Number(f64::from(report.year)),
            Cell::Number(round2(report.density)),
        ]]);
        let format = DelimitedFormat {
            mode,
            ..DelimitedFormat::default()
        };
        format.write(&table, path)?;
        tracing::info!(path = %path.display(), country = %report.country, "exported density");
        Ok(())
    }

    /// Country of `region` with the fewest or most threatened species in total.
    pub fn species_extreme(&self, region: &str, extreme: Extreme) -> Result<ExtremeReport, ExplorerError> {
        let countries = self.load_countries()?;
        let species = self.load_species()?;
        let members = self.region_members(&countries, region)?;

        let totals = members
            .into_iter()
            .map(|name| {
                let index = find_row_by_key(&species, NAME_COLUMN, &name)?;
                Ok(KeyValue::new(name, row_sum(&species.rows[index], NAME_COLUMN)))
            })
            .collect::<Result<Vec<KeyValue>, ExplorerError>>()?;

        let selected = match extreme {
            Extreme::Min => min_by_value(&totals)?,
            Extreme::Max => max_by_value(&totals)?,
        }
        .clone();

        Ok(ExtremeReport {
            region: region.to_string(),
            extreme,
            totals,
            selected,
        })
    }
}
