pub mod aggregate;
pub mod lookup;
mod explorer;
mod reports;

pub use aggregate::{
    density, max_by_value, min_by_value, population_delta, region_mean, row_mean, row_sum,
};
pub use explorer::Explorer;
pub use lookup::{find_row_by_key, find_rows_by_predicate, find_year_column, year_columns};
pub use reports::{
    CountrySpecies, DensityReport, ExtremeReport, PopulationReport, Selection, SpeciesReport,
};
