use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ExplorerError;

/// Locations of the three source tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub countries: PathBuf,
    pub species: PathBuf,
    pub population: PathBuf,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self::in_dir("data")
    }
}

impl DataFiles {
    /// The standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            countries: dir.join("Country_Data.csv"),
            species: dir.join("Threatened_Species.csv"),
            population: dir.join("Population_Data.csv"),
        }
    }
}

/// Column positions in the country metadata table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryColumns {
    pub country_key: usize,
    pub region: usize,
    pub area: usize,
}

impl Default for CountryColumns {
    fn default() -> Self {
        Self {
            country_key: 0,
            region: 2,
            area: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationLayout {
    /// Text after the year in each header label, e.g. `" Pop"` in `"2020 Pop"`
    pub year_suffix: String,
}

impl Default for PopulationLayout {
    fn default() -> Self {
        Self {
            year_suffix: " Pop".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesLayout {
    /// Labels for the count columns after the country name, in file order
    pub categories: Vec<String>,
}

impl Default for SpeciesLayout {
    fn default() -> Self {
        Self {
            categories: ["Mammals", "Birds", "Fish", "Plants"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Explorer configuration, loadable from TOML. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub data: DataFiles,
    pub columns: CountryColumns,
    pub population: PopulationLayout,
    pub species: SpeciesLayout,
}

impl ExplorerConfig {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExplorerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ExplorerError> {
        Ok(toml::from_str(text)?)
    }

    /// Point all three data files at the standard names inside `dir`.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data = DataFiles::in_dir(dir);
        self
    }
}
