use thiserror::Error;

/// Errors that can occur while loading, querying or exporting tables.
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ambiguous key '{key}': {matches} rows match")]
    Ambiguous { key: String, matches: usize },

    #[error("Country '{country}' is not in the sub-region '{region}'")]
    NotInRegion { country: String, region: String },

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Expected a number in row {row}, column {column}, found '{found}'")]
    TypeMismatch {
        row: usize,
        column: usize,
        found: String,
    },

    #[error("Config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ExplorerError {
    fn from(e: toml::de::Error) -> Self {
        ExplorerError::Config(e.to_string())
    }
}
