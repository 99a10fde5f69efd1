mod delimited;

use std::path::Path;

use crate::error::ExplorerError;
use crate::models::Table;

pub use delimited::{read_table, read_table_from_bytes, write_table, WriteMode, DELIMITER};

/// Trait for reading a table from a file.
pub trait TableReader {
    fn read(&self, path: &Path) -> Result<Table, ExplorerError>;
}

/// Trait for writing a table to a file.
pub trait TableWriter {
    fn write(&self, table: &Table, path: &Path) -> Result<(), ExplorerError>;
}

/// Comma-delimited reader/writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedFormat {
    /// Keep the first line as an ordinary row when reading
    pub keep_header: bool,
    /// Overwrite or append when writing
    pub mode: WriteMode,
}

impl DelimitedFormat {
    /// Format for tables whose first line is a header to be discarded.
    pub fn headerless() -> Self {
        Self {
            keep_header: false,
            mode: WriteMode::Overwrite,
        }
    }

    /// Format that keeps the header row, as the population table needs.
    pub fn with_header() -> Self {
        Self {
            keep_header: true,
            mode: WriteMode::Overwrite,
        }
    }
}

impl TableReader for DelimitedFormat {
    fn read(&self, path: &Path) -> Result<Table, ExplorerError> {
        read_table(path, self.keep_header)
    }
}

impl TableWriter for DelimitedFormat {
    fn write(&self, table: &Table, path: &Path) -> Result<(), ExplorerError> {
        write_table(path, table, self.mode)
    }
}
