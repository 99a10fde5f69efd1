pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod session;
pub mod visualization;

pub use analysis::Explorer;
pub use config::ExplorerConfig;
pub use error::ExplorerError;
pub use io::{read_table, write_table, TableReader, TableWriter, WriteMode};
pub use models::{Cell, Extreme, KeyValue, Row, Table};
pub use session::Session;
