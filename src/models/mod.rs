mod cell;
mod table;
mod record;

pub use cell::Cell;
pub use table::{Row, Table};
pub use record::{Extreme, KeyValue};
