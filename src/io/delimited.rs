use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::ExplorerError;
use crate::models::{Cell, Row, Table};

/// Field separator for every table this crate reads or writes.
pub const DELIMITER: u8 = b',';

/// How `write_table` treats an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate and replace the file contents.
    #[default]
    Overwrite,
    /// Add rows after the existing content.
    Append,
}

impl From<bool> for WriteMode {
    /// `true` means overwrite, `false` means append.
    fn from(overwrite: bool) -> Self {
        if overwrite {
            WriteMode::Overwrite
        } else {
            WriteMode::Append
        }
    }
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // Strict split: quote characters are ordinary data.
    builder
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false);
    builder
}

/// Count the blank lines starting at byte `start`, up to the next record.
///
/// A blank line is a bare `\n`, `\r\n` or `\r`. The `\n` of a CRLF pair may
/// still be unread after the previous record, so it is not counted twice.
fn blank_lines_at(data: &[u8], start: usize) -> usize {
    let mut i = start;
    if i > 0 && data.get(i - 1) == Some(&b'\r') && data.get(i) == Some(&b'\n') {
        i += 1;
    }

    let mut blanks = 0;
    while let Some(&byte) = data.get(i) {
        match byte {
            b'\n' => i += 1,
            b'\r' if data.get(i + 1) == Some(&b'\n') => i += 2,
            b'\r' => i += 1,
            _ => break,
        }
        blanks += 1;
    }
    blanks
}

fn blank_row() -> Row {
    vec![Cell::Text(String::new())]
}

/// Split `data` into rows, one per line.
///
/// The csv reader drops empty lines, so they are put back as a single empty
/// text cell each. Line positions stay intact and the header is always the
/// first physical line.
fn parse_records(data: &[u8], keep_header: bool) -> Result<Table, ExplorerError> {
    let mut rdr = reader_builder().from_reader(data);
    let mut record = csv::StringRecord::new();
    let mut rows: Vec<Row> = Vec::new();

    loop {
        let start = rdr.position().byte() as usize;
        let more = rdr.read_record(&mut record)?;
        rows.extend(std::iter::repeat_with(blank_row).take(blank_lines_at(data, start)));
        if !more {
            break;
        }
        rows.push(record.iter().map(Cell::parse).collect());
    }

    if !keep_header && !rows.is_empty() {
        rows.remove(0);
    }
    Ok(Table::from_rows(rows))
}

/// Read a comma-delimited file into a table.
///
/// With `keep_header` false the first line is discarded. Each remaining cell
/// is coerced to a number when it parses as one and kept as text otherwise.
/// There is no quoting support, so a field containing a comma splits in two.
/// An empty line reads as a row holding one empty text cell.
pub fn read_table(path: impl AsRef<Path>, keep_header: bool) -> Result<Table, ExplorerError> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;

    let table = parse_records(&data, keep_header)?;
    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        keep_header,
        "loaded table"
    );

    Ok(table)
}

/// Read a comma-delimited table from in-memory bytes.
pub fn read_table_from_bytes(data: &[u8], keep_header: bool) -> Result<Table, ExplorerError> {
    parse_records(data, keep_header)
}

/// A row with no cells, or only one empty text cell, is written as an empty line.
fn is_blank(row: &[Cell]) -> bool {
    match row {
        [] => true,
        [Cell::Text(text)] => text.is_empty(),
        _ => false,
    }
}

/// Write a table as comma-delimited text, one `\n`-terminated line per row.
///
/// Cells are written with their `Display` form and never quoted.
pub fn write_table(
    path: impl AsRef<Path>,
    table: &Table,
    mode: WriteMode,
) -> Result<(), ExplorerError> {
    let path = path.as_ref();
    let file = match mode {
        WriteMode::Overwrite => File::create(path)?,
        WriteMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
    };

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    for row in table {
        if is_blank(row) {
            // csv quotes a lone empty field, so write the bare line ending
            wtr.flush()?;
            wtr.get_ref().write_all(b"\n")?;
        } else {
            wtr.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
    }

    wtr.flush()?;
    tracing::debug!(path = %path.display(), rows = table.len(), ?mode, "wrote table");
    Ok(())
}
