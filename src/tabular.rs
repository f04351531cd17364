//! Delimiter-separated stock records (`id, name, price, quantity`).
//!
//! Reading is tolerant: a malformed line is skipped and reported with its
//! 1-based line number, and parsing carries on with the next line. Only a
//! missing or wrong header aborts the read.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, RecordError, Result};

/// Column names, in file order
pub const HEADER: [&str; 4] = ["id", "name", "price", "quantity"];

/// One data row
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StockRecord {
    /// Unique item identifier
    pub id: String,
    /// Item name, free text without the delimiter
    pub name: String,
    /// Unit price, always finite
    pub price: f64,
    /// Units in stock; may be negative for back-orders
    pub quantity: i64,
}

/// A line that was not turned into a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number, header included
    pub line: usize,
    /// Why the line was rejected
    pub reason: RecordError,
}

/// Outcome of reading a whole input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Records parsed successfully, in input order
    pub records: Vec<StockRecord>,
    /// Lines that were skipped
    pub skipped: Vec<SkippedLine>,
}

/// Parse one data line
fn parse_line(line: &str, delimiter: char) -> std::result::Result<StockRecord, RecordError> {
    let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
    let [id, name, price, quantity] = fields.as_slice() else {
        return Err(RecordError::FieldCount { expected: HEADER.len(), found: fields.len() });
    };
    if id.is_empty() {
        return Err(RecordError::EmptyIdentifier);
    }
    let price = price
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| RecordError::InvalidNumber { field: "price", value: (*price).to_owned() })?;
    let quantity = quantity.parse::<i64>().map_err(|_| RecordError::InvalidNumber {
        field: "quantity",
        value: (*quantity).to_owned(),
    })?;
    Ok(StockRecord { id: (*id).to_owned(), name: (*name).to_owned(), price, quantity })
}

/// Check that `record` reads back unchanged once written with `delimiter`
fn check_writable(record: &StockRecord, delimiter: char) -> std::result::Result<(), RecordError> {
    if record.id.is_empty() {
        return Err(RecordError::EmptyIdentifier);
    }
    for (field, text) in [("id", &record.id), ("name", &record.name)] {
        let clashes = text.contains([delimiter, '\n', '\r']) || text.trim() != text.as_str();
        if clashes {
            return Err(RecordError::UnencodableField { field });
        }
    }
    if !record.price.is_finite() {
        return Err(RecordError::InvalidNumber { field: "price", value: record.price.to_string() });
    }
    Ok(())
}

/// Whether `line` is the expected header
fn is_header(line: &str, delimiter: char) -> bool {
    let names: Vec<String> = line.split(delimiter).map(|f| f.trim().to_lowercase()).collect();
    names.iter().map(String::as_str).eq(HEADER)
}

/// Read records from `input`, skipping malformed lines.
///
/// An empty input yields an empty report.
///
/// # Errors
///
/// Returns a `LibraryError::InvalidHeader` if the first line is not the
/// expected header, or a `LibraryError::Io` if reading fails.
pub fn read_records<R: BufRead>(input: R, delimiter: char) -> Result<ParseReport> {
    let mut report = ParseReport::default();
    let mut lines = input.lines().enumerate();

    match lines.next() {
        None => return Ok(report),
        Some((_, header)) => {
            let header = header.map_err(|e| LibraryError::io("<input>", e))?;
            if !is_header(&header, delimiter) {
                return Err(LibraryError::InvalidHeader {
                    expected: HEADER.join(delimiter.to_string().as_str()),
                    found: header,
                });
            }
        }
    }

    for (index, line) in lines {
        let line = line.map_err(|e| LibraryError::io("<input>", e))?;
        let number = index.saturating_add(1);
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line, delimiter) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                tracing::warn!(line = number, %reason, "skipping malformed record");
                report.skipped.push(SkippedLine { line: number, reason });
            }
        }
    }
    Ok(report)
}

/// Write the header and one line per record to `output`.
///
/// Every record is checked before anything is written, so a rejected batch
/// leaves `output` untouched.
///
/// # Errors
///
/// Returns a `LibraryError::UnwritableRecord` for a record that would not
/// read back as written, or a `LibraryError::Io` if writing fails.
pub fn write_records<W: Write>(output: W, records: &[StockRecord], delimiter: char) -> Result<()> {
    for record in records {
        check_writable(record, delimiter).map_err(|reason| LibraryError::UnwritableRecord {
            id: record.id.clone(),
            reason,
        })?;
    }
    let mut writer = BufWriter::new(output);
    let sep = delimiter.to_string();
    let io_err = |e| LibraryError::io("<output>", e);
    writeln!(writer, "{}", HEADER.join(sep.as_str())).map_err(io_err)?;
    for record in records {
        writeln!(
            writer,
            "{}{sep}{}{sep}{}{sep}{}",
            record.id, record.name, record.price, record.quantity
        )
        .map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;
    Ok(())
}

/// Read records from a file
///
/// # Errors
///
/// Same as [`read_records`], with the file path attached to I/O errors.
pub fn load_records(path: impl AsRef<Path>, delimiter: char) -> Result<ParseReport> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LibraryError::io(path, e))?;
    let report = read_records(BufReader::new(file), delimiter)?;
    tracing::debug!(
        path = %path.display(),
        records = report.records.len(),
        skipped = report.skipped.len(),
        "records loaded"
    );
    Ok(report)
}

/// Write records to a file, replacing it
///
/// # Errors
///
/// Returns a `LibraryError::Io` if the file cannot be created or written.
pub fn save_records(
    path: impl AsRef<Path>,
    records: &[StockRecord],
    delimiter: char,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| LibraryError::io(path, e))?;
    write_records(file, records, delimiter)
}

#[cfg(test)]
mod tests;
