//! Untyped CSV tables with header normalization and concatenation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PipelineError, Result};

/// An ordered header row plus string cells, as read from an extract.
///
/// Every row holds exactly one cell per header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table, padding or truncating rows to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Reads a CSV file whose header follows `skip_lines` preamble lines.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Read`] if the file cannot be opened and
    /// [`PipelineError::Csv`] if the records cannot be parsed.
    pub fn read_path(path: &Path, skip_lines: usize) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&bytes, skip_lines, path)?;
        debug!(
            path = %path.display(),
            columns = table.headers.len(),
            rows = table.rows.len(),
            "read table"
        );
        Ok(table)
    }

    /// Parses CSV bytes whose header follows `skip_lines` physical lines.
    ///
    /// Lines are skipped before CSV parsing so quoted header cells may span
    /// several lines. Invalid UTF-8 is decoded lossily. `origin` only labels
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Csv`] if a record cannot be parsed.
    pub fn parse(bytes: &[u8], skip_lines: usize, origin: &Path) -> Result<Self> {
        let body = skip_physical_lines(bytes, skip_lines);
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(body);

        let mut records = rdr.byte_records();
        let headers: Vec<String> = match records.next() {
            Some(record) => record
                .map_err(|source| csv_error(origin, source))?
                .iter()
                .map(lossy)
                .collect(),
            None => return Ok(Self::default()),
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record.map_err(|source| csv_error(origin, source))?;
            if record.iter().all(<[u8]>::is_empty) {
                continue;
            }
            rows.push(record.iter().map(lossy).collect());
        }

        Ok(Self::new(headers, rows))
    }

    /// Header names in column order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in file order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column with exactly this name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of a column that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingColumn`] naming `origin`.
    pub fn require_column(&self, name: &str, origin: &Path) -> Result<usize> {
        self.column(name)
            .ok_or_else(|| PipelineError::MissingColumn {
                path: origin.to_path_buf(),
                column: name.to_string(),
            })
    }

    /// Replaces embedded line breaks in headers with spaces and trims them.
    pub fn normalize_headers(&mut self) {
        for header in &mut self.headers {
            *header = normalize_header(header);
        }
    }

    /// Keeps only rows for which `keep` returns `true`.
    pub fn filter_rows(&self, mut keep: impl FnMut(&[String]) -> bool) -> Self {
        Self {
            headers: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
        }
    }

    /// Concatenates tables, aligning cells by header name.
    ///
    /// The result's header is the union of all headers in first-seen order;
    /// cells for columns a source table lacks are left empty.
    pub fn concat(tables: &[Table]) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for table in tables {
            for header in &table.headers {
                if !headers.contains(header) {
                    headers.push(header.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(tables.iter().map(Table::len).sum());
        for table in tables {
            let mapping: Vec<Option<usize>> =
                headers.iter().map(|h| table.column(h)).collect();
            for row in &table.rows {
                rows.push(
                    mapping
                        .iter()
                        .map(|idx| idx.map(|i| row[i].clone()).unwrap_or_default())
                        .collect(),
                );
            }
        }

        Self { headers, rows }
    }

    /// Writes the table as CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns a `csv::Error` if writing fails.
    pub fn write_csv(&self, writer: impl Write) -> csv::Result<()> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Writes the table as CSV to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Write`] or [`PipelineError::Csv`] on failure.
    pub fn write_path(&self, path: &Path) -> Result<()> {
        let file = crate::io::create_file(path)?;
        self.write_csv(file)
            .map_err(|source| csv_error(path, source))?;
        debug!(path = %path.display(), rows = self.rows.len(), "wrote table");
        Ok(())
    }
}

/// Normalizes one header: line breaks become spaces, then trims whitespace
/// and any leading byte-order mark.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

fn skip_physical_lines(bytes: &[u8], lines: usize) -> &[u8] {
    let mut rest = bytes;
    for _ in 0..lines {
        match rest.iter().position(|&b| b == b'\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return &[],
        }
    }
    rest
}

fn lossy(cell: &[u8]) -> String {
    String::from_utf8_lossy(cell).into_owned()
}

fn csv_error(path: &Path, source: csv::Error) -> PipelineError {
    PipelineError::Csv {
        path: PathBuf::from(path),
        source,
    }
}
