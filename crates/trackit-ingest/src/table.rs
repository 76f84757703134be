//! Header-keyed CSV record tables.

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// One named-range worth of rows: the first non-blank row is the header.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Headers are matched without regard to case or surrounding whitespace.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_lowercase()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

impl RecordTable {
    /// Parse a table from any CSV reader; `path` is only used in errors.
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| IngestError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            let row: Vec<String> = record.iter().map(normalize_cell).collect();
            if row.iter().all(String::is_empty) {
                continue;
            }
            raw_rows.push(row);
        }

        let mut raw_rows = raw_rows.into_iter();
        let Some(header_row) = raw_rows.next() else {
            return Ok(Self {
                path: path.to_path_buf(),
                ..Self::default()
            });
        };
        let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();
        let rows = raw_rows
            .map(|mut row| {
                row.resize(headers.len(), String::new());
                row
            })
            .collect();
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = normalize_header(name);
        self.headers.iter().position(|header| *header == name)
    }

    /// Index of a column that must be present.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| IngestError::missing_column(name, &self.path))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read a CSV file into a [`RecordTable`].
pub fn read_record_table(path: &Path) -> Result<RecordTable> {
    let file = std::fs::File::open(path).map_err(|err| IngestError::Csv {
        path: path.to_path_buf(),
        source: csv::Error::from(err),
    })?;
    RecordTable::from_reader(file, path)
}

/// Cell text at `column` of `row`, empty when the column is absent.
pub(crate) fn cell(row: &[String], column: Option<usize>) -> &str {
    column
        .and_then(|index| row.get(index))
        .map_or("", String::as_str)
}
