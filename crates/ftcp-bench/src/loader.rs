// FTCP - File Transfer Communication Protocol
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Loading benchmark CSV files into an in-memory table.
//!
//! The benchmark driver writes an Excel-style `sep=,` directive as the first
//! line of its output. The directive is stripped before parsing and its
//! separator is used as the field delimiter.

use crate::error::{BenchError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default field delimiter when no `sep=` directive is present.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Holds the raw text of one benchmark CSV file.
///
/// The file is read once when the loader is constructed; every consumer
/// borrows the same in-memory copy.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    source: Option<PathBuf>,
    text: String,
}

impl CsvLoader {
    /// Reads the whole file at `path` into memory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "loaded benchmark csv");
        Ok(Self {
            source: Some(path.to_path_buf()),
            text,
        })
    }

    /// Wraps CSV text that is already in memory.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: None,
            text: text.into(),
        }
    }

    /// The path the text was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The raw CSV text, including any `sep=` directive.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parses the text into a [`Table`].
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::Format`] when the header line is missing or no
    /// data rows follow it, and [`BenchError::Csv`] for malformed quoting.
    pub fn table(&self) -> Result<Table> {
        let (delimiter, body) = split_directive(&self.text);
        if body.trim().is_empty() {
            return Err(BenchError::Format("missing header line".to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(String::is_empty) {
            return Err(BenchError::Format("missing header line".to_string()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            // Short rows are padded so every column lookup succeeds.
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(BenchError::Format("no data rows after header".to_string()));
        }

        debug!(columns = headers.len(), rows = rows.len(), "parsed benchmark table");
        Ok(Table { headers, rows })
    }
}

/// Splits an optional leading `sep=<char>` line off the CSV text.
///
/// Returns the delimiter to use and the remaining text. Directives naming
/// anything other than a single ASCII character fall back to `,`.
pub fn split_directive(text: &str) -> (u8, &str) {
    let (first, rest) = match text.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (text, ""),
    };
    let first = first.trim_start_matches('\u{feff}').trim_end_matches('\r');

    match first.strip_prefix("sep=") {
        Some(sep) => {
            let delimiter = match sep.as_bytes() {
                [b] if b.is_ascii() => *b,
                _ => DEFAULT_DELIMITER,
            };
            (delimiter, rest)
        }
        None => (DEFAULT_DELIMITER, text),
    }
}

/// A header row plus string cells, one inner vector per data row.
///
/// Every row has exactly as many cells as there are headers.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table directly. Rows are padded or cut to the header width.
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

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in file order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Index of the column named `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a column named `name` exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "sep=,\nFile Size,Timeout,Window Size,Packet Loss Rate,Transfer Duration\n\
                       1MB,1s,1,0.010,0.500\n1MB,1s,1,0.010,0.700\n";

    #[test]
    fn test_directive_is_stripped() {
        let table = CsvLoader::from_text(RAW).table().unwrap();
        assert_eq!(table.headers()[0], "File Size");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1][4], "0.700");
    }

    #[test]
    fn test_without_directive() {
        let text = "File Size,Timeout\n1MB,1s\n";
        let table = CsvLoader::from_text(text).table().unwrap();
        assert_eq!(table.headers(), &["File Size", "Timeout"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_directive_delimiter_is_honoured() {
        let text = "sep=;\r\nFile Size;Timeout\r\n10MB;Adaptive\r\n";
        let table = CsvLoader::from_text(text).table().unwrap();
        assert_eq!(table.headers(), &["File Size", "Timeout"]);
        assert_eq!(table.rows()[0], vec!["10MB", "Adaptive"]);
    }

    #[test]
    fn test_bad_directive_falls_back_to_comma() {
        assert_eq!(split_directive("sep=tab\na,b\n"), (b',', "a,b\n"));
        assert_eq!(split_directive("a,b\n1,2\n"), (b',', "a,b\n1,2\n"));
    }

    #[test]
    fn test_fields_are_trimmed_and_padded() {
        let text = "File Size , Timeout, Window Size\n 1MB , 1s\n";
        let table = CsvLoader::from_text(text).table().unwrap();
        assert_eq!(table.column("Timeout"), Some(1));
        assert_eq!(table.rows()[0], vec!["1MB", "1s", ""]);
    }

    #[test]
    fn test_empty_text_is_format_error() {
        let err = CsvLoader::from_text("").table().unwrap_err();
        assert!(matches!(err, BenchError::Format(_)));

        let err = CsvLoader::from_text("sep=,\n").table().unwrap_err();
        assert!(matches!(err, BenchError::Format(_)));
    }

    #[test]
    fn test_header_without_rows_is_format_error() {
        let err = CsvLoader::from_text("sep=,\nFile Size,Timeout\n")
            .table()
            .unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CsvLoader::from_path("/nonexistent/benchmark_results.csv").unwrap_err();
        assert!(matches!(err, BenchError::Io { .. }));
    }

    #[test]
    fn test_from_path_keeps_source() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), RAW).unwrap();
        let loader = CsvLoader::from_path(file.path()).unwrap();
        assert_eq!(loader.source(), Some(file.path()));
        assert_eq!(loader.text(), RAW);
    }
}
