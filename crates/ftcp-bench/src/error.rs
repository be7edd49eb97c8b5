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

//! Error types for benchmark report generation.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Benchmark report error types.
///
/// Only structural problems with the input are errors. Unresolvable
/// aggregate columns and non-numeric cells degrade to empty plot cells and
/// are reported through `tracing` instead.
///
/// # Examples
///
/// ```
/// use ftcp_bench::BenchError;
///
/// let err = BenchError::MissingColumn("Window Size".to_string());
/// assert_eq!(err.to_string(), "Missing required column: Window Size");
/// ```
#[derive(Debug, Error)]
pub enum BenchError {
    /// Reading the input or writing an artifact failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The CSV text has no header line or no data rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftcp_bench::BenchError;
    ///
    /// let err = BenchError::Format("no data rows".to_string());
    /// assert!(err.to_string().contains("no data rows"));
    /// ```
    #[error("Malformed benchmark CSV: {0}")]
    Format(String),

    /// A grouping column every row needs is absent from the header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from the underlying CSV library.
    #[error("CSV library error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for `Result` with `BenchError`.
pub type Result<T> = std::result::Result<T, BenchError>;

impl BenchError {
    /// Wraps an I/O failure together with the path it happened on.
    pub fn io(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        BenchError::Io {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }
}
