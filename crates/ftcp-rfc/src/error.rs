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

//! Error types for compliance matrix generation.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Compliance matrix error types.
///
/// Every variant aborts the run. An unknown check name in particular is
/// never skipped: the report would otherwise silently omit a requirement.
///
/// # Examples
///
/// ```
/// use ftcp_rfc::RfcError;
///
/// let err = RfcError::UnknownCheck {
///     description: "Handles malformed SYN".to_string(),
///     check: "does_not_exist".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Test with description:'Handles malformed SYN' has invalid test name: 'does_not_exist'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum RfcError {
    /// Reading the metadata or writing the report failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A test row names a check that is not registered.
    #[error("Test with description:'{description}' has invalid test name: '{check}'")]
    UnknownCheck {
        /// Description of the offending row.
        description: String,
        /// The unresolved check name.
        check: String,
    },

    /// A test row lacks the separator before its check name.
    #[error("Malformed test row at line {line}: '{content}'")]
    MalformedRow {
        /// Line number (1-based).
        line: usize,
        /// The offending line.
        content: String,
    },
}

/// Convenience type alias for `Result` with `RfcError`.
pub type Result<T> = std::result::Result<T, RfcError>;

impl RfcError {
    /// Wraps an I/O failure together with the path it happened on.
    pub fn io(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        RfcError::Io {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }
}
