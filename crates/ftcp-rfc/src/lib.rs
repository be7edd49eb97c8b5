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

//! FTCP RFC compliance matrix generator.
//!
//! Reads a semicolon-delimited metadata file listing RFCs, their sections
//! and the requirements under each section, runs the check named by every
//! requirement, and writes the results as an HTML table inside a Markdown
//! document.
//!
//! Checks are looked up in a [`CheckRegistry`]. A requirement naming a check
//! that is not registered aborts the run before anything is written.
//!
//! # Examples
//!
//! ```
//! use ftcp_rfc::{parse_metadata, render_markdown, CheckRegistry};
//!
//! let entries = parse_metadata("RFC;9293;\n3.1 Header Format\n;Handles malformed SYN;test_false\n")?;
//! let doc = render_markdown(&entries, &CheckRegistry::builtin())?;
//! assert!(doc.contains("\t\t<td>Handles malformed SYN\n\t\t<td>❌\n"));
//! # Ok::<(), ftcp_rfc::RfcError>(())
//! ```

pub mod dispatch;
pub mod error;
pub mod metadata;
pub mod output;
pub mod registry;
pub mod render;

pub use dispatch::{CheckDispatcher, Outcome};
pub use error::{Result, RfcError};
pub use metadata::{parse_line, parse_metadata, ComplianceEntry};
pub use registry::{Check, CheckRegistry};
pub use render::{render_markdown, render_matrix, MatrixStats, RenderedMatrix};

use std::path::PathBuf;
use tracing::info;

/// Default metadata file name.
pub const DEFAULT_INPUT: &str = "rfcs-compliance-metadata.csv";

/// Default report file name.
pub const DEFAULT_OUTPUT: &str = "rfcs-compliance-results.md";

/// Input and output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceConfig {
    /// Metadata file to read.
    pub input: PathBuf,
    /// Report file to write.
    pub output: PathBuf,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Reads the metadata, runs every check and writes the report.
///
/// The report is rendered completely before the output file is touched, so
/// a failing run leaves any previous report in place.
pub fn run(config: &ComplianceConfig, registry: &CheckRegistry) -> Result<MatrixStats> {
    let text = std::fs::read_to_string(&config.input).map_err(|e| RfcError::io(&config.input, e))?;
    let entries = parse_metadata(&text)?;
    info!(path = %config.input.display(), entries = entries.len(), "loaded compliance metadata");

    let matrix = render_matrix(&entries, registry)?;
    output::write_atomic(&config.output, &matrix.document)?;
    info!(
        path = %config.output.display(),
        passed = matrix.stats.passed,
        failed = matrix.stats.failed,
        "wrote compliance matrix"
    );

    Ok(matrix.stats)
}
