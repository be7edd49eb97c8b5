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

//! Markdown/HTML rendering of the compliance matrix.

use crate::dispatch::{CheckDispatcher, Outcome};
use crate::error::Result;
use crate::metadata::ComplianceEntry;
use crate::registry::CheckRegistry;

/// Heading and table opening written before any entry.
pub const PREFIX: &str = "# RFCs Compliance Matrix\n\n<table>\n";

/// Table closing written after the last entry.
pub const SUFFIX: &str = "</table>\n";

/// Counts gathered while rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixStats {
    /// RFC header rows.
    pub rfcs: usize,
    /// Section header rows.
    pub sections: usize,
    /// Checks that passed.
    pub passed: usize,
    /// Checks that failed.
    pub failed: usize,
}

impl MatrixStats {
    /// Total number of checks run.
    pub fn checks(&self) -> usize {
        self.passed + self.failed
    }
}

/// A fully rendered matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMatrix {
    /// Document text.
    pub document: String,
    /// What the document contains.
    pub stats: MatrixStats,
}

/// Renders `entries` in order, running each test row's check.
///
/// Rendering stops at the first unknown check name.
pub fn render_matrix(
    entries: &[ComplianceEntry],
    registry: &CheckRegistry,
) -> Result<RenderedMatrix> {
    let dispatcher = CheckDispatcher::new(registry);
    let mut stats = MatrixStats::default();
    let mut document = String::from(PREFIX);

    for entry in entries {
        match entry {
            ComplianceEntry::RfcHeader { name } => {
                stats.rfcs += 1;
                document.push_str(&format!("\t<th colspan=\"3\">{}</th>\n", name));
            }
            ComplianceEntry::SectionHeader { name } => {
                stats.sections += 1;
                document.push_str("\t<tr>\n");
                document.push_str(&format!("\t\t<td colspan=\"3\">{}\n", name));
                document.push_str("\t</tr>\n");
            }
            ComplianceEntry::TestRow { description, check } => {
                let outcome = dispatcher.dispatch(description, check)?;
                match outcome {
                    Outcome::Pass => stats.passed += 1,
                    Outcome::Fail => stats.failed += 1,
                }
                document.push_str("\t<tr>\n");
                document.push_str("\t\t<td>\n");
                document.push_str(&format!("\t\t<td>{}\n", description));
                document.push_str(&format!("\t\t<td>{}\n", outcome.glyph()));
                document.push_str("\t</tr>\n");
            }
        }
    }

    document.push_str(SUFFIX);
    Ok(RenderedMatrix { document, stats })
}

/// Renders `entries` and returns only the document text.
pub fn render_markdown(entries: &[ComplianceEntry], registry: &CheckRegistry) -> Result<String> {
    render_matrix(entries, registry).map(|m| m.document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RfcError;
    use crate::metadata::parse_metadata;

    #[test]
    fn test_render_single_failing_row() {
        let entries =
            parse_metadata("RFC;9293;\n3.1 Header Format\n;Handles malformed SYN;test_false\n")
                .unwrap();
        let doc = render_markdown(&entries, &CheckRegistry::builtin()).unwrap();

        assert_eq!(
            doc,
            "# RFCs Compliance Matrix\n\n<table>\n\
             \t<th colspan=\"3\">RFC9293</th>\n\
             \t<tr>\n\t\t<td colspan=\"3\">3.1 Header Format\n\t</tr>\n\
             \t<tr>\n\t\t<td>\n\t\t<td>Handles malformed SYN\n\t\t<td>❌\n\t</tr>\n\
             </table>\n"
        );
    }

    #[test]
    fn test_empty_metadata_renders_empty_table() {
        let doc = render_markdown(&[], &CheckRegistry::builtin()).unwrap();
        assert_eq!(doc, "# RFCs Compliance Matrix\n\n<table>\n</table>\n");
    }

    #[test]
    fn test_stats_count_entries() {
        let entries = parse_metadata(
            "RFC;959;\nSection A\n;one;test_true\n;two;test_false\nSection B\n;three;test_true\n",
        )
        .unwrap();
        let matrix = render_matrix(&entries, &CheckRegistry::builtin()).unwrap();
        assert_eq!(
            matrix.stats,
            MatrixStats {
                rfcs: 1,
                sections: 2,
                passed: 2,
                failed: 1
            }
        );
        assert_eq!(matrix.stats.checks(), 3);
        assert_eq!(matrix.document.matches("✅").count(), 2);
    }

    #[test]
    fn test_unknown_check_aborts_render() {
        let entries = parse_metadata("RFC;959;\n;ok;test_true\n;bad;does_not_exist\n").unwrap();
        let err = render_markdown(&entries, &CheckRegistry::builtin()).unwrap_err();
        assert!(matches!(
            err,
            RfcError::UnknownCheck { ref check, .. } if check == "does_not_exist"
        ));
    }

    #[test]
    fn test_order_is_preserved() {
        let entries = parse_metadata("RFC;1;\nB\nA\nRFC;2;\n").unwrap();
        let doc = render_markdown(&entries, &CheckRegistry::builtin()).unwrap();
        let rfc1 = doc.find("RFC1").unwrap();
        let b = doc.find(">B\n").unwrap();
        let a = doc.find(">A\n").unwrap();
        let rfc2 = doc.find("RFC2").unwrap();
        assert!(rfc1 < b && b < a && a < rfc2);
    }
}
