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

//! Line-oriented parsing of the compliance metadata file.
//!
//! The file is semicolon-delimited but has no quoting: each line is one of
//!
//! ```text
//! RFC;9293;                              RFC header
//! 3.1 Header Format                      section header
//! ;Handles malformed SYN;test_false      test row: description and check
//! ```
//!
//! Order is significant and preserved; it defines the table grouping.

use crate::error::{RfcError, Result};
use tracing::debug;

/// One classified metadata line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplianceEntry {
    /// Start of a new RFC block.
    RfcHeader {
        /// Header text with semicolons removed.
        name: String,
    },
    /// A section within the current RFC.
    SectionHeader {
        /// Section title with semicolons removed.
        name: String,
    },
    /// A requirement checked by a named check.
    TestRow {
        /// Requirement text shown in the table.
        description: String,
        /// Registry name of the check to run.
        check: String,
    },
}

/// Classifies a single line. Blank lines yield `None`.
///
/// `line_no` is only used for error reporting.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<ComplianceEntry>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let stripped = strip_separators(line);
    let entry = if stripped.starts_with("RFC") {
        ComplianceEntry::RfcHeader { name: stripped }
    } else if let Some(rest) = line.strip_prefix(';') {
        let (description, check) = rest.split_once(';').ok_or_else(|| RfcError::MalformedRow {
            line: line_no,
            content: line.to_string(),
        })?;
        ComplianceEntry::TestRow {
            description: description.trim().to_string(),
            check: check.trim().to_string(),
        }
    } else {
        ComplianceEntry::SectionHeader { name: stripped }
    };

    debug!(line = line_no, ?entry, "classified metadata line");
    Ok(Some(entry))
}

/// Parses the whole metadata file in order.
pub fn parse_metadata(text: &str) -> Result<Vec<ComplianceEntry>> {
    let mut entries = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(entry) = parse_line(line, idx + 1)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn strip_separators(line: &str) -> String {
    line.replace(';', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ComplianceEntry {
        parse_line(line, 1).unwrap().unwrap()
    }

    #[test]
    fn test_rfc_header() {
        assert_eq!(
            parse("RFC;9293;"),
            ComplianceEntry::RfcHeader {
                name: "RFC9293".to_string()
            }
        );
        assert_eq!(
            parse("  RFC 1350 - TFTP;;\r\n"),
            ComplianceEntry::RfcHeader {
                name: "RFC 1350 - TFTP".to_string()
            }
        );
    }

    #[test]
    fn test_section_header() {
        assert_eq!(
            parse("3.1 Header Format"),
            ComplianceEntry::SectionHeader {
                name: "3.1 Header Format".to_string()
            }
        );
        assert_eq!(
            parse("3.2 Terminology;;"),
            ComplianceEntry::SectionHeader {
                name: "3.2 Terminology".to_string()
            }
        );
    }

    #[test]
    fn test_test_row() {
        assert_eq!(
            parse(";Handles malformed SYN;test_false"),
            ComplianceEntry::TestRow {
                description: "Handles malformed SYN".to_string(),
                check: "test_false".to_string()
            }
        );
        assert_eq!(
            parse(";  Spaces around  ;  test_true  \n"),
            ComplianceEntry::TestRow {
                description: "Spaces around".to_string(),
                check: "test_true".to_string()
            }
        );
    }

    #[test]
    fn test_rfc_check_wins_over_section() {
        assert!(matches!(
            parse("RFC 768 User Datagram Protocol"),
            ComplianceEntry::RfcHeader { .. }
        ));
        assert!(matches!(
            parse("Notes on RFC 768"),
            ComplianceEntry::SectionHeader { .. }
        ));
        assert_eq!(
            parse(";RFC 9293;"),
            ComplianceEntry::RfcHeader {
                name: "RFC 9293".to_string()
            }
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(parse_line("", 1).unwrap(), None);
        assert_eq!(parse_line("   \r\n", 1).unwrap(), None);
    }

    #[test]
    fn test_row_without_check_is_malformed() {
        let err = parse_line(";only a description", 4).unwrap_err();
        assert!(matches!(err, RfcError::MalformedRow { line: 4, .. }));
    }

    #[test]
    fn test_parse_metadata_preserves_order() {
        let text = "RFC;9293;\n3.1 Header Format\n;Handles malformed SYN;test_false\n\n;Accepts valid SYN;test_true\n";
        let entries = parse_metadata(text).unwrap();
        assert_eq!(entries.len(), 4);
        assert!(matches!(entries[0], ComplianceEntry::RfcHeader { .. }));
        assert!(matches!(entries[1], ComplianceEntry::SectionHeader { .. }));
        assert!(matches!(
            &entries[3],
            ComplianceEntry::TestRow { description, .. } if description == "Accepts valid SYN"
        ));
    }

    #[test]
    fn test_parse_metadata_reports_line_number() {
        let text = "RFC;9293;\n;broken row\n";
        let err = parse_metadata(text).unwrap_err();
        assert!(matches!(err, RfcError::MalformedRow { line: 2, .. }));
    }
}
