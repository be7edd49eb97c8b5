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

//! LaTeX table export for aggregated benchmark results.
//!
//! Each file size becomes one `figure` environment holding a table of every
//! measured configuration followed by the candlestick image for that size.

use crate::aggregate::{Frame, FILE_SIZE, PACKET_LOSS_RATE, TIMEOUT, WINDOW_SIZE};
use crate::dataset::window_size;
use std::collections::BTreeSet;
use tracing::warn;

/// Timeout value printed literally in the `$T$` column.
pub const FIXED_TIMEOUT: &str = "1s";

/// Placeholder printed for every other timeout value.
pub const ADAPTIVE_SYMBOL: &str = "$A$";

/// One table line.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Timeout setting as written in the input.
    pub timeout: String,
    /// Packet loss rate.
    pub packet_loss_rate: f64,
    /// Window size in blocks.
    pub window_size: u32,
    /// Fastest transfer, seconds.
    pub min: f64,
    /// Mean transfer, seconds.
    pub avg: f64,
    /// Slowest transfer, seconds.
    pub max: f64,
}

/// Collects the rows for `file_size`, sorted by timeout, packet loss rate
/// and window size.
///
/// Rows with any missing value are skipped. Unresolvable aggregate columns
/// yield an empty list.
pub fn table_rows(frame: &Frame, file_size: &str) -> Vec<TableRow> {
    let (Some(fs), Some(timeout), Some(window), Some(plr)) = (
        frame.column(FILE_SIZE),
        frame.column(TIMEOUT),
        frame.column(WINDOW_SIZE),
        frame.column(PACKET_LOSS_RATE),
    ) else {
        return Vec::new();
    };

    let filtered: Vec<_> = frame
        .rows()
        .iter()
        .filter(|row| row[fs].as_text() == Some(file_size))
        .collect();
    if filtered.is_empty() {
        return Vec::new();
    }

    let Some([min, avg, max]) = frame.resolve_all() else {
        warn!(file_size, "aggregate columns unresolved; table left empty");
        return Vec::new();
    };

    let mut rows: Vec<TableRow> = filtered
        .into_iter()
        .filter_map(|row| {
            Some(TableRow {
                timeout: row[timeout].as_text()?.to_string(),
                packet_loss_rate: row[plr].as_f64()?,
                window_size: window_size(&row[window])?,
                min: row[min].as_f64()?,
                avg: row[avg].as_f64()?,
                max: row[max].as_f64()?,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.timeout
            .cmp(&b.timeout)
            .then_with(|| a.packet_loss_rate.total_cmp(&b.packet_loss_rate))
            .then_with(|| a.window_size.cmp(&b.window_size))
    });

    let unknown: BTreeSet<&str> = rows
        .iter()
        .map(|r| r.timeout.as_str())
        .filter(|t| *t != FIXED_TIMEOUT && *t != "Adaptive")
        .collect();
    for timeout in unknown {
        warn!(file_size, timeout, "unrecognised timeout setting printed as {ADAPTIVE_SYMBOL}");
    }

    rows
}

/// Formats the `$T$` cell.
pub fn timeout_symbol(timeout: &str) -> &str {
    if timeout == FIXED_TIMEOUT {
        timeout
    } else {
        ADAPTIVE_SYMBOL
    }
}

/// Renders the `figure` block for one file size.
///
/// `image` is the file name passed to `\includegraphics`.
pub fn render_figure(frame: &Frame, file_size: &str, image: &str) -> String {
    let mut tex = String::new();

    tex.push_str("\\begin{figure}[H]\n");
    tex.push_str("    \\centering\n");
    tex.push_str("    \\begin{tabular}{|c|c|c|c|c|c|c|}\n");
    tex.push_str("        \\hline\n");
    tex.push_str("        \\rowcolor{tblhdrcolor}\n");
    tex.push_str("        \\multicolumn{1}{|c|}{\\textbf{Dimensione File}}\n");
    for header in [
        "$T$",
        "$N$",
        "$p$",
        "Durata (min)",
        "Durata (avg)",
        "Durata (max)",
    ] {
        tex.push_str(&format!(
            "                       & \\multicolumn{{1}}{{|c|}}{{\\textbf{{{}}}}}\n",
            header
        ));
    }
    tex.push_str("        \\\\\\hline\n");

    for row in table_rows(frame, file_size) {
        tex.push_str(&format!(
            "        {} & {} & {} & {} & {:.3} & {:.3} & {:.3}\\\\\\hline\n",
            file_size,
            timeout_symbol(&row.timeout),
            row.window_size,
            row.packet_loss_rate,
            row.min,
            row.avg,
            row.max
        ));
    }

    tex.push_str("    \\end{tabular}\n");
    tex.push_str("    \\vspace{1cm}\n");
    tex.push_str(&format!(
        "    \\includegraphics[width=1\\textwidth]{{{}}}\n",
        image
    ));
    tex.push_str("\\end{figure}");
    tex
}

/// Renders the complete `benchmark.tex` content.
///
/// Each figure is followed by a newline and figures are separated by a
/// blank line. `image_for` maps a file size to its image file name.
pub fn render_document<F>(frame: &Frame, file_sizes: &[&str], image_for: F) -> String
where
    F: Fn(&str) -> String,
{
    file_sizes
        .iter()
        .map(|&size| render_figure(frame, size, &image_for(size)) + "\n")
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::prepare;
    use crate::dataset::AggregatedDataset;
    use crate::loader::CsvLoader;

    fn frame(text: &str) -> Frame {
        prepare(&CsvLoader::from_text(text).table().unwrap()).unwrap()
    }

    const RAW: &str = "sep=,\nFile Size,Timeout,Window Size,Packet Loss Rate,Transfer Duration\n\
        1MB,Adaptive,2,0.001,4.0\n\
        1MB,1s,8,0.100,2.0\n\
        1MB,1s,1,0.010,0.500\n\
        1MB,1s,1,0.010,0.700\n\
        1MB,1s,1,0.010,0.900\n\
        1MB,1s,2,0.010,1.0\n\
        10MB,1s,1,0.001,9.0\n";

    #[test]
    fn test_rows_are_sorted() {
        let rows = table_rows(&frame(RAW), "1MB");
        let keys: Vec<(&str, f64, u32)> = rows
            .iter()
            .map(|r| (r.timeout.as_str(), r.packet_loss_rate, r.window_size))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("1s", 0.01, 1),
                ("1s", 0.01, 2),
                ("1s", 0.1, 8),
                ("Adaptive", 0.001, 2),
            ]
        );
    }

    #[test]
    fn test_row_formatting() {
        let tex = render_figure(&frame(RAW), "1MB", "benchmark1MB.svg");
        assert!(tex.contains("        1MB & 1s & 1 & 0.01 & 0.500 & 0.700 & 0.900\\\\\\hline\n"));
        assert!(tex.contains("        1MB & $A$ & 2 & 0.001 & 4.000 & 4.000 & 4.000\\\\\\hline\n"));
        assert!(!tex.contains("10MB &"));
    }

    #[test]
    fn test_figure_framing() {
        let tex = render_figure(&frame(RAW), "10MB", "benchmark10MB.svg");
        assert!(tex.starts_with("\\begin{figure}[H]\n    \\centering\n"));
        assert!(tex.contains("\\rowcolor{tblhdrcolor}"));
        assert!(tex.contains("& \\multicolumn{1}{|c|}{\\textbf{Durata (avg)}}\n"));
        assert!(tex.contains("\\includegraphics[width=1\\textwidth]{benchmark10MB.svg}\n"));
        assert!(tex.ends_with("\\end{figure}"));
    }

    #[test]
    fn test_empty_file_size_still_renders_frame() {
        let tex = render_figure(&frame(RAW), "100MB", "benchmark100MB");
        assert!(tex.contains("\\\\\\hline\n    \\end{tabular}"));
        assert!(tex.contains("{benchmark100MB}"));
    }

    #[test]
    fn test_document_joins_figures() {
        let doc = render_document(&frame(RAW), &["1MB", "10MB"], |s: &str| {
            format!("benchmark{}", s)
        });
        assert_eq!(doc.matches("\\begin{figure}[H]").count(), 2);
        assert!(doc.contains("\\end{figure}\n\n\\begin{figure}[H]"));
        assert!(doc.ends_with("\\end{figure}\n"));
    }

    #[test]
    fn test_timeout_symbol() {
        assert_eq!(timeout_symbol("1s"), "1s");
        assert_eq!(timeout_symbol("Adaptive"), "$A$");
        assert_eq!(timeout_symbol("5s"), "$A$");
    }

    #[test]
    fn test_unresolved_columns_give_empty_table() {
        let text = "File Size,Timeout,Window Size,Packet Loss Rate,Transfer Duration Min\n\
                    1MB,1s,1,0.01,0.5\n";
        assert!(table_rows(&frame(text), "1MB").is_empty());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let f = frame(RAW);
        let image = |s: &str| format!("benchmark{}.svg", s);
        let a = render_document(&f, &["1MB", "10MB", "100MB"], image);
        let b = render_document(&f, &["1MB", "10MB", "100MB"], image);
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_range_window_size_is_excluded() {
        let text = "File Size,Timeout,Window Size,Packet Loss Rate,Transfer Duration\n\
                    1MB,1s,1e10,0.01,0.5\n\
                    1MB,1s,2.5,0.01,0.5\n\
                    1MB,1s,4,0.01,0.5\n";
        let f = frame(text);
        let rows = table_rows(&f, "1MB");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].window_size, 4);
        assert_eq!(AggregatedDataset::build(&f, "1MB").candles().count(), rows.len());
    }
}
