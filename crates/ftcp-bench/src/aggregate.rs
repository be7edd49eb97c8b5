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

//! Raw-versus-aggregated detection and min/avg/max aggregation.
//!
//! The benchmark driver writes one row per trial (`Transfer Duration`).
//! Hand-curated result files instead carry one row per configuration with
//! precomputed `Transfer Duration Min/Avg/Max` columns. [`prepare`] accepts
//! either and always returns a [`Frame`] in the aggregated shape.

use crate::error::{BenchError, Result};
use crate::loader::Table;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// File size column (`1MB`, `10MB`, `100MB`).
pub const FILE_SIZE: &str = "File Size";
/// Timeout setting column (`1s`, `Adaptive`).
pub const TIMEOUT: &str = "Timeout";
/// Window size column, in blocks.
pub const WINDOW_SIZE: &str = "Window Size";
/// Packet loss rate column.
pub const PACKET_LOSS_RATE: &str = "Packet Loss Rate";
/// Per-trial duration column of raw data.
pub const TRANSFER_DURATION: &str = "Transfer Duration";

/// Columns every dataset must carry to be grouped.
pub const KEY_COLUMNS: [&str; 4] = [FILE_SIZE, TIMEOUT, WINDOW_SIZE, PACKET_LOSS_RATE];

/// One of the three aggregate duration columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationStat {
    /// Fastest trial.
    Min,
    /// Arithmetic mean over trials.
    Avg,
    /// Slowest trial.
    Max,
}

impl DurationStat {
    /// All statistics in column order.
    pub const ALL: [DurationStat; 3] = [DurationStat::Min, DurationStat::Avg, DurationStat::Max];

    /// Column name written for aggregated output.
    pub fn canonical(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted column names, most preferred first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            DurationStat::Min => &["Transfer Duration Min", "Transfer Duration min"],
            DurationStat::Avg => &[
                "Transfer Duration Avg",
                "Transfer Duration mean",
                "Transfer Duration Mean",
            ],
            DurationStat::Max => &["Transfer Duration Max", "Transfer Duration max"],
        }
    }
}

/// Whether a table holds per-trial samples or precomputed aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataShape {
    /// One row per trial with a single `Transfer Duration`.
    Raw,
    /// One row per configuration with min/avg/max columns.
    Aggregated,
}

/// Classifies a table.
///
/// A table is raw iff it has a `Transfer Duration` column and none of the
/// canonical `Transfer Duration Min/Avg/Max` columns. Everything else is
/// passed through as aggregated.
pub fn detect_shape(table: &Table) -> DataShape {
    let has_aggregate = DurationStat::ALL
        .iter()
        .any(|stat| table.has_column(stat.canonical()));

    if table.has_column(TRANSFER_DURATION) && !has_aggregate {
        DataShape::Raw
    } else {
        DataShape::Aggregated
    }
}

/// A single cell after numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Categorical text such as a file size or timeout.
    Text(String),
    /// A parsed number.
    Number(f64),
    /// Empty or non-numeric content in a numeric column.
    Missing,
}

impl Value {
    /// Parses `raw` as a number, mapping anything unparsable to `Missing`.
    pub fn numeric(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) if !n.is_nan() => Value::Number(n),
            _ => Value::Missing,
        }
    }

    /// The numeric content, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The textual content, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Typed benchmark rows in the aggregated shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, each as wide as [`Frame::columns`].
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Index of the column named exactly `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves a duration statistic through its alias list.
    ///
    /// Returns the first alias present. When none is present the available
    /// columns are logged and `None` is returned; callers degrade to an
    /// empty result instead of failing.
    pub fn resolve(&self, stat: DurationStat) -> Option<usize> {
        let found = stat.aliases().iter().find_map(|alias| self.column(alias));
        if found.is_none() {
            warn!(
                column = stat.canonical(),
                available = ?self.columns,
                "could not find a column matching aggregate statistic"
            );
        }
        found
    }

    /// Resolves all three duration statistics, or `None` if any is absent.
    pub fn resolve_all(&self) -> Option<[usize; 3]> {
        // Resolve every statistic so each missing one gets logged.
        let min = self.resolve(DurationStat::Min);
        let avg = self.resolve(DurationStat::Avg);
        let max = self.resolve(DurationStat::Max);
        Some([min?, avg?, max?])
    }
}

/// Turns a loaded table into an aggregated [`Frame`].
///
/// Raw tables are grouped by file size, timeout, window size and packet loss
/// rate. Aggregated tables pass through with numeric coercion only.
///
/// # Errors
///
/// Returns [`BenchError::MissingColumn`] when a grouping column is absent.
pub fn prepare(table: &Table) -> Result<Frame> {
    for key in KEY_COLUMNS {
        if !table.has_column(key) {
            return Err(BenchError::MissingColumn(key.to_string()));
        }
    }

    match detect_shape(table) {
        DataShape::Raw => {
            let frame = aggregate_raw(table)?;
            info!(
                samples = table.len(),
                groups = frame.len(),
                "aggregated raw benchmark samples"
            );
            Ok(frame)
        }
        DataShape::Aggregated => {
            info!(rows = table.len(), "benchmark data is already aggregated");
            Ok(coerce_aggregated(table))
        }
    }
}

/// Grouping key of one benchmark configuration.
#[derive(Debug, Clone, PartialEq)]
struct GroupKey {
    file_size: String,
    timeout: String,
    window_size: f64,
    packet_loss_rate: f64,
}

impl Eq for GroupKey {}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.file_size
            .cmp(&other.file_size)
            .then_with(|| self.timeout.cmp(&other.timeout))
            .then_with(|| self.window_size.total_cmp(&other.window_size))
            .then_with(|| self.packet_loss_rate.total_cmp(&other.packet_loss_rate))
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Running min/sum/max over the numeric samples of one group.
#[derive(Debug, Clone, Copy, Default)]
struct Samples {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl Samples {
    fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.count += 1;
    }

    fn stat(&self, stat: DurationStat) -> Value {
        if self.count == 0 {
            return Value::Missing;
        }
        Value::Number(match stat {
            DurationStat::Min => self.min,
            DurationStat::Avg => self.sum / self.count as f64,
            DurationStat::Max => self.max,
        })
    }
}

fn aggregate_raw(table: &Table) -> Result<Frame> {
    let index = |name: &str| {
        table
            .column(name)
            .ok_or_else(|| BenchError::MissingColumn(name.to_string()))
    };
    let file_size = index(FILE_SIZE)?;
    let timeout = index(TIMEOUT)?;
    let window_size = index(WINDOW_SIZE)?;
    let plr = index(PACKET_LOSS_RATE)?;
    let duration = index(TRANSFER_DURATION)?;

    let mut groups: BTreeMap<GroupKey, Samples> = BTreeMap::new();
    let mut dropped = 0usize;

    for row in table.rows() {
        let (Some(window), Some(loss)) = (
            Value::numeric(&row[window_size]).as_f64(),
            Value::numeric(&row[plr]).as_f64(),
        ) else {
            dropped += 1;
            continue;
        };
        if row[file_size].is_empty() || row[timeout].is_empty() {
            dropped += 1;
            continue;
        }

        let key = GroupKey {
            file_size: row[file_size].clone(),
            timeout: row[timeout].clone(),
            window_size: window,
            packet_loss_rate: loss,
        };
        let samples = groups.entry(key).or_default();
        if let Some(sample) = Value::numeric(&row[duration]).as_f64() {
            samples.push(sample);
        }
    }

    if dropped > 0 {
        warn!(dropped, "dropped raw rows with unparsable grouping fields");
    }

    let mut columns: Vec<String> = KEY_COLUMNS.iter().map(|c| c.to_string()).collect();
    columns.extend(DurationStat::ALL.iter().map(|s| s.canonical().to_string()));

    let rows = groups
        .into_iter()
        .map(|(key, samples)| {
            let mut row = vec![
                Value::Text(key.file_size),
                Value::Text(key.timeout),
                Value::Number(key.window_size),
                Value::Number(key.packet_loss_rate),
            ];
            row.extend(DurationStat::ALL.iter().map(|&stat| samples.stat(stat)));
            row
        })
        .collect();

    Ok(Frame { columns, rows })
}

fn is_numeric_column(name: &str) -> bool {
    name == WINDOW_SIZE
        || name == PACKET_LOSS_RATE
        || DurationStat::ALL
            .iter()
            .any(|stat| stat.aliases().contains(&name))
}

fn coerce_aggregated(table: &Table) -> Frame {
    let numeric: Vec<bool> = table
        .headers()
        .iter()
        .map(|h| is_numeric_column(h))
        .collect();

    let rows = table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(&numeric)
                .map(|(cell, &is_numeric)| {
                    if is_numeric {
                        Value::numeric(cell)
                    } else {
                        Value::Text(cell.clone())
                    }
                })
                .collect()
        })
        .collect();

    Frame {
        columns: table.headers().to_vec(),
        rows,
    }
}
