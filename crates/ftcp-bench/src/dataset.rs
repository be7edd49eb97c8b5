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

//! Per-file-size plot grid keyed by timeout setting and packet loss rate.

use crate::aggregate::{Frame, Value, FILE_SIZE, PACKET_LOSS_RATE, TIMEOUT, WINDOW_SIZE};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Window sizes the benchmark sweeps, used as fixed x-axis ticks.
pub const WINDOW_SIZES: [u32; 5] = [1, 2, 4, 8, 16];

/// Packet loss rates the benchmark sweeps (grid columns).
pub const PLR_VALUES: [f64; 3] = [0.001, 0.01, 0.1];

/// Timeout settings the benchmark sweeps (grid rows).
pub const TIMEOUT_SETTINGS: [&str; 2] = ["1s", "Adaptive"];

/// File sizes the benchmark transfers, one figure and table each.
pub const FILE_SIZES: [&str; 3] = ["1MB", "10MB", "100MB"];

const PLR_TOLERANCE: f64 = 1e-9;

/// Whether `value` is the packet loss rate `plr`.
pub fn plr_matches(value: f64, plr: f64) -> bool {
    (value - plr).abs() < PLR_TOLERANCE
}

/// One window size's duration range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    /// Window size in blocks.
    pub window_size: u32,
    /// Fastest transfer, seconds.
    pub min: f64,
    /// Mean transfer, seconds.
    pub avg: f64,
    /// Slowest transfer, seconds.
    pub max: f64,
}

/// Aggregated candles for one file size, arranged as
/// `[timeout][packet loss rate]` in [`TIMEOUT_SETTINGS`] x [`PLR_VALUES`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedDataset {
    file_size: String,
    cells: Vec<Vec<Vec<Candle>>>,
}

impl AggregatedDataset {
    /// Builds the grid for `file_size` from an aggregated frame.
    ///
    /// Rows with missing window size or durations are dropped. If the
    /// aggregate columns cannot be resolved, every cell is left empty and
    /// the affected combinations are logged.
    pub fn build(frame: &Frame, file_size: &str) -> Self {
        let mut dataset = Self::empty(file_size);

        let (Some(fs_idx), Some(timeout_idx), Some(window_idx), Some(plr_idx)) = (
            frame.column(FILE_SIZE),
            frame.column(TIMEOUT),
            frame.column(WINDOW_SIZE),
            frame.column(PACKET_LOSS_RATE),
        ) else {
            warn!(file_size, "grouping columns missing; nothing to plot");
            return dataset;
        };

        let rows: Vec<&Vec<Value>> = frame
            .rows()
            .iter()
            .filter(|row| row[fs_idx].as_text() == Some(file_size))
            .collect();

        let unknown: BTreeSet<&str> = rows
            .iter()
            .filter_map(|row| row[timeout_idx].as_text())
            .filter(|t| !TIMEOUT_SETTINGS.contains(t))
            .collect();
        for timeout in unknown {
            warn!(file_size, timeout, "unrecognised timeout setting is not plotted");
        }

        let stats = if rows.is_empty() {
            None
        } else {
            frame.resolve_all()
        };

        for (t, timeout) in TIMEOUT_SETTINGS.iter().enumerate() {
            for (p, &plr) in PLR_VALUES.iter().enumerate() {
                let subset: Vec<&&Vec<Value>> = rows
                    .iter()
                    .filter(|row| row[timeout_idx].as_text() == Some(*timeout))
                    .filter(|row| row[plr_idx].as_f64().is_some_and(|v| plr_matches(v, plr)))
                    .collect();
                if subset.is_empty() {
                    continue;
                }

                let Some([min_idx, avg_idx, max_idx]) = stats else {
                    warn!(file_size, timeout, plr, "missing required columns for combination");
                    continue;
                };

                let candles: Vec<Candle> = subset
                    .iter()
                    .filter_map(|row| {
                        Some(Candle {
                            window_size: window_size(&row[window_idx])?,
                            min: row[min_idx].as_f64()?,
                            avg: row[avg_idx].as_f64()?,
                            max: row[max_idx].as_f64()?,
                        })
                    })
                    .collect();

                if candles.len() < subset.len() {
                    debug!(
                        file_size,
                        timeout,
                        plr,
                        dropped = subset.len() - candles.len(),
                        "dropped rows with missing values"
                    );
                }
                debug!(file_size, timeout, plr, candles = candles.len(), "built plot cell");
                dataset.cells[t][p] = candles;
            }
        }

        dataset
    }

    /// A grid with every cell empty.
    pub fn empty(file_size: &str) -> Self {
        Self {
            file_size: file_size.to_string(),
            cells: vec![vec![Vec::new(); PLR_VALUES.len()]; TIMEOUT_SETTINGS.len()],
        }
    }

    /// The file size this grid describes.
    pub fn file_size(&self) -> &str {
        &self.file_size
    }

    /// Candles for one combination; empty when the combination is unknown
    /// or has no data.
    pub fn cell(&self, timeout: &str, plr: f64) -> &[Candle] {
        let t = TIMEOUT_SETTINGS.iter().position(|&s| s == timeout);
        let p = PLR_VALUES.iter().position(|&v| plr_matches(v, plr));
        match (t, p) {
            (Some(t), Some(p)) => &self.cells[t][p],
            _ => &[],
        }
    }

    /// All cells in row-major grid order.
    pub fn cells(&self) -> impl Iterator<Item = (&'static str, f64, &[Candle])> + '_ {
        TIMEOUT_SETTINGS
            .into_iter()
            .enumerate()
            .flat_map(move |(t, timeout)| {
                PLR_VALUES
                    .into_iter()
                    .enumerate()
                    .map(move |(p, plr)| (timeout, plr, self.cells[t][p].as_slice()))
            })
    }

    /// Every candle in the grid.
    pub fn candles(&self) -> impl Iterator<Item = &Candle> + '_ {
        self.cells.iter().flatten().flatten()
    }

    /// Whether no cell holds a candle.
    pub fn is_empty(&self) -> bool {
        self.candles().next().is_none()
    }
}

/// Window sizes are positive integers; anything else counts as missing.
pub(crate) fn window_size(value: &Value) -> Option<u32> {
    let n = value.as_f64()?;
    if n >= 1.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
        Some(n as u32)
    } else {
        None
    }
}
