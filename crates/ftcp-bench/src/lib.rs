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

//! FTCP benchmark report generator.
//!
//! Turns the CSV written by the FTCP benchmark driver into one candlestick
//! figure per transferred file size and a `benchmark.tex` file with a table
//! of every measured configuration.
//!
//! # Pipeline
//!
//! 1. [`CsvLoader`] reads the file once and strips the `sep=` directive.
//! 2. [`prepare`] detects raw per-trial rows and aggregates them to
//!    min/avg/max per (file size, timeout, window size, packet loss rate);
//!    already aggregated files pass through unchanged.
//! 3. [`AggregatedDataset`] arranges one file size's rows as a
//!    timeout x packet-loss-rate grid, [`render_svg`] draws it and
//!    [`latex::render_figure`] tabulates it.
//!
//! # Examples
//!
//! ```
//! use ftcp_bench::{prepare, AggregatedDataset, CsvLoader};
//!
//! let loader = CsvLoader::from_text(
//!     "sep=,\nFile Size,Timeout,Window Size,Packet Loss Rate,Transfer Duration\n\
//!      1MB,1s,1,0.010,0.500\n1MB,1s,1,0.010,1.500\n",
//! );
//! let frame = prepare(&loader.table()?)?;
//! let grid = AggregatedDataset::build(&frame, "1MB");
//!
//! let candle = grid.cell("1s", 0.01)[0];
//! assert_eq!((candle.min, candle.avg, candle.max), (0.5, 1.0, 1.5));
//! # Ok::<(), ftcp_bench::BenchError>(())
//! ```

pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod latex;
pub mod loader;
pub mod output;
pub mod report;

pub use aggregate::{detect_shape, prepare, DataShape, DurationStat, Frame, Value};
pub use dataset::{
    AggregatedDataset, Candle, FILE_SIZES, PLR_VALUES, TIMEOUT_SETTINGS, WINDOW_SIZES,
};
pub use error::{BenchError, Result};
pub use figure::render_svg;
pub use loader::{CsvLoader, Table};
pub use report::{generate_from_loader, generate_report, ReportConfig, ReportSummary};
