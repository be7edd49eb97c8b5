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

//! End-to-end report generation: load, aggregate, draw, tabulate.

use crate::aggregate::{detect_shape, prepare, DataShape};
use crate::dataset::{AggregatedDataset, FILE_SIZES};
use crate::error::Result;
use crate::figure::render_svg;
use crate::latex::render_document;
use crate::loader::CsvLoader;
use crate::output::write_atomic;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default input file written by the benchmark driver.
pub const DEFAULT_INPUT: &str = "benchmark_results.csv";

/// Name of the combined LaTeX output.
pub const LATEX_FILE: &str = "benchmark.tex";

/// Default image extension.
pub const DEFAULT_IMAGE_EXTENSION: &str = "svg";

/// Where to read benchmark data and where to put the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Benchmark CSV to read.
    pub input: PathBuf,
    /// Directory receiving images and `benchmark.tex`.
    pub output_dir: PathBuf,
    /// Extension appended to `benchmark<FileSize>`; empty for none.
    pub image_extension: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
        }
    }
}

impl ReportConfig {
    /// Image file name for one file size, e.g. `benchmark1MB.svg`.
    pub fn image_name(&self, file_size: &str) -> String {
        if self.image_extension.is_empty() {
            format!("benchmark{}", file_size)
        } else {
            format!("benchmark{}.{}", file_size, self.image_extension)
        }
    }

    /// Full path of the image for one file size.
    pub fn image_path(&self, file_size: &str) -> PathBuf {
        self.output_dir.join(self.image_name(file_size))
    }

    /// Full path of `benchmark.tex`.
    pub fn latex_path(&self) -> PathBuf {
        self.output_dir.join(LATEX_FILE)
    }
}

/// What a report run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Whether the input had to be aggregated.
    pub shape: DataShape,
    /// One image per file size, in [`FILE_SIZES`] order.
    pub images: Vec<PathBuf>,
    /// The LaTeX file.
    pub latex: PathBuf,
}

/// Runs the whole pipeline on the file named in `config`.
pub fn generate_report(config: &ReportConfig) -> Result<ReportSummary> {
    let loader = CsvLoader::from_path(&config.input)?;
    generate_from_loader(&loader, config)
}

/// Runs the pipeline on CSV text that is already loaded.
pub fn generate_from_loader(loader: &CsvLoader, config: &ReportConfig) -> Result<ReportSummary> {
    let table = loader.table()?;
    let shape = detect_shape(&table);
    let frame = prepare(&table)?;

    let mut images = Vec::with_capacity(FILE_SIZES.len());
    for file_size in FILE_SIZES {
        let dataset = AggregatedDataset::build(&frame, file_size);
        let path = config.image_path(file_size);
        write_atomic(&path, render_svg(&dataset).as_bytes())?;
        info!(path = %path.display(), file_size, "wrote figure");
        images.push(path);
    }

    let latex = config.latex_path();
    let tex = render_document(&frame, &FILE_SIZES, |size| config.image_name(size));
    write_atomic(&latex, tex.as_bytes())?;
    info!(path = %latex.display(), "wrote LaTeX tables");

    Ok(ReportSummary {
        shape,
        images,
        latex,
    })
}

/// Convenience wrapper using default names inside `dir`.
pub fn generate_in_dir(input: &Path, dir: &Path) -> Result<ReportSummary> {
    generate_report(&ReportConfig {
        input: input.to_path_buf(),
        output_dir: dir.to_path_buf(),
        ..ReportConfig::default()
    })
}
