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

//! FTCP benchmark report command line tool.

use clap::Parser;
use ftcp_bench::report::{DEFAULT_IMAGE_EXTENSION, DEFAULT_INPUT};
use ftcp_bench::{generate_report, ReportConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Renders candlestick figures and LaTeX tables from FTCP benchmark results.
///
/// Running without arguments reads `benchmark_results.csv` and writes
/// `benchmark1MB.svg`, `benchmark10MB.svg`, `benchmark100MB.svg` and
/// `benchmark.tex` into the current directory.
///
/// # Examples
///
/// ```bash
/// # Default file names
/// ftcp-bench
///
/// # Separate output directory, debug logging
/// RUST_LOG=ftcp_bench=debug ftcp-bench --output-dir report/
/// ```
#[derive(Parser)]
#[command(name = "ftcp-bench")]
#[command(author, version, about = "FTCP benchmark report generator", long_about = None)]
struct Cli {
    /// Benchmark CSV written by the benchmark driver
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory receiving the images and benchmark.tex
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Extension for the image files; pass an empty string for none
    #[arg(long, default_value = DEFAULT_IMAGE_EXTENSION)]
    image_extension: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ftcp_bench=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ReportConfig {
        input: cli.input,
        output_dir: cli.output_dir,
        image_extension: cli.image_extension,
    };

    match generate_report(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
