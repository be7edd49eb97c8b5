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

//! FTCP RFC compliance matrix command line tool.

use clap::Parser;
use ftcp_rfc::{run, CheckRegistry, ComplianceConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Runs the registered compliance checks and writes the RFC compliance matrix.
///
/// # Examples
///
/// ```bash
/// # Reads rfcs-compliance-metadata.csv, writes rfcs-compliance-results.md
/// ftcp-rfc
///
/// ftcp-rfc --input docs/metadata.csv --output docs/compliance.md
/// ```
#[derive(Parser)]
#[command(name = "ftcp-rfc")]
#[command(author, version, about = "FTCP RFC compliance matrix generator", long_about = None)]
struct Cli {
    /// Semicolon-delimited compliance metadata
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Markdown report to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ftcp_rfc=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ComplianceConfig {
        input: cli.input,
        output: cli.output,
    };

    match run(&config, &CheckRegistry::builtin()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
