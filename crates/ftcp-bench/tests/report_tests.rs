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

//! End-to-end tests for the ftcp-bench binary and report pipeline.

use assert_cmd::Command;
use ftcp_bench::report::generate_in_dir;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RAW: &str = "sep=,\n\
File Size,Timeout,Window Size,Packet Loss Rate,Transfer Duration\n\
1MB,1s,1,0.010,0.500\n\
1MB,1s,1,0.010,0.700\n\
1MB,1s,1,0.010,0.900\n\
1MB,Adaptive,4,0.001,0.120\n\
1MB,Adaptive,4,0.001,0.180\n\
10MB,1s,16,0.100,12.000\n\
10MB,1s,16,0.100,14.000\n\
100MB,Adaptive,8,0.010,95.500\n";

const AGGREGATED: &str = "File Size,Timeout,Window Size,Packet Loss Rate,Transfer Duration Min,Transfer Duration Avg,Transfer Duration Max\n\
1MB,1s,1,0.01,0.5,0.7,0.9\n\
1MB,Adaptive,4,0.001,0.12,0.15,0.18\n";

const ALIASED: &str = "File Size,Timeout,Window Size,Packet Loss Rate,Transfer Duration min,Transfer Duration mean,Transfer Duration max\n\
1MB,1s,1,0.01,0.5,0.7,0.9\n\
1MB,Adaptive,4,0.001,0.12,0.15,0.18\n";

fn bench_cmd() -> Command {
    Command::cargo_bin("ftcp-bench").expect("Failed to find ftcp-bench binary")
}

fn workdir_with(csv: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("benchmark_results.csv"), csv).expect("Failed to write input");
    dir
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).expect("Failed to read output")
}

// ===== Binary Tests =====

#[test]
fn test_runs_without_arguments() {
    let dir = workdir_with(RAW);

    bench_cmd().current_dir(dir.path()).assert().success();

    for name in [
        "benchmark1MB.svg",
        "benchmark10MB.svg",
        "benchmark100MB.svg",
        "benchmark.tex",
    ] {
        assert!(dir.path().join(name).exists(), "{} not written", name);
    }

    let tex = read(dir.path(), "benchmark.tex");
    assert_eq!(tex.matches("\\begin{figure}[H]").count(), 3);
    assert!(tex.contains("1MB & 1s & 1 & 0.01 & 0.500 & 0.700 & 0.900"));
    assert!(tex.contains("1MB & $A$ & 4 & 0.001 & 0.120 & 0.150 & 0.180"));
    assert!(tex.contains("10MB & 1s & 16 & 0.1 & 12.000 & 13.000 & 14.000"));
    assert!(tex.contains("100MB & $A$ & 8 & 0.01 & 95.500 & 95.500 & 95.500"));
    assert!(tex.contains("\\includegraphics[width=1\\textwidth]{benchmark10MB.svg}"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    bench_cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("benchmark_results.csv"));

    assert!(!dir.path().join("benchmark.tex").exists());
}

#[test]
fn test_header_only_input_fails() {
    let dir =
        workdir_with("sep=,\nFile Size,Timeout,Window Size,Packet Loss Rate,Transfer Duration\n");

    bench_cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data rows"));
}

#[test]
fn test_custom_paths() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("results.csv");
    let out = dir.path().join("report");
    fs::create_dir(&out).unwrap();
    fs::write(&input, RAW).unwrap();

    bench_cmd()
        .arg("--input")
        .arg(&input)
        .arg("--output-dir")
        .arg(&out)
        .arg("--image-extension")
        .arg("")
        .assert()
        .success();

    assert!(out.join("benchmark1MB").exists());
    assert!(read(&out, "benchmark.tex").contains("{benchmark1MB}"));
}

#[test]
fn test_unresolved_columns_are_logged() {
    let dir = workdir_with(
        "File Size,Timeout,Window Size,Packet Loss Rate,Transfer Duration Min,Transfer Duration Max\n\
         1MB,1s,1,0.01,0.5,0.9\n",
    );

    bench_cmd()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN"))
        .stderr(predicate::str::contains(
            "could not find a column matching aggregate statistic",
        ))
        .stderr(predicate::str::contains("Transfer Duration Avg"))
        .stderr(predicate::str::contains("Transfer Duration Min"));
}

// ===== Pipeline Properties =====

#[test]
fn test_latex_is_idempotent() {
    let dir = workdir_with(RAW);
    let input = dir.path().join("benchmark_results.csv");

    generate_in_dir(&input, dir.path()).unwrap();
    let first = read(dir.path(), "benchmark.tex");
    generate_in_dir(&input, dir.path()).unwrap();
    let second = read(dir.path(), "benchmark.tex");

    assert_eq!(first, second);
}

#[test]
fn test_aggregated_input_is_not_reaggregated() {
    let dir = workdir_with(AGGREGATED);
    let input = dir.path().join("benchmark_results.csv");

    generate_in_dir(&input, dir.path()).unwrap();
    let tex = read(dir.path(), "benchmark.tex");

    assert!(tex.contains("1MB & 1s & 1 & 0.01 & 0.500 & 0.700 & 0.900"));
    assert!(tex.contains("1MB & $A$ & 4 & 0.001 & 0.120 & 0.150 & 0.180"));
}

#[test]
fn test_aliased_columns_match_canonical() {
    let canonical = workdir_with(AGGREGATED);
    let aliased = workdir_with(ALIASED);

    generate_in_dir(&canonical.path().join("benchmark_results.csv"), canonical.path()).unwrap();
    generate_in_dir(&aliased.path().join("benchmark_results.csv"), aliased.path()).unwrap();

    assert_eq!(
        read(canonical.path(), "benchmark.tex"),
        read(aliased.path(), "benchmark.tex")
    );
    assert_eq!(
        read(canonical.path(), "benchmark1MB.svg"),
        read(aliased.path(), "benchmark1MB.svg")
    );
}

#[test]
fn test_unresolved_columns_render_empty_cells() {
    let csv = "File Size,Timeout,Window Size,Packet Loss Rate,Transfer Duration Min,Transfer Duration Max\n\
               1MB,1s,1,0.01,0.5,0.9\n";
    let dir = workdir_with(csv);

    generate_in_dir(&dir.path().join("benchmark_results.csv"), dir.path()).unwrap();

    let svg = read(dir.path(), "benchmark1MB.svg");
    assert!(!svg.contains("stroke-width=\"4\""));
    let tex = read(dir.path(), "benchmark.tex");
    assert!(!tex.contains("1MB & 1s"));
}
