// fhirgraph - FHIR bundle to property graph transformation
//
// Copyright (c) 2025 fhirgraph contributors.
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


//! Tests for batch-convert.

use assert_cmd::Command;
use fhirgraph_test::{fixtures, to_text};
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, TempDir};

fn fhirgraph_cmd() -> Command {
    let mut cmd = Command::cargo_bin("fhirgraph").expect("Failed to find fhirgraph binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Write every bundle fixture that converts cleanly into a temp dir.
fn create_bundles() -> (TempDir, Vec<String>) {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut paths = Vec::new();

    for (name, fixture) in fixtures::all() {
        let path = dir.path().join(format!("{}.json", name));
        fs::write(&path, to_text(&fixture())).expect("Failed to write bundle");
        paths.push(path.to_string_lossy().into_owned());
    }

    (dir, paths)
}

fn stem(path: &str) -> String {
    std::path::Path::new(path)
        .file_stem()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_batch_convert_serial() {
    let (dir, files) = create_bundles();
    let out = dir.path().join("out");

    fhirgraph_cmd()
        .arg("batch-convert")
        .args(&files)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch Operation:"));

    for file in &files {
        let target = out.join(format!("Cypher_{}.txt", stem(file)));
        assert!(target.exists(), "missing {}", target.display());
    }
}

#[test]
fn test_batch_convert_parallel_matches_single_convert() {
    let (dir, files) = create_bundles();
    let rules = dir.path().join("rules.txt");
    fs::write(&rules, fixtures::SAMPLE_RULES).unwrap();
    let out = dir.path().join("out");

    fhirgraph_cmd()
        .arg("batch-convert")
        .args(&files)
        .arg("--rules")
        .arg(&rules)
        .arg("--output-dir")
        .arg(&out)
        .arg("--parallel")
        .assert()
        .success();

    for file in &files {
        let batch = fs::read_to_string(out.join(format!("Cypher_{}.txt", stem(file)))).unwrap();
        let single = fhirgraph_cmd()
            .arg("convert")
            .arg(file)
            .arg("--rules")
            .arg(&rules)
            .output()
            .unwrap();
        assert_eq!(batch.as_bytes(), single.stdout.as_slice(), "mismatch for {}", file);
    }
}

#[test]
fn test_batch_convert_collects_failures() {
    let (dir, mut files) = create_bundles();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{\"entry\": [").unwrap();
    files.push(broken.to_string_lossy().into_owned());
    files.push(dir.path().join("absent.json").to_string_lossy().into_owned());
    let out = dir.path().join("out");

    fhirgraph_cmd()
        .arg("batch-convert")
        .args(&files)
        .arg("-o")
        .arg(&out)
        .args(["--parallel", "--verbose"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Conversion failures:"))
        .stderr(predicate::str::contains("broken.json"))
        .stderr(predicate::str::contains("absent.json"))
        .stderr(predicate::str::contains(format!(
            "2 of {} files failed to convert",
            files.len()
        )));

    assert!(out.join("Cypher_single_reference.txt").exists());
    assert!(!out.join("Cypher_broken.txt").exists());
}

#[test]
fn test_batch_convert_requires_files() {
    let dir = tempdir().unwrap();
    fhirgraph_cmd()
        .arg("batch-convert")
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure();
}
