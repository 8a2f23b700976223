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


//! Batch convert command - many bundles, one statement file each

use super::load_rules;
use crate::batch::{BatchConfig, BatchProcessor, ConvertOperation};
use crate::error::CliError;
use colored::Colorize;
use std::path::PathBuf;

/// Convert many bundle files, writing `Cypher_<stem>.txt` for each one into
/// `output_dir`.
///
/// Every file is processed even when others fail. The command fails after
/// the batch if any file did, listing each failure.
///
/// # Examples
///
/// ```no_run
/// use fhirgraph_cli::commands::batch_convert;
///
/// # fn main() -> Result<(), String> {
/// let files = vec!["a.json".to_string(), "b.json".to_string()];
/// batch_convert(files, Some("rules.txt"), "out", true, false)?;
/// # Ok(())
/// # }
/// ```
pub fn batch_convert(
    files: Vec<String>,
    rules: Option<&str>,
    output_dir: &str,
    parallel: bool,
    verbose: bool,
) -> Result<(), String> {
    let rules = load_rules(rules)?;
    std::fs::create_dir_all(output_dir)
        .map_err(|e| format!("Failed to create '{}': {}", output_dir, e))?;

    let paths: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();

    let config = BatchConfig {
        parallel_threshold: if parallel { 1 } else { usize::MAX },
        verbose,
        ..Default::default()
    };

    let processor = BatchProcessor::new(config);
    let operation = ConvertOperation::new(rules, output_dir);

    let results = processor
        .process(&paths, operation, true)
        .map_err(|e: CliError| e.to_string())?;

    if verbose {
        for success in results.successes() {
            if let Ok(target) = &success.result {
                println!(
                    "  {} {} -> {}",
                    "✓".green(),
                    success.path.display(),
                    target.display()
                );
            }
        }
    }

    if results.has_failures() {
        eprintln!();
        eprintln!("{}", "Conversion failures:".red().bold());
        for failure in results.failures() {
            eprintln!("  {} {}", "✗".red(), failure.path.display());
            if let Err(e) = &failure.result {
                eprintln!("    {}", e.to_string().dimmed());
            }
        }
        return Err(format!(
            "{} of {} files failed to convert",
            results.failure_count(),
            results.total_files()
        ));
    }

    Ok(())
}
