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


//! Batch processing for many bundle files.
//!
//! Each file is converted independently: one graph per file, no state shared
//! between workers, so files can be handed to rayon's pool as-is. Failures
//! are collected per file and never abort the rest of the batch.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fhirgraph_cli::batch::{BatchConfig, BatchProcessor, ConvertOperation};
//! use fhirgraph_core::RuleTable;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let processor = BatchProcessor::new(BatchConfig::default());
//! let files = vec![PathBuf::from("a.json"), PathBuf::from("b.json")];
//! let operation = ConvertOperation::new(RuleTable::new(), "out");
//!
//! let results = processor.process(&files, operation, true)?;
//! println!("{} of {} converted", results.success_count(), results.total_files());
//! # Ok(())
//! # }
//! ```

use crate::commands::render_file;
use crate::error::CliError;
use colored::Colorize;
use fhirgraph_core::RuleTable;
use fhirgraph_neo4j::ToCypherConfig;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum number of files to trigger parallel processing.
    ///
    /// Default: 10
    pub parallel_threshold: usize,

    /// Maximum number of threads; `None` leaves the choice to rayon.
    pub max_threads: Option<usize>,

    /// Number of files between progress updates. 0 disables progress lines.
    pub progress_interval: usize,

    /// Print one line per file.
    pub verbose: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 10,
            max_threads: None,
            progress_interval: 1,
            verbose: false,
        }
    }
}

/// Result of processing a single file.
#[derive(Debug, Clone)]
pub struct FileResult<T> {
    /// The file path that was processed
    pub path: PathBuf,
    /// The result of processing
    pub result: Result<T, CliError>,
}

impl<T> FileResult<T> {
    /// Create a successful file result.
    pub fn success(path: PathBuf, value: T) -> Self {
        Self {
            path,
            result: Ok(value),
        }
    }

    /// Create a failed file result.
    pub fn failure(path: PathBuf, error: CliError) -> Self {
        Self {
            path,
            result: Err(error),
        }
    }

    /// Check if the result is successful.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Check if the result is a failure.
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Aggregated results from a batch, in input order.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    /// Individual results for each processed file
    pub results: Vec<FileResult<T>>,
    /// Total processing time in milliseconds
    pub elapsed_ms: u128,
}

impl<T> BatchResults<T> {
    /// Create new batch results.
    pub fn new(results: Vec<FileResult<T>>, elapsed_ms: u128) -> Self {
        Self {
            results,
            elapsed_ms,
        }
    }

    /// Number of files processed.
    pub fn total_files(&self) -> usize {
        self.results.len()
    }

    /// Number of files processed successfully.
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of failed files.
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Check if all files were processed successfully.
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.is_success())
    }

    /// Check if any files failed.
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.is_failure())
    }

    /// Iterate over successful results.
    pub fn successes(&self) -> impl Iterator<Item = &FileResult<T>> {
        self.results.iter().filter(|r| r.is_success())
    }

    /// Iterate over failed results.
    pub fn failures(&self) -> impl Iterator<Item = &FileResult<T>> {
        self.results.iter().filter(|r| r.is_failure())
    }

    /// Files per second.
    pub fn throughput(&self) -> f64 {
        if self.elapsed_ms == 0 {
            0.0
        } else {
            (self.total_files() as f64) / (self.elapsed_ms as f64 / 1000.0)
        }
    }
}

/// An operation applied to each file of a batch.
///
/// Must be `Send + Sync`: one instance is shared by every worker.
pub trait BatchOperation: Send + Sync {
    /// The output type for successful processing
    type Output: Send;

    /// Process a single file.
    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError>;

    /// Human-readable name for progress reporting.
    fn name(&self) -> &str;
}

/// Lock-free progress counters.
#[derive(Debug)]
struct ProgressTracker {
    total: usize,
    processed: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    interval: usize,
    verbose: bool,
    start_time: Instant,
}

impl ProgressTracker {
    fn new(total: usize, interval: usize, verbose: bool) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            interval,
            verbose,
            start_time: Instant::now(),
        }
    }

    fn record_success(&self, path: &Path) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.succeeded.fetch_add(1, Ordering::Relaxed);

        if self.should_report(processed) {
            self.report_progress(path, true);
        }
    }

    fn record_failure(&self, path: &Path, error: &CliError) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.failed.fetch_add(1, Ordering::Relaxed);

        if self.verbose {
            eprintln!("{} {} - {}", "✗".red().bold(), path.display(), error);
        }

        if self.should_report(processed) {
            self.report_progress(path, false);
        }
    }

    fn should_report(&self, processed: usize) -> bool {
        self.interval > 0 && (processed % self.interval == 0 || processed == self.total)
    }

    fn report_progress(&self, current_file: &Path, success: bool) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let rate = processed as f64 / self.start_time.elapsed().as_secs_f64();

        if self.verbose {
            let status = if success {
                "✓".green().bold()
            } else {
                "✗".red().bold()
            };
            eprintln!(
                "{} [{}/{}] {} ({:.1} files/s)",
                status,
                processed,
                self.total,
                current_file.display(),
                rate
            );
        } else {
            eprintln!(
                "Progress: [{}/{}] {} succeeded, {} failed ({:.1} files/s)",
                processed, self.total, succeeded, failed, rate
            );
        }
    }

    fn print_summary(&self, operation_name: &str) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();

        println!();
        println!("{}", "═".repeat(60).bright_blue());
        println!(
            "{} {}",
            "Batch Operation:".bright_blue().bold(),
            operation_name.bright_white()
        );
        println!("{}", "═".repeat(60).bright_blue());
        println!("  {} {}", "Total files:".bright_cyan(), processed);
        println!("  {} {}", "Succeeded:".green().bold(), succeeded);
        println!("  {} {}", "Failed:".red().bold(), failed);
        println!(
            "  {} {:.2}s",
            "Elapsed:".bright_cyan(),
            elapsed.as_secs_f64()
        );
        println!("{}", "═".repeat(60).bright_blue());
    }
}

/// Runs a [`BatchOperation`] over many files, serially or on rayon's pool.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor with the given configuration.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Create a batch processor with default configuration.
    pub fn default_config() -> Self {
        Self::new(BatchConfig::default())
    }

    /// Process every file and collect the results in input order.
    ///
    /// Parallel processing is used once `files.len()` reaches the configured
    /// threshold.
    ///
    /// # Errors
    ///
    /// Per-file failures are returned inside [`BatchResults`]; this function
    /// itself currently never fails.
    pub fn process<O>(
        &self,
        files: &[PathBuf],
        operation: O,
        show_progress: bool,
    ) -> Result<BatchResults<O::Output>, CliError>
    where
        O: BatchOperation,
    {
        let start_time = Instant::now();

        if files.is_empty() {
            return Ok(BatchResults::new(vec![], 0));
        }

        if let Some(max_threads) = self.config.max_threads {
            // The global pool can only be built once per process.
            rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build_global()
                .ok();
        }

        let tracker = show_progress.then(|| {
            ProgressTracker::new(
                files.len(),
                self.config.progress_interval,
                self.config.verbose,
            )
        });

        let run = |path: &PathBuf| {
            match operation.process_file(path) {
                Ok(value) => {
                    if let Some(t) = &tracker {
                        t.record_success(path);
                    }
                    FileResult::success(path.clone(), value)
                }
                Err(e) => {
                    if let Some(t) = &tracker {
                        t.record_failure(path, &e);
                    }
                    FileResult::failure(path.clone(), e)
                }
            }
        };

        let results: Vec<FileResult<O::Output>> = if files.len() < self.config.parallel_threshold
        {
            files.iter().map(run).collect()
        } else {
            files.par_iter().map(run).collect()
        };

        if let Some(tracker) = tracker {
            tracker.print_summary(operation.name());
        }

        Ok(BatchResults::new(results, start_time.elapsed().as_millis()))
    }
}

/// Name of the statement file written for `input`: `Cypher_<stem>.txt`.
pub fn output_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("Cypher_{}.txt", stem)
}

/// Convert each bundle and write its statements into an output directory.
#[derive(Debug, Clone)]
pub struct ConvertOperation {
    /// Rule table shared by every file.
    pub rules: RuleTable,
    /// Serializer settings.
    pub config: ToCypherConfig,
    /// Directory receiving `Cypher_<stem>.txt` files.
    pub output_dir: PathBuf,
}

impl ConvertOperation {
    /// Create an operation with the default serializer settings.
    pub fn new(rules: RuleTable, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            rules,
            config: ToCypherConfig::default(),
            output_dir: output_dir.into(),
        }
    }

    /// Use a custom serializer configuration.
    pub fn with_config(mut self, config: ToCypherConfig) -> Self {
        self.config = config;
        self
    }
}

impl BatchOperation for ConvertOperation {
    /// Path of the written statement file.
    type Output = PathBuf;

    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
        let script = render_file(path, &self.rules, &self.config)?;

        let target = self.output_dir.join(output_file_name(path));
        std::fs::write(&target, script.render()).map_err(|e| CliError::io_error(&target, e))?;
        Ok(target)
    }

    fn name(&self) -> &str {
        "convert"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhirgraph_test::{fixtures, to_text};
    use tempfile::tempdir;

    struct LengthOperation;

    impl BatchOperation for LengthOperation {
        type Output = usize;

        fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
            std::fs::read_to_string(path)
                .map(|s| s.len())
                .map_err(|e| CliError::io_error(path, e))
        }

        fn name(&self) -> &str {
            "length"
        }
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(Path::new("dir/bundle.json")), "Cypher_bundle.txt");
        assert_eq!(output_file_name(Path::new("x")), "Cypher_x.txt");
    }

    #[test]
    fn test_empty_batch() {
        let results = BatchProcessor::default_config()
            .process(&[], LengthOperation, false)
            .unwrap();
        assert_eq!(results.total_files(), 0);
        assert!(results.all_succeeded());
        assert_eq!(results.throughput(), 0.0);
    }

    #[test]
    fn test_results_keep_input_order() {
        let dir = tempdir().unwrap();
        let mut files = Vec::new();
        for i in 0..12 {
            let path = dir.path().join(format!("f{}.txt", i));
            std::fs::write(&path, "x".repeat(i)).unwrap();
            files.push(path);
        }
        files.push(dir.path().join("missing.txt"));

        let processor = BatchProcessor::new(BatchConfig {
            parallel_threshold: 1,
            ..Default::default()
        });
        let results = processor.process(&files, LengthOperation, false).unwrap();

        assert_eq!(results.total_files(), 13);
        assert_eq!(results.failure_count(), 1);
        for (i, result) in results.results.iter().take(12).enumerate() {
            assert_eq!(result.path, files[i]);
            assert_eq!(result.result.as_ref().unwrap(), &i);
        }
        assert!(results.results[12].is_failure());
    }

    #[test]
    fn test_sequential_batch_with_progress() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("a.txt");
        std::fs::write(&present, "abc").unwrap();
        let files = vec![present.clone(), dir.path().join("gone.txt")];

        let processor = BatchProcessor::default_config();
        let results = processor.process(&files, LengthOperation, true).unwrap();

        assert_eq!(results.success_count(), 1);
        assert_eq!(results.successes().next().unwrap().path, present);
        let failed = results.failures().next().unwrap();
        assert!(matches!(failed.result, Err(CliError::Io { .. })));
    }

    #[test]
    fn test_convert_operation_writes_statement_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bundle.json");
        std::fs::write(&input, to_text(&fixtures::single_reference())).unwrap();

        let operation = ConvertOperation::new(RuleTable::new(), dir.path());
        let written = operation.process_file(&input).unwrap();

        assert_eq!(written, dir.path().join("Cypher_bundle.txt"));
        let text = std::fs::read_to_string(written).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("[:UNDEFINED {"));
    }

    #[test]
    fn test_convert_operation_reports_invalid_bundle() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.json");
        std::fs::write(&input, "{ not json").unwrap();

        let operation = ConvertOperation::new(RuleTable::new(), dir.path());
        let err = operation.process_file(&input).unwrap_err();
        assert!(matches!(err, CliError::Graph(_)));
        assert!(!dir.path().join("Cypher_broken.txt").exists());
    }
}
