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


//! CLI command implementations

mod batch_commands;
mod convert;
mod inspect;
mod rules;
mod stats;
#[cfg(feature = "neo4j")]
mod upload;

pub use batch_commands::batch_convert;
pub use convert::{convert, render_file};
pub use inspect::inspect;
pub use rules::rules;
pub use stats::{stats, GraphStats};
#[cfg(feature = "neo4j")]
pub use upload::{upload, ConnectionSettings};

use crate::error::CliError;
use fhirgraph_core::RuleTable;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Default maximum input size (1 GB).
/// Can be overridden via the `FHIRGRAPH_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Environment variable holding the maximum input size in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "FHIRGRAPH_MAX_FILE_SIZE";

fn get_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file after checking its size against the configured limit.
///
/// # Errors
///
/// Returns `Err` if the metadata cannot be read, the file is larger than
/// the limit, or the content is not valid UTF-8.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Read a file from disk with size validation.
///
/// # Examples
///
/// ```no_run
/// use fhirgraph_cli::commands::read_file;
///
/// # fn main() -> Result<(), String> {
/// let bundle = read_file("bundle.json")?;
/// assert!(!bundle.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn read_file(path: &str) -> Result<String, String> {
    read_input(Path::new(path)).map_err(|e| e.to_string())
}

/// Write content to a file or stdout.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), String> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| format!("Failed to write '{}': {}", p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| format!("Failed to write to stdout: {}", e)),
    }
}

/// Load a rule table, or an empty one when no path is given.
///
/// A missing rule file is an error; a rule file with malformed lines is not.
pub fn load_rules(path: Option<&str>) -> Result<RuleTable, String> {
    match path {
        Some(p) => Ok(RuleTable::parse(&read_file(p)?)),
        None => Ok(RuleTable::new()),
    }
}
