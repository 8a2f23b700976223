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


//! Error types for the fhirgraph CLI.

use fhirgraph_core::GraphError;
use fhirgraph_neo4j::Neo4jError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while running a command.
///
/// Implements `Clone` so per-file failures can be collected from rayon workers.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Reading or writing a file failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file involved
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The input exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        /// The file that exceeded the limit
        path: PathBuf,
        /// Actual size in bytes
        actual: u64,
        /// Limit in bytes
        max: u64,
        /// Limit in MB, for display
        max_mb: u64,
    },

    /// The bundle could not be turned into a graph.
    #[error("Graph error: {0}")]
    Graph(String),

    /// The graph could not be rendered as statements.
    #[error("Cypher error: {0}")]
    Cypher(String),

    /// Talking to the database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<GraphError> for CliError {
    fn from(err: GraphError) -> Self {
        Self::Graph(err.to_string())
    }
}

impl From<Neo4jError> for CliError {
    fn from(err: Neo4jError) -> Self {
        Self::Cypher(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "bundle.json",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "I/O error for 'bundle.json': missing");
    }

    #[test]
    fn test_file_too_large_reports_megabytes() {
        let err = CliError::file_too_large("big.json", 5 * 1024 * 1024, 2 * 1024 * 1024);
        let msg = err.to_string();
        assert!(msg.contains("5242880 bytes"));
        assert!(msg.contains("(2 MB)"));
    }

    #[test]
    fn test_graph_error_conversion() {
        let err: CliError = GraphError::invalid_document("no entry array").into();
        assert!(matches!(err, CliError::Graph(_)));
        assert!(err.to_string().starts_with("Graph error:"));
    }

    #[test]
    fn test_clone_preserves_message() {
        let err = CliError::database("connection refused");
        assert_eq!(err.clone().to_string(), err.to_string());
    }
}
