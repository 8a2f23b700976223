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

//! Error types for graph construction.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for building and unnesting graphs.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The document does not have the shape of a bundle.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The graph has already been unnested.
    #[error("graph '{0}' has already been unnested")]
    AlreadyUnnested(String),

    /// A rule table or document could not be read.
    #[error("I/O error for '{path}': {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    /// Create an invalid document error.
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create an I/O error with file path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
