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

//! Error type for the one-call pipeline and context helpers.
//!
//! ```rust
//! use fhirgraph::{convert, ResultExt, RuleTable};
//!
//! fn convert_file(path: &str, text: &str) -> Result<usize, fhirgraph::Error> {
//!     let script = convert(text, &RuleTable::new())
//!         .with_context(|| format!("while converting {}", path))?;
//!     Ok(script.len())
//! }
//!
//! let err = convert_file("bundle.json", "[]").unwrap_err();
//! assert_eq!(err.context.as_deref(), Some("while converting bundle.json"));
//! ```

use fhirgraph_core::GraphError;
use fhirgraph_neo4j::Neo4jError;
use std::fmt;
use thiserror::Error;

/// What went wrong.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The document could not be parsed, built or unnested.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The graph could not be rendered as statements.
    #[error(transparent)]
    Cypher(#[from] Neo4jError),
}

/// Pipeline error with optional context.
#[derive(Debug)]
pub struct Error {
    /// The underlying failure.
    pub kind: ErrorKind,
    /// Context added while the error propagated, outermost first.
    pub context: Option<String>,
}

impl Error {
    /// Wrap a failure without context.
    pub fn new(kind: impl Into<ErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            context: None,
        }
    }

    fn push_context(mut self, new_context: String) -> Self {
        if new_context.is_empty() {
            return self;
        }
        self.context = Some(match self.context {
            Some(existing) => format!("{}; {}", new_context, existing),
            None => new_context,
        });
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{}: {}", context, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<GraphError> for Error {
    fn from(err: GraphError) -> Self {
        Self::new(err)
    }
}

impl From<Neo4jError> for Error {
    fn from(err: Neo4jError) -> Self {
        Self::new(err)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result type alias for the pipeline.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to pipeline results.
///
/// New context is prepended: `outer; inner`.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Add context computed only on the error path.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| e.into().push_context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().push_context(f().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_on_graph_error() {
        let result: std::result::Result<(), GraphError> =
            Err(GraphError::invalid_document("no entries"));
        let err = result.context("in bundle.json").unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Graph(GraphError::InvalidDocument(_))));
        assert_eq!(err.context.as_deref(), Some("in bundle.json"));
        assert_eq!(err.to_string(), "in bundle.json: invalid document: no entries");
    }

    #[test]
    fn test_context_chains_outermost_first() {
        let result: std::result::Result<(), Neo4jError> =
            Err(Neo4jError::NotUnnested("g".to_string()));
        let err = result
            .context("rendering")
            .context("batch item 3")
            .unwrap_err();

        assert_eq!(err.context.as_deref(), Some("batch item 3; rendering"));
    }

    #[test]
    fn test_context_skips_ok_and_empty() {
        let ok: std::result::Result<i32, GraphError> = Ok(1);
        let mut called = false;
        let value = ok
            .with_context(|| {
                called = true;
                "never"
            })
            .unwrap();
        assert_eq!(value, 1);
        assert!(!called);

        let err: std::result::Result<(), GraphError> =
            Err(GraphError::invalid_document("x"));
        assert!(err.context("").unwrap_err().context.is_none());
    }

    #[test]
    fn test_source_is_kind() {
        use std::error::Error as _;
        let err = Error::new(Neo4jError::InvalidIdentifier("1".to_string()));
        assert!(err.source().is_some());
        assert!(err.context.is_none());
    }
}
