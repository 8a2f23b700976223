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

//! Cypher statement generation for fhirgraph property graphs.
//!
//! # Mapping
//!
//! | Graph concept | Neo4j representation |
//! |---------------|---------------------|
//! | Node type (`Patient`, `Property`) | Node label |
//! | Node name | `node_name` property |
//! | Node uid (`{graphId}_{n}`) | `id` property, alias `n_{uid}` |
//! | Entry `fullUrl` | `fullUrl` property |
//! | Scalar properties | Node properties (quoted strings by default) |
//! | Reference / containment edge | Relationship typed by its label |
//! | Unmatched reference edge | `UNDEFINED` relationship (configurable) |
//!
//! # Example
//!
//! ```rust
//! use fhirgraph_core::{graph_from_str, BuildOptions, RuleTable};
//! use fhirgraph_neo4j::{graph_to_statements, ToCypherConfig};
//!
//! let input = r#"{"entry": [
//!     {"fullUrl": "urn:uuid:g-1", "resource": {"resourceType": "Patient", "family": "O'Brien"}},
//!     {"fullUrl": "urn:uuid:g-2", "resource": {"resourceType": "Condition",
//!                                              "subject": {"reference": "urn:uuid:g-1"}}}
//! ]}"#;
//! let rules = RuleTable::parse("Condition hasSubject Patient");
//! let graph = graph_from_str(input, &rules, &BuildOptions::default()).unwrap();
//!
//! let statements = graph_to_statements(&graph, &ToCypherConfig::default()).unwrap();
//! assert!(statements[0].contains("family: 'O\\'Brien'"));
//! assert!(statements.iter().any(|s| s.contains("[:hasSubject {")));
//! ```
//!
//! Node statements always precede relationship statements: a relationship
//! statement matches its endpoints by `id` and creates nothing if they do
//! not exist yet.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod cypher;
pub mod error;
pub mod executor;
pub mod to_cypher;

pub use config::{
    ToCypherConfig, ToCypherConfigBuilder, DEFAULT_ALIAS_PREFIX, DEFAULT_MAX_STRING_LENGTH,
    DEFAULT_UNDEFINED_RELATIONSHIP,
};
pub use cypher::{CypherScript, CypherStatement, CypherValue, StatementType};
pub use error::{Neo4jError, Result};
pub use executor::{execute_script, ExecutionReport, StatementExecutor, StatementFailure};
pub use to_cypher::{
    edge_to_cypher, graph_to_cypher, graph_to_script, graph_to_statements, node_to_cypher,
};
