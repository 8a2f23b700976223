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

//! # fhirgraph
//!
//! Turn FHIR-style JSON bundles into a typed property graph and render the
//! graph as Cypher statements.
//!
//! ## Quick Start
//!
//! ```rust
//! use fhirgraph::{convert, RuleTable};
//!
//! let bundle = r#"{"entry": [
//!     {"fullUrl": "urn:uuid:g-1", "resource": {"resourceType": "Patient"}},
//!     {"fullUrl": "urn:uuid:g-2", "resource": {"resourceType": "Condition",
//!                                              "subject": {"reference": "urn:uuid:g-1"}}}
//! ]}"#;
//! let rules = RuleTable::parse("Condition hasSubject Patient");
//!
//! let script = convert(bundle, &rules).expect("valid bundle");
//! print!("{}", script.render());
//! ```
//!
//! ## Pipeline
//!
//! 1. [`GraphBuilder`] creates one entity node per entry and links
//!    references, typing edges through a [`RuleTable`].
//! 2. [`Graph::unnest`] expands nested attributes into property nodes.
//! 3. [`graph_to_script`] renders node statements, then edge statements.
//!
//! ## Modules
//!
//! - [`cypher`]: escaping and statement types
//! - [`neo4j`]: executing statements through a database session

pub use fhirgraph_core::{
    build_graph, derive_graph_id, find_references, graph_from_str, parse_document,
    unnest_attributes, Adjacency, BuildOptions, Edge, EdgeKind, EdgeLabel, Graph, GraphBuilder,
    GraphError, Node, NodeId, NodeKind, Properties, RuleTable, Scalar, DEFAULT_ID_PREFIX,
    DEFAULT_REFERENCE_KEY, PROPERTY_NODE_TYPE,
};
pub use fhirgraph_neo4j::{
    graph_to_cypher, graph_to_script, graph_to_statements, CypherScript, CypherStatement,
    Neo4jError, StatementType, ToCypherConfig, ToCypherConfigBuilder,
};

mod error;
pub use error::{Error, ErrorKind, Result, ResultExt};

pub mod cypher {
    //! Cypher escaping and statement types
    pub use fhirgraph_neo4j::cypher::{
        escape_identifier, escape_label, escape_relationship_type, escape_string,
        is_valid_identifier, quote_string, CypherValue,
    };
    pub use fhirgraph_neo4j::{edge_to_cypher, node_to_cypher};
}

pub mod neo4j {
    //! Statement execution through an external session
    pub use fhirgraph_neo4j::{
        execute_script, ExecutionReport, StatementExecutor, StatementFailure,
    };
}

use serde_json::Value;

/// Convert a parsed bundle into statements.
pub fn convert_value(
    doc: &Value,
    rules: &RuleTable,
    options: &BuildOptions,
    config: &ToCypherConfig,
) -> Result<CypherScript> {
    let mut graph = GraphBuilder::new(rules)
        .with_options(options.clone())
        .build(doc)?;
    graph.unnest()?;
    Ok(graph_to_script(&graph, config)?)
}

/// Convert bundle text into statements with explicit options.
pub fn convert_with(
    input: &str,
    rules: &RuleTable,
    options: &BuildOptions,
    config: &ToCypherConfig,
) -> Result<CypherScript> {
    let doc = parse_document(input)?;
    convert_value(&doc, rules, options, config)
}

/// Convert bundle text into statements with default options.
///
/// # Examples
///
/// ```rust
/// use fhirgraph::{convert, RuleTable};
///
/// let script = convert(r#"{"entry": []}"#, &RuleTable::new()).unwrap();
/// assert!(script.is_empty());
///
/// assert!(convert("not json", &RuleTable::new()).is_err());
/// ```
#[inline]
pub fn convert(input: &str, rules: &RuleTable) -> Result<CypherScript> {
    convert_with(input, rules, &BuildOptions::default(), &ToCypherConfig::default())
}

/// Statement texts for bundle text, with default options.
#[inline]
pub fn to_statements(input: &str, rules: &RuleTable) -> Result<Vec<String>> {
    Ok(convert(input, rules)?.lines())
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r#"{"entry": [
        {"fullUrl": "urn:uuid:g-1", "resource": {"resourceType": "Patient"}},
        {"fullUrl": "urn:uuid:g-2", "resource": {"resourceType": "Condition",
                                                 "subject": {"reference": "urn:uuid:g-1"}}}
    ]}"#;

    #[test]
    fn test_convert_counts() {
        let script = convert(BUNDLE, &RuleTable::new()).unwrap();
        assert_eq!(script.statements_of_type(StatementType::CreateNode).len(), 3);
        assert_eq!(
            script
                .statements_of_type(StatementType::CreateRelationship)
                .len(),
            2
        );
    }

    #[test]
    fn test_to_statements_matches_convert() {
        let rules = RuleTable::parse("Condition hasSubject Patient");
        assert_eq!(
            to_statements(BUNDLE, &rules).unwrap(),
            convert(BUNDLE, &rules).unwrap().lines()
        );
    }

    #[test]
    fn test_convert_errors_carry_kind() {
        let err = convert("[1, 2]", &RuleTable::new()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Graph(GraphError::InvalidDocument(_))));

        let config = ToCypherConfig::new().with_max_nodes(1);
        let err = convert_with(BUNDLE, &RuleTable::new(), &BuildOptions::default(), &config)
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Cypher(Neo4jError::NodeCountExceeded { .. })));
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
