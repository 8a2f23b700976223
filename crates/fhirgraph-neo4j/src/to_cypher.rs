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

//! Render an unnested graph as Cypher statements.
//!
//! One `CREATE` statement per node in serialization order, followed by one
//! `MATCH ... CREATE` statement per edge. Node statements carry the framework
//! properties `node_name`, `id` and `fullUrl` around the node's own scalar
//! properties; edge statements match both endpoints by `id` and carry the
//! endpoint names and types.
//!
//! ```text
//! CREATE (n_g_1_1:Patient {node_name: 'patient', resourceType: 'Patient', id: 'g_1_1', fullUrl: 'urn:uuid:g-1'})
//! MATCH (n), (m) WHERE n.id = 'g_1_2' AND m.id = 'g_1_1' CREATE (n)-[:UNDEFINED {source_node_name: 'condition', target_node_name: 'patient', source_node_type: 'Condition', target_node_type: 'Patient'}]->(m);
//! ```

use fhirgraph_core::{Edge, Graph, Node};

use crate::config::ToCypherConfig;
use crate::cypher::{
    escape_identifier, escape_label, escape_relationship_type, quote_string, validate_identifier,
    validate_string_length, CypherScript, CypherStatement, CypherValue,
};
use crate::error::{Neo4jError, Result};

/// Framework property holding the node's display name.
pub const NODE_NAME_PROPERTY: &str = "node_name";
/// Framework property holding the node's graph-unique id.
pub const ID_PROPERTY: &str = "id";
/// Framework property holding the entry's `fullUrl`.
pub const FULL_URL_PROPERTY: &str = "fullUrl";

const FRAMEWORK_PROPERTIES: [&str; 3] = [NODE_NAME_PROPERTY, ID_PROPERTY, FULL_URL_PROPERTY];
/// Prefix for node properties whose name collides with a framework property.
pub const RENAMED_PROPERTY_PREFIX: &str = "resource_";

fn checked_quote(value: &str, property: &str, config: &ToCypherConfig) -> Result<String> {
    validate_string_length(value, property, config)?;
    Ok(quote_string(value))
}

/// Render the creation statement for one node.
///
/// Node properties named like a framework property are written under
/// `resource_{name}` in their own position, so a resource's `id` lands in
/// `resource_id` next to the framework `id`.
///
/// # Errors
///
/// Returns `Neo4jError::StringLengthExceeded` if a value exceeds the
/// configured limit.
pub fn node_to_cypher(node: &Node, config: &ToCypherConfig) -> Result<CypherStatement> {
    let alias = escape_identifier(&format!("{}{}", config.alias_prefix, node.uid));
    let label = escape_label(&node.node_type);

    let mut props = Vec::with_capacity(node.properties.len() + FRAMEWORK_PROPERTIES.len());
    props.push(format!(
        "{}: {}",
        NODE_NAME_PROPERTY,
        checked_quote(&node.name, NODE_NAME_PROPERTY, config)?
    ));

    for (key, value) in node.properties.iter() {
        let key = if FRAMEWORK_PROPERTIES.contains(&key) {
            let renamed = format!("{RENAMED_PROPERTY_PREFIX}{key}");
            tracing::debug!(node = %node.name, property = key, renamed = %renamed, "renamed framework-colliding property");
            renamed
        } else {
            key.to_string()
        };
        let value = CypherValue::from(value);
        if let Some(s) = value.as_str() {
            validate_string_length(s, &key, config)?;
        }
        props.push(format!(
            "{}: {}",
            escape_identifier(&key),
            value.render(config.quote_all_values)
        ));
    }

    props.push(format!(
        "{}: {}",
        ID_PROPERTY,
        checked_quote(&node.uid, ID_PROPERTY, config)?
    ));
    props.push(format!(
        "{}: {}",
        FULL_URL_PROPERTY,
        checked_quote(&node.full_url, FULL_URL_PROPERTY, config)?
    ));

    Ok(CypherStatement::create_node(format!(
        "CREATE ({}{} {{{}}})",
        alias,
        label,
        props.join(", ")
    )))
}

/// Render the match-and-connect statement for one edge of `graph`.
pub fn edge_to_cypher(graph: &Graph, edge: &Edge, config: &ToCypherConfig) -> Result<CypherStatement> {
    let source = graph.node(edge.source);
    let target = graph.node(edge.target);
    let rel_type = escape_relationship_type(edge.label.name_or(&config.undefined_relationship));

    Ok(CypherStatement::create_relationship(format!(
        "MATCH (n), (m) WHERE n.{id} = {} AND m.{id} = {} \
         CREATE (n)-[{} {{source_node_name: {}, target_node_name: {}, \
         source_node_type: {}, target_node_type: {}}}]->(m);",
        quote_string(&source.uid),
        quote_string(&target.uid),
        rel_type,
        checked_quote(&source.name, "source_node_name", config)?,
        checked_quote(&target.name, "target_node_name", config)?,
        quote_string(&source.node_type),
        quote_string(&target.node_type),
        id = ID_PROPERTY,
    )))
}

/// Render every node, then every edge, of an unnested graph.
///
/// # Errors
///
/// Returns `Neo4jError::NotUnnested` if [`Graph::unnest`] has not run,
/// `Neo4jError::NodeCountExceeded` if the graph exceeds `max_nodes`,
/// `Neo4jError::InvalidIdentifier` if the alias prefix is not an identifier,
/// and any error of [`node_to_cypher`] or [`edge_to_cypher`].
///
/// # Examples
///
/// ```
/// # use fhirgraph_core::{graph_from_str, BuildOptions, RuleTable};
/// # use fhirgraph_neo4j::{graph_to_script, StatementType, ToCypherConfig};
/// let input = r#"{"entry": [{"fullUrl": "urn:uuid:g-1", "resource": {"resourceType": "Patient"}}]}"#;
/// let graph = graph_from_str(input, &RuleTable::new(), &BuildOptions::default()).unwrap();
/// let script = graph_to_script(&graph, &ToCypherConfig::default()).unwrap();
///
/// assert_eq!(script.len(), 1);
/// assert_eq!(script.statements[0].statement_type, StatementType::CreateNode);
/// ```
pub fn graph_to_script(graph: &Graph, config: &ToCypherConfig) -> Result<CypherScript> {
    if !graph.is_unnested() {
        return Err(Neo4jError::NotUnnested(graph.graph_id().to_string()));
    }
    if let Some(max_count) = config.max_nodes {
        let count = graph.node_count();
        if count > max_count {
            return Err(Neo4jError::NodeCountExceeded { count, max_count });
        }
    }
    if !config.alias_prefix.is_empty() {
        validate_identifier(&config.alias_prefix)?;
    }

    let mut script = CypherScript::new();
    for (_, node) in graph.nodes() {
        script.add(node_to_cypher(node, config)?);
    }
    for edge in graph.edges() {
        script.add(edge_to_cypher(graph, edge, config)?);
    }

    tracing::debug!(
        graph_id = graph.graph_id(),
        statements = script.len(),
        "rendered graph"
    );
    Ok(script)
}

/// Statement texts for an unnested graph.
pub fn graph_to_statements(graph: &Graph, config: &ToCypherConfig) -> Result<Vec<String>> {
    Ok(graph_to_script(graph, config)?.lines())
}

/// Newline-terminated statement text for an unnested graph.
pub fn graph_to_cypher(graph: &Graph, config: &ToCypherConfig) -> Result<String> {
    Ok(graph_to_script(graph, config)?.render())
}
