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

//! Convert a bundle document into entity nodes and reference edges.
//!
//! Entries are grouped by `resourceType` in order of first appearance and
//! become one node each. A type with a single entry is named after the
//! lower-cased type (`patient`); a type with several entries gets a 1-based
//! ordinal suffix in entry order (`observation1`, `observation2`).
//!
//! Every value found under the reference key of an entity's resource is
//! resolved through the `fullUrl` index. Resolved references become edges
//! labelled by the [`RuleTable`]; unresolved references are dropped.

use crate::error::{GraphError, Result};
use crate::model::{EdgeKind, EdgeLabel, Graph, Node, NodeId, PROPERTY_NODE_TYPE};
use crate::reference::find_references_in;
use crate::rules::RuleTable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Default key marking a cross-entity reference.
pub const DEFAULT_REFERENCE_KEY: &str = "reference";

/// Default namespace prefix stripped from the first `fullUrl` to form the graph id.
pub const DEFAULT_ID_PREFIX: &str = "urn:uuid:";

/// Options controlling graph construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Key whose values are treated as references (default: "reference").
    pub reference_key: String,
    /// Prefix stripped from the graph id (default: "urn:uuid:").
    pub id_prefix: String,
    /// Node type of property nodes (default: "Property").
    pub property_type: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            reference_key: DEFAULT_REFERENCE_KEY.to_string(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            property_type: PROPERTY_NODE_TYPE.to_string(),
        }
    }
}

impl BuildOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference key.
    pub fn with_reference_key(mut self, key: impl Into<String>) -> Self {
        self.reference_key = key.into();
        self
    }

    /// Set the graph id prefix.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Set the property node type.
    pub fn with_property_type(mut self, node_type: impl Into<String>) -> Self {
        self.property_type = node_type.into();
        self
    }
}

/// Derive a graph id from a `fullUrl`: strip `prefix`, replace `-` with `_`.
///
/// ```
/// # use fhirgraph_core::derive_graph_id;
/// assert_eq!(
///     derive_graph_id("urn:uuid:2e27c71e-30c8-4ceb", "urn:uuid:"),
///     "2e27c71e_30c8_4ceb"
/// );
/// ```
pub fn derive_graph_id(full_url: &str, prefix: &str) -> String {
    full_url
        .strip_prefix(prefix)
        .unwrap_or(full_url)
        .replace('-', "_")
}

struct EntryRef<'a> {
    full_url: &'a str,
    resource: &'a Map<String, JsonValue>,
}

/// Builds graphs from bundle documents using a fixed rule table.
#[derive(Debug, Clone)]
pub struct GraphBuilder<'r> {
    rules: &'r RuleTable,
    options: BuildOptions,
}

impl<'r> GraphBuilder<'r> {
    /// Create a builder with default options.
    pub fn new(rules: &'r RuleTable) -> Self {
        Self {
            rules,
            options: BuildOptions::default(),
        }
    }

    /// Replace the build options.
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// The active options.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the entity graph for one document.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::InvalidDocument` if the root is not an object or
    /// `entry` is present but not an array. A missing `entry` yields an
    /// empty graph.
    pub fn build(&self, doc: &JsonValue) -> Result<Graph> {
        let root = doc
            .as_object()
            .ok_or_else(|| GraphError::invalid_document("document root must be a JSON object"))?;

        let entries: &[JsonValue] = match root.get("entry") {
            None => &[],
            Some(JsonValue::Array(items)) => items,
            Some(_) => return Err(GraphError::invalid_document("'entry' must be an array")),
        };

        let graph_id = entries
            .first()
            .and_then(|entry| entry.get("fullUrl"))
            .and_then(JsonValue::as_str)
            .map(|url| derive_graph_id(url, &self.options.id_prefix))
            .unwrap_or_default();

        let mut graph = Graph::new(graph_id).with_property_type(&self.options.property_type);

        for (resource_type, group) in group_by_type(entries) {
            let lower = resource_type.to_lowercase();
            let single = group.len() == 1;
            for (ordinal, entry) in group.into_iter().enumerate() {
                let name = if single {
                    lower.clone()
                } else {
                    format!("{}{}", lower, ordinal + 1)
                };
                graph.add_entity(Node::entity(
                    name,
                    resource_type,
                    entry.full_url,
                    entry.resource.clone(),
                ));
            }
        }

        let entity_ids: Vec<NodeId> = graph.entity_ids().to_vec();
        for source in entity_ids {
            self.link_references(&mut graph, source);
        }

        tracing::debug!(
            graph_id = graph.graph_id(),
            entities = graph.entity_count(),
            edges = graph.edge_count(),
            "built entity graph"
        );
        Ok(graph)
    }

    fn link_references(&self, graph: &mut Graph, source: NodeId) {
        let references: Vec<String> = {
            let node = graph.node(source);
            find_references_in(&node.attributes, &self.options.reference_key)
                .into_iter()
                .filter_map(|value| value.as_str().map(str::to_string))
                .collect()
        };

        for reference in references {
            let Some(target) = graph.find_by_external_id(&reference) else {
                tracing::debug!(
                    source = %graph.node(source).name,
                    reference = %reference,
                    "dropping unresolved reference"
                );
                continue;
            };

            let source_type = &graph.node(source).node_type;
            let target_type = &graph.node(target).node_type;
            let label = match self.rules.lookup(source_type, target_type) {
                Some(label) => EdgeLabel::Named(label.to_string()),
                None => {
                    tracing::debug!(
                        source_type = %source_type,
                        target_type = %target_type,
                        "no rule for type pair"
                    );
                    EdgeLabel::Undefined
                }
            };
            graph.add_edge(source, target, label, EdgeKind::Reference);
        }
    }
}

/// Group usable entries by resource type, preserving first-appearance order.
fn group_by_type(entries: &[JsonValue]) -> Vec<(&str, Vec<EntryRef<'_>>)> {
    let mut groups: Vec<(&str, Vec<EntryRef<'_>>)> = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(resource) = entry.get("resource").and_then(JsonValue::as_object) else {
            tracing::debug!(index, "skipping entry without a resource object");
            continue;
        };
        let Some(resource_type) = resource
            .get("resourceType")
            .and_then(JsonValue::as_str)
            .filter(|t| !t.is_empty())
        else {
            tracing::debug!(index, "skipping entry without a resourceType");
            continue;
        };
        let entry_ref = EntryRef {
            full_url: entry.get("fullUrl").and_then(JsonValue::as_str).unwrap_or(""),
            resource,
        };

        match groups.iter_mut().find(|(t, _)| *t == resource_type) {
            Some((_, group)) => group.push(entry_ref),
            None => groups.push((resource_type, vec![entry_ref])),
        }
    }

    groups
}

/// Build the entity graph for one document with default options.
pub fn build_graph(doc: &JsonValue, rules: &RuleTable) -> Result<Graph> {
    GraphBuilder::new(rules).build(doc)
}
