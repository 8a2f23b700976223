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

//! Decompose nested attributes into property nodes.
//!
//! [`unnest_attributes`] is a pure function: given an entity's name and its
//! raw attributes it returns the scalar attributes to keep on the entity,
//! the property nodes to create and the containment edges between them.
//! New nodes are addressed by their index in [`Unnested::nodes`];
//! [`Graph::unnest`] merges the result into the arena.
//!
//! Expansion rules:
//!
//! - an object value becomes a property node `{parent}_{key}` linked by an
//!   edge labelled `key`; its scalar fields become the node's properties and
//!   its structured fields expand recursively;
//! - an array value becomes a property node `{parent}_{key}` in the same way;
//!   scalar elements are stored on it as `property1`, `property2`, ...;
//! - an object element of an array is walked in key order: structured
//!   fields expand under the array node until the first scalar field is
//!   met; that field spawns the element node `{array node}_{key}` and the
//!   whole object expands into it, so a list of objects never merges into
//!   one node. Structured fields ahead of the first scalar therefore appear
//!   under both the array node and the element node. An element with no
//!   scalar fields expands its fields directly under the array node;
//! - an array element of an array is flattened onto the same array node;
//! - `null` is treated as an absent value.

use crate::error::{GraphError, Result};
use crate::model::{EdgeKind, EdgeLabel, Graph, Node, NodeId};
use crate::value::{is_structured, Properties, Scalar};
use serde_json::{Map, Value as JsonValue};

/// Endpoint of a containment edge inside an [`Unnested`] result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The entity being unnested.
    Root,
    /// Index into [`Unnested::nodes`].
    Local(usize),
}

/// A containment edge between nodes of an [`Unnested`] result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEdge {
    /// Parent endpoint.
    pub source: Slot,
    /// Index of the child in [`Unnested::nodes`].
    pub target: usize,
    /// Attribute name that produced the child.
    pub label: String,
}

/// Result of unnesting one entity's attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unnested {
    /// Scalar attributes that stay on the entity.
    pub scalars: Properties,
    /// Property nodes in depth-first creation order.
    pub nodes: Vec<Node>,
    /// Containment edges in creation order.
    pub edges: Vec<LocalEdge>,
}

struct Unnester<'a> {
    root_name: &'a str,
    property_type: &'a str,
    out: Unnested,
}

impl<'a> Unnester<'a> {
    fn name_of(&self, slot: Slot) -> &str {
        match slot {
            Slot::Root => self.root_name,
            Slot::Local(index) => &self.out.nodes[index].name,
        }
    }

    fn spawn(&mut self, parent: Slot, key: &str) -> usize {
        let name = format!("{}_{}", self.name_of(parent), key);
        self.out.nodes.push(Node::property(name, self.property_type));
        let index = self.out.nodes.len() - 1;
        self.out.edges.push(LocalEdge {
            source: parent,
            target: index,
            label: key.to_string(),
        });
        index
    }

    fn expand_structured(&mut self, parent: Slot, key: &str, value: &JsonValue) {
        match value {
            JsonValue::Object(map) => {
                let child = self.spawn(parent, key);
                self.expand_map(child, map);
            }
            JsonValue::Array(items) => {
                let child = self.spawn(parent, key);
                self.expand_sequence(child, items);
            }
            _ => {}
        }
    }

    fn expand_map(&mut self, node: usize, map: &Map<String, JsonValue>) {
        for (key, value) in map {
            if is_structured(value) {
                self.expand_structured(Slot::Local(node), key, value);
            } else if let Some(scalar) = Scalar::from_json(value) {
                self.out.nodes[node].properties.insert(key.as_str(), scalar);
            }
        }
    }

    fn expand_sequence(&mut self, node: usize, items: &[JsonValue]) {
        for item in items {
            match item {
                JsonValue::Object(map) => self.expand_sequence_element(node, map),
                JsonValue::Array(inner) => self.expand_sequence(node, inner),
                other => {
                    if let Some(scalar) = Scalar::from_json(other) {
                        self.out.nodes[node].properties.push_positional(scalar);
                    }
                }
            }
        }
    }

    fn expand_sequence_element(&mut self, node: usize, map: &Map<String, JsonValue>) {
        for (key, value) in map {
            if is_structured(value) {
                self.expand_structured(Slot::Local(node), key, value);
            } else if Scalar::from_json(value).is_some() {
                let element = self.spawn(Slot::Local(node), key);
                self.expand_map(element, map);
                return;
            }
        }
    }
}

/// Unnest the attributes of the node named `name`.
///
/// # Examples
///
/// ```
/// # use fhirgraph_core::unnest_attributes;
/// # use serde_json::json;
/// let attrs = json!({"resourceType": "Patient", "name": [{"family": "Bode"}]});
/// let result = unnest_attributes("patient", attrs.as_object().unwrap(), "Property");
///
/// assert_eq!(result.scalars.len(), 1);
/// let names: Vec<&str> = result.nodes.iter().map(|n| n.name.as_str()).collect();
/// assert_eq!(names, vec!["patient_name", "patient_name_family"]);
/// ```
pub fn unnest_attributes(
    name: &str,
    attributes: &Map<String, JsonValue>,
    property_type: &str,
) -> Unnested {
    let mut unnester = Unnester {
        root_name: name,
        property_type,
        out: Unnested::default(),
    };

    for (key, value) in attributes {
        if let Some(scalar) = Scalar::from_json(value) {
            unnester.out.scalars.insert(key.as_str(), scalar);
        }
    }
    for (key, value) in attributes {
        if is_structured(value) {
            unnester.expand_structured(Slot::Root, key, value);
        }
    }

    unnester.out
}

impl Graph {
    /// Expand every entity's nested attributes into property nodes.
    ///
    /// Entities are processed in insertion order. Each entity enters the
    /// serialization order followed by its property nodes, and every node
    /// receives its rendered id `{graph_id}_{ordinal}`.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::AlreadyUnnested` on a second call.
    pub fn unnest(&mut self) -> Result<()> {
        if self.is_unnested() {
            return Err(GraphError::AlreadyUnnested(self.graph_id().to_string()));
        }

        let entities: Vec<NodeId> = self.entity_ids().to_vec();
        for entity in entities {
            let attributes = std::mem::take(&mut self.node_mut(entity).attributes);
            let unnested =
                unnest_attributes(&self.node(entity).name, &attributes, self.property_type());
            self.merge_unnested(entity, unnested);
        }

        self.mark_unnested();
        tracing::debug!(
            graph_id = self.graph_id(),
            nodes = self.node_count(),
            edges = self.edge_count(),
            "unnested graph"
        );
        Ok(())
    }

    fn merge_unnested(&mut self, entity: NodeId, unnested: Unnested) {
        let Unnested {
            scalars,
            nodes,
            edges,
        } = unnested;

        self.node_mut(entity).properties = scalars;
        self.enter_universe(entity);

        let mut ids = Vec::with_capacity(nodes.len());
        for node in nodes {
            let id = self.add_node(node);
            self.enter_universe(id);
            ids.push(id);
        }

        for edge in edges {
            let source = match edge.source {
                Slot::Root => entity,
                Slot::Local(index) => ids[index],
            };
            self.add_edge(
                source,
                ids[edge.target],
                EdgeLabel::Named(edge.label),
                EdgeKind::Containment,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unnest(value: JsonValue) -> Unnested {
        unnest_attributes("patient", value.as_object().unwrap(), "Property")
    }

    fn node_names(result: &Unnested) -> Vec<&str> {
        result.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_scalars_stay_on_root() {
        let result = unnest(json!({"resourceType": "Patient", "active": true, "n": 3}));
        assert_eq!(result.scalars.len(), 3);
        assert!(result.nodes.is_empty());
        assert!(result.edges.is_empty());
    }

    #[test]
    fn test_object_becomes_property_node() {
        let result = unnest(json!({"maritalStatus": {"text": "Married"}}));
        assert_eq!(node_names(&result), vec!["patient_maritalStatus"]);
        assert_eq!(
            result.nodes[0].properties.get("text"),
            Some(&Scalar::from("Married"))
        );
        assert_eq!(
            result.edges,
            vec![LocalEdge {
                source: Slot::Root,
                target: 0,
                label: "maritalStatus".to_string()
            }]
        );
    }

    #[test]
    fn test_sequence_of_scalars_positional() {
        let result = unnest(json!({"family": ["Bode", "Jackie"]}));
        assert_eq!(node_names(&result), vec!["patient_family"]);
        let props = &result.nodes[0].properties;
        assert_eq!(props.get("property1"), Some(&Scalar::from("Bode")));
        assert_eq!(props.get("property2"), Some(&Scalar::from("Jackie")));
    }

    #[test]
    fn test_sequence_of_objects_distinct_nodes() {
        let result = unnest(json!({"telecom": [
            {"system": "phone", "value": "555"},
            {"system": "email", "value": "a@b"}
        ]}));
        assert_eq!(
            node_names(&result),
            vec!["patient_telecom", "patient_telecom_system", "patient_telecom_system"]
        );
        assert_eq!(result.nodes[1].properties.get("value"), Some(&Scalar::from("555")));
        assert_eq!(result.nodes[2].properties.get("value"), Some(&Scalar::from("a@b")));
        assert!(result.nodes[0].properties.is_empty());
        let labels: Vec<&str> = result.edges.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["telecom", "system", "system"]);
    }

    #[test]
    fn test_sequence_element_structures_nest_under_element() {
        let result = unnest(json!({"name": [
            {"use": "official", "family": "Bode", "given": ["Jackie"]}
        ]}));
        assert_eq!(
            node_names(&result),
            vec!["patient_name", "patient_name_use", "patient_name_use_given"]
        );
        assert_eq!(result.nodes[1].properties.len(), 2);
        assert_eq!(
            result.nodes[2].properties.get("property1"),
            Some(&Scalar::from("Jackie"))
        );
        assert_eq!(result.edges[2].source, Slot::Local(1));
    }

    #[test]
    fn test_sequence_element_leading_structure() {
        let result = unnest(json!({"identifier": [
            {"type": {"text": "MR"}, "system": "s", "value": "v"}
        ]}));
        assert_eq!(
            node_names(&result),
            vec![
                "patient_identifier",
                "patient_identifier_type",
                "patient_identifier_system",
                "patient_identifier_system_type",
            ]
        );
        assert_eq!(result.edges[1].source, Slot::Local(0));
        assert_eq!(result.edges[2].source, Slot::Local(0));
        assert_eq!(result.edges[3].source, Slot::Local(2));
        assert_eq!(result.nodes[2].properties.len(), 2);
    }

    #[test]
    fn test_sequence_element_without_scalars() {
        let result = unnest(json!({"coding": [{"extension": {"url": "x"}}]}));
        assert_eq!(
            node_names(&result),
            vec!["patient_coding", "patient_coding_extension"]
        );
        assert_eq!(result.edges[1].source, Slot::Local(0));
    }

    #[test]
    fn test_nested_sequence_flattened() {
        let result = unnest(json!({"matrix": [[1, 2], [3]]}));
        assert_eq!(node_names(&result), vec!["patient_matrix"]);
        assert_eq!(result.nodes[0].properties.len(), 3);
    }

    #[test]
    fn test_nulls_ignored() {
        let result = unnest(json!({"a": null, "b": {"c": null}, "d": [null, "x"]}));
        assert!(result.scalars.is_empty());
        assert!(result.nodes[0].properties.is_empty());
        assert_eq!(
            result.nodes[1].properties.get("property1"),
            Some(&Scalar::from("x"))
        );
    }

    #[test]
    fn test_deep_object_chain() {
        let result = unnest(json!({"a": {"b": {"c": {"d": 1}}}}));
        assert_eq!(
            node_names(&result),
            vec!["patient_a", "patient_a_b", "patient_a_b_c"]
        );
        assert!(result.nodes.iter().all(Node::is_property_node));
    }

    #[test]
    fn test_graph_unnest_twice_fails() {
        let mut graph = Graph::new("g");
        graph.unnest().unwrap();
        assert!(matches!(graph.unnest(), Err(GraphError::AlreadyUnnested(_))));
    }

    #[test]
    fn test_graph_unnest_orders_universe() {
        let mut graph = Graph::new("g");
        let attrs = json!({"resourceType": "Patient", "name": {"family": "Bode"}});
        graph.add_entity(Node::entity(
            "patient",
            "Patient",
            "urn:uuid:p",
            attrs.as_object().unwrap().clone(),
        ));
        let other = json!({"resourceType": "Condition"});
        graph.add_entity(Node::entity(
            "condition",
            "Condition",
            "urn:uuid:c",
            other.as_object().unwrap().clone(),
        ));
        graph.unnest().unwrap();

        let order: Vec<(&str, &str)> = graph
            .nodes()
            .map(|(_, n)| (n.name.as_str(), n.uid.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("patient", "g_1"),
                ("patient_name", "g_2"),
                ("condition", "g_3")
            ]
        );
        assert!(graph.is_flat());
        assert_eq!(graph.edges()[0].kind, EdgeKind::Containment);
    }
}
