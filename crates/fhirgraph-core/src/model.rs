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

//! In-memory property graph: an arena of nodes addressed by [`NodeId`],
//! a deduplicated edge set and a separate adjacency index.
//!
//! A [`Graph`] is populated in two passes. The builder adds primary entity
//! nodes and reference edges; unnesting then expands each entity's nested
//! attributes into property nodes and containment edges, and assigns every
//! node its rendered id in serialization order.

use crate::value::Properties;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::{HashMap, HashSet};

/// Node type assigned to synthetic property nodes.
pub const PROPERTY_NODE_TYPE: &str = "Property";

/// Index of a node in its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    /// The arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a node came from a document entry or from unnesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    /// Primary node created from one bundle entry.
    Entity,
    /// Synthetic node holding a decomposed nested attribute group.
    Property,
}

/// A node in the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Human-readable name (`patient`, `observation2`, `patient_name_use`).
    pub name: String,
    /// Entity category (`Patient`, `Condition`, `Property`).
    pub node_type: String,
    /// Entity or property node.
    pub kind: NodeKind,
    /// The entry's `fullUrl`; empty for property nodes.
    pub full_url: String,
    /// Scalar properties.
    pub properties: Properties,
    /// Raw nested attributes still waiting to be unnested.
    #[serde(skip)]
    pub attributes: Map<String, JsonValue>,
    /// Graph-unique rendered id, assigned when the node is unnested.
    pub uid: String,
}

impl Node {
    /// Create a primary entity node from a resource object.
    pub fn entity(
        name: impl Into<String>,
        node_type: impl Into<String>,
        full_url: impl Into<String>,
        attributes: Map<String, JsonValue>,
    ) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            kind: NodeKind::Entity,
            full_url: full_url.into(),
            properties: Properties::new(),
            attributes,
            uid: String::new(),
        }
    }

    /// Create an empty property node.
    pub fn property(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            kind: NodeKind::Property,
            full_url: String::new(),
            properties: Properties::new(),
            attributes: Map::new(),
            uid: String::new(),
        }
    }

    /// Returns true for synthetic property nodes.
    pub fn is_property_node(&self) -> bool {
        self.kind == NodeKind::Property
    }

    /// Returns true once no nested attributes remain on the node.
    pub fn is_flat(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Relationship label of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum EdgeLabel {
    /// No rule matched the endpoint types.
    Undefined,
    /// A rule-table label or the attribute name of a containment edge.
    Named(String),
}

impl EdgeLabel {
    /// The label name, if one is set.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Undefined => None,
            Self::Named(name) => Some(name),
        }
    }

    /// The label name, or `fallback` when undefined.
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.as_str().unwrap_or(fallback)
    }

    /// Returns true if no rule matched.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

/// How an edge was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeKind {
    /// Cross-entity pointer found in the document.
    Reference,
    /// Link from a node to a property node expanded from one of its attributes.
    Containment,
}

/// A directed, labelled edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    /// Source node.
    pub source: NodeId,
    /// Target node.
    pub target: NodeId,
    /// Relationship label.
    pub label: EdgeLabel,
    /// Reference or containment.
    pub kind: EdgeKind,
}

/// Parent/child lists per node, recorded as edges are inserted.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    children: Vec<Vec<NodeId>>,
    parents: Vec<Vec<NodeId>>,
}

impl Adjacency {
    fn grow(&mut self) {
        self.children.push(Vec::new());
        self.parents.push(Vec::new());
    }

    fn link(&mut self, source: NodeId, target: NodeId) {
        self.children[source.0].push(target);
        self.parents[target.0].push(source);
    }

    /// Targets of edges leaving `id`, in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sources of edges entering `id`, in insertion order.
    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        self.parents.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A property graph built from one bundle.
#[derive(Debug, Clone)]
pub struct Graph {
    graph_id: String,
    property_type: String,
    nodes: Vec<Node>,
    entities: Vec<NodeId>,
    universe: Vec<NodeId>,
    edges: Vec<Edge>,
    edge_keys: HashSet<(NodeId, NodeId, EdgeLabel)>,
    external_ids: HashMap<String, NodeId>,
    adjacency: Adjacency,
    unnested: bool,
}

impl Graph {
    /// Create an empty graph.
    pub fn new(graph_id: impl Into<String>) -> Self {
        Self {
            graph_id: graph_id.into(),
            property_type: PROPERTY_NODE_TYPE.to_string(),
            nodes: Vec::new(),
            entities: Vec::new(),
            universe: Vec::new(),
            edges: Vec::new(),
            edge_keys: HashSet::new(),
            external_ids: HashMap::new(),
            adjacency: Adjacency::default(),
            unnested: false,
        }
    }

    /// Set the node type given to property nodes created by unnesting.
    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = property_type.into();
        self
    }

    /// The graph id, derived from the first entry's `fullUrl`.
    pub fn graph_id(&self) -> &str {
        &self.graph_id
    }

    /// The node type of property nodes.
    pub fn property_type(&self) -> &str {
        &self.property_type
    }

    /// Add a primary entity node and index it by its `fullUrl`.
    ///
    /// A later entity with the same `fullUrl` replaces the earlier one in the index.
    pub fn add_entity(&mut self, node: Node) -> NodeId {
        let full_url = node.full_url.clone();
        let id = self.add_node(node);
        self.entities.push(id);
        if !full_url.is_empty() {
            self.external_ids.insert(full_url, id);
        }
        id
    }

    pub(crate) fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        tracing::trace!(node = %node.name, node_type = %node.node_type, "adding node");
        self.nodes.push(node);
        self.adjacency.grow();
        id
    }

    /// Append a node to the serialization order and assign its rendered id.
    pub(crate) fn enter_universe(&mut self, id: NodeId) {
        let uid = format!("{}_{}", self.graph_id, self.universe.len() + 1);
        self.nodes[id.0].uid = uid;
        self.universe.push(id);
    }

    /// Insert an edge unless the same (source, target, label) triple exists.
    ///
    /// Returns true if the edge was new.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        label: EdgeLabel,
        kind: EdgeKind,
    ) -> bool {
        if !self.edge_keys.insert((source, target, label.clone())) {
            return false;
        }
        self.adjacency.link(source, target);
        self.edges.push(Edge {
            source,
            target,
            label,
            kind,
        });
        true
    }

    /// Get a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Resolve a `fullUrl` to the entity node it identifies.
    pub fn find_by_external_id(&self, full_url: &str) -> Option<NodeId> {
        self.external_ids.get(full_url).copied()
    }

    /// Find a node by name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Primary entity ids in insertion order.
    pub fn entity_ids(&self) -> &[NodeId] {
        &self.entities
    }

    /// Primary entity nodes in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.entities.iter().map(|&id| (id, &self.nodes[id.0]))
    }

    /// All nodes in serialization order.
    ///
    /// Empty until the graph has been unnested.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.universe.iter().map(|&id| (id, &self.nodes[id.0]))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The adjacency index.
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Targets of edges leaving `id`.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.children(id)
    }

    /// Sources of edges entering `id`.
    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.parents(id)
    }

    /// Number of primary entity nodes.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of nodes in the arena, entities and property nodes alike.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true once [`Graph::unnest`] has run.
    pub fn is_unnested(&self) -> bool {
        self.unnested
    }

    pub(crate) fn mark_unnested(&mut self) {
        self.unnested = true;
    }

    /// Returns true if no node holds nested attributes.
    pub fn is_flat(&self) -> bool {
        self.nodes.iter().all(Node::is_flat)
    }
}
