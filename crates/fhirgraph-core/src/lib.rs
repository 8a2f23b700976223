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

//! Typed property graph model for FHIR-style bundles.
//!
//! This crate turns one parsed bundle document into an in-memory property
//! graph in two passes:
//!
//! 1. [`GraphBuilder`] creates one entity node per `entry`, indexes entities
//!    by `fullUrl` and links every resolvable reference with an edge whose
//!    label comes from a [`RuleTable`].
//! 2. [`Graph::unnest`] decomposes each entity's nested attributes into
//!    property nodes joined by containment edges, leaving only scalar
//!    properties on every node.
//!
//! # Example
//!
//! ```
//! use fhirgraph_core::{build_graph, RuleTable};
//! use serde_json::json;
//!
//! # fn main() -> fhirgraph_core::Result<()> {
//! let doc = json!({"entry": [
//!     {"fullUrl": "urn:uuid:g-1", "resource": {"resourceType": "Patient"}},
//!     {"fullUrl": "urn:uuid:g-2", "resource": {
//!         "resourceType": "Condition",
//!         "subject": {"reference": "urn:uuid:g-1"}
//!     }}
//! ]});
//!
//! let rules = RuleTable::parse("Condition subject Patient");
//! let mut graph = build_graph(&doc, &rules)?;
//! graph.unnest()?;
//!
//! assert_eq!(graph.graph_id(), "g_1");
//! assert_eq!(graph.entity_count(), 2);
//! assert!(graph.is_flat());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

mod builder;
mod error;
mod model;
pub mod reference;
mod rules;
mod unnest;
mod value;

pub use builder::{
    build_graph, derive_graph_id, BuildOptions, GraphBuilder, DEFAULT_ID_PREFIX,
    DEFAULT_REFERENCE_KEY,
};
pub use error::{GraphError, Result};
pub use model::{
    Adjacency, Edge, EdgeKind, EdgeLabel, Graph, Node, NodeId, NodeKind, PROPERTY_NODE_TYPE,
};
pub use reference::{find_references, find_references_in};
pub use rules::RuleTable;
pub use unnest::{unnest_attributes, LocalEdge, Slot, Unnested};
pub use value::{is_structured, Properties, Scalar};

/// Parse a JSON bundle from text.
pub fn parse_document(input: &str) -> Result<serde_json::Value> {
    Ok(serde_json::from_str(input)?)
}

/// Parse, build and unnest one bundle in a single call.
pub fn graph_from_str(input: &str, rules: &RuleTable, options: &BuildOptions) -> Result<Graph> {
    let doc = parse_document(input)?;
    let mut graph = GraphBuilder::new(rules)
        .with_options(options.clone())
        .build(&doc)?;
    graph.unnest()?;
    Ok(graph)
}
