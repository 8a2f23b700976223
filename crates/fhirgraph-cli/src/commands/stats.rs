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


//! Stats command - graph and statement counts

use super::{load_rules, read_file};
use colored::Colorize;
use fhirgraph_core::{graph_from_str, BuildOptions, EdgeKind, Graph};
use fhirgraph_neo4j::{graph_to_script, StatementType, ToCypherConfig};
use serde_json::json;

/// Counts collected from one unnested graph and its script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Entity count per type, in first-appearance order.
    pub entities_by_type: Vec<(String, usize)>,
    /// Synthetic property nodes.
    pub property_nodes: usize,
    /// Edges between entities.
    pub reference_edges: usize,
    /// Edges into property nodes.
    pub containment_edges: usize,
    /// Reference edges no rule matched.
    pub undefined_edges: usize,
    /// `CREATE` node statements.
    pub node_statements: usize,
    /// Relationship statements.
    pub relationship_statements: usize,
}

impl GraphStats {
    /// Count the nodes and edges of a graph.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut stats = Self::default();

        for (_, node) in graph.entities() {
            match stats
                .entities_by_type
                .iter_mut()
                .find(|(t, _)| *t == node.node_type)
            {
                Some((_, n)) => *n += 1,
                None => stats.entities_by_type.push((node.node_type.clone(), 1)),
            }
        }
        stats.property_nodes = graph.node_count() - graph.entity_count();

        for edge in graph.edges() {
            match edge.kind {
                EdgeKind::Reference => {
                    stats.reference_edges += 1;
                    if edge.label.is_undefined() {
                        stats.undefined_edges += 1;
                    }
                }
                EdgeKind::Containment => stats.containment_edges += 1,
            }
        }

        stats
    }

    /// Total entity count.
    pub fn entities(&self) -> usize {
        self.entities_by_type.iter().map(|(_, n)| n).sum()
    }

    fn to_json(&self) -> serde_json::Value {
        let by_type: serde_json::Map<String, serde_json::Value> = self
            .entities_by_type
            .iter()
            .map(|(t, n)| (t.clone(), json!(n)))
            .collect();
        json!({
            "entities": self.entities(),
            "entities_by_type": by_type,
            "property_nodes": self.property_nodes,
            "reference_edges": self.reference_edges,
            "containment_edges": self.containment_edges,
            "undefined_edges": self.undefined_edges,
            "node_statements": self.node_statements,
            "relationship_statements": self.relationship_statements,
        })
    }
}

/// Print node, edge and statement counts for a bundle.
///
/// # Examples
///
/// ```no_run
/// use fhirgraph_cli::commands::stats;
///
/// # fn main() -> Result<(), String> {
/// stats("bundle.json", Some("rules.txt"), false)?;
/// # Ok(())
/// # }
/// ```
pub fn stats(file: &str, rules: Option<&str>, as_json: bool) -> Result<(), String> {
    let rules = load_rules(rules)?;
    let content = read_file(file)?;

    let graph = graph_from_str(&content, &rules, &BuildOptions::default())
        .map_err(|e| e.to_string())?;
    let script = graph_to_script(&graph, &ToCypherConfig::default()).map_err(|e| e.to_string())?;

    let mut stats = GraphStats::from_graph(&graph);
    stats.node_statements = script.statements_of_type(StatementType::CreateNode).len();
    stats.relationship_statements = script
        .statements_of_type(StatementType::CreateRelationship)
        .len();

    if as_json {
        let text = serde_json::to_string_pretty(&stats.to_json())
            .map_err(|e| format!("JSON serialization error: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    println!("{}", "Graph Statistics".bold().underline());
    println!();
    println!("{}  {}", "File:".cyan(), file);
    println!("{}  {}", "Entities:".cyan(), stats.entities());
    for (node_type, count) in &stats.entities_by_type {
        println!("    {:<20} {}", node_type.yellow(), count);
    }
    println!("{}  {}", "Property nodes:".cyan(), stats.property_nodes);
    println!("{}  {}", "Reference edges:".cyan(), stats.reference_edges);
    if stats.undefined_edges > 0 {
        println!(
            "    {:<20} {}",
            "UNDEFINED".red(),
            stats.undefined_edges
        );
    }
    println!("{}  {}", "Containment edges:".cyan(), stats.containment_edges);
    println!(
        "{}  {} node, {} relationship",
        "Statements:".cyan(),
        stats.node_statements,
        stats.relationship_statements
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhirgraph_core::{build_graph, RuleTable};
    use fhirgraph_test::fixtures;

    #[test]
    fn test_counts_for_sample_bundle() {
        let rules = RuleTable::parse(fixtures::SAMPLE_RULES);
        let graph = build_graph(&fixtures::sample_bundle(), &rules).unwrap();
        let stats = GraphStats::from_graph(&graph);

        assert_eq!(stats.entities(), 9);
        assert_eq!(stats.entities_by_type[0], ("Patient".to_string(), 1));
        assert_eq!(stats.property_nodes, 0);
        assert_eq!(stats.reference_edges, graph.edge_count());
        assert_eq!(stats.containment_edges, 0);
    }

    #[test]
    fn test_undefined_edges_counted() {
        let graph = build_graph(&fixtures::single_reference(), &RuleTable::new()).unwrap();
        let stats = GraphStats::from_graph(&graph);
        assert_eq!(stats.reference_edges, 1);
        assert_eq!(stats.undefined_edges, 1);
    }

    #[test]
    fn test_json_shape() {
        let graph = build_graph(&fixtures::single_reference(), &RuleTable::new()).unwrap();
        let value = GraphStats::from_graph(&graph).to_json();
        assert_eq!(value["entities"], 2);
        assert!(value["entities_by_type"].is_object());
    }
}
