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


//! Inspect command - graph structure visualization

use super::{load_rules, read_file};
use colored::Colorize;
use fhirgraph_core::{graph_from_str, BuildOptions, Edge, EdgeKind, Graph, Node, NodeId};
use std::collections::HashMap;

/// Inspect and visualize the graph built from a bundle.
///
/// Prints every entity grouped in build order with its tree of property
/// nodes, followed by the reference edges. In verbose mode scalar
/// properties and each node's parents are shown as well.
///
/// # Examples
///
/// ```no_run
/// use fhirgraph_cli::commands::inspect;
///
/// # fn main() -> Result<(), String> {
/// inspect("bundle.json", None, true)?;
/// # Ok(())
/// # }
/// ```
pub fn inspect(file: &str, rules: Option<&str>, verbose: bool) -> Result<(), String> {
    let rules = load_rules(rules)?;
    let content = read_file(file)?;

    let graph = graph_from_str(&content, &rules, &BuildOptions::default())
        .map_err(|e| e.to_string())?;

    println!("{}", "Graph".bold().underline());
    println!();
    println!("{}  {}", "File:".cyan(), file);
    println!("{}  {}", "Graph id:".cyan(), graph.graph_id());
    println!(
        "{}  {} ({} entities), {} edges",
        "Nodes:".cyan(),
        graph.node_count(),
        graph.entity_count(),
        graph.edge_count()
    );

    let mut outgoing: HashMap<NodeId, Vec<&Edge>> = HashMap::new();
    for edge in graph.edges() {
        outgoing.entry(edge.source).or_default().push(edge);
    }

    println!();
    println!("{}", "Entities:".cyan());
    for (id, node) in graph.entities() {
        println!(
            "  {} {} {}",
            node.name.green(),
            format!(":{}", node.node_type).yellow(),
            node.uid.dimmed()
        );
        print_node_details(&graph, id, node, 4, verbose);
        print_children(&graph, &outgoing, id, 4, verbose);
    }

    let references: Vec<&Edge> = graph
        .edges()
        .iter()
        .filter(|e| e.kind == EdgeKind::Reference)
        .collect();
    if !references.is_empty() {
        println!();
        println!("{}", "References:".cyan());
        for edge in references {
            let label = match edge.label.as_str() {
                Some(name) => name.magenta(),
                None => "UNDEFINED".red(),
            };
            println!(
                "  {} -[{}]-> {}",
                graph.node(edge.source).name,
                label,
                graph.node(edge.target).name
            );
        }
    }

    Ok(())
}

fn print_children(
    graph: &Graph,
    outgoing: &HashMap<NodeId, Vec<&Edge>>,
    id: NodeId,
    indent: usize,
    verbose: bool,
) {
    let Some(edges) = outgoing.get(&id) else {
        return;
    };

    for edge in edges.iter().filter(|e| e.kind == EdgeKind::Containment) {
        let child = graph.node(edge.target);
        println!(
            "{}{} {} {}",
            " ".repeat(indent),
            "└─".dimmed(),
            child.name,
            format!("[{}]", edge.label.name_or("")).magenta()
        );
        print_node_details(graph, edge.target, child, indent + 3, verbose);
        print_children(graph, outgoing, edge.target, indent + 3, verbose);
    }
}

fn print_node_details(graph: &Graph, id: NodeId, node: &Node, indent: usize, verbose: bool) {
    if !verbose {
        return;
    }

    let pad = " ".repeat(indent);
    for (key, value) in node.properties.iter() {
        println!("{}{} = {}", pad, key.cyan(), value);
    }

    let parents: Vec<&str> = graph
        .parents(id)
        .iter()
        .map(|p| graph.node(*p).name.as_str())
        .collect();
    if !parents.is_empty() {
        println!("{}{} {}", pad, "parents:".dimmed(), parents.join(", "));
    }
}
