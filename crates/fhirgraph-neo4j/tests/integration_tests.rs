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

//! Integration tests against a real Neo4j instance.
//!
//! These tests require a running Neo4j instance at localhost:7687.
//! Run with: cargo test -p fhirgraph-neo4j --features integration-tests --test integration_tests

#![cfg(feature = "integration-tests")]

use fhirgraph_core::{build_graph, RuleTable};
use fhirgraph_neo4j::{graph_to_script, CypherScript, ToCypherConfig};
use fhirgraph_test::fixtures;
use neo4rs::{ConfigBuilder, Graph, Query};
use serial_test::serial;
use std::sync::Arc;

async fn connect() -> Arc<Graph> {
    let uri = std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string());
    let user = std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());
    let password = std::env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "".to_string());

    let config = ConfigBuilder::default()
        .uri(&uri)
        .user(&user)
        .password(&password)
        .build()
        .expect("Failed to build config");

    Arc::new(Graph::connect(config).expect("Failed to connect to Neo4j"))
}

async fn cleanup(graph: &Graph) {
    graph
        .run(Query::new("MATCH (n) DETACH DELETE n".to_string()))
        .await
        .expect("Failed to cleanup");
}

async fn execute_script(graph: &Graph, script: &CypherScript) {
    for stmt in script {
        graph
            .run(Query::new(stmt.query.clone()))
            .await
            .unwrap_or_else(|_| panic!("Failed to execute: {}", stmt.query));
    }
}

async fn count(graph: &Graph, query: &str) -> i64 {
    let mut result = graph
        .execute(Query::new(query.to_string()))
        .await
        .expect("Failed to query");
    let row = result
        .next()
        .await
        .expect("Failed to get row")
        .expect("No row");
    row.get("count").expect("No count")
}

fn sample_script() -> (CypherScript, usize, usize) {
    let mut graph = build_graph(
        &fixtures::sample_bundle(),
        &RuleTable::parse(fixtures::SAMPLE_RULES),
    )
    .expect("Failed to build graph");
    graph.unnest().expect("Failed to unnest");
    let script = graph_to_script(&graph, &ToCypherConfig::default()).expect("Failed to render");
    (script, graph.node_count(), graph.edge_count())
}

#[tokio::test]
#[serial]
async fn test_sample_bundle_uploads() {
    let graph = connect().await;
    cleanup(&graph).await;

    let (script, nodes, edges) = sample_script();
    execute_script(&graph, &script).await;

    assert_eq!(
        count(&graph, "MATCH (n) RETURN count(n) as count").await,
        nodes as i64
    );
    assert_eq!(
        count(&graph, "MATCH ()-[r]->() RETURN count(r) as count").await,
        edges as i64
    );
    assert_eq!(
        count(&graph, "MATCH (o:Observation) RETURN count(o) as count").await,
        3
    );

    cleanup(&graph).await;
}

#[tokio::test]
#[serial]
async fn test_escaped_name_roundtrips() {
    let graph = connect().await;
    cleanup(&graph).await;

    let (script, _, _) = sample_script();
    execute_script(&graph, &script).await;

    assert_eq!(
        count(
            &graph,
            "MATCH (p:Property {family: \"O'Brien\"}) RETURN count(p) as count"
        )
        .await,
        1
    );

    cleanup(&graph).await;
}

#[tokio::test]
#[serial]
async fn test_reference_relationships() {
    let graph = connect().await;
    cleanup(&graph).await;

    let (script, _, _) = sample_script();
    execute_script(&graph, &script).await;

    assert_eq!(
        count(
            &graph,
            "MATCH (:Observation)-[r:hasSubject]->(:Patient) RETURN count(r) as count"
        )
        .await,
        3
    );
    assert_eq!(
        count(&graph, "MATCH ()-[r:UNDEFINED]->() RETURN count(r) as count").await,
        1
    );

    cleanup(&graph).await;
}
