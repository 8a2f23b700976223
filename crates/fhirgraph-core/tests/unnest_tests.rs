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

//! Property unnesting tests.

use fhirgraph_core::{
    build_graph, unnest_attributes, EdgeKind, Graph, GraphError, RuleTable, Scalar, Slot,
};
use fhirgraph_test::fixtures;
use serde_json::{json, Value};

fn unnested(doc: &Value) -> Graph {
    let mut graph = build_graph(doc, &RuleTable::parse(fixtures::SAMPLE_RULES)).unwrap();
    graph.unnest().unwrap();
    graph
}

fn node_names(graph: &Graph) -> Vec<&str> {
    graph.nodes().map(|(_, n)| n.name.as_str()).collect()
}

fn prop<'a>(graph: &'a Graph, name: &str, key: &str) -> Option<&'a Scalar> {
    let id = graph.find_by_name(name)?;
    graph.node(id).properties.get(key)
}

// ============================================================================
// Serialization order and ids
// ============================================================================

#[test]
fn test_single_reference_universe() {
    let graph = unnested(&fixtures::single_reference());

    assert_eq!(
        node_names(&graph),
        vec!["patient", "condition", "condition_subject"]
    );
    let uids: Vec<&str> = graph.nodes().map(|(_, n)| n.uid.as_str()).collect();
    assert_eq!(uids, vec!["g_1_1", "g_1_2", "g_1_3"]);

    assert_eq!(graph.edge_count(), 2);
    let containment = &graph.edges()[1];
    assert_eq!(containment.kind, EdgeKind::Containment);
    assert_eq!(containment.label.as_str(), Some("subject"));
    assert_eq!(
        prop(&graph, "condition_subject", "reference"),
        Some(&Scalar::from("urn:uuid:g-1"))
    );
}

#[test]
fn test_patient_names_expand_per_element() {
    let graph = unnested(&fixtures::patient_with_names());

    assert_eq!(
        node_names(&graph),
        vec![
            "patient",
            "patient_name",
            "patient_name_use",
            "patient_name_use_family",
            "patient_name_use",
            "patient_name_use_given",
        ]
    );

    let nodes: Vec<_> = graph.nodes().map(|(_, n)| n).collect();
    assert_eq!(nodes[2].properties.get("use"), Some(&Scalar::from("official")));
    assert_eq!(nodes[4].properties.get("use"), Some(&Scalar::from("nickname")));
    assert_eq!(nodes[5].properties.get("property1"), Some(&Scalar::from("Jax")));
}

#[test]
fn test_sequence_of_scalars_stays_on_one_node() {
    let graph = unnested(&fixtures::patient_with_names());
    let family = graph.find_by_name("patient_name_use_family").unwrap();
    let props: Vec<(&str, &Scalar)> = graph.node(family).properties.iter().collect();

    assert_eq!(
        props,
        vec![
            ("property1", &Scalar::from("Bode")),
            ("property2", &Scalar::from("Jackie")),
        ]
    );
    assert!(graph.children(family).is_empty());
}

#[test]
fn test_entity_keeps_only_scalars() {
    let graph = unnested(&fixtures::patient_with_names());
    let patient = graph.find_by_name("patient").unwrap();
    let keys: Vec<&str> = graph.node(patient).properties.iter().map(|(k, _)| k).collect();

    assert_eq!(keys, vec!["resourceType", "id"]);
}

#[test]
fn test_sample_bundle_is_flat() {
    let graph = unnested(&fixtures::sample_bundle());

    assert!(graph.is_unnested());
    assert!(graph.is_flat());
    assert_eq!(graph.nodes().count(), graph.node_count());
    assert_eq!(
        graph.nodes().filter(|(_, n)| !n.is_property_node()).count(),
        9
    );
}

#[test]
fn test_object_without_scalars_in_sequence() {
    let graph = unnested(&fixtures::sample_bundle());

    let coding = graph
        .find_by_name("patient_communication_language_coding_system")
        .unwrap();
    assert_eq!(
        graph.node(coding).properties.get("code"),
        Some(&Scalar::from("en-US"))
    );
    let parent = graph.parents(coding)[0];
    assert_eq!(
        graph.node(parent).name,
        "patient_communication_language_coding"
    );
}

#[test]
fn test_nested_extension_lists() {
    let graph = unnested(&fixtures::sample_bundle());

    let line = graph.find_by_name("patient_address_city_line").unwrap();
    assert_eq!(
        graph.node(line).properties.get("property1"),
        Some(&Scalar::from("165 Shanahan View"))
    );

    let latitude = graph
        .nodes()
        .find(|(_, n)| n.properties.get("url") == Some(&Scalar::from("latitude")))
        .map(|(_, n)| n)
        .unwrap();
    assert_eq!(latitude.name, "patient_address_city_extension_url_extension_url");
    assert_eq!(latitude.properties.get("valueDecimal").unwrap().to_string(), "42.1");
}

#[test]
fn test_leading_structure_expands_before_element_node() {
    let graph = unnested(&fixtures::sample_bundle());

    let names = node_names(&graph);
    let address = names.iter().position(|n| *n == "patient_address").unwrap();
    assert_eq!(
        &names[address..address + 4],
        &[
            "patient_address",
            "patient_address_line",
            "patient_address_city",
            "patient_address_city_line",
        ]
    );

    let line = graph.find_by_name("patient_address_line").unwrap();
    let parent = graph.parents(line)[0];
    assert_eq!(graph.node(parent).name, "patient_address");
    assert_eq!(
        graph.node(line).properties.get("property1"),
        Some(&Scalar::from("165 Shanahan View"))
    );

    let city = graph.find_by_name("patient_address_city").unwrap();
    assert_eq!(
        graph.node(city).properties.get("postalCode"),
        Some(&Scalar::from("01104"))
    );
}

#[test]
fn test_identifier_type_before_system() {
    let attrs = json!({"identifier": [
        {"type": {"text": "MR"}, "system": "urn:oid:1", "value": "12345"}
    ]});
    let result = unnest_attributes("patient", attrs.as_object().unwrap(), "Property");

    let names: Vec<&str> = result.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "patient_identifier",
            "patient_identifier_type",
            "patient_identifier_system",
            "patient_identifier_system_type",
        ]
    );
    assert_eq!(result.nodes[1].properties.get("text"), Some(&Scalar::from("MR")));
    assert_eq!(result.nodes[3].properties.get("text"), Some(&Scalar::from("MR")));
    assert_eq!(
        result.nodes[2].properties.get("value"),
        Some(&Scalar::from("12345"))
    );
}

#[test]
fn test_unnest_twice_fails() {
    let mut graph = unnested(&fixtures::single_reference());
    let err = graph.unnest().unwrap_err();

    assert!(matches!(err, GraphError::AlreadyUnnested(_)));
}

// ============================================================================
// Pure unnesting
// ============================================================================

#[test]
fn test_unnest_attributes_local_edges() {
    let attrs = json!({
        "status": "final",
        "valueQuantity": {"value": 6.3, "unit": "%"},
        "note": null
    });
    let result = unnest_attributes("obs", attrs.as_object().unwrap(), "Property");

    assert_eq!(result.scalars.len(), 1);
    assert_eq!(result.nodes.len(), 1);
    assert_eq!(result.nodes[0].name, "obs_valueQuantity");
    assert_eq!(result.edges[0].source, Slot::Root);
    assert_eq!(result.edges[0].target, 0);
    assert_eq!(result.edges[0].label, "valueQuantity");
}

#[test]
fn test_nested_sequences_flatten() {
    let attrs = json!({"grid": [[1, 2], [3], null, "x"]});
    let result = unnest_attributes("root", attrs.as_object().unwrap(), "Property");

    assert_eq!(result.nodes.len(), 1);
    let rendered: Vec<String> = result.nodes[0]
        .properties
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    assert_eq!(
        rendered,
        vec!["property1=1", "property2=2", "property3=3", "property4=x"]
    );
}

#[test]
fn test_mixed_sequence_keeps_objects_apart() {
    let attrs = json!({"items": ["a", {"k": "v"}, "b", {"k": "w"}]});
    let result = unnest_attributes("root", attrs.as_object().unwrap(), "Property");

    let names: Vec<&str> = result.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["root_items", "root_items_k", "root_items_k"]);
    assert_eq!(result.nodes[0].properties.len(), 2);
    assert_eq!(result.nodes[1].properties.get("k"), Some(&Scalar::from("v")));
    assert_eq!(result.nodes[2].properties.get("k"), Some(&Scalar::from("w")));
}

#[test]
fn test_custom_property_type() {
    let attrs = json!({"meta": {"versionId": "1"}});
    let result = unnest_attributes("root", attrs.as_object().unwrap(), "Attribute");

    assert_eq!(result.nodes[0].node_type, "Attribute");
    assert!(result.nodes[0].is_property_node());
}
