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


//! Convert command - bundle to Cypher statements

use super::{load_rules, read_input, write_output};
use crate::error::CliError;
use fhirgraph_core::{graph_from_str, BuildOptions, RuleTable};
use fhirgraph_neo4j::{graph_to_script, CypherScript, ToCypherConfig};
use std::path::Path;
use tracing::debug;

/// Build, unnest and render one bundle file.
pub fn render_file(
    path: &Path,
    rules: &RuleTable,
    config: &ToCypherConfig,
) -> Result<CypherScript, CliError> {
    let content = read_input(path)?;

    let graph = graph_from_str(&content, rules, &BuildOptions::default())?;
    debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built"
    );

    Ok(graph_to_script(&graph, config)?)
}

/// Convert a bundle file to Cypher statements.
///
/// Statements go to `output`, or stdout when no output path is given: one
/// per line, node statements first.
///
/// # Examples
///
/// ```no_run
/// use fhirgraph_cli::commands::convert;
///
/// # fn main() -> Result<(), String> {
/// convert("bundle.json", Some("rules.txt"), Some("Cypher_bundle.txt"), false)?;
/// # Ok(())
/// # }
/// ```
pub fn convert(
    file: &str,
    rules: Option<&str>,
    output: Option<&str>,
    typed_literals: bool,
) -> Result<(), String> {
    let rules = load_rules(rules)?;

    let mut config = ToCypherConfig::default();
    if typed_literals {
        config = config.with_typed_literals();
    }

    let script = render_file(Path::new(file), &rules, &config).map_err(|e| e.to_string())?;
    write_output(&script.render(), output)
}
