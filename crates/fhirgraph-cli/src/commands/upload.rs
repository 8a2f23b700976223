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


//! Upload command - run statements against a live Neo4j server

use super::{load_rules, read_file, render_file};
use crate::error::CliError;
use colored::Colorize;
use fhirgraph_neo4j::{execute_script, CypherStatement, StatementExecutor, ToCypherConfig};
use neo4rs::{ConfigBuilder, Graph, Query};
use std::path::Path;
use tokio::runtime::Runtime;
use tracing::info;

/// Default Bolt URI.
pub const DEFAULT_URI: &str = "bolt://localhost:7687";

/// Default user.
pub const DEFAULT_USER: &str = "neo4j";

/// Connection settings for the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Bolt URI
    pub uri: String,
    /// User name
    pub user: String,
    /// Password
    pub password: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            user: DEFAULT_USER.to_string(),
            password: String::new(),
        }
    }
}

impl ConnectionSettings {
    /// Parse `key=value` lines (`uri`, `user`, `password`).
    ///
    /// Blank lines and lines starting with `#` are ignored, as are unknown keys.
    pub fn parse(text: &str) -> Result<Self, CliError> {
        let mut settings = Self::default();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                CliError::invalid_input(format!(
                    "line {} of connection config is not key=value",
                    i + 1
                ))
            })?;
            let value = value.trim().to_string();
            match key.trim() {
                "uri" => settings.uri = value,
                "user" => settings.user = value,
                "password" => settings.password = value,
                _ => {}
            }
        }
        Ok(settings)
    }

    /// Apply `NEO4J_URI`, `NEO4J_USER` and `NEO4J_PASSWORD` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(uri) = std::env::var("NEO4J_URI") {
            self.uri = uri;
        }
        if let Ok(user) = std::env::var("NEO4J_USER") {
            self.user = user;
        }
        if let Ok(password) = std::env::var("NEO4J_PASSWORD") {
            self.password = password;
        }
        self
    }
}

/// A blocking session over the async driver.
struct Session {
    runtime: Runtime,
    graph: Graph,
}

impl Session {
    fn connect(settings: &ConnectionSettings) -> Result<Self, CliError> {
        let runtime = Runtime::new().map_err(|e| CliError::database(e.to_string()))?;

        let config = ConfigBuilder::default()
            .uri(settings.uri.as_str())
            .user(settings.user.as_str())
            .password(settings.password.as_str())
            .build()
            .map_err(|e| CliError::database(e.to_string()))?;

        let graph = {
            let _guard = runtime.enter();
            Graph::connect(config).map_err(|e| CliError::database(e.to_string()))?
        };

        Ok(Self { runtime, graph })
    }
}

impl StatementExecutor for Session {
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), String> {
        self.runtime
            .block_on(self.graph.run(Query::new(statement.query.clone())))
            .map_err(|e| e.to_string())
    }
}

/// Convert a bundle and run its statements against a database.
///
/// Statements run in order; a failing statement is reported and the rest
/// still run. The command fails if any statement failed.
pub fn upload(file: &str, rules: Option<&str>, config: Option<&str>) -> Result<(), String> {
    let rules = load_rules(rules)?;
    let settings = match config {
        Some(path) => ConnectionSettings::parse(&read_file(path)?).map_err(|e| e.to_string())?,
        None => ConnectionSettings::default(),
    }
    .with_env_overrides();

    let script = render_file(Path::new(file), &rules, &ToCypherConfig::default())
        .map_err(|e| e.to_string())?;

    let mut session = Session::connect(&settings).map_err(|e| e.to_string())?;
    info!(uri = %settings.uri, statements = script.len(), "uploading");

    let report = execute_script(&mut session, &script);

    println!(
        "{} {} of {} statements",
        "Executed:".cyan(),
        report.succeeded(),
        report.attempted
    );
    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("  {} {}", "✗".red(), failure);
        }
        return Err(format!("{} statements failed", report.failures.len()));
    }

    Ok(())
}
