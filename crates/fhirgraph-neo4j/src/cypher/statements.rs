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

//! Statement types and script assembly.

use super::escape::quote_string;
use fhirgraph_core::Scalar;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::io::{self, Write};

/// A Cypher literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CypherValue {
    /// Boolean value.
    Bool(bool),
    /// Numeric value in its source representation.
    Number(Number),
    /// String value.
    String(String),
}

impl From<&Scalar> for CypherValue {
    fn from(value: &Scalar) -> Self {
        match value {
            Scalar::String(s) => CypherValue::String(s.clone()),
            Scalar::Number(n) => CypherValue::Number(n.clone()),
            Scalar::Bool(b) => CypherValue::Bool(*b),
        }
    }
}

impl From<&str> for CypherValue {
    fn from(v: &str) -> Self {
        CypherValue::String(v.to_string())
    }
}

impl From<bool> for CypherValue {
    fn from(v: bool) -> Self {
        CypherValue::Bool(v)
    }
}

impl From<i64> for CypherValue {
    fn from(v: i64) -> Self {
        CypherValue::Number(v.into())
    }
}

impl CypherValue {
    /// Typed literal: numbers and booleans bare, strings quoted.
    pub fn to_cypher_literal(&self) -> String {
        match self {
            CypherValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            CypherValue::Number(n) => n.to_string(),
            CypherValue::String(s) => quote_string(s),
        }
    }

    /// String literal of the value's text, whatever its type.
    ///
    /// Booleans are spelled `'True'` / `'False'`.
    pub fn to_quoted_literal(&self) -> String {
        match self {
            CypherValue::Bool(b) => quote_string(if *b { "True" } else { "False" }),
            CypherValue::Number(n) => quote_string(&n.to_string()),
            CypherValue::String(s) => quote_string(s),
        }
    }

    /// Render as a literal, quoting non-strings when `quote_all` is set.
    pub fn render(&self, quote_all: bool) -> String {
        if quote_all {
            self.to_quoted_literal()
        } else {
            self.to_cypher_literal()
        }
    }

    /// Try to get as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CypherValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// The type of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementType {
    /// Node creation.
    CreateNode,
    /// Relationship creation between two existing nodes.
    CreateRelationship,
}

/// A single executable Cypher statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CypherStatement {
    /// The Cypher query text.
    pub query: String,
    /// Type of statement.
    pub statement_type: StatementType,
}

impl CypherStatement {
    /// Create a new Cypher statement.
    pub fn new(query: impl Into<String>, statement_type: StatementType) -> Self {
        Self {
            query: query.into(),
            statement_type,
        }
    }

    /// Create a node creation statement.
    pub fn create_node(query: impl Into<String>) -> Self {
        Self::new(query, StatementType::CreateNode)
    }

    /// Create a relationship creation statement.
    pub fn create_relationship(query: impl Into<String>) -> Self {
        Self::new(query, StatementType::CreateRelationship)
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.query
    }
}

impl fmt::Display for CypherStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}

/// An ordered list of statements for one document.
///
/// Node statements precede relationship statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CypherScript {
    /// The statements in execution order.
    pub statements: Vec<CypherStatement>,
}

impl CypherScript {
    /// Create a new empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement to the script.
    pub fn add(&mut self, statement: CypherStatement) {
        self.statements.push(statement);
    }

    /// Add multiple statements to the script.
    pub fn extend(&mut self, statements: impl IntoIterator<Item = CypherStatement>) {
        self.statements.extend(statements);
    }

    /// Get all statements of a specific type.
    pub fn statements_of_type(&self, statement_type: StatementType) -> Vec<&CypherStatement> {
        self.statements
            .iter()
            .filter(|s| s.statement_type == statement_type)
            .collect()
    }

    /// Query texts in order.
    pub fn lines(&self) -> Vec<String> {
        self.statements.iter().map(|s| s.query.clone()).collect()
    }

    /// Render one statement per line, each newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.statements.iter().map(|s| s.query.len() + 1).sum());
        for statement in &self.statements {
            out.push_str(&statement.query);
            out.push('\n');
        }
        out
    }

    /// Write the rendered script to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for statement in &self.statements {
            writer.write_all(statement.query.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    /// Get the number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the script is empty.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl IntoIterator for CypherScript {
    type Item = CypherStatement;
    type IntoIter = std::vec::IntoIter<CypherStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a CypherScript {
    type Item = &'a CypherStatement;
    type IntoIter = std::slice::Iter<'a, CypherStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_literals() {
        assert_eq!(CypherValue::Bool(true).to_cypher_literal(), "true");
        assert_eq!(CypherValue::from(72).to_cypher_literal(), "72");
        assert_eq!(
            CypherValue::Number(Number::from_f64(6.3).unwrap()).to_cypher_literal(),
            "6.3"
        );
        assert_eq!(CypherValue::from("it's").to_cypher_literal(), "'it\\'s'");
    }

    #[test]
    fn test_quoted_literals() {
        assert_eq!(CypherValue::Bool(false).to_quoted_literal(), "'False'");
        assert_eq!(CypherValue::from(-3).to_quoted_literal(), "'-3'");
        assert_eq!(CypherValue::from("final").render(true), "'final'");
        assert_eq!(CypherValue::from(1).render(false), "1");
    }

    #[test]
    fn test_from_scalar() {
        assert_eq!(
            CypherValue::from(&Scalar::from("Bode")),
            CypherValue::String("Bode".to_string())
        );
        assert_eq!(CypherValue::from(&Scalar::from(true)), CypherValue::Bool(true));
        assert_eq!(CypherValue::from(&Scalar::from(5)), CypherValue::from(5));
    }

    #[test]
    fn test_script_render_and_filter() {
        let mut script = CypherScript::new();
        script.add(CypherStatement::create_node("CREATE (a:A {})"));
        script.extend(vec![CypherStatement::create_relationship(
            "MATCH (n), (m) CREATE (n)-[:R]->(m);",
        )]);

        assert_eq!(script.len(), 2);
        assert_eq!(
            script.render(),
            "CREATE (a:A {})\nMATCH (n), (m) CREATE (n)-[:R]->(m);\n"
        );
        assert_eq!(script.statements_of_type(StatementType::CreateNode).len(), 1);
        assert_eq!(
            script
                .statements_of_type(StatementType::CreateRelationship)
                .len(),
            1
        );
    }

    #[test]
    fn test_write_to_matches_render() {
        let mut script = CypherScript::new();
        script.add(CypherStatement::create_node("CREATE (a:A {x: 'y'})"));
        let mut buf = Vec::new();
        script.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), script.render());
    }

    #[test]
    fn test_empty_script_renders_nothing() {
        let script = CypherScript::new();
        assert!(script.is_empty());
        assert_eq!(script.render(), "");
        assert!(script.lines().is_empty());
    }
}
