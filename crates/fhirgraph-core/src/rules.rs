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

//! Edge-typing rule table.
//!
//! Each non-empty line holds at least three whitespace-separated tokens:
//!
//! ```text
//! Condition subject Patient
//! Encounter participant Practitioner
//! ```
//!
//! The first token is the source entity type, the second the relationship
//! label and the third the target entity type. Extra tokens are ignored,
//! shorter lines are skipped, and a later line for the same type pair wins.

use crate::error::{GraphError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Immutable lookup from (source type, target type) to relationship label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: HashMap<(String, String), String>,
}

impl RuleTable {
    /// Create an empty table; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse rules from text.
    pub fn parse(text: &str) -> Self {
        let mut table = Self::new();
        for line in text.lines() {
            let mut tokens = line.split_whitespace();
            if let (Some(source), Some(label), Some(target)) =
                (tokens.next(), tokens.next(), tokens.next())
            {
                table.insert(source, label, target);
            }
        }
        table
    }

    /// Read and parse a rule file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GraphError::io(path, e))?;
        let table = Self::parse(&text);
        tracing::debug!(path = %path.display(), rules = table.len(), "loaded rule table");
        Ok(table)
    }

    /// Add or replace the rule for a type pair.
    pub fn insert(
        &mut self,
        source_type: impl Into<String>,
        label: impl Into<String>,
        target_type: impl Into<String>,
    ) {
        self.rules
            .insert((source_type.into(), target_type.into()), label.into());
    }

    /// Look up the label for an exact type pair.
    pub fn lookup(&self, source_type: &str, target_type: &str) -> Option<&str> {
        self.rules
            .get(&(source_type.to_string(), target_type.to_string()))
            .map(String::as_str)
    }

    /// All rules as `(source, label, target)`, sorted for stable output.
    pub fn entries(&self) -> Vec<(&str, &str, &str)> {
        let mut entries: Vec<(&str, &str, &str)> = self
            .rules
            .iter()
            .map(|((s, t), l)| (s.as_str(), l.as_str(), t.as_str()))
            .collect();
        entries.sort();
        entries
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
