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

//! Serializer configuration.

use serde::{Deserialize, Serialize};

/// Default maximum string length for property values: 100 MB.
///
/// Free-text fields such as narratives and attachments can be large, so the
/// default only guards against pathological input. Use
/// [`ToCypherConfig::for_untrusted_input`] for a 1 MB limit.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 100 * 1024 * 1024;

/// Relationship type written for reference edges that matched no rule.
pub const DEFAULT_UNDEFINED_RELATIONSHIP: &str = "UNDEFINED";

/// Prefix of the statement-local node alias (`n_{id}`).
pub const DEFAULT_ALIAS_PREFIX: &str = "n_";

/// Configuration for rendering a graph as Cypher statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToCypherConfig {
    /// Relationship type for reference edges without a rule (default: "UNDEFINED").
    pub undefined_relationship: String,

    /// Render every property value as a quoted string (default: true).
    ///
    /// When false, numbers and booleans are written as typed Cypher literals.
    pub quote_all_values: bool,

    /// Maximum string length for property values (default: 100MB, None = unlimited).
    pub max_string_length: Option<usize>,

    /// Maximum number of nodes to render (default: None = unlimited).
    pub max_nodes: Option<usize>,

    /// Prefix of the node alias in creation statements (default: "n_").
    pub alias_prefix: String,
}

impl Default for ToCypherConfig {
    fn default() -> Self {
        Self {
            undefined_relationship: DEFAULT_UNDEFINED_RELATIONSHIP.to_string(),
            quote_all_values: true,
            max_string_length: Some(DEFAULT_MAX_STRING_LENGTH),
            max_nodes: None,
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
        }
    }
}

/// Builder for ToCypherConfig.
///
/// # Examples
///
/// ```
/// # use fhirgraph_neo4j::ToCypherConfig;
/// let config = ToCypherConfig::builder()
///     .quote_all_values(false)
///     .max_nodes(10_000)
///     .build();
/// assert!(!config.quote_all_values);
/// assert_eq!(config.undefined_relationship, "UNDEFINED");
/// ```
#[derive(Debug, Default)]
pub struct ToCypherConfigBuilder {
    undefined_relationship: Option<String>,
    quote_all_values: Option<bool>,
    max_string_length: Option<Option<usize>>,
    max_nodes: Option<Option<usize>>,
    alias_prefix: Option<String>,
}

impl ToCypherConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relationship type used when no rule matched.
    pub fn undefined_relationship(mut self, name: impl Into<String>) -> Self {
        self.undefined_relationship = Some(name.into());
        self
    }

    /// Set whether numbers and booleans are quoted.
    pub fn quote_all_values(mut self, quote: bool) -> Self {
        self.quote_all_values = Some(quote);
        self
    }

    /// Set maximum string length for property values.
    pub fn max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(Some(max));
        self
    }

    /// Remove the string length limit.
    pub fn no_string_length_limit(mut self) -> Self {
        self.max_string_length = Some(None);
        self
    }

    /// Set maximum number of nodes to render.
    pub fn max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = Some(Some(max));
        self
    }

    /// Set the node alias prefix.
    pub fn alias_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.alias_prefix = Some(prefix.into());
        self
    }

    /// Build the ToCypherConfig instance.
    ///
    /// All unset fields will use their default values.
    pub fn build(self) -> ToCypherConfig {
        let defaults = ToCypherConfig::default();
        ToCypherConfig {
            undefined_relationship: self
                .undefined_relationship
                .unwrap_or(defaults.undefined_relationship),
            quote_all_values: self.quote_all_values.unwrap_or(defaults.quote_all_values),
            max_string_length: self.max_string_length.unwrap_or(defaults.max_string_length),
            max_nodes: self.max_nodes.unwrap_or(defaults.max_nodes),
            alias_prefix: self.alias_prefix.unwrap_or(defaults.alias_prefix),
        }
    }
}

impl ToCypherConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for ToCypherConfig.
    pub fn builder() -> ToCypherConfigBuilder {
        ToCypherConfigBuilder::default()
    }

    /// Write numbers and booleans as typed literals instead of strings.
    pub fn with_typed_literals(mut self) -> Self {
        self.quote_all_values = false;
        self
    }

    /// Set the relationship type used when no rule matched.
    pub fn with_undefined_relationship(mut self, name: impl Into<String>) -> Self {
        self.undefined_relationship = name.into();
        self
    }

    /// Set maximum string length for property values.
    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(max);
        self
    }

    /// Remove the string length limit.
    pub fn without_string_length_limit(mut self) -> Self {
        self.max_string_length = None;
        self
    }

    /// Set maximum number of nodes to render.
    pub fn with_max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = Some(max);
        self
    }

    /// Set the node alias prefix.
    pub fn with_alias_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.alias_prefix = prefix.into();
        self
    }

    /// Configuration for documents from untrusted sources.
    ///
    /// Limits strings to 1 MB and graphs to 100K nodes.
    pub fn for_untrusted_input() -> Self {
        Self {
            max_string_length: Some(1_000_000),
            max_nodes: Some(100_000),
            ..Default::default()
        }
    }
}
