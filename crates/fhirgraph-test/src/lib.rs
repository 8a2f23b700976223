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

//! Shared test fixtures for fhirgraph crates.
//!
//! Fixtures are plain `serde_json::Value` bundles so that every crate in the
//! workspace can use them without depending on the graph model.
//!
//! ```rust
//! use fhirgraph_test::fixtures;
//!
//! let doc = fixtures::single_reference();
//! assert_eq!(doc["entry"].as_array().unwrap().len(), 2);
//!
//! for (name, text) in fixtures::errors::invalid_bundle_samples() {
//!     assert!(!name.is_empty());
//!     let _ = text;
//! }
//! ```

use serde_json::Value;

pub mod fixtures;

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> Value)>;

/// Count the entries of a bundle that carry a non-empty `resource.resourceType` string.
pub fn count_typed_entries(doc: &Value) -> usize {
    doc.get("entry")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter(|e| {
                    e["resource"]["resourceType"]
                        .as_str()
                        .is_some_and(|t| !t.is_empty())
                })
                .count()
        })
        .unwrap_or(0)
}

/// Render a fixture as compact JSON text.
pub fn to_text(doc: &Value) -> String {
    doc.to_string()
}
