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

//! Malformed inputs.

/// Invalid bundle texts, each paired with a short name.
///
/// None of these can produce a graph: they are either not JSON or do not
/// have the shape of a bundle.
pub fn invalid_bundle_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("empty", ""),
        ("truncated", "{\"entry\": ["),
        ("array_root", "[{\"resource\": {\"resourceType\": \"Patient\"}}]"),
        ("string_root", "\"bundle\""),
        ("entry_object", "{\"entry\": {\"resource\": {}}}"),
        ("entry_string", "{\"entry\": \"none\"}"),
    ]
}

/// Rule table text with malformed lines mixed in.
///
/// Only two rules survive parsing: `Condition hasSubject Patient` and
/// `Observation hasSubject Patient` (the latter overwriting an earlier label).
pub const MESSY_RULES: &str = "\

Condition hasSubject Patient
Observation
Observation subject Patient
Encounter hasSubject
Observation hasSubject Patient extra tokens
";
