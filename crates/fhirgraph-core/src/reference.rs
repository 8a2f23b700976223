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

//! Reference discovery in nested documents.
//!
//! A reference is any value stored under the reference key (`"reference"` in
//! FHIR). Values are collected in document order by descending into every
//! nested object and array. The value under a reference key is collected
//! as-is and not searched further.

use serde_json::{Map, Value as JsonValue};

/// Collect every value stored under `key` anywhere inside `value`.
pub fn find_references<'a>(value: &'a JsonValue, key: &str) -> Vec<&'a JsonValue> {
    let mut found = Vec::new();
    collect(value, key, &mut found);
    found
}

/// Collect every value stored under `key` anywhere inside an object's fields.
pub fn find_references_in<'a>(map: &'a Map<String, JsonValue>, key: &str) -> Vec<&'a JsonValue> {
    let mut found = Vec::new();
    collect_map(map, key, &mut found);
    found
}

fn collect<'a>(value: &'a JsonValue, key: &str, found: &mut Vec<&'a JsonValue>) {
    match value {
        JsonValue::Object(map) => collect_map(map, key, found),
        JsonValue::Array(items) => {
            for item in items {
                collect(item, key, found);
            }
        }
        _ => {}
    }
}

fn collect_map<'a>(map: &'a Map<String, JsonValue>, key: &str, found: &mut Vec<&'a JsonValue>) {
    for (k, v) in map {
        if k == key {
            found.push(v);
        } else {
            collect(v, key, found);
        }
    }
}
