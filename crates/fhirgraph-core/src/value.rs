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

//! Scalar property values and ordered property maps.

use serde::Serialize;
use serde_json::{Number, Value as JsonValue};

/// A scalar property value.
///
/// After unnesting, every property of every node holds one of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// String value.
    String(String),
    /// Numeric value, kept in its JSON representation.
    Number(Number),
    /// Boolean value.
    Bool(bool),
}

impl Scalar {
    /// Convert a JSON value into a scalar.
    ///
    /// Returns `None` for objects, arrays and `null`.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::String(s) => Some(Self::String(s.clone())),
            JsonValue::Number(n) => Some(Self::Number(n.clone())),
            JsonValue::Bool(b) => Some(Self::Bool(*b)),
            JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    /// Try to get the value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a number.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Number(Number::from(v))
    }
}

/// Returns true if the JSON value is an object or an array.
pub fn is_structured(value: &JsonValue) -> bool {
    matches!(value, JsonValue::Object(_) | JsonValue::Array(_))
}

/// Insertion-ordered map of property name to scalar value.
///
/// Inserting an existing key replaces the value and keeps the key's position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Properties {
    entries: Vec<(String, Scalar)>,
}

impl Properties {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: Scalar) -> Option<Scalar> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Append a value under the next positional name (`property1`, `property2`, ...).
    pub fn push_positional(&mut self, value: Scalar) {
        let key = format!("property{}", self.entries.len() + 1);
        self.insert(key, value);
    }

    /// Look up a property by name.
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate over properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all properties.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>> FromIterator<(K, Scalar)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, Scalar)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_from_json() {
        assert_eq!(Scalar::from_json(&json!("a")), Some(Scalar::from("a")));
        assert_eq!(Scalar::from_json(&json!(true)), Some(Scalar::Bool(true)));
        assert_eq!(Scalar::from_json(&json!(42)), Some(Scalar::from(42i64)));
        assert_eq!(Scalar::from_json(&json!(null)), None);
        assert_eq!(Scalar::from_json(&json!([1])), None);
        assert_eq!(Scalar::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::from("O'Brien").to_string(), "O'Brien");
        assert_eq!(Scalar::from(30i64).to_string(), "30");
        assert_eq!(Scalar::from_json(&json!(1.5)).unwrap().to_string(), "1.5");
        assert_eq!(Scalar::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(Scalar::from("x").as_str(), Some("x"));
        assert_eq!(Scalar::Bool(true).as_str(), None);
        assert_eq!(Scalar::Bool(true).as_bool(), Some(true));
        assert!(Scalar::from(7i64).as_number().is_some());
    }

    #[test]
    fn test_properties_replace_keeps_position() {
        let mut props = Properties::new();
        props.insert("a", Scalar::from("1"));
        props.insert("b", Scalar::from("2"));
        let previous = props.insert("a", Scalar::from("3"));

        assert_eq!(previous, Some(Scalar::from("1")));
        let keys: Vec<&str> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(props.get("a"), Some(&Scalar::from("3")));
    }

    #[test]
    fn test_properties_positional() {
        let mut props = Properties::new();
        props.push_positional(Scalar::from("Bode"));
        props.push_positional(Scalar::from("Jackie"));

        assert_eq!(props.get("property1"), Some(&Scalar::from("Bode")));
        assert_eq!(props.get("property2"), Some(&Scalar::from("Jackie")));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_is_structured() {
        assert!(is_structured(&json!({})));
        assert!(is_structured(&json!([])));
        assert!(!is_structured(&json!("s")));
        assert!(!is_structured(&json!(null)));
    }
}
