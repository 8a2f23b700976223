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

//! Literal escaping and identifier quoting.
//!
//! Every string that lands inside a statement passes through this module:
//! values through [`quote_string`], labels, relationship types, aliases and
//! property keys through the `escape_*` functions.

use crate::config::ToCypherConfig;
use crate::error::{Neo4jError, Result};
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Check a property value against the configured length limit.
///
/// # Examples
///
/// ```
/// # use fhirgraph_neo4j::cypher::validate_string_length;
/// # use fhirgraph_neo4j::ToCypherConfig;
/// let config = ToCypherConfig::default().with_max_string_length(8);
/// assert!(validate_string_length("final", "status", &config).is_ok());
/// assert!(validate_string_length("preliminary", "status", &config).is_err());
/// ```
pub fn validate_string_length(s: &str, property: &str, config: &ToCypherConfig) -> Result<()> {
    match config.max_string_length {
        Some(max_length) if s.len() > max_length => Err(Neo4jError::StringLengthExceeded {
            length: s.len(),
            max_length,
            property: property.to_string(),
        }),
        _ => Ok(()),
    }
}

#[inline]
fn needs_escaping(s: &str) -> bool {
    s.chars()
        .any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\x00'))
}

/// Escape a string for use inside a single-quoted Cypher literal.
///
/// A single quote becomes `\'`. Backslashes, double quotes, line breaks,
/// tabs and NUL are escaped as well, so no value can close its literal.
/// Strings without special characters are returned borrowed.
///
/// # Examples
///
/// ```
/// # use fhirgraph_neo4j::cypher::escape_string;
/// assert_eq!(escape_string("O'Brien"), "O\\'Brien");
/// assert!(matches!(escape_string("Bode"), std::borrow::Cow::Borrowed(_)));
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Wrap an escaped string in single quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Returns true for a plain Cypher identifier: a letter or underscore
/// followed by letters, digits and underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Return `s` if it is a plain identifier.
pub fn validate_identifier(s: &str) -> Result<&str> {
    if is_valid_identifier(s) {
        Ok(s)
    } else {
        Err(Neo4jError::InvalidIdentifier(s.to_string()))
    }
}

/// Normalize a string to NFC.
///
/// ```
/// # use fhirgraph_neo4j::cypher::normalize_unicode;
/// assert_eq!(normalize_unicode("cafe\u{0301}"), "caf\u{e9}");
/// ```
pub fn normalize_unicode(s: &str) -> String {
    s.nfc().collect()
}

/// Control, zero-width and bidi formatting characters.
fn is_dangerous_unicode(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{200B}'
                | '\u{200C}'
                | '\u{200D}'
                | '\u{FEFF}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2066}'..='\u{2069}'
                | '\u{00AD}'
                | '\u{061C}'
                | '\u{180E}'
        )
}

/// NFC-normalize and drop invisible characters, then backtick-quote the
/// result unless it is a plain, non-reserved identifier.
fn quote_name(s: &str) -> String {
    let sanitized: String = normalize_unicode(s)
        .chars()
        .filter(|c| !is_dangerous_unicode(*c))
        .collect();

    if is_valid_identifier(&sanitized) && !is_cypher_keyword(&sanitized) {
        sanitized
    } else {
        format!("`{}`", sanitized.replace('`', "``"))
    }
}

/// Escape a property key or variable name.
///
/// # Examples
///
/// ```
/// # use fhirgraph_neo4j::cypher::escape_identifier;
/// assert_eq!(escape_identifier("birthDate"), "birthDate");
/// assert_eq!(escape_identifier("end"), "`end`");
/// assert_eq!(escape_identifier("n_a-b"), "`n_a-b`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    quote_name(s)
}

/// Escape a node label, including the leading colon.
///
/// ```
/// # use fhirgraph_neo4j::cypher::escape_label;
/// assert_eq!(escape_label("Patient"), ":Patient");
/// assert_eq!(escape_label("Medication-Request"), ":`Medication-Request`");
/// ```
pub fn escape_label(s: &str) -> String {
    format!(":{}", quote_name(s))
}

/// Escape a relationship type, including the leading colon.
///
/// ```
/// # use fhirgraph_neo4j::cypher::escape_relationship_type;
/// assert_eq!(escape_relationship_type("hasSubject"), ":hasSubject");
/// assert_eq!(escape_relationship_type("has subject"), ":`has subject`");
/// ```
pub fn escape_relationship_type(s: &str) -> String {
    format!(":{}", quote_name(s))
}

/// Check if a string is a Cypher reserved keyword.
pub fn is_cypher_keyword(s: &str) -> bool {
    matches!(
        s.to_uppercase().as_str(),
        "ALL"
            | "AND"
            | "ANY"
            | "AS"
            | "ASC"
            | "ASCENDING"
            | "BY"
            | "CALL"
            | "CASE"
            | "CONTAINS"
            | "COUNT"
            | "CREATE"
            | "DELETE"
            | "DESC"
            | "DESCENDING"
            | "DETACH"
            | "DISTINCT"
            | "DO"
            | "DROP"
            | "ELSE"
            | "END"
            | "ENDS"
            | "EXISTS"
            | "FALSE"
            | "FILTER"
            | "FOREACH"
            | "IN"
            | "IS"
            | "LIMIT"
            | "MANDATORY"
            | "MATCH"
            | "MERGE"
            | "NODE"
            | "NONE"
            | "NOT"
            | "NULL"
            | "OF"
            | "ON"
            | "OPTIONAL"
            | "OR"
            | "ORDER"
            | "REDUCE"
            | "RELATIONSHIP"
            | "REMOVE"
            | "RETURN"
            | "SET"
            | "SINGLE"
            | "SKIP"
            | "SOME"
            | "STARTS"
            | "THEN"
            | "TRUE"
            | "UNION"
            | "UNIQUE"
            | "UNWIND"
            | "USING"
            | "WHEN"
            | "WHERE"
            | "WITH"
            | "XOR"
            | "YIELD"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_single_quote() {
        assert_eq!(escape_string("O'Brien").as_ref(), "O\\'Brien");
        assert_eq!(quote_string("O'Brien"), "'O\\'Brien'");
    }

    #[test]
    fn test_escape_clean_is_borrowed() {
        for case in ["", "Bode", "urn:uuid:g-1", "1974-12-25", "Jackie Ann"] {
            let result = escape_string(case);
            assert!(matches!(result, Cow::Borrowed(_)), "{:?}", case);
            assert_eq!(result.as_ref(), case);
        }
    }

    #[test]
    fn test_escape_special_characters() {
        let cases = [
            (r"C:\records", r"C:\\records"),
            (r#"say "hi""#, r#"say \"hi\""#),
            ("a\nb", r"a\nb"),
            ("a\r\nb", r"a\r\nb"),
            ("a\tb", r"a\tb"),
            ("a\x00b", r"a\u0000b"),
            (r"\'", r"\\\'"),
        ];
        for (input, expected) in cases {
            assert_eq!(escape_string(input).as_ref(), expected, "{:?}", input);
        }
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("patient"));
        assert!(is_valid_identifier("_1"));
        assert!(is_valid_identifier("n_g_1_12"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1n"));
        assert!(!is_valid_identifier("n-1"));
        assert!(!is_valid_identifier("a b"));
    }

    #[test]
    fn test_validate_identifier() {
        assert_eq!(validate_identifier("n_").unwrap(), "n_");
        assert!(matches!(
            validate_identifier("9"),
            Err(Neo4jError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_escape_identifier_keywords() {
        assert_eq!(escape_identifier("end"), "`end`");
        assert_eq!(escape_identifier("Match"), "`Match`");
        assert_eq!(escape_identifier("start"), "start");
    }

    #[test]
    fn test_backticks_doubled() {
        assert_eq!(escape_identifier("a`b"), "`a``b`");
        assert_eq!(escape_label("x`y"), ":`x``y`");
    }

    #[test]
    fn test_dangerous_unicode_dropped() {
        assert_eq!(escape_label("Pat\u{200B}ient"), ":Patient");
        assert_eq!(escape_relationship_type("has\u{202E}Subject"), ":hasSubject");
        assert_eq!(escape_identifier("id\n"), "id");
    }

    #[test]
    fn test_label_normalized() {
        assert_eq!(escape_label("Cafe\u{0301}"), ":`Caf\u{e9}`");
    }

    #[test]
    fn test_keyword_case_insensitive() {
        assert!(is_cypher_keyword("where"));
        assert!(is_cypher_keyword("WHERE"));
        assert!(!is_cypher_keyword("Patient"));
    }

    #[test]
    fn test_validate_string_length_unlimited() {
        let config = ToCypherConfig::default().without_string_length_limit();
        assert!(validate_string_length(&"x".repeat(4096), "text", &config).is_ok());
    }
}
