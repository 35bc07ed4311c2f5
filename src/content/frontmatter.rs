//! Front-matter parsing
//!
//! Content documents start with an optional metadata block:
//!
//! ```text
//! ---
//! title: "Example Title"
//! date: Oct 12, 2023
//! tags: tag1, tag2
//! ---
//! Body text.
//! ```
//!
//! The block is a flat list of `key: value` lines, not full YAML. Values are
//! decoded into [`MetaValue`]s; anything that does not look like a block is
//! treated as body text, so parsing never fails.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// Opening delimiter, metadata lines, closing delimiter, body.
    /// The first closing delimiter wins and it must be followed by a newline.
    static ref FRONT_MATTER: Regex = Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---\r?\n(.*)\z")
        .expect("front-matter pattern is valid");
}

/// Key that is decoded as a comma-separated list
const TAGS_KEY: &str = "tags";

/// A decoded metadata value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl MetaValue {
    /// Borrow the value as text, if it is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a number, if it is numeric
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the value as an integer, if it is a whole number
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64()
            .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
            .map(|n| n as i64)
    }

    /// Borrow the value as a list, if it is a list
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            MetaValue::Number(n) => write!(f, "{}", n),
            MetaValue::Text(s) => f.write_str(s),
            MetaValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Metadata mapping, in declaration order
pub type Metadata = IndexMap<String, MetaValue>;

/// A parsed document: metadata block plus body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub metadata: Metadata,
    pub body: String,
}

impl FrontMatter {
    /// Split a raw document into metadata and body.
    ///
    /// Without a well-formed metadata block the metadata is empty and the
    /// body is the whole input, unchanged. With one, the body is the text
    /// after the closing delimiter, trimmed.
    pub fn parse(content: &str) -> Self {
        let Some(caps) = FRONT_MATTER.captures(content) else {
            return Self {
                metadata: Metadata::new(),
                body: content.to_string(),
            };
        };

        let block = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        Self {
            metadata: parse_block(block),
            body: body.trim().to_string(),
        }
    }

    /// Look up a metadata value
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }
}

/// Decode the lines between the delimiters
fn parse_block(block: &str) -> Metadata {
    let mut metadata = Metadata::new();

    for line in block.lines() {
        // Lines without a colon carry no key
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        metadata.insert(key.to_string(), decode_value(key, value.trim()));
    }

    metadata
}

/// Decode a single value: unquote, then tags list, then number, then text
pub fn decode_value(key: &str, raw: &str) -> MetaValue {
    let value = strip_quotes(raw);

    if key == TAGS_KEY {
        return MetaValue::List(
            value
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(String::from)
                .collect(),
        );
    }

    match parse_number(value) {
        Some(n) => MetaValue::Number(n),
        None => MetaValue::Text(value.to_string()),
    }
}

/// Remove one layer of matching single or double quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// A non-empty string that is entirely a finite number
fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
title: "The $500 Anomaly"
date: Oct 12, 2023
category: Forensic Audit
tags: fuel, audit, cards
---

# The Fuel Surcharge Leak

Small leaks sink great ships.
"#;

        let fm = FrontMatter::parse(content);
        let keys: Vec<_> = fm.metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "date", "category", "tags"]);
        assert_eq!(
            fm.get("title"),
            Some(&MetaValue::Text("The $500 Anomaly".to_string()))
        );
        assert_eq!(fm.get("date").and_then(|v| v.as_str()), Some("Oct 12, 2023"));
        assert_eq!(
            fm.get("tags").and_then(|v| v.as_list()),
            Some(&["fuel".to_string(), "audit".to_string(), "cards".to_string()][..])
        );
        assert_eq!(
            fm.body,
            "# The Fuel Surcharge Leak\n\nSmall leaks sink great ships."
        );
    }

    #[test]
    fn test_no_frontmatter_returns_input() {
        let content = "  Just a body.\n\nWith two paragraphs.\n";
        let fm = FrontMatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn test_unclosed_block_is_body() {
        let content = "---\ntitle: Missing close\n\nBody";
        let fm = FrontMatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn test_block_must_start_document() {
        let content = "\n---\ntitle: Late\n---\nBody";
        let fm = FrontMatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn test_closing_delimiter_needs_newline() {
        let content = "---\ntitle: Only metadata\n---";
        let fm = FrontMatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\nid: 7\r\n---\r\nBody text\r\n";
        let fm = FrontMatter::parse(content);
        assert_eq!(fm.get("title").and_then(|v| v.as_str()), Some("Windows"));
        assert_eq!(fm.get("id").and_then(|v| v.as_i64()), Some(7));
        assert_eq!(fm.body, "Body text");
    }

    #[test]
    fn test_tags_are_split_and_trimmed() {
        assert_eq!(
            decode_value("tags", "a, b ,c"),
            MetaValue::List(vec!["a".into(), "b".into(), "c".into()])
        );
        assert_eq!(
            decode_value("tags", "\"x,, y ,\""),
            MetaValue::List(vec!["x".into(), "y".into()])
        );
        assert_eq!(decode_value("tags", ""), MetaValue::List(Vec::new()));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(decode_value("id", "42"), MetaValue::Number(42.0));
        assert_eq!(decode_value("ratio", "0.5"), MetaValue::Number(0.5));
        assert_eq!(decode_value("id", "\"3\""), MetaValue::Number(3.0));
        assert_eq!(
            decode_value("version", "v1.0"),
            MetaValue::Text("v1.0".to_string())
        );
        assert_eq!(decode_value("empty", ""), MetaValue::Text(String::new()));
        assert_eq!(decode_value("nan", "NaN"), MetaValue::Text("NaN".to_string()));
    }

    #[test]
    fn test_quotes_stripped_once() {
        assert_eq!(
            decode_value("title", "'single'"),
            MetaValue::Text("single".to_string())
        );
        assert_eq!(
            decode_value("title", "\"\"double\"\""),
            MetaValue::Text("\"double\"".to_string())
        );
        assert_eq!(
            decode_value("title", "\"mismatched'"),
            MetaValue::Text("\"mismatched'".to_string())
        );
        assert_eq!(decode_value("title", "\""), MetaValue::Text("\"".to_string()));
    }

    #[test]
    fn test_lines_split_at_first_colon() {
        let content = "---\nphoto: https://example.com/a.jpg\nno colon here\nrole : Beta Client\n---\nText\n";
        let fm = FrontMatter::parse(content);
        assert_eq!(fm.metadata.len(), 2);
        assert_eq!(
            fm.get("photo").and_then(|v| v.as_str()),
            Some("https://example.com/a.jpg")
        );
        assert_eq!(fm.get("role").and_then(|v| v.as_str()), Some("Beta Client"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(MetaValue::Number(3.0).to_string(), "3");
        assert_eq!(MetaValue::Number(2.5).to_string(), "2.5");
        assert_eq!(
            MetaValue::List(vec!["a".into(), "b".into()]).to_string(),
            "a, b"
        );
    }
}
