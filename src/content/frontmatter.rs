//! Front-matter parsing

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use thiserror::Error;

/// Opening and closing line of a front-matter block
const DELIMITER: &str = "---";

/// Front-matter parse failures
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front-matter block is not closed with `---`")]
    Unterminated,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Front-matter data from a post, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter(IndexMap<String, Value>);

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut lines = content.split_inclusive('\n');
        match lines.next() {
            Some(first) if is_delimiter(first) => {
                let start = first.len();
                let mut offset = start;
                for line in lines {
                    if is_delimiter(line) {
                        let yaml = &content[start..offset];
                        let body = &content[offset + line.len()..];
                        return Ok((Self::from_yaml(yaml)?, body));
                    }
                    offset += line.len();
                }
                Err(FrontMatterError::Unterminated)
            }
            // No front-matter found
            _ => Ok((FrontMatter::default(), content)),
        }
    }

    fn from_yaml(yaml: &str) -> Result<Self, FrontMatterError> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }
        Ok(Self(serde_yaml::from_str(yaml)?))
    }

    /// Raw value for a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Scalar value for a key in its textual form
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Set a value, keeping the position of an existing key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn title(&self) -> Option<String> {
        self.get_str("title")
    }

    pub fn date(&self) -> Option<String> {
        self.get_str("date")
    }

    pub fn excerpt(&self) -> Option<String> {
        self.get_str("excerpt")
    }

    pub fn cover_image(&self) -> Option<String> {
        self.get_str("cover_image")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Serialize back into a delimited front-matter block followed by `body`
    pub fn to_document(&self, body: &str) -> Result<String, FrontMatterError> {
        let yaml = if self.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(&self.0)?
        };
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
    }

    /// Parse the date string into a NaiveDateTime
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date().as_deref().and_then(parse_date_string)
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
excerpt: A first post
cover_image: /images/posts/hello.jpg
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title().as_deref(), Some("Hello World"));
        assert_eq!(fm.date().as_deref(), Some("2024-01-15"));
        assert_eq!(fm.excerpt().as_deref(), Some("A first post"));
        assert_eq!(fm.cover_image().as_deref(), Some("/images/posts/hello.jpg"));
        assert_eq!(body, "\nThis is the content.\n");
    }

    #[test]
    fn test_keys_keep_document_order() {
        let (fm, _) = FrontMatter::parse("---\nzeta: 1\nalpha: 2\nmid: 3\n---\n").unwrap();
        let keys: Vec<_> = fm.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_body_is_verbatim() {
        let (fm, body) = FrontMatter::parse("---\ntitle: \"T\"\n---\nHello").unwrap();
        assert_eq!(fm.title().as_deref(), Some("T"));
        assert_eq!(body, "Hello");
    }

    #[test]
    fn test_crlf_delimiters() {
        let (fm, body) = FrontMatter::parse("---\r\ntitle: Windows\r\n---\r\nBody\r\n").unwrap();
        assert_eq!(fm.title().as_deref(), Some("Windows"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unterminated_block_is_error() {
        let err = FrontMatter::parse("---\ntitle: Oops\n\nBody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let err = FrontMatter::parse("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_non_mapping_is_error() {
        let err = FrontMatter::parse("---\n- a\n- b\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_scalar_accessors() {
        let (fm, _) =
            FrontMatter::parse("---\ntitle: 42\ndraft: true\ntags:\n  - rust\nnote: ~\n---\n")
                .unwrap();
        assert_eq!(fm.title().as_deref(), Some("42"));
        assert_eq!(fm.get_str("draft").as_deref(), Some("true"));
        assert_eq!(fm.get_str("tags"), None);
        assert_eq!(fm.get_str("note"), None);
        assert!(fm.get("tags").is_some());
        assert_eq!(fm.len(), 4);
    }

    #[test]
    fn test_to_document_reparses() {
        let mut fm = FrontMatter::default();
        fm.insert("title", "Round Trip");
        fm.insert("excerpt", "");
        let doc = fm.to_document("Body text\n").unwrap();

        let (parsed, body) = FrontMatter::parse(&doc).unwrap();
        assert_eq!(parsed, fm);
        assert_eq!(body, "Body text\n");
    }

    #[test]
    fn test_parse_date() {
        let mut fm = FrontMatter::default();
        fm.insert("date", "2024-01-15 10:30:00");
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");

        fm.insert("date", "March 3, 2021");
        assert_eq!(
            fm.parse_date().unwrap().format("%Y-%m-%d").to_string(),
            "2021-03-03"
        );

        fm.insert("date", "someday");
        assert!(fm.parse_date().is_none());
    }
}
