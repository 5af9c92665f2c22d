//! Front matter splitting and typed field lookup.
//!
//! The preamble is fenced by `---` or `+++` lines at the very start of the
//! document. Its content is read as YAML first and TOML second; the fence only
//! marks the block and does not pick the format.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::MetadataError;

/// Front matter group holding the Confluence target settings.
pub const CONFLUENCE_GROUP: &str = "confluence";

const FENCES: [&str; 2] = ["---", "+++"];
const BOM: char = '\u{feff}';

/// Deserialized front matter.
///
/// Lookups never fail for absent keys; callers supply the default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrontMatter {
    fields: Map<String, Value>,
}

impl FrontMatter {
    /// Parse preamble content (without fences).
    ///
    /// Empty content yields empty front matter.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Invalid`] if the content is neither a YAML
    /// mapping nor a TOML table.
    pub fn parse(content: &str) -> Result<Self, MetadataError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let yaml_error = match serde_yaml::from_str::<Map<String, Value>>(trimmed) {
            Ok(fields) => return Ok(Self { fields }),
            Err(e) => e,
        };

        toml::from_str::<Map<String, Value>>(trimmed)
            .map(|fields| Self { fields })
            .map_err(|toml_error| {
                MetadataError::invalid(format!(
                    "not valid YAML ({yaml_error}) nor TOML ({})",
                    toml_error.message()
                ))
            })
    }

    /// Raw value for a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether the preamble declared no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// String value of a top-level key, or `default` if absent or not a string.
    #[must_use]
    pub fn string_field(&self, key: &str, default: &str) -> String {
        string_or_default(self.fields.get(key), key, default)
    }

    /// String value of `key` inside the `group` mapping, or `default`.
    #[must_use]
    pub fn nested_string_field(&self, group: &str, key: &str, default: &str) -> String {
        let value = self
            .fields
            .get(group)
            .and_then(Value::as_object)
            .and_then(|map| map.get(key));
        string_or_default(value, &format!("{group}.{key}"), default)
    }

    /// List of strings under a top-level key. Absent keys yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Invalid`] if the value is not a list or any
    /// element is not a string.
    pub fn string_list_field(&self, key: &str) -> Result<Vec<String>, MetadataError> {
        let Some(value) = self.fields.get(key) else {
            return Ok(Vec::new());
        };
        let items = value
            .as_array()
            .ok_or_else(|| MetadataError::invalid(format!("`{key}` must be a list of strings")))?;

        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_owned).ok_or_else(|| {
                    MetadataError::invalid(format!("`{key}` contains a non-string item: {item}"))
                })
            })
            .collect()
    }

    /// Page title.
    #[must_use]
    pub fn title(&self, default: &str) -> String {
        self.string_field("title", default)
    }

    /// Tags, published as page labels.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Invalid`] if `tags` is not a list of strings.
    pub fn tags(&self) -> Result<Vec<String>, MetadataError> {
        self.string_list_field("tags")
    }

    /// Confluence base URL (`confluence.base`).
    #[must_use]
    pub fn confluence_base(&self, default: &str) -> String {
        self.nested_string_field(CONFLUENCE_GROUP, "base", default)
    }

    /// Target page ID (`confluence.page`).
    #[must_use]
    pub fn confluence_page(&self, default: &str) -> String {
        self.nested_string_field(CONFLUENCE_GROUP, "page", default)
    }

    /// Output format name (`confluence.format`), `wiki` or `xml`.
    #[must_use]
    pub fn confluence_format(&self, default: &str) -> String {
        self.nested_string_field(CONFLUENCE_GROUP, "format", default)
    }
}

fn string_or_default(value: Option<&Value>, key: &str, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            warn!("Front matter field `{key}` is not a string ({other}), using default");
            default.to_owned()
        }
        None => default.to_owned(),
    }
}

/// Split a document into its front matter and body.
///
/// The body is everything after the closing fence line.
///
/// # Errors
///
/// - [`MetadataError::Missing`] if the document does not open with a fence.
/// - [`MetadataError::Invalid`] if the fence is never closed or the preamble
///   cannot be parsed.
pub fn split_front_matter(input: &str) -> Result<(FrontMatter, &str), MetadataError> {
    let input = input.strip_prefix(BOM).unwrap_or(input);

    let (first_line, mut rest) = split_line(input);
    let fence = FENCES
        .into_iter()
        .find(|fence| first_line.trim_end() == *fence)
        .ok_or(MetadataError::Missing)?;

    let content_start = rest;
    let mut content_len = 0;
    loop {
        if rest.is_empty() {
            return Err(MetadataError::invalid(format!(
                "front matter opened with `{fence}` is never closed"
            )));
        }
        let (line, next) = split_line(rest);
        if line.trim_end() == fence {
            let front_matter = FrontMatter::parse(&content_start[..content_len])?;
            return Ok((front_matter, next));
        }
        content_len += rest.len() - next.len();
        rest = next;
    }
}

/// Split off the first line, returning it without its terminator.
fn split_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const YAML_DOC: &str = "---
title: Release notes
tags:
  - release
  - changelog
confluence:
  base: https://wiki.example.com
  page: \"42\"
  format: xml
---
# Body
";

    const TOML_DOC: &str = "+++
title = \"Release notes\"
tags = [\"release\", \"changelog\"]

[confluence]
base = \"https://wiki.example.com\"
page = \"42\"
format = \"xml\"
+++
# Body
";

    #[test]
    fn test_split_yaml_document() {
        let (fm, body) = split_front_matter(YAML_DOC).unwrap();
        assert_eq!(body, "# Body\n");
        assert_eq!(fm.title("Untitled"), "Release notes");
        assert_eq!(fm.tags().unwrap(), vec!["release", "changelog"]);
    }

    #[test]
    fn test_yaml_and_toml_lookups_agree() {
        let (yaml, yaml_body) = split_front_matter(YAML_DOC).unwrap();
        let (toml, toml_body) = split_front_matter(TOML_DOC).unwrap();

        assert_eq!(yaml_body, toml_body);
        assert_eq!(yaml.string_field("title", "x"), toml.string_field("title", "x"));
        for key in ["base", "page", "format", "absent"] {
            assert_eq!(
                yaml.nested_string_field(CONFLUENCE_GROUP, key, "default"),
                toml.nested_string_field(CONFLUENCE_GROUP, key, "default"),
                "mismatch for confluence.{key}"
            );
        }
        assert_eq!(yaml.tags().unwrap(), toml.tags().unwrap());
    }

    #[test]
    fn test_toml_inside_dash_fence() {
        let doc = "---\ntitle = \"From TOML\"\n---\nbody";
        let (fm, body) = split_front_matter(doc).unwrap();
        assert_eq!(fm.title(""), "From TOML");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_missing_front_matter() {
        let err = split_front_matter("# Just markdown\n").unwrap_err();
        assert!(matches!(err, MetadataError::Missing));
    }

    #[test]
    fn test_fence_must_be_first_line() {
        let err = split_front_matter("\n---\ntitle: x\n---\n").unwrap_err();
        assert!(matches!(err, MetadataError::Missing));
    }

    #[test]
    fn test_unclosed_fence_is_invalid() {
        let err = split_front_matter("---\ntitle: x\n# body\n").unwrap_err();
        assert!(matches!(err, MetadataError::Invalid { .. }));
    }

    #[test]
    fn test_unparsable_preamble_is_invalid() {
        let err = split_front_matter("---\n: : [\n---\nbody").unwrap_err();
        assert!(matches!(err, MetadataError::Invalid { .. }));
    }

    #[test]
    fn test_scalar_preamble_is_invalid() {
        let err = split_front_matter("---\njust a sentence\n---\nbody").unwrap_err();
        assert!(matches!(err, MetadataError::Invalid { .. }));
    }

    #[test]
    fn test_empty_preamble() {
        let (fm, body) = split_front_matter("---\n---\nbody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(fm.title("Default"), "Default");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_crlf_and_bom() {
        let doc = "\u{feff}---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (fm, body) = split_front_matter(doc).unwrap();
        assert_eq!(fm.title(""), "Windows");
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_defaults_for_absent_fields() {
        let fm = FrontMatter::parse("title: Only title").unwrap();
        assert_eq!(fm.confluence_base("https://fallback"), "https://fallback");
        assert_eq!(fm.confluence_page("7"), "7");
        assert_eq!(fm.confluence_format("wiki"), "wiki");
        assert!(fm.tags().unwrap().is_empty());
    }

    #[test]
    fn test_non_string_field_falls_back() {
        let fm = FrontMatter::parse("title: 12\nconfluence:\n  page: 12345").unwrap();
        assert_eq!(fm.title("Default"), "Default");
        assert_eq!(fm.confluence_page("1"), "1");
    }

    #[test]
    fn test_group_not_a_mapping_falls_back() {
        let fm = FrontMatter::parse("confluence: https://wiki").unwrap();
        assert_eq!(fm.confluence_base("d"), "d");
    }

    #[test]
    fn test_tags_with_non_string_item() {
        let fm = FrontMatter::parse("tags: [docs, 3]").unwrap();
        assert!(matches!(fm.tags(), Err(MetadataError::Invalid { .. })));
    }

    #[test]
    fn test_tags_not_a_list() {
        let fm = FrontMatter::parse("tags: docs").unwrap();
        assert!(matches!(fm.tags(), Err(MetadataError::Invalid { .. })));
    }

    #[test]
    fn test_get_raw_value() {
        let fm = FrontMatter::parse("draft: true").unwrap();
        assert_eq!(fm.get("draft"), Some(&Value::Bool(true)));
        assert_eq!(fm.get("missing"), None);
    }
}
