//! Leaf directive syntax for custom macros.
//!
//! A paragraph consisting of a single line `::name[body]{key="value" ...}`
//! becomes a [`NodeKind::Macro`](crate::NodeKind::Macro) node. Both the
//! bracketed body and the braced parameters are optional.

use std::collections::BTreeMap;

/// Parsed leaf directive.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct LeafDirective {
    pub name: String,
    pub body: String,
    pub parameters: BTreeMap<String, String>,
}

/// Parse a whole line as a leaf directive.
///
/// Returns `None` unless the trimmed line is exactly one `::name` directive
/// with nothing after its closing brace or bracket.
pub(crate) fn parse_leaf_directive(line: &str) -> Option<LeafDirective> {
    let trimmed = line.trim();
    let after_colons = trimmed.strip_prefix("::")?;
    if after_colons.starts_with(':') {
        return None;
    }

    let name_end = after_colons
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(after_colons.len());
    let name = &after_colons[..name_end];
    if !is_valid_name(name) {
        return None;
    }

    let mut rest = &after_colons[name_end..];
    let body = match delimited(rest, '[', ']') {
        Some((inner, consumed)) => {
            rest = &rest[consumed..];
            inner
        }
        None => "",
    };
    let attrs = match delimited(rest, '{', '}') {
        Some((inner, consumed)) => {
            rest = &rest[consumed..];
            inner
        }
        None => "",
    };

    if !rest.trim().is_empty() {
        return None;
    }

    Some(LeafDirective {
        name: name.to_owned(),
        body: body.to_owned(),
        parameters: parse_parameters(attrs),
    })
}

/// Names contain only alphanumerics, hyphens and underscores.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Content between a balanced `open`/`close` pair at the start of `s`.
///
/// Returns (inner content, bytes consumed including delimiters).
fn delimited(s: &str, open: char, close: char) -> Option<(&str, usize)> {
    if !s.starts_with(open) {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((&s[1..i], i + 1));
            }
        }
    }
    None
}

/// Parse `key="value" key='value' key=value` pairs. Unrecognized input is skipped.
fn parse_parameters(attrs: &str) -> BTreeMap<String, String> {
    let mut parameters = BTreeMap::new();
    let mut remaining = attrs.trim();

    while !remaining.is_empty() {
        if let Some((key, value, rest)) = parse_key_value(remaining) {
            parameters.insert(key.to_owned(), value.to_owned());
            remaining = rest.trim_start();
        } else {
            let skip = remaining.chars().next().map_or(1, char::len_utf8);
            remaining = remaining[skip..].trim_start();
        }
    }

    parameters
}

fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let eq_pos = s.find('=')?;
    let key = s[..eq_pos].trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    let after_eq = &s[eq_pos + 1..];
    for quote in ['"', '\''] {
        if let Some(stripped) = after_eq.strip_prefix(quote) {
            let end_quote = stripped.find(quote)?;
            return Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]));
        }
    }

    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
    Some((key, &after_eq[..end], &after_eq[end..]))
}
