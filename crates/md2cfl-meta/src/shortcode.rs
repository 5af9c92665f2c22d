//! Hugo shortcode removal.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Opening or closing shortcode tag: `{{% name %}}` or `{{% /name %}}`.
static SHORTCODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{%\s*/?(\S+?)\s*%\}\}").expect("invalid shortcode regex"));

/// Remove paired shortcode tags from a document body.
///
/// Only the tags are removed; the content they enclose is kept as is.
///
/// # Example
///
/// ```
/// use md2cfl_meta::strip_shortcodes;
///
/// assert_eq!(strip_shortcodes("A {{% note %}}B{{% /note %}} C"), "A B C");
/// ```
pub fn strip_shortcodes(body: &str) -> Cow<'_, str> {
    SHORTCODE_PATTERN.replace_all(body, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_paired_shortcode() {
        assert_eq!(strip_shortcodes("A {{% note %}}B{{% /note %}} C"), "A B C");
    }

    #[test]
    fn test_strip_without_spaces() {
        assert_eq!(strip_shortcodes("{{%warning%}}careful{{%/warning%}}"), "careful");
    }

    #[test]
    fn test_strip_multiline_content_kept() {
        let body = "{{% note %}}\nline one\n\nline two\n{{% /note %}}\n";
        assert_eq!(strip_shortcodes(body), "\nline one\n\nline two\n\n");
    }

    #[test]
    fn test_no_shortcodes_borrows() {
        let result = strip_shortcodes("plain *markdown*");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "plain *markdown*");
    }

    #[test]
    fn test_go_template_braces_untouched() {
        assert_eq!(strip_shortcodes("{{ .Title }} and {{< ref >}}"), "{{ .Title }} and {{< ref >}}");
    }
}
