//! Source document turned into markup plus everything needed to publish it.

use std::path::{Path, PathBuf};

use md2cfl_meta::SourceDocument;
use md2cfl_renderer::{Destinations, Format, parse_markdown, render};
use percent_encoding::percent_decode_str;
use tracing::debug;

use super::error::PublishError;
use super::{PublishConfig, PublishOptions};

/// A rendered document with its resolved Confluence target.
#[derive(Debug, Clone)]
pub struct PreparedPage {
    /// Path of the Markdown source.
    pub source: PathBuf,
    /// Base URL from front matter (`confluence.base`), if any.
    pub base_url: Option<String>,
    /// Target page ID from front matter or options.
    pub page_id: Option<String>,
    /// Title from front matter or options.
    pub title: Option<String>,
    /// Output format.
    pub format: Format,
    /// Rendered markup.
    pub markup: String,
    /// Tags to add as labels.
    pub labels: Vec<String>,
    /// Raw image and link destinations.
    pub destinations: Destinations,
}

impl PreparedPage {
    /// Read and render the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Io`] if the file cannot be read, otherwise see
    /// [`PreparedPage::prepare`].
    pub fn load(
        path: &Path,
        config: &PublishConfig,
        options: &PublishOptions,
    ) -> Result<Self, PublishError> {
        let input = std::fs::read_to_string(path)?;
        Self::prepare(path, &input, config, options)
    }

    /// Render `input` as the document at `path`.
    ///
    /// Front matter values win over `options`, which win over `config`.
    ///
    /// # Errors
    ///
    /// - [`PublishError::Metadata`] if the front matter is missing or malformed.
    /// - [`PublishError::Render`] if the format name is unknown or the body
    ///   contains unsupported Markdown.
    pub fn prepare(
        path: &Path,
        input: &str,
        config: &PublishConfig,
        options: &PublishOptions,
    ) -> Result<Self, PublishError> {
        let document = SourceDocument::parse(input)?;
        let front_matter = &document.front_matter;

        let format: Format = front_matter
            .confluence_format(config.default_format.representation())
            .parse()?;
        let labels = front_matter.tags()?;
        let base_url = non_empty(front_matter.confluence_base(""));
        let page_id = non_empty(
            front_matter.confluence_page(options.page_id.as_deref().unwrap_or_default()),
        );
        let title = non_empty(front_matter.title(options.title.as_deref().unwrap_or_default()));

        let tree = parse_markdown(&document.body)?;
        let markup = render(&tree, format, config.flags);
        let destinations = Destinations::collect(&tree);

        debug!(
            "Rendered {} as {} ({} bytes, {} image(s), {} link(s))",
            path.display(),
            format,
            markup.len(),
            destinations.images.len(),
            destinations.links.len()
        );

        Ok(Self {
            source: path.to_path_buf(),
            base_url,
            page_id,
            title,
            format,
            markup,
            labels,
            destinations,
        })
    }

    /// Target page ID.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Missing`] if neither front matter nor options name one.
    pub fn require_page_id(&self) -> Result<&str, PublishError> {
        self.page_id.as_deref().ok_or_else(|| {
            PublishError::Missing(
                "page ID required (front matter confluence.page or --page)".to_owned(),
            )
        })
    }

    /// Local image files to upload, resolved against the document directory.
    ///
    /// Remote URIs and absolute paths are skipped. Each file appears once.
    #[must_use]
    pub fn attachments(&self) -> Vec<PathBuf> {
        let dir = self.source.parent().unwrap_or(Path::new(""));
        let mut files: Vec<PathBuf> = Vec::new();
        for destination in &self.destinations.images {
            if !is_local_destination(destination) {
                debug!("Skipping non-local image {destination}");
                continue;
            }
            let path = dir.join(percent_decode_str(destination).decode_utf8_lossy().as_ref());
            if !files.contains(&path) {
                files.push(path);
            }
        }
        files
    }

    /// Write the rendered markup to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Io`] if the file cannot be written.
    pub fn write_markup(&self, path: &Path) -> Result<(), PublishError> {
        std::fs::write(path, &self.markup)?;
        Ok(())
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Whether a destination names a file relative to the document.
///
/// Absolute URIs (anything with a scheme) and absolute paths are not local.
pub(crate) fn is_local_destination(destination: &str) -> bool {
    if destination.is_empty() || destination.starts_with('/') || destination.starts_with('#') {
        return false;
    }
    !has_scheme(destination)
}

/// `scheme ":"` prefix as in RFC 3986: a letter followed by letters, digits,
/// `+`, `-` or `.`.
fn has_scheme(destination: &str) -> bool {
    let Some((scheme, _)) = destination.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// MIME type sent with an attachment, by file extension.
pub(crate) fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use md2cfl_meta::MetadataError;
    use md2cfl_renderer::{RenderError, RenderFlags};
    use pretty_assertions::assert_eq;

    const DOC: &str = "---
title: Guide
tags: [docs, howto]
confluence:
  base: https://wiki.example.com
  page: \"42\"
---
# Setup

{{% note %}}Install it.{{% /note %}}

![diagram](img/flow%20chart.png) ![logo](https://cdn.example.com/logo.png)
![root](/static/x.png) ![again](img/flow%20chart.png)

See [the FAQ](faq.md).
";

    fn config() -> PublishConfig {
        PublishConfig {
            default_format: Format::Wiki,
            flags: RenderFlags::NONE,
        }
    }

    fn prepare(input: &str, options: &PublishOptions) -> Result<PreparedPage, PublishError> {
        PreparedPage::prepare(Path::new("docs/guide.md"), input, &config(), options)
    }

    #[test]
    fn test_prepare_reads_front_matter() {
        let page = prepare(DOC, &PublishOptions::default()).unwrap();
        assert_eq!(page.base_url.as_deref(), Some("https://wiki.example.com"));
        assert_eq!(page.page_id.as_deref(), Some("42"));
        assert_eq!(page.title.as_deref(), Some("Guide"));
        assert_eq!(page.format, Format::Wiki);
        assert_eq!(page.labels, vec!["docs", "howto"]);
        assert!(page.markup.starts_with("h1. Setup\n\nInstall it.\n\n"));
        assert_eq!(page.destinations.links, vec!["faq.md"]);
    }

    #[test]
    fn test_front_matter_wins_over_options() {
        let options = PublishOptions {
            page_id: Some("7".to_owned()),
            title: Some("CLI title".to_owned()),
            message: None,
        };
        let page = prepare(DOC, &options).unwrap();
        assert_eq!(page.page_id.as_deref(), Some("42"));
        assert_eq!(page.title.as_deref(), Some("Guide"));
    }

    #[test]
    fn test_options_fill_missing_fields() {
        let options = PublishOptions {
            page_id: Some("7".to_owned()),
            title: Some("CLI title".to_owned()),
            message: None,
        };
        let page = prepare("---\n---\nbody\n", &options).unwrap();
        assert_eq!(page.page_id.as_deref(), Some("7"));
        assert_eq!(page.title.as_deref(), Some("CLI title"));
        assert!(page.base_url.is_none());
    }

    #[test]
    fn test_missing_page_id() {
        let page = prepare("---\ntitle: x\n---\nbody\n", &PublishOptions::default()).unwrap();
        assert!(page.title.is_some());
        assert!(matches!(
            page.require_page_id(),
            Err(PublishError::Missing(_))
        ));
    }

    #[test]
    fn test_front_matter_selects_storage_format() {
        let page = prepare(
            "---\nconfluence:\n  format: xml\n---\nhello\n",
            &PublishOptions::default(),
        )
        .unwrap();
        assert_eq!(page.format, Format::Storage);
        assert_eq!(page.markup, "<p>hello</p>\n");
    }

    #[test]
    fn test_unknown_format() {
        let err = prepare(
            "---\nconfluence:\n  format: html\n---\nhello\n",
            &PublishOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PublishError::Render(RenderError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_missing_front_matter_fails_before_rendering() {
        let err = prepare("# No preamble\n", &PublishOptions::default()).unwrap_err();
        assert!(matches!(err, PublishError::Metadata(MetadataError::Missing)));
    }

    #[test]
    fn test_attachments_are_local_and_unique() {
        let page = prepare(DOC, &PublishOptions::default()).unwrap();
        assert_eq!(
            page.destinations.images,
            vec![
                "img/flow%20chart.png",
                "https://cdn.example.com/logo.png",
                "/static/x.png",
                "img/flow%20chart.png",
            ]
        );
        assert_eq!(
            page.attachments(),
            vec![PathBuf::from("docs/img/flow chart.png")]
        );
    }

    #[test]
    fn test_is_local_destination() {
        assert!(is_local_destination("a.png"));
        assert!(is_local_destination("../shared/a.png"));
        assert!(is_local_destination("dir/a:b.png"));
        assert!(!is_local_destination("http://x/b.png"));
        assert!(!is_local_destination("data:image/png;base64,AAAA"));
        assert!(!is_local_destination("/abs/a.png"));
        assert!(!is_local_destination("#anchor"));
        assert!(!is_local_destination(""));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.svg")), "image/svg+xml");
        assert_eq!(content_type_for(Path::new("a")), "application/octet-stream");
    }

    #[test]
    fn test_load_and_write_markup() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("page.md");
        std::fs::write(&source, "---\ntitle: T\n---\nhello\n").unwrap();

        let page =
            PreparedPage::load(&source, &config(), &PublishOptions::default()).unwrap();
        let output = dir.path().join("page.wiki");
        page.write_markup(&output).unwrap();

        assert_eq!(std::fs::read_to_string(output).unwrap(), "hello\n\n");
    }
}
