//! `md2cfl upload` command implementation.

use std::path::PathBuf;

use clap::Args;
use md2cfl_config::Config;
use md2cfl_confluence::{
    Auth, ConfluenceClient, DryRunResult, PagePublisher, PreparedPage, PublishConfig,
    PublishOptions, PublishResult,
};

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the upload command.
#[derive(Args)]
pub(crate) struct UploadArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// Confluence page ID to update when front matter has no `confluence.page`.
    #[arg(short = 'P', long)]
    page: Option<String>,

    /// Page title when front matter has no `title` (default: keep current title).
    #[arg(short, long)]
    title: Option<String>,

    /// Also write the rendered markup to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Version message for the update.
    #[arg(short, long)]
    message: Option<String>,

    /// Preview changes without updating Confluence.
    #[arg(long)]
    dry_run: bool,
}

impl UploadArgs {
    /// Execute the upload command.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be rendered or the update fails.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();

        let config = global.load_config(None)?;
        let publish_config = PublishConfig::from_render_config(&config.render)?;
        let options = PublishOptions {
            page_id: self.page,
            title: self.title,
            message: self.message,
        };

        output.info(&format!("Converting {}...", self.markdown_file.display()));
        let page = PreparedPage::load(&self.markdown_file, &publish_config, &options)?;

        if let Some(path) = &self.output {
            page.write_markup(path)?;
            output.info(&format!("Markup written to {}", path.display()));
        }

        let client = create_confluence_client(&config, &page, &output)?;
        let publisher = PagePublisher::new(&client);

        if self.dry_run {
            let result = publisher.dry_run(&page)?;
            print_dry_run_result(&output, &result);
        } else {
            let result = publisher.publish(&page, options.message.as_deref())?;
            print_publish_result(&output, &result);
        }

        Ok(())
    }
}

/// Build a client for the document's server.
///
/// The base URL comes from front matter, falling back to flags and config.
fn create_confluence_client(
    config: &Config,
    page: &PreparedPage,
    output: &Output,
) -> Result<ConfluenceClient, CliError> {
    let base_url = page
        .base_url
        .as_deref()
        .or(config.confluence.base_url.as_deref())
        .ok_or_else(|| {
            output.error("Error: Confluence base URL required");
            output.info("\nSet `confluence.base` in front matter, pass --base-url,");
            output.info("or add the following to your md2cfl.toml:");
            output.info("\n[confluence]");
            output.info(r#"base_url = "https://confluence.example.com""#);
            output.info(r#"token = "${CONFLUENCE_TOKEN}""#);
            CliError::Validation("Confluence base URL required".to_owned())
        })?;

    let credentials = config.confluence.credentials()?;
    Ok(ConfluenceClient::new(base_url, Auth::from(credentials)))
}

fn print_dry_run_result(output: &Output, result: &DryRunResult) {
    output.highlight("\n[DRY RUN] No changes made.");

    output.info(&format!("Title: {}", result.title));
    output.info(&format!(
        "Current page: \"{}\" (v{})",
        result.current_title, result.current_version
    ));
    output.info(&format!(
        "Body: {} bytes of {} markup",
        result.markup.len(),
        result.format
    ));

    if !result.attachments.is_empty() {
        output.info(&format!("\nAttachments ({}):", result.attachments.len()));
        for path in &result.attachments {
            let marker = if path.is_file() { "->" } else { "!!" };
            let action = if result.replaces_attachment(path) {
                "update"
            } else {
                "new"
            };
            output.info(&format!("  {marker} {} ({action})", path.display()));
        }
    }

    if !result.links.is_empty() {
        output.info(&format!("\nLinks ({}):", result.links.len()));
        for link in &result.links {
            output.info(&format!("  -> {link}"));
        }
    }

    if result.labels.is_empty() {
        output.success("\nNo labels would be added.");
    } else {
        output.info(&format!("\nLabels: {}", result.labels.join(", ")));
    }
}

fn print_publish_result(output: &Output, result: &PublishResult) {
    output.success("\nPage updated successfully!");
    output.info(&format!("ID: {}", result.page.id));
    output.info(&format!("Title: {}", result.page.title));
    output.info(&format!("Version: {}", result.page.version.number));
    output.info(&format!("URL: {}", result.url));

    if result.attachments_uploaded > 0 {
        output.info(&format!(
            "Attachments uploaded: {}",
            result.attachments_uploaded
        ));
    }

    if !result.labels.is_empty() {
        output.info(&format!("Labels: {}", result.labels.join(", ")));
    }

    if !result.attachment_failures.is_empty() {
        output.warning(&format!(
            "\nWarning: {} attachment(s) could not be uploaded:",
            result.attachment_failures.len()
        ));
        for (path, reason) in &result.attachment_failures {
            output.info(&format!("  - {}: {reason}", path.display()));
        }
    }
}
