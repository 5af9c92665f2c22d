//! `md2cfl render` command implementation.

use std::path::PathBuf;

use clap::Args;
use md2cfl_confluence::{PreparedPage, PublishConfig, PublishOptions};

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// Output format when front matter names none: wiki or xml (overrides config).
    #[arg(short, long)]
    format: Option<String>,

    /// Write the markup to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the document cannot be rendered.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();

        let config = global.load_config(self.format)?;
        let publish_config = PublishConfig::from_render_config(&config.render)?;
        let page = PreparedPage::load(
            &self.markdown_file,
            &publish_config,
            &PublishOptions::default(),
        )?;

        match &self.output {
            Some(path) => {
                page.write_markup(path)?;
                output.success(&format!(
                    "Wrote {} markup to {}",
                    page.format,
                    path.display()
                ));
            }
            None => output.markup(&page.markup),
        }

        print_list(&output, "Images", &page.destinations.images);
        print_list(&output, "Links", &page.destinations.links);

        Ok(())
    }
}

fn print_list(output: &Output, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    output.info(&format!("\n{heading} ({}):", items.len()));
    for item in items {
        output.info(&format!("  -> {item}"));
    }
}
