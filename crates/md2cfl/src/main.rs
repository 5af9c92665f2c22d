//! md2cfl CLI - Markdown to Confluence publisher.
//!
//! Provides commands for:
//! - `upload`: Render a markdown file and publish it to its Confluence page
//! - `render`: Render a markdown file locally without contacting Confluence

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GlobalArgs, RenderArgs, UploadArgs};
use output::Output;

/// md2cfl - Publish Markdown documents to Confluence.
#[derive(Parser)]
#[command(name = "md2cfl", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown file and update its Confluence page.
    Upload(UploadArgs),
    /// Render a markdown file to wiki or storage markup.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Upload(args) => args.execute(&cli.global),
        Commands::Render(args) => args.execute(&cli.global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "md2cfl",
            "upload",
            "doc.md",
            "-b",
            "https://wiki.example.com",
            "-u",
            "alice",
            "-v",
        ])
        .unwrap();
        assert_eq!(
            cli.global.base_url.as_deref(),
            Some("https://wiki.example.com")
        );
        assert_eq!(cli.global.username.as_deref(), Some("alice"));
        assert!(cli.global.verbose);
        assert!(matches!(cli.command, Commands::Upload(_)));
    }

    #[test]
    fn test_base_and_user_aliases() {
        let cli = Cli::try_parse_from([
            "md2cfl",
            "--base",
            "https://wiki.example.com",
            "--user",
            "bob",
            "render",
            "doc.md",
        ])
        .unwrap();
        assert_eq!(
            cli.global.base_url.as_deref(),
            Some("https://wiki.example.com")
        );
        assert_eq!(cli.global.username.as_deref(), Some("bob"));
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_render_requires_file() {
        assert!(Cli::try_parse_from(["md2cfl", "render"]).is_err());
    }
}
