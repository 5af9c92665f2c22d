//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod upload;

use std::path::PathBuf;

use clap::Args;
use md2cfl_config::{CliSettings, Config};
use tracing::debug;

use crate::error::CliError;

pub(crate) use render::RenderArgs;
pub(crate) use upload::UploadArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover md2cfl.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Confluence base URL (overrides config).
    #[arg(short, long, global = true, visible_alias = "base")]
    pub base_url: Option<String>,

    /// User name for basic authentication (overrides config).
    #[arg(short, long, global = true, visible_alias = "user")]
    pub username: Option<String>,

    /// Password for basic authentication (overrides config).
    #[arg(short, long, global = true, env = "CONFLUENCE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Personal access token, takes precedence over user name and password.
    #[arg(long, global = true, env = "CONFLUENCE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load configuration with the global flags applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or is invalid.
    pub(crate) fn load_config(&self, format: Option<String>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            token: self.token.clone(),
            format,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            debug!("Loaded configuration from {}", path.display());
        }
        Ok(config)
    }
}
