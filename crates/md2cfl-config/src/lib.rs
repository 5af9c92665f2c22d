//! Configuration management for md2cfl.
//!
//! Parses `md2cfl.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: everything under `[confluence]`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "md2cfl.toml";

/// Output format names accepted in `render.format`.
const FORMATS: [&str; 3] = ["wiki", "xml", "storage"];

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Confluence base URL.
    pub base_url: Option<String>,
    /// Override user name for basic authentication.
    pub username: Option<String>,
    /// Override password for basic authentication.
    pub password: Option<String>,
    /// Override personal access token.
    pub token: Option<String>,
    /// Override output format.
    pub format: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence connection settings.
    pub confluence: ConfluenceConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Confluence connection configuration.
///
/// Every field may be left out of the file and supplied on the command line
/// or by the document's front matter (`confluence.base`).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// Confluence server base URL.
    pub base_url: Option<String>,
    /// User name for basic authentication.
    pub username: Option<String>,
    /// Password for basic authentication.
    pub password: Option<String>,
    /// Personal access token, sent as a bearer token.
    pub token: Option<String>,
    /// Crowd SSO token, sent as the `studio.crowd.tokenkey` cookie.
    pub crowd_token: Option<String>,
}

/// Credentials selected from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    Token(String),
    CrowdToken(String),
}

impl ConfluenceConfig {
    /// Select credentials: token first, then crowd token, then user name and password.
    ///
    /// Empty strings count as unset, so `${VAR:-}` leaves a field out.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no complete credential set is configured.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        if let Some(token) = non_empty(self.token.as_ref()) {
            return Ok(Credentials::Token(token.clone()));
        }
        if let Some(token) = non_empty(self.crowd_token.as_ref()) {
            return Ok(Credentials::CrowdToken(token.clone()));
        }
        match (
            non_empty(self.username.as_ref()),
            non_empty(self.password.as_ref()),
        ) {
            (Some(username), Some(password)) => Ok(Credentials::Basic {
                username: username.clone(),
                password: password.clone(),
            }),
            (Some(_), None) => Err(ConfigError::Validation(
                "confluence.password cannot be empty when confluence.username is set".to_owned(),
            )),
            _ => Err(ConfigError::Validation(
                "Confluence credentials required: set confluence.token or \
                 confluence.username and confluence.password"
                    .to_owned(),
            )),
        }
    }

    /// Validate the fields that are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `base_url` is set but not an HTTP URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.base_url {
            require_non_empty(base_url, "confluence.base_url")?;
            require_http_url(base_url, "confluence.base_url")?;
        }
        Ok(())
    }
}

fn non_empty(value: Option<&String>) -> Option<&String> {
    value.filter(|v| !v.is_empty())
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Default output format when the front matter names none.
    pub format: String,
    /// Render GitHub alert blockquotes as panel macros.
    pub admonitions: bool,
    /// Write wiki text without escaping.
    pub raw_wiki: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: "wiki".to_owned(),
            admonitions: true,
            raw_wiki: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `md2cfl.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_config(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let confluence = &mut self.confluence;
        for (target, value) in [
            (&mut confluence.base_url, &settings.base_url),
            (&mut confluence.username, &settings.username),
            (&mut confluence.password, &settings.password),
            (&mut confluence.token, &settings.token),
        ] {
            if value.is_some() {
                target.clone_from(value);
            }
        }
        if let Some(format) = &settings.format {
            self.render.format.clone_from(format);
        }
    }

    /// Search for the config file in `start` and its parents.
    pub fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings. Credentials are checked lazily by
    /// [`ConfluenceConfig::credentials`], since `render` needs none.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.confluence.validate()?;

        let format = self.render.format.to_ascii_lowercase();
        if !FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "render.format must be one of {}, got `{}`",
                FORMATS.join(", "),
                self.render.format
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let confluence = &mut self.confluence;
        expand::expand_opt(&mut confluence.base_url, "confluence.base_url")?;
        expand::expand_opt(&mut confluence.username, "confluence.username")?;
        expand::expand_opt(&mut confluence.password, "confluence.password")?;
        expand::expand_opt(&mut confluence.token, "confluence.token")?;
        expand::expand_opt(&mut confluence.crowd_token, "confluence.crowd_token")?;
        Ok(())
    }
}
