//! Request authentication.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use md2cfl_config::Credentials;

/// Cookie carrying a Crowd SSO token.
const CROWD_TOKEN_COOKIE: &str = "studio.crowd.tokenkey";

/// Authentication method attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// HTTP basic authentication.
    Basic { username: String, password: String },
    /// Personal access token.
    Bearer(String),
    /// Crowd SSO token cookie.
    CrowdToken(String),
}

impl Auth {
    /// Header name and value carrying the credentials.
    #[must_use]
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Self::Basic { username, password } => (
                "Authorization",
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}"))),
            ),
            Self::Bearer(token) => ("Authorization", format!("Bearer {token}")),
            Self::CrowdToken(token) => ("Cookie", format!("{CROWD_TOKEN_COOKIE}={token}")),
        }
    }
}

impl From<Credentials> for Auth {
    fn from(credentials: Credentials) -> Self {
        match credentials {
            Credentials::Basic { username, password } => Self::Basic { username, password },
            Credentials::Token(token) => Self::Bearer(token),
            Credentials::CrowdToken(token) => Self::CrowdToken(token),
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::Bearer(_) => f.write_str("Bearer(..)"),
            Self::CrowdToken(_) => f.write_str("CrowdToken(..)"),
        }
    }
}
