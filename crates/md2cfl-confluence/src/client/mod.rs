//! Confluence REST API client.
//!
//! Provides sync HTTP client for Confluence Server/Data Center REST API
//! with basic, bearer token or Crowd cookie authentication.

mod attachments;
mod labels;
mod multipart;
mod pages;

use std::time::Duration;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use ureq::http::Response;
use ureq::{Agent, Body, RequestBuilder};

use crate::auth::Auth;
use crate::error::ConfluenceError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth: Auth,
}

impl ConfluenceClient {
    /// Create a client for the server at `base_url`.
    #[must_use]
    pub fn new(base_url: &str, auth: Auth) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth,
        }
    }

    /// Server base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// URL of a content item.
    fn content_url(&self, page_id: &str) -> String {
        format!("{}/content/{}", self.api_url(), encode(page_id))
    }

    /// Attach credentials and the JSON accept header.
    fn authorized<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        let (name, value) = self.auth.header();
        request
            .header(name, &value)
            .header("Accept", "application/json")
    }
}

/// Percent-encode a path segment or query value.
fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// Turn error statuses into errors and hand back the body otherwise.
fn check_status(response: Response<Body>) -> Result<Body, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status == 401 {
        return Err(ConfluenceError::Unauthorized);
    }
    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ConfluenceError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body_reader)
}
