//! Confluence integration for md2cfl.
//!
//! This crate provides:
//! - [`ConfluenceClient`]: REST API client with basic, bearer token or Crowd
//!   cookie authentication
//! - [`PreparedPage`] and [`PagePublisher`]: render a Markdown document and
//!   push it to its page with attachments and labels
//!
//! # API Client
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use md2cfl_confluence::{Auth, ConfluenceClient};
//!
//! let client = ConfluenceClient::new(
//!     "https://confluence.example.com",
//!     Auth::Basic {
//!         username: "alice".to_owned(),
//!         password: "secret".to_owned(),
//!     },
//! );
//!
//! let page = client.get_page("123", &["body.storage"])?;
//! println!("Page title: {}", page.title);
//! # Ok(())
//! # }
//! ```

// Authentication
mod auth;
pub use auth::Auth;

// API client
mod client;
pub use client::ConfluenceClient;

// Types (exposed via result structs)
pub mod types;

// Publishing workflow
pub mod publisher;
pub use publisher::{
    DryRunResult, PagePublisher, PreparedPage, PublishConfig, PublishError, PublishOptions,
    PublishResult,
};

// Errors
pub mod error;
pub use error::ConfluenceError;
