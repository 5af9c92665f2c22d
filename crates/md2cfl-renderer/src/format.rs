//! Output format selection.

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

/// Markup dialect accepted by Confluence as a page body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Format {
    /// Line-oriented wiki markup.
    #[default]
    Wiki,
    /// XHTML storage format.
    Storage,
}

impl Format {
    /// Body representation name used by the REST API.
    #[must_use]
    pub fn representation(self) -> &'static str {
        match self {
            Self::Wiki => "wiki",
            Self::Storage => "storage",
        }
    }
}

impl FromStr for Format {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "wiki" => Ok(Self::Wiki),
            "xml" | "storage" => Ok(Self::Storage),
            _ => Err(RenderError::UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.representation())
    }
}
