//! Per-render option bitset.

use std::ops::BitOr;

/// Rendering options selected once per render call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderFlags(u8);

impl RenderFlags {
    /// No options.
    pub const NONE: Self = Self(0);
    /// Render GitHub alert blockquotes as Confluence panel macros.
    pub const ADMONITIONS: Self = Self(1);
    /// Write wiki-markup text without escaping.
    pub const RAW_WIKI: Self = Self(1 << 1);

    /// Whether every bit of `other` is set.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set or clear the bits of `other`.
    #[must_use]
    pub fn with(self, other: Self, enabled: bool) -> Self {
        if enabled {
            Self(self.0 | other.0)
        } else {
            Self(self.0 & !other.0)
        }
    }
}

impl BitOr for RenderFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
