//! Markup standard levels

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseLevelError;

/// Markup standard whose named reference table applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum Level {
    /// The five XML predefined entities
    Xml,
    /// HTML 4.01
    Html4,
    /// WHATWG HTML
    Html5,
    /// Alias for [`Level::Html5`]
    #[default]
    All,
}

impl Level {
    /// Resolve aliases to the level whose table is actually used
    pub fn resolve(self) -> Level {
        match self {
            Level::All => Level::Html5,
            level => level,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Xml => "xml",
            Level::Html4 => "html4",
            Level::Html5 => "html5",
            Level::All => "all",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Level::Xml, Level::Html4, Level::Html5, Level::All]
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}
