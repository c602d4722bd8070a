//! Column filter for custom-query requests.

use crate::error::{FeedError, Result};
use std::str::FromStr;

/// Requested columns, either already in the provider's bracketed syntax
/// (`"[Att],[Comp]"`) or as plain names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Columns {
    Formatted(String),
    List(Vec<String>),
}

impl Columns {
    pub fn list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Columns::List(names.into_iter().map(Into::into).collect())
    }

    /// Append auxiliary columns an endpoint always reports. Only plain lists
    /// are extended; a pre-formatted filter is sent as given.
    pub fn with_auxiliary(self, extra: &[&str]) -> Self {
        match self {
            Columns::List(mut names) => {
                for name in extra {
                    if !names.iter().any(|n| n == name) {
                        names.push(name.to_string());
                    }
                }
                Columns::List(names)
            }
            formatted => formatted,
        }
    }

    /// Render as `[Col1],[Col2],...`.
    pub fn render(&self) -> Result<String> {
        match self {
            Columns::Formatted(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            Columns::List(names) if !names.is_empty() => Ok(names
                .iter()
                .map(|n| format!("[{}]", n))
                .collect::<Vec<_>>()
                .join(",")),
            _ => Err(FeedError::InvalidColumns),
        }
    }
}

/// Bracketed input is kept verbatim; anything else is a comma-separated list.
impl FromStr for Columns {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FeedError::InvalidColumns);
        }
        if s.starts_with('[') {
            return Ok(Columns::Formatted(s.to_string()));
        }
        Ok(Columns::list(
            s.split(',').map(str::trim).filter(|c| !c.is_empty()),
        ))
    }
}
