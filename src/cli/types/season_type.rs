//! Competition phase filter.

use crate::error::{FeedError, Result};
use std::fmt;
use std::str::FromStr;

/// Competition phase: regular season, preseason or playoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonType {
    Reg,
    Pre,
    Ply,
}

impl SeasonType {
    pub const ALL: [SeasonType; 3] = [SeasonType::Reg, SeasonType::Pre, SeasonType::Ply];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonType::Reg => "REG",
            SeasonType::Pre => "PRE",
            SeasonType::Ply => "PLY",
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeasonType {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "REG" => Ok(SeasonType::Reg),
            "PRE" => Ok(SeasonType::Pre),
            "PLY" => Ok(SeasonType::Ply),
            other => Err(FeedError::InvalidSeasonType {
                value: other.to_string(),
            }),
        }
    }
}

/// Validate raw season-type strings.
///
/// An empty input means "all phases" and yields `None`, which leaves the
/// season type out of the request entirely. Repeats are dropped, first
/// occurrence wins.
pub fn parse_season_types<S: AsRef<str>>(raw: &[S]) -> Result<Option<Vec<SeasonType>>> {
    if raw.is_empty() {
        return Ok(None);
    }

    let mut types: Vec<SeasonType> = Vec::with_capacity(raw.len());
    for value in raw {
        let season_type: SeasonType = value.as_ref().parse()?;
        if !types.contains(&season_type) {
            types.push(season_type);
        }
    }
    Ok(Some(types))
}
