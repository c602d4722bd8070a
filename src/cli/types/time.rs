//! Season and week types with their validation rules.

use crate::error::{FeedError, Result};
use crate::DEFAULT_SEASON;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A competition season, always a 4-digit year.
///
/// # Examples
///
/// ```rust
/// use nfl_feeds::Season;
///
/// let season: Season = "2021".parse().unwrap();
/// assert_eq!(season.as_u16(), 2021);
/// assert!("21".parse::<Season>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(u16);

impl Season {
    pub fn new(year: u16) -> Result<Self> {
        Self::try_from(i64::from(year))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(DEFAULT_SEASON)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Season {
    type Error = FeedError;

    fn try_from(year: i64) -> Result<Self> {
        if (1000..=9999).contains(&year) {
            Ok(Self(year as u16))
        } else {
            Err(FeedError::InvalidSeason {
                value: year.to_string(),
            })
        }
    }
}

impl FromStr for Season {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FeedError::InvalidSeason {
                value: s.to_string(),
            });
        }
        Self::try_from(s.parse::<i64>().map_err(|_| FeedError::InvalidSeason {
            value: s.to_string(),
        })?)
    }
}

/// Seasons as a caller supplies them: one year or an explicit list.
///
/// Entries are unvalidated until [`SeasonParam::normalize`] runs, which
/// happens before any request URL is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeasonParam {
    Single(i64),
    List(Vec<i64>),
}

impl SeasonParam {
    /// Validate every entry and return the seasons in request order with
    /// repeats removed.
    pub fn normalize(&self) -> Result<Vec<Season>> {
        let years: &[i64] = match self {
            SeasonParam::Single(year) => std::slice::from_ref(year),
            SeasonParam::List(years) => years,
        };

        let mut seasons: Vec<Season> = Vec::with_capacity(years.len());
        for &year in years {
            let season = Season::try_from(year)?;
            if !seasons.contains(&season) {
                seasons.push(season);
            }
        }
        Ok(seasons)
    }

    /// Inclusive range of seasons.
    pub fn range(first: u16, last: u16) -> Self {
        SeasonParam::List((first..=last).map(i64::from).collect())
    }
}

impl Default for SeasonParam {
    fn default() -> Self {
        SeasonParam::Single(i64::from(DEFAULT_SEASON))
    }
}

impl From<i64> for SeasonParam {
    fn from(year: i64) -> Self {
        SeasonParam::Single(year)
    }
}

impl From<Vec<i64>> for SeasonParam {
    fn from(years: Vec<i64>) -> Self {
        SeasonParam::List(years)
    }
}

impl From<Season> for SeasonParam {
    fn from(season: Season) -> Self {
        SeasonParam::Single(i64::from(season.as_u16()))
    }
}

/// Accepts `2021`, `2019,2021` or `2016-2021`.
impl FromStr for SeasonParam {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some((first, last)) = s.split_once('-') {
            let first: Season = first.parse()?;
            let last: Season = last.parse()?;
            if first > last {
                return Err(FeedError::InvalidSeason {
                    value: s.to_string(),
                });
            }
            return Ok(SeasonParam::range(first.as_u16(), last.as_u16()));
        }

        if s.contains(',') {
            let years = s
                .split(',')
                .map(|part| part.parse::<Season>().map(|season| i64::from(season.as_u16())))
                .collect::<Result<Vec<_>>>()?;
            return Ok(SeasonParam::List(years));
        }

        let season: Season = s.parse()?;
        Ok(season.into())
    }
}

/// Week of a season, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Week(u16);

impl Week {
    pub fn new(week: u16) -> Result<Self> {
        if week == 0 {
            return Err(FeedError::InvalidWeek {
                value: week.to_string(),
            });
        }
        Ok(Self(week))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        let week = s.trim().parse::<u16>().map_err(|_| FeedError::InvalidWeek {
            value: s.to_string(),
        })?;
        Self::new(week)
    }
}

/// Inclusive list of weeks, parsed from `5` or `1-22`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weeks(pub Vec<Week>);

impl Weeks {
    pub fn range(first: u16, last: u16) -> Result<Self> {
        (first..=last).map(Week::new).collect::<Result<Vec<_>>>().map(Weeks)
    }

    pub fn as_slice(&self) -> &[Week] {
        &self.0
    }
}

impl FromStr for Weeks {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('-') {
            Some((first, last)) => {
                let first: Week = first.parse()?;
                let last: Week = last.parse()?;
                if first > last {
                    return Err(FeedError::InvalidWeek {
                        value: s.to_string(),
                    });
                }
                Weeks::range(first.as_u16(), last.as_u16())
            }
            None => Ok(Weeks(vec![s.parse()?])),
        }
    }
}
