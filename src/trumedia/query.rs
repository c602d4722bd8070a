//! Custom-query request shaping for the TruMedia API.
//!
//! A [`QueryRequest`] carries the semantic parameters (seasons, season
//! types, columns, stat event, extra filters). [`build_query_urls`]
//! validates them and expands them into one URL per season and season type.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;

use crate::{
    cli::types::{Columns, Season, SeasonParam, SeasonType},
    FeedError, Result,
};

/// Stat event requested by player play queries when none is given.
pub const DEFAULT_PLAY_STAT_EVENT: &str = "Snaps";

/// Custom queries the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryName {
    PlayerGames,
    PlayerPlays,
    PlayerSeasons,
    TeamGames,
    TeamPlays,
    TeamSeasons,
}

impl QueryName {
    pub const ALL: [QueryName; 6] = [
        QueryName::PlayerGames,
        QueryName::PlayerPlays,
        QueryName::PlayerSeasons,
        QueryName::TeamGames,
        QueryName::TeamPlays,
        QueryName::TeamSeasons,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryName::PlayerGames => "PlayerGames",
            QueryName::PlayerPlays => "PlayerPlays",
            QueryName::PlayerSeasons => "PlayerSeasons",
            QueryName::TeamGames => "TeamGames",
            QueryName::TeamPlays => "TeamPlays",
            QueryName::TeamSeasons => "TeamSeasons",
        }
    }

    /// Columns always reported alongside the requested ones.
    pub fn auxiliary_columns(&self) -> &'static [&'static str] {
        match self {
            QueryName::PlayerGames => &["Position", "GameStatus"],
            QueryName::PlayerSeasons | QueryName::PlayerPlays => &["Position"],
            _ => &[],
        }
    }

    pub fn default_stat_event(&self) -> Option<&'static str> {
        match self {
            QueryName::PlayerPlays => Some(DEFAULT_PLAY_STAT_EVENT),
            _ => None,
        }
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryName {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        QueryName::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| FeedError::InvalidQuery {
                name: s.to_string(),
            })
    }
}

/// Extra `key=value` query parameter passed through to the API.
///
/// Both halves are percent-encoded when the URL is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    pub key: String,
    pub value: String,
}

impl QueryFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let value = value.into();
        if key.is_empty() || key.contains('=') {
            return Err(FeedError::InvalidFilter {
                value: format!("{}={}", key, value),
            });
        }
        Ok(Self { key, value })
    }
}

impl FromStr for QueryFilter {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((key, value)) => QueryFilter::new(key.trim(), value.trim()),
            None => Err(FeedError::InvalidFilter {
                value: s.to_string(),
            }),
        }
    }
}

/// Parameters of one custom query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub seasons: SeasonParam,
    /// `None` leaves the season type out of the URL, i.e. every phase.
    pub season_types: Option<Vec<SeasonType>>,
    pub columns: Columns,
    pub stat_event: Option<String>,
    pub filters: Vec<QueryFilter>,
}

impl QueryRequest {
    /// Default season, every season type, no stat event or filters.
    pub fn new(columns: Columns) -> Self {
        Self {
            seasons: SeasonParam::default(),
            season_types: None,
            columns,
            stat_event: None,
            filters: Vec::new(),
        }
    }

    pub fn seasons(mut self, seasons: impl Into<SeasonParam>) -> Self {
        self.seasons = seasons.into();
        self
    }

    pub fn season_types(mut self, season_types: Vec<SeasonType>) -> Self {
        self.season_types = Some(season_types);
        self
    }

    pub fn stat_event(mut self, event: impl Into<String>) -> Self {
        self.stat_event = Some(event.into());
        self
    }

    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.filters.push(filter);
        self
    }
}

/// Validated parameters shared by every URL of one query.
struct Resolved<'a> {
    seasons: Vec<Season>,
    season_types: Vec<Option<SeasonType>>,
    columns: String,
    stat_event: Option<&'a str>,
}

fn resolve<'a>(query: QueryName, request: &'a QueryRequest) -> Result<Resolved<'a>> {
    let seasons = request.seasons.normalize()?;
    let columns = request
        .columns
        .clone()
        .with_auxiliary(query.auxiliary_columns())
        .render()?;
    let stat_event = request
        .stat_event
        .as_deref()
        .or_else(|| query.default_stat_event());

    let season_types = match &request.season_types {
        Some(types) if !types.is_empty() => {
            let mut unique: Vec<SeasonType> = Vec::with_capacity(types.len());
            for st in types {
                if !unique.contains(st) {
                    unique.push(*st);
                }
            }
            unique.into_iter().map(Some).collect()
        }
        _ => vec![None],
    };

    Ok(Resolved {
        seasons,
        season_types,
        columns,
        stat_event,
    })
}

/// Check every parameter of `request` without building any URL.
pub fn validate_request(query: QueryName, request: &QueryRequest) -> Result<()> {
    resolve(query, request).map(|_| ())
}

/// Validate `request` and expand it into request URLs.
///
/// URLs are ordered season-major, then by season type. Every parameter is
/// checked before the first URL is produced, so a bad season or empty
/// column list never reaches the network. Parameter values are
/// percent-encoded, so a value can never add or override another parameter.
pub fn build_query_urls(
    base_url: &str,
    token: &str,
    query: QueryName,
    request: &QueryRequest,
) -> Result<Vec<String>> {
    let resolved = resolve(query, request)?;
    let endpoint = format!("{}/v1/nflapi/customQuery/{}.csv", base_url, query);
    let base = Url::parse(&endpoint).map_err(|e| FeedError::InvalidUrl {
        url: endpoint.clone(),
        message: e.to_string(),
    })?;
    let stat_event = resolved.stat_event.map(|event| format!("[{}]", event));

    let mut urls = Vec::with_capacity(resolved.seasons.len() * resolved.season_types.len());
    for season in &resolved.seasons {
        for season_type in &resolved.season_types {
            let mut url = base.clone();
            {
                let mut pairs = url.query_pairs_mut();
                pairs
                    .append_pair("token", token)
                    .append_pair("seasonYear", &season.to_string());
                if let Some(st) = season_type {
                    pairs.append_pair("seasonType", st.as_str());
                }
                pairs.append_pair("columns", &resolved.columns);
                if let Some(event) = &stat_event {
                    pairs.append_pair("statEvent", event);
                }
                for filter in &request.filters {
                    pairs.append_pair(&filter.key, &filter.value);
                }
            }
            urls.push(url.into());
        }
    }
    Ok(urls)
}
