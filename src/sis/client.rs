//! SIS REST client: endpoint helpers, season aggregation and the entry
//! points of the play-by-play joins.

use reqwest::{header::HeaderMap, Client};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    cli::types::{Season, SeasonParam, Week, Weeks},
    core::{
        cache::{FetchOutcome, RequestCache},
        http::{bearer_header_map, build_client, fetch_table},
        table::{decode_json_table, Table},
    },
    sis::{
        auth::{request_access_token, SisConfig},
        join::{build_play_by_play, build_play_by_play_advanced, RawTables},
    },
    Result, SIS_FIRST_SEASON, SIS_LAST_SEASON,
};

/// Resource paths. These are also the cache keys.
pub mod paths {
    use crate::cli::types::Season;

    pub const EVENT_TYPES: &str = "/api/v1/nfl/EventTypes";
    pub const PLAY_DESCRIPTIONS: &str = "/api/v1/nfl/game/playdescription";

    pub fn events(season: Season) -> String {
        format!("/api/v1/nfl/standard/events/{}/", season)
    }

    pub fn teams(season: Season) -> String {
        format!("/api/v1/nfl/seasons/{}/teams", season)
    }

    pub fn passing(season: Season) -> String {
        format!("/api/v1/nfl/standard/passing/{}/", season)
    }

    pub fn rushing(season: Season) -> String {
        format!("/api/v1/nfl/standard/rushing/{}", season)
    }

    pub fn receiving(season: Season) -> String {
        format!("/api/v1/nfl/standard/receiving/{}", season)
    }

    pub fn players(season: Season) -> String {
        format!("/api/v1/nfl/seasons/{}/players", season)
    }
}

/// Authenticated SIS client.
///
/// Owns its request cache and the raw tables accumulated by
/// [`SisClient::get_data`]. Requests run one at a time; methods that touch
/// the cache take `&mut self`, so one client cannot be driven from several
/// tasks at once.
pub struct SisClient {
    http: Client,
    headers: HeaderMap,
    base_url: String,
    cache: RequestCache,
    raw: Option<RawTables>,
}

impl SisClient {
    /// Authenticate and build a client. Fails if the token exchange fails.
    pub async fn connect(config: SisConfig) -> Result<Self> {
        let http = build_client()?;
        let token = request_access_token(&http, &config).await?;

        Ok(Self {
            headers: bearer_header_map(&token)?,
            http,
            base_url: config.base_url,
            cache: RequestCache::new(),
            raw: None,
        })
    }

    pub fn cache(&self) -> &RequestCache {
        &self.cache
    }

    /// Drop every cached response. Raw tables already built are kept.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Raw tables from the last [`SisClient::get_data`], if it ran.
    pub fn raw_tables(&self) -> Option<&RawTables> {
        self.raw.as_ref()
    }

    /// Fetch one resource path through the cache.
    pub async fn endpoint(&mut self, path: &str) -> Result<FetchOutcome> {
        let url = format!("{}{}", self.base_url, path);
        let http = &self.http;
        let headers = &self.headers;
        self.cache
            .get_or_fetch(path, || fetch_table(http, &url, headers, decode_json_table))
            .await
    }

    pub async fn event_types(&mut self) -> Result<FetchOutcome> {
        self.endpoint(paths::EVENT_TYPES).await
    }

    pub async fn play_descriptions(&mut self) -> Result<FetchOutcome> {
        self.endpoint(paths::PLAY_DESCRIPTIONS).await
    }

    pub async fn events(&mut self, season: Season) -> Result<FetchOutcome> {
        self.endpoint(&paths::events(season)).await
    }

    pub async fn teams(&mut self, season: Season) -> Result<FetchOutcome> {
        self.endpoint(&paths::teams(season)).await
    }

    pub async fn passing(&mut self, season: Season) -> Result<FetchOutcome> {
        self.endpoint(&paths::passing(season)).await
    }

    pub async fn rushing(&mut self, season: Season) -> Result<FetchOutcome> {
        self.endpoint(&paths::rushing(season)).await
    }

    pub async fn receiving(&mut self, season: Season) -> Result<FetchOutcome> {
        self.endpoint(&paths::receiving(season)).await
    }

    pub async fn players(&mut self, season: Season) -> Result<FetchOutcome> {
        self.endpoint(&paths::players(season)).await
    }

    /// Fetch every resource the joins need for `seasons` and replace the
    /// stored raw tables with the result.
    ///
    /// Event types and play descriptions are season-independent and fetched
    /// once. Per-season resources are appended in season order; empty or
    /// failed responses contribute nothing. Player rows are stamped with the
    /// season they were fetched for.
    pub async fn get_data(&mut self, seasons: &SeasonParam) -> Result<&RawTables> {
        let seasons = seasons.normalize()?;
        let mut raw = RawTables::default();

        accumulate(&mut raw.event_types, self.event_types().await?);
        accumulate(&mut raw.desc, self.play_descriptions().await?);

        for season in seasons {
            info!(%season, "loading SIS season");
            accumulate(&mut raw.pbp, self.events(season).await?);
            accumulate(&mut raw.teams, self.teams(season).await?);
            accumulate(&mut raw.passing, self.passing(season).await?);
            accumulate(&mut raw.rushing, self.rushing(season).await?);
            accumulate(&mut raw.receiving, self.receiving(season).await?);
            if let Some(players) = self.players(season).await?.into_table() {
                raw.players
                    .append(players.with_constant("season", json!(season.as_u16())));
            }
        }

        Ok(&*self.raw.insert(raw))
    }

    /// Fetch a templated path for every season (and week) and stack the
    /// results. See [`expand_template`] for the placeholder rules.
    pub async fn endpoint_cat(
        &mut self,
        template: &str,
        seasons: &SeasonParam,
        weeks: &Weeks,
    ) -> Result<Table> {
        let seasons = seasons.normalize()?;
        let mut out = Table::default();
        for path in expand_template(template, &seasons, weeks.as_slice()) {
            accumulate(&mut out, self.endpoint(&path).await?);
        }
        Ok(out)
    }

    /// Compact play-by-play. Loads the default seasons first if nothing has
    /// been fetched yet.
    pub async fn get_pbp(&mut self) -> Result<Table> {
        let raw = self.ensure_raw_tables().await?;
        Ok(build_play_by_play(raw))
    }

    /// Advanced play-by-play. Loads the default seasons first if nothing has
    /// been fetched yet.
    pub async fn get_pbp_advanced(&mut self) -> Result<Table> {
        let raw = self.ensure_raw_tables().await?;
        Ok(build_play_by_play_advanced(raw))
    }

    async fn ensure_raw_tables(&mut self) -> Result<&RawTables> {
        if self.raw.is_none() {
            info!("raw tables not loaded, fetching default seasons");
            self.get_data(&default_seasons()).await?;
        }
        Ok(&*self.raw.get_or_insert_with(RawTables::default))
    }
}

/// Seasons fetched when a join runs before any explicit load.
pub fn default_seasons() -> SeasonParam {
    SeasonParam::range(SIS_FIRST_SEASON, SIS_LAST_SEASON)
}

/// Weeks iterated by [`SisClient::endpoint_cat`] when none are given.
pub fn default_weeks() -> Weeks {
    Weeks((1..=22).filter_map(|w| Week::new(w).ok()).collect())
}

/// Expand `{season}` and `{week}` placeholders into concrete paths.
///
/// With both placeholders the result is season-major (every week of the
/// first season, then the next season). With one placeholder only that
/// dimension is iterated. A template without placeholders is returned once.
pub fn expand_template(template: &str, seasons: &[Season], weeks: &[Week]) -> Vec<String> {
    let seasonal = template.contains("{season}");
    let weekly = template.contains("{week}");

    match (seasonal, weekly) {
        (true, true) => seasons
            .iter()
            .flat_map(|season| {
                let with_season = template.replace("{season}", &season.to_string());
                weeks
                    .iter()
                    .map(move |week| with_season.replace("{week}", &week.to_string()))
            })
            .collect(),
        (true, false) => seasons
            .iter()
            .map(|season| template.replace("{season}", &season.to_string()))
            .collect(),
        (false, true) => weeks
            .iter()
            .map(|week| template.replace("{week}", &week.to_string()))
            .collect(),
        (false, false) => {
            warn!(%template, "no season or week placeholder to iterate");
            vec![template.to_string()]
        }
    }
}

fn accumulate(target: &mut Table, outcome: FetchOutcome) {
    if let Some(table) = outcome.into_table() {
        target.append(table);
    }
}
