//! TruMedia custom-query client.

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use tracing::info;

use crate::{
    core::{
        cache::{FetchOutcome, RequestCache},
        http::{build_client, fetch_table, redact_token},
        table::{decode_csv_table, Table},
    },
    trumedia::{
        auth::{request_session_token, TmConfig},
        query::{build_query_urls, QueryName, QueryRequest},
    },
    Result,
};

/// Authenticated TruMedia client.
///
/// Every URL fetched is cached for the lifetime of the client. Methods that
/// touch the cache take `&mut self`, so one client cannot be driven from
/// several tasks at once.
pub struct TmClient {
    http: Client,
    headers: HeaderMap,
    base_url: String,
    token: String,
    cache: RequestCache,
}

impl TmClient {
    /// Exchange the login for a session token and build a client.
    pub async fn connect(config: TmConfig) -> Result<Self> {
        let http = build_client()?;
        let token = request_session_token(&http, &config).await?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/csv"));

        Ok(Self {
            http,
            headers,
            base_url: config.base_url,
            token,
            cache: RequestCache::new(),
        })
    }

    pub fn cache(&self) -> &RequestCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Request URLs `query` would fetch, without fetching them.
    pub fn plan_urls(&self, query: QueryName, request: &QueryRequest) -> Result<Vec<String>> {
        build_query_urls(&self.base_url, &self.token, query, request)
    }

    /// Fetch one URL through the cache. The full URL is the cache key.
    pub async fn fetch_url(&mut self, url: &str) -> Result<FetchOutcome> {
        let http = &self.http;
        let headers = &self.headers;
        self.cache
            .get_or_fetch(url, || fetch_table(http, url, headers, decode_csv_table))
            .await
    }

    /// Run `query` for every season and season type in `request` and stack
    /// the non-empty results in request order.
    pub async fn query(&mut self, query: QueryName, request: &QueryRequest) -> Result<Table> {
        let urls = self.plan_urls(query, request)?;
        let mut out = Table::default();
        for url in urls {
            info!(url = %redact_token(&url), "querying TruMedia");
            if let Some(table) = self.fetch_url(&url).await?.into_table() {
                out.append(table);
            }
        }
        Ok(out)
    }

    pub async fn team_games(&mut self, request: &QueryRequest) -> Result<Table> {
        self.query(QueryName::TeamGames, request).await
    }

    /// Player game logs. `Position` and `GameStatus` are always requested.
    pub async fn player_games(&mut self, request: &QueryRequest) -> Result<Table> {
        self.query(QueryName::PlayerGames, request).await
    }

    pub async fn team_seasons(&mut self, request: &QueryRequest) -> Result<Table> {
        self.query(QueryName::TeamSeasons, request).await
    }

    /// Player season totals. `Position` is always requested.
    pub async fn player_seasons(&mut self, request: &QueryRequest) -> Result<Table> {
        self.query(QueryName::PlayerSeasons, request).await
    }

    pub async fn team_plays(&mut self, request: &QueryRequest) -> Result<Table> {
        self.query(QueryName::TeamPlays, request).await
    }

    /// Player plays, filtered to the `Snaps` stat event unless another is set.
    pub async fn player_plays(&mut self, request: &QueryRequest) -> Result<Table> {
        self.query(QueryName::PlayerPlays, request).await
    }

    /// Any query by name, e.g. from user input.
    pub async fn custom(&mut self, query: &str, request: &QueryRequest) -> Result<Table> {
        let query: QueryName = query.parse()?;
        self.query(query, request).await
    }
}
