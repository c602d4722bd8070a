//! HTTP utilities shared by both provider clients

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client,
};
use tracing::{info, warn};

use crate::{
    core::{cache::FetchOutcome, table::Table},
    Result,
};

const USER_AGENT: &str = concat!("nfl-feeds/", env!("CARGO_PKG_VERSION"));

/// Turns a response body into a table.
pub type Decoder = fn(&str) -> Result<Table>;

/// Build the HTTP client. No timeout or retry is configured; the transport
/// defaults apply.
pub fn build_client() -> Result<Client> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

/// Headers for bearer-token authenticated JSON requests.
pub fn bearer_header_map(token: &str) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token))?,
    );
    Ok(h)
}

/// GET `url`, decode the body and classify the result.
///
/// Non-success statuses become [`FetchOutcome::Failed`] and zero-row bodies
/// become [`FetchOutcome::Empty`]; both are logged rather than raised.
/// Transport and decoding errors are returned as errors.
pub async fn fetch_table(
    client: &Client,
    url: &str,
    headers: &HeaderMap,
    decode: Decoder,
) -> Result<FetchOutcome> {
    let response = client.get(url).headers(headers.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!(
            url = %redact_token(url),
            status = status.as_u16(),
            "access to endpoint failed"
        );
        return Ok(FetchOutcome::Failed {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let table = decode(&body)?;
    if table.is_empty() {
        info!(url = %redact_token(url), "endpoint yielded no results");
        return Ok(FetchOutcome::Empty);
    }

    Ok(FetchOutcome::Loaded(table))
}

/// Mask a `token=` query value so URLs can be logged.
pub fn redact_token(url: &str) -> String {
    let Some(start) = url.find("token=").map(|i| i + "token=".len()) else {
        return url.to_string();
    };
    let end = url[start..]
        .find('&')
        .map(|i| start + i)
        .unwrap_or(url.len());
    format!("{}***{}", &url[..start], &url[end..])
}
