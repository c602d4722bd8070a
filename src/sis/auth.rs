//! OAuth client-credentials exchange for the SIS API.

use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    config::{resolve_credential, SIS_CLIENT_ID_ENV_VAR, SIS_CLIENT_SECRET_ENV_VAR},
    FeedError, Result,
};

pub const SIS_AUTH_URL: &str = "https://auth.sportsinfosolutions.com/connect/token";
pub const SIS_BASE_URL: &str = "https://api.sportsinfosolutions.com";

const PROVIDER: &str = "SIS";

/// Connection settings for the SIS API.
#[derive(Debug, Clone)]
pub struct SisConfig {
    pub auth_url: String,
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
}

impl SisConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            auth_url: SIS_AUTH_URL.to_string(),
            base_url: SIS_BASE_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Resolve credentials from explicit values, then `T33C_ID` and
    /// `T33API_KEY`.
    pub fn resolve(client_id: Option<String>, client_secret: Option<String>) -> Result<Self> {
        let client_id = resolve_credential(client_id, "Client id", SIS_CLIENT_ID_ENV_VAR)?;
        let client_secret =
            resolve_credential(client_secret, "Client secret", SIS_CLIENT_SECRET_ENV_VAR)?;
        Ok(Self::new(client_id, client_secret))
    }

    /// Point both endpoints at another host, e.g. a mock server.
    pub fn with_urls(mut self, auth_url: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange the client credentials for a bearer token.
///
/// Any non-success status or a body without `access_token` fails with
/// [`FeedError::Authentication`].
pub async fn request_access_token(client: &Client, config: &SisConfig) -> Result<String> {
    let form = [
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("grant_type", "client_credentials"),
        ("scope", "sisapi"),
    ];

    let response = client.post(&config.auth_url).form(&form).send().await?;
    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "did not connect to SIS");
        return Err(FeedError::Authentication {
            provider: PROVIDER.to_string(),
            message: format!("token endpoint returned {}", status),
        });
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| FeedError::Authentication {
            provider: PROVIDER.to_string(),
            message: format!("malformed token response: {}", e),
        })?;

    info!("connected to SIS");
    Ok(token.access_token)
}
