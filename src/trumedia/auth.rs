//! Temporary session token exchange for the TruMedia API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    config::{resolve_credential, TRUMEDIA_EMAIL_ENV_VAR, TRUMEDIA_TOKEN_ENV_VAR},
    FeedError, Result,
};

pub const TM_TOKEN_URL: &str =
    "https://api.trumedianetworks.com/v1/siteadmin/api/createTempPBToken";
pub const TM_BASE_URL: &str = "https://api.trumedianetworks.com";
pub const TM_SITENAME: &str = "33rdteam";

const PROVIDER: &str = "TruMedia";

/// Connection settings for the TruMedia API.
#[derive(Debug, Clone)]
pub struct TmConfig {
    pub token_url: String,
    pub base_url: String,
    pub sitename: String,
    pub email: String,
    pub token: String,
}

impl TmConfig {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token_url: TM_TOKEN_URL.to_string(),
            base_url: TM_BASE_URL.to_string(),
            sitename: TM_SITENAME.to_string(),
            email: email.into(),
            token: token.into(),
        }
    }

    /// Resolve the login from explicit values, then `TRUMEDIA_EMAIL` and
    /// `TRUMEDIA_TOKEN`.
    pub fn resolve(email: Option<String>, token: Option<String>) -> Result<Self> {
        let email = resolve_credential(email, "Email", TRUMEDIA_EMAIL_ENV_VAR)?;
        let token = resolve_credential(token, "Token", TRUMEDIA_TOKEN_ENV_VAR)?;
        Ok(Self::new(email, token))
    }

    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None)
    }

    /// Point both endpoints at another host, e.g. a mock server.
    pub fn with_urls(mut self, token_url: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    sitename: &'a str,
    token: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(rename = "pbTempToken")]
    pb_temp_token: String,
}

/// Exchange the long-lived login for a session token.
pub async fn request_session_token(client: &Client, config: &TmConfig) -> Result<String> {
    let body = TokenRequest {
        username: &config.email,
        sitename: &config.sitename,
        token: &config.token,
    };

    let response = client.post(&config.token_url).json(&body).send().await?;
    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "did not connect to TruMedia");
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

    info!("connected to TruMedia");
    Ok(token.pb_temp_token)
}
