//! Credential resolution.
//!
//! Explicit values always win; otherwise the process environment is read
//! once, when a client config is built. Nothing is reloaded afterwards.

use crate::{FeedError, Result};

/// SIS client id.
pub const SIS_CLIENT_ID_ENV_VAR: &str = "T33C_ID";
/// SIS API key, used as the OAuth client secret.
pub const SIS_CLIENT_SECRET_ENV_VAR: &str = "T33API_KEY";
/// TruMedia login email.
pub const TRUMEDIA_EMAIL_ENV_VAR: &str = "TRUMEDIA_EMAIL";
/// TruMedia long-lived access token.
pub const TRUMEDIA_TOKEN_ENV_VAR: &str = "TRUMEDIA_TOKEN";

/// Return `explicit` if given, else the value of `env_var`. Blank values
/// count as missing.
pub fn resolve_credential(explicit: Option<String>, name: &str, env_var: &str) -> Result<String> {
    explicit
        .or_else(|| std::env::var(env_var).ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| FeedError::MissingCredential {
            name: name.to_string(),
            env_var: env_var.to_string(),
        })
}
