//! Error types for the NFL feeds client

use thiserror::Error;


pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("{name} not provided and {env_var} environment variable not set")]
    MissingCredential { name: String, env_var: String },

    #[error("Authentication with {provider} failed: {message}")]
    Authentication { provider: String, message: String },

    #[error("Seasons provided are not in \"YYYY\" format: {value}")]
    InvalidSeason { value: String },

    #[error("Season type {value} not any of [\"REG\",\"PLY\",\"PRE\"]")]
    InvalidSeasonType { value: String },

    #[error("Invalid week: {value}")]
    InvalidWeek { value: String },

    #[error("{name} is not a valid query")]
    InvalidQuery { name: String },

    #[error("Please provide columns")]
    InvalidColumns,

    #[error("Invalid filter {value}, expected key=value")]
    InvalidFilter { value: String },

    #[error("Invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Could not decode response: {message}")]
    Decode { message: String },
}
