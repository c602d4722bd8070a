//! TruMedia custom-query CSV API
//!
//! - `auth`: temporary session token exchange
//! - `query`: query names, request parameters and URL building
//! - `client`: cached query execution

pub mod auth;
pub mod client;
pub mod query;

pub use auth::TmConfig;
pub use client::TmClient;
pub use query::{build_query_urls, validate_request, QueryFilter, QueryName, QueryRequest};
