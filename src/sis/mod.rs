//! Sports Info Solutions play-by-play and roster API
//!
//! - `auth`: client-credentials token exchange
//! - `client`: cached endpoint access and season aggregation
//! - `join`: reconciliation of the raw resources into play-by-play tables

pub mod auth;
pub mod client;
pub mod join;

pub use auth::SisConfig;
pub use client::SisClient;
pub use join::{build_play_by_play, build_play_by_play_advanced, RawTables};
