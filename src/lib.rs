//! NFL Data Feeds Library
//!
//! Clients for two NFL statistics APIs, with an in-memory request cache and
//! the joins that turn raw play-by-play resources into one row per play.
//!
//! ## Providers
//!
//! - **Sports Info Solutions** ([`sis`]): OAuth client credentials, JSON
//!   resources per season and week, and the play-by-play join engine
//! - **TruMedia** ([`trumedia`]): temporary session token, custom CSV
//!   queries built from seasons, season types, columns and filters
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nfl_feeds::{sis::{SisClient, SisConfig}, SeasonParam};
//!
//! # async fn example() -> nfl_feeds::Result<()> {
//! // Credentials from T33C_ID / T33API_KEY
//! let mut client = SisClient::connect(SisConfig::resolve(None, None)?).await?;
//! client.get_data(&SeasonParam::range(2020, 2021)).await?;
//! let pbp = client.get_pbp().await?;
//! println!("{} plays", pbp.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export T33C_ID=...          # SIS client id
//! export T33API_KEY=...       # SIS client secret
//! export TRUMEDIA_EMAIL=...
//! export TRUMEDIA_TOKEN=...
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod sis;
pub mod trumedia;

// Re-export commonly used types
pub use cli::types::{Columns, Season, SeasonParam, SeasonType, Week, Weeks};
pub use core::{FetchOutcome, RequestCache, Table};
pub use error::{FeedError, Result};

/// Season used when none is given.
pub const DEFAULT_SEASON: u16 = 2023;

/// First and last season loaded by the SIS joins when nothing was fetched.
pub const SIS_FIRST_SEASON: u16 = 2016;
pub const SIS_LAST_SEASON: u16 = 2021;
