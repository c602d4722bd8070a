//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use types::{Columns, SeasonParam, Weeks};

use crate::trumedia::{QueryFilter, QueryName};

/// Output format shared by every command
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output results as a JSON array of records instead of CSV.
    #[clap(long)]
    pub json: bool,
}

/// SIS credentials; each falls back to its environment variable.
#[derive(Debug, Args)]
pub struct SisCredentials {
    /// Client id (or set `T33C_ID`).
    #[clap(long)]
    pub client_id: Option<String>,

    /// Client secret (or set `T33API_KEY`).
    #[clap(long)]
    pub client_secret: Option<String>,
}

/// TruMedia login; each falls back to its environment variable.
#[derive(Debug, Args)]
pub struct TmCredentials {
    /// Login email (or set `TRUMEDIA_EMAIL`).
    #[clap(long)]
    pub email: Option<String>,

    /// Long-lived API token (or set `TRUMEDIA_TOKEN`).
    #[clap(long)]
    pub token: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum SisCmd {
    /// Build the joined play-by-play table.
    ///
    /// Fetches events, teams, descriptions, passing, rushing, receiving and
    /// players for every season, then resolves ids to names.
    Pbp {
        #[clap(flatten)]
        credentials: SisCredentials,

        /// Seasons: `2021`, `2019,2021` or `2016-2021` (default 2016-2021).
        #[clap(long, short)]
        season: Option<SeasonParam>,

        /// Join the full stat tables instead of the curated columns.
        #[clap(long)]
        advanced: bool,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Fetch a templated endpoint for every season and week and stack the results.
    Endpoint {
        #[clap(flatten)]
        credentials: SisCredentials,

        /// Path with `{season}` and/or `{week}` placeholders,
        /// e.g. `/api/v1/nfl/standard/events/{season}/{week}`.
        template: String,

        /// Seasons: `2021`, `2019,2021` or `2016-2021` (default 2016-2021).
        #[clap(long, short)]
        season: Option<SeasonParam>,

        /// Weeks: `5` or `1-22` (default 1-22).
        #[clap(long, short)]
        week: Option<Weeks>,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "nfl-feeds", about = "NFL data feeds CLI")]
pub struct NflFeeds {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sports Info Solutions play-by-play API
    Sis {
        #[clap(subcommand)]
        cmd: SisCmd,
    },

    /// Run a TruMedia custom query (PlayerGames, PlayerPlays, PlayerSeasons,
    /// TeamGames, TeamPlays or TeamSeasons).
    Tm {
        #[clap(flatten)]
        credentials: TmCredentials,

        /// Query name, e.g. `PlayerGames`.
        query: QueryName,

        /// Columns: `Att,Comp` or pre-formatted `[Att],[Comp]`.
        #[clap(long, short)]
        cols: Columns,

        /// Seasons: `2021`, `2019,2021` or `2016-2021` (default 2023).
        #[clap(long, short)]
        season: Option<SeasonParam>,

        /// Season type (repeatable): `-t REG -t PLY`. Omit for all.
        #[clap(long = "season-type", short = 't')]
        season_types: Vec<String>,

        /// Stat event filter, e.g. `Snaps`.
        #[clap(long)]
        stat_event: Option<String>,

        /// Extra query parameter (repeatable): `--filter gameId=123`.
        #[clap(long = "filter", short = 'f')]
        filters: Vec<QueryFilter>,

        /// Print the request URLs without fetching.
        #[clap(long)]
        dry_run: bool,

        #[clap(flatten)]
        output: OutputArgs,
    },
}
