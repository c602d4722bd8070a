//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use nfl_feeds::{
    cli::{Commands, NflFeeds, SisCmd},
    commands::{
        sis::{handle_sis_endpoint, handle_sis_pbp, EndpointParams, PbpParams},
        trumedia::{handle_tm_query, TmQueryParams},
    },
    sis::SisConfig,
    trumedia::TmConfig,
};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nfl_feeds=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let app = NflFeeds::parse();

    match app.command {
        Commands::Sis { cmd } => match cmd {
            SisCmd::Pbp {
                credentials,
                season,
                advanced,
                output,
            } => {
                let config = SisConfig::resolve(credentials.client_id, credentials.client_secret)?;
                handle_sis_pbp(
                    config,
                    PbpParams {
                        seasons: season,
                        advanced,
                        as_json: output.json,
                    },
                )
                .await?
            }

            SisCmd::Endpoint {
                credentials,
                template,
                season,
                week,
                output,
            } => {
                let config = SisConfig::resolve(credentials.client_id, credentials.client_secret)?;
                handle_sis_endpoint(
                    config,
                    EndpointParams {
                        template,
                        seasons: season,
                        weeks: week,
                        as_json: output.json,
                    },
                )
                .await?
            }
        },

        Commands::Tm {
            credentials,
            query,
            cols,
            season,
            season_types,
            stat_event,
            filters,
            dry_run,
            output,
        } => {
            let config = TmConfig::resolve(credentials.email, credentials.token)?;
            handle_tm_query(
                config,
                TmQueryParams {
                    query,
                    columns: cols,
                    seasons: season,
                    season_types,
                    stat_event,
                    filters,
                    dry_run,
                    as_json: output.json,
                },
            )
            .await?
        }
    }

    Ok(())
}
