//! SIS command implementations

use tracing::info;

use crate::{
    sis::{
        client::{default_seasons, default_weeks},
        SisClient, SisConfig,
    },
    Result, SeasonParam, Table, Weeks,
};

use super::print_table;

/// Parameters for the play-by-play command
#[derive(Debug)]
pub struct PbpParams {
    pub seasons: Option<SeasonParam>,
    pub advanced: bool,
    pub as_json: bool,
}

/// Parameters for the templated endpoint command
#[derive(Debug)]
pub struct EndpointParams {
    pub template: String,
    pub seasons: Option<SeasonParam>,
    pub weeks: Option<Weeks>,
    pub as_json: bool,
}

/// Load the requested seasons and build the joined play-by-play table.
///
/// Seasons are validated before authenticating.
pub async fn fetch_pbp(config: SisConfig, params: &PbpParams) -> Result<Table> {
    let seasons = params.seasons.clone().unwrap_or_else(default_seasons);
    seasons.normalize()?;

    let mut client = SisClient::connect(config).await?;
    client.get_data(&seasons).await?;

    let table = if params.advanced {
        client.get_pbp_advanced().await?
    } else {
        client.get_pbp().await?
    };
    info!(rows = table.len(), columns = table.columns().len(), "play-by-play built");
    Ok(table)
}

/// Fetch a templated endpoint across seasons and weeks.
pub async fn fetch_endpoint(config: SisConfig, params: &EndpointParams) -> Result<Table> {
    let seasons = params.seasons.clone().unwrap_or_else(default_seasons);
    seasons.normalize()?;
    let weeks = params.weeks.clone().unwrap_or_else(default_weeks);

    let mut client = SisClient::connect(config).await?;
    client.endpoint_cat(&params.template, &seasons, &weeks).await
}

/// Handle `sis pbp`
pub async fn handle_sis_pbp(config: SisConfig, params: PbpParams) -> Result<()> {
    let table = fetch_pbp(config, &params).await?;
    print_table(&table, params.as_json)
}

/// Handle `sis endpoint`
pub async fn handle_sis_endpoint(config: SisConfig, params: EndpointParams) -> Result<()> {
    let table = fetch_endpoint(config, &params).await?;
    print_table(&table, params.as_json)
}
