//! TruMedia command implementation

use crate::{
    cli::types::parse_season_types,
    trumedia::{validate_request, QueryFilter, QueryName, QueryRequest, TmClient, TmConfig},
    Columns, Result, SeasonParam, Table,
};

use super::print_table;

/// Parameters for the custom query command
#[derive(Debug)]
pub struct TmQueryParams {
    pub query: QueryName,
    pub columns: Columns,
    pub seasons: Option<SeasonParam>,
    pub season_types: Vec<String>,
    pub stat_event: Option<String>,
    pub filters: Vec<QueryFilter>,
    pub dry_run: bool,
    pub as_json: bool,
}

impl TmQueryParams {
    /// Validate the raw arguments into a request.
    pub fn to_request(&self) -> Result<QueryRequest> {
        let mut request = QueryRequest::new(self.columns.clone());
        if let Some(seasons) = &self.seasons {
            request = request.seasons(seasons.clone());
        }
        request.season_types = parse_season_types(&self.season_types)?;
        request.stat_event = self.stat_event.clone();
        request.filters = self.filters.clone();

        // Full validation pass before anything touches the network.
        validate_request(self.query, &request)?;
        Ok(request)
    }
}

/// Either the planned URLs (dry run) or the fetched table.
#[derive(Debug)]
pub enum TmOutput {
    Urls(Vec<String>),
    Table(Table),
}

pub async fn run_tm_query(config: TmConfig, params: &TmQueryParams) -> Result<TmOutput> {
    let request = params.to_request()?;
    let mut client = TmClient::connect(config).await?;

    if params.dry_run {
        return Ok(TmOutput::Urls(client.plan_urls(params.query, &request)?));
    }
    Ok(TmOutput::Table(client.query(params.query, &request).await?))
}

/// Handle `tm`
pub async fn handle_tm_query(config: TmConfig, params: TmQueryParams) -> Result<()> {
    match run_tm_query(config, &params).await? {
        TmOutput::Urls(urls) => {
            for url in urls {
                println!("{}", url);
            }
            Ok(())
        }
        TmOutput::Table(table) => print_table(&table, params.as_json),
    }
}
