//! Integration tests for the TruMedia client against a mock server

use nfl_feeds::{
    trumedia::{QueryFilter, QueryName, QueryRequest, TmClient, TmConfig},
    Columns, FeedError, SeasonType,
};
use reqwest::Url;
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const TOKEN_PATH: &str = "/v1/siteadmin/api/createTempPBToken";

async fn connect(server: &MockServer) -> TmClient {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pbTempToken": "sess"})))
        .mount(server)
        .await;

    let config = TmConfig::new("me@example.com", "long-lived")
        .with_urls(format!("{}{}", server.uri(), TOKEN_PATH), server.uri());
    TmClient::connect(config).await.unwrap()
}

fn csv(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

#[tokio::test]
async fn test_connect_fails_without_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "bad token"})))
        .mount(&server)
        .await;

    let config = TmConfig::new("me@example.com", "nope")
        .with_urls(format!("{}{}", server.uri(), TOKEN_PATH), server.uri());
    assert!(matches!(
        TmClient::connect(config).await,
        Err(FeedError::Authentication { .. })
    ));
}

#[tokio::test]
async fn test_player_games_request_and_decode() {
    let server = MockServer::start().await;
    let mut client = connect(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/nflapi/customQuery/PlayerGames.csv"))
        .and(query_param("token", "sess"))
        .and(query_param("seasonYear", "2021"))
        .and(query_param("seasonType", "REG"))
        .and(query_param("columns", "[Att],[Position],[GameStatus]"))
        .respond_with(csv(
            "playerId,fullName,Att,Position,GameStatus\n\
             900,Mac Jones,35,QB,Active\n\
             901,Brian Hoyer,,QB,Inactive\n",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let request = QueryRequest::new(Columns::list(["Att"]))
        .seasons(2021_i64)
        .season_types(vec![SeasonType::Reg]);
    let table = client.player_games(&request).await.unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0, "Att"), Some(&json!(35)));
    assert_eq!(table.get(1, "Att"), Some(&json!(null)));
    assert_eq!(table.get(1, "GameStatus"), Some(&json!("Inactive")));
}

#[tokio::test]
async fn test_query_is_cached_by_url() {
    let server = MockServer::start().await;
    let mut client = connect(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/nflapi/customQuery/TeamSeasons.csv"))
        .respond_with(csv("team,PsYds\nNE,3800\n"))
        .expect(2)
        .mount(&server)
        .await;

    let request = QueryRequest::new(Columns::list(["PsYds"])).seasons(2021_i64);
    let first = client.team_seasons(&request).await.unwrap();
    let second = client.team_seasons(&request).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(client.cache().len(), 1);

    client.clear_cache();
    client.team_seasons(&request).await.unwrap();
}

#[tokio::test]
async fn test_query_stacks_seasons_and_skips_empty() {
    let server = MockServer::start().await;
    let mut client = connect(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/nflapi/customQuery/TeamGames.csv"))
        .and(query_param("seasonYear", "2019"))
        .respond_with(csv("team,gameId\nNE,1\n"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/nflapi/customQuery/TeamGames.csv"))
        .and(query_param("seasonYear", "2020"))
        .respond_with(csv(""))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/nflapi/customQuery/TeamGames.csv"))
        .and(query_param("seasonYear", "2021"))
        .respond_with(csv("team,gameId\nBUF,3\n"))
        .mount(&server)
        .await;

    let request = QueryRequest::new(Columns::list(["gameId"])).seasons(vec![2019_i64, 2020, 2021]);
    let table = client.team_games(&request).await.unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0, "team"), Some(&json!("NE")));
    assert_eq!(table.get(1, "team"), Some(&json!("BUF")));
}

#[tokio::test]
async fn test_failed_query_contributes_nothing() {
    let server = MockServer::start().await;
    let mut client = connect(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/nflapi/customQuery/TeamPlays.csv"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let request = QueryRequest::new(Columns::list(["Yds"])).seasons(2021_i64);
    let table = client.team_plays(&request).await.unwrap();
    assert!(table.is_empty());
    assert_eq!(client.cache().len(), 1);

    let again = client.team_plays(&request).await.unwrap();
    assert!(again.is_empty());
}

#[tokio::test]
async fn test_player_plays_defaults_to_snaps() {
    let server = MockServer::start().await;
    let mut client = connect(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/nflapi/customQuery/PlayerPlays.csv"))
        .and(query_param("statEvent", "[Snaps]"))
        .and(query_param("gameId", "2021090900"))
        .respond_with(csv("playerId,Position\n900,QB\n"))
        .expect(1)
        .mount(&server)
        .await;

    let request = QueryRequest::new(Columns::list(["playerId"]))
        .seasons(2021_i64)
        .filter(QueryFilter::new("gameId", "2021090900").unwrap());
    let table = client.player_plays(&request).await.unwrap();
    assert_eq!(table.len(), 1);
}

#[tokio::test]
async fn test_validation_before_any_query() {
    let server = MockServer::start().await;
    let mut client = connect(&server).await;
    Mock::given(method("GET"))
        .respond_with(csv("a\n1\n"))
        .expect(0)
        .mount(&server)
        .await;

    let bad_season = QueryRequest::new(Columns::list(["Att"])).seasons(vec![2021_i64, 99]);
    assert!(matches!(
        client.player_seasons(&bad_season).await,
        Err(FeedError::InvalidSeason { .. })
    ));

    let ok = QueryRequest::new(Columns::list(["Att"]));
    assert!(matches!(
        client.custom("PlayerWeeks", &ok).await,
        Err(FeedError::InvalidQuery { .. })
    ));
}

#[tokio::test]
async fn test_plan_urls_does_not_fetch() {
    let server = MockServer::start().await;
    let client = connect(&server).await;
    Mock::given(method("GET"))
        .respond_with(csv("a\n1\n"))
        .expect(0)
        .mount(&server)
        .await;

    let request = QueryRequest::new(Columns::list(["Att"]))
        .seasons(2021_i64)
        .season_types(vec![SeasonType::Reg, SeasonType::Ply]);
    let urls = client.plan_urls(QueryName::PlayerSeasons, &request).unwrap();
    assert_eq!(urls.len(), 2);

    for (url, season_type) in urls.iter().zip(["REG", "PLY"]) {
        let url = Url::parse(url).unwrap();
        assert_eq!(url.path(), "/v1/nflapi/customQuery/PlayerSeasons.csv");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("token".to_string(), "sess".to_string()),
                ("seasonYear".to_string(), "2021".to_string()),
                ("seasonType".to_string(), season_type.to_string()),
                ("columns".to_string(), "[Att],[Position]".to_string()),
            ]
        );
    }
}

#[tokio::test]
async fn test_filter_values_are_sent_encoded() {
    let server = MockServer::start().await;
    let mut client = connect(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/nflapi/customQuery/PlayerPlays.csv"))
        .and(query_param("statEvent", "[Rec&gameId=1]"))
        .and(query_param("team", "NE#2"))
        .and(query_param("opp", "BUF"))
        .respond_with(csv("playerId,Position\n910,WR\n"))
        .expect(1)
        .mount(&server)
        .await;

    let request = QueryRequest::new(Columns::list(["playerId"]))
        .seasons(2021_i64)
        .stat_event("Rec&gameId=1")
        .filter("team=NE#2".parse().unwrap())
        .filter(QueryFilter::new("opp", "BUF").unwrap());
    let table = client.player_plays(&request).await.unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(0, "Position"), Some(&json!("WR")));
}
