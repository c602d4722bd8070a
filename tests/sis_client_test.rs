//! Integration tests for the SIS client against a mock server

use nfl_feeds::{
    sis::{client::paths, SisClient, SisConfig},
    FeedError, FetchOutcome, Season, SeasonParam, Weeks,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path, path_regex},
    Mock, MockServer, ResponseTemplate,
};

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
        .mount(server)
        .await;
}

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn connect(server: &MockServer) -> SisClient {
    let config = SisConfig::new("id", "secret")
        .with_urls(format!("{}/connect/token", server.uri()), server.uri());
    SisClient::connect(config).await.unwrap()
}

fn season(year: u16) -> Season {
    Season::new(year).unwrap()
}

#[tokio::test]
async fn test_connect_fails_on_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let config = SisConfig::new("id", "wrong")
        .with_urls(format!("{}/connect/token", server.uri()), server.uri());
    let result = SisClient::connect(config).await;
    assert!(matches!(result, Err(FeedError::Authentication { .. })));
}

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path(paths::EVENT_TYPES))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"eventType": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = connect(&server).await;
    assert!(matches!(
        client.event_types().await.unwrap(),
        FetchOutcome::Loaded(_)
    ));
}

#[tokio::test]
async fn test_cache_fetches_each_path_once() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path(paths::EVENT_TYPES))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"eventType": 1, "descr": "Pass"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = connect(&server).await;
    let first = client.event_types().await.unwrap();
    let second = client.event_types().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(client.cache().len(), 1);
    assert!(client.cache().contains(paths::EVENT_TYPES));
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path(paths::EVENT_TYPES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"eventType": 1}])))
        .expect(2)
        .mount(&server)
        .await;

    let mut client = connect(&server).await;
    client.event_types().await.unwrap();
    client.clear_cache();
    assert!(client.cache().is_empty());
    client.event_types().await.unwrap();
}

#[tokio::test]
async fn test_empty_and_failed_results_are_fetched_once() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path(paths::teams(season(2021))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(paths::players(season(2021))))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = connect(&server).await;
    assert_eq!(client.teams(season(2021)).await.unwrap(), FetchOutcome::Empty);
    assert_eq!(client.teams(season(2021)).await.unwrap(), FetchOutcome::Empty);

    for _ in 0..3 {
        let failed = client.players(season(2021)).await.unwrap();
        assert_eq!(failed, FetchOutcome::Failed { status: 500 });
    }
    assert_eq!(client.cache().len(), 2);
}

#[tokio::test]
async fn test_failed_endpoint_refetched_only_after_clear() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path(paths::EVENT_TYPES))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let mut client = connect(&server).await;
    for _ in 0..3 {
        client.endpoint(paths::EVENT_TYPES).await.unwrap();
    }
    client.clear_cache();
    client.endpoint(paths::EVENT_TYPES).await.unwrap();
}

#[tokio::test]
async fn test_endpoint_cat_skips_empty_weeks() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_json(
        &server,
        "/api/v1/nfl/standard/events/2021/1",
        json!([{"gameId": 1, "eventId": 1}, {"gameId": 1, "eventId": 2}]),
    )
    .await;
    mount_json(&server, "/api/v1/nfl/standard/events/2021/2", json!([])).await;
    mount_json(
        &server,
        "/api/v1/nfl/standard/events/2021/3",
        json!({"data": [{"gameId": 3, "eventId": 1}]}),
    )
    .await;

    let mut client = connect(&server).await;
    let table = client
        .endpoint_cat(
            "/api/v1/nfl/standard/events/{season}/{week}",
            &SeasonParam::Single(2021),
            &Weeks::range(1, 3).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.columns(), ["gameId", "eventId"]);
    assert_eq!(table.get(2, "gameId"), Some(&json!(3)));
}

#[tokio::test]
async fn test_get_data_stamps_player_season() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    for year in [2020, 2021] {
        mount_json(
            &server,
            &paths::players(season(year)),
            json!({"data": [{"playerId": 900, "fullName": "Mac Jones"}]}),
        )
        .await;
    }

    let mut client = connect(&server).await;
    let raw = client
        .get_data(&SeasonParam::List(vec![2020, 2021]))
        .await
        .unwrap();

    assert_eq!(raw.players.len(), 2);
    assert_eq!(raw.players.get(0, "season"), Some(&json!(2020)));
    assert_eq!(raw.players.get(1, "season"), Some(&json!(2021)));
    assert!(raw.pbp.is_empty());
}

#[tokio::test]
async fn test_get_data_rejects_bad_season_without_fetching() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = connect(&server).await;
    let result = client.get_data(&SeasonParam::List(vec![2021, 21])).await;
    assert!(matches!(result, Err(FeedError::InvalidSeason { .. })));
    assert!(client.raw_tables().is_none());
}

#[tokio::test]
async fn test_get_pbp_end_to_end() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    let s = season(2021);
    mount_json(
        &server,
        paths::EVENT_TYPES,
        json!([{"eventType": 1, "descr": "Pass"}]),
    )
    .await;
    mount_json(
        &server,
        paths::PLAY_DESCRIPTIONS,
        json!([{"gameId": 100, "eventId": 1, "extraNote": "Jones pass to Meyers"}]),
    )
    .await;
    mount_json(
        &server,
        &paths::events(s),
        json!([{
            "season": 2021, "week": 1, "gameId": 100, "eventId": 1, "eventType": 1,
            "offensiveTeamId": 5, "defensiveTeamId": 6, "homeTeamId": 5
        }]),
    )
    .await;
    mount_json(
        &server,
        &paths::teams(s),
        json!([
            {"season": 2021, "teamId": 5, "abbr": "NE"},
            {"season": 2021, "teamId": 6, "abbr": "BUF"}
        ]),
    )
    .await;
    mount_json(
        &server,
        &paths::passing(s),
        json!([{
            "season": 2021, "week": 1, "gameId": 100, "eventId": 1, "playerId": 900,
            "completed": 1, "intercepted": 0, "yards": 12, "throwDepth": 8
        }]),
    )
    .await;
    mount_json(&server, &paths::rushing(s), json!([])).await;
    mount_json(
        &server,
        &paths::receiving(s),
        json!([{"season": 2021, "week": 1, "gameId": 100, "eventId": 1, "playerId": 910}]),
    )
    .await;
    mount_json(
        &server,
        &paths::players(s),
        json!([
            {"playerId": 900, "fullName": "Mac Jones"},
            {"playerId": 910, "fullName": "Jakobi Meyers"}
        ]),
    )
    .await;

    let mut client = connect(&server).await;
    client.get_data(&SeasonParam::Single(2021)).await.unwrap();
    let pbp = client.get_pbp().await.unwrap();

    assert_eq!(pbp.len(), 1);
    assert_eq!(pbp.get(0, "eventType"), Some(&json!("Pass")));
    assert_eq!(pbp.get(0, "offTeamAbbr"), Some(&json!("NE")));
    assert_eq!(pbp.get(0, "defTeamAbbr"), Some(&json!("BUF")));
    assert_eq!(pbp.get(0, "homeTeamAbbr"), Some(&json!("NE")));
    assert_eq!(pbp.get(0, "playDesc"), Some(&json!("Jones pass to Meyers")));
    assert_eq!(pbp.get(0, "passYards"), Some(&json!(12)));
    assert_eq!(pbp.get(0, "rushYards"), Some(&Value::Null));
    assert_eq!(pbp.get(0, "qbName"), Some(&json!("Mac Jones")));
    assert_eq!(pbp.get(0, "receiverName"), Some(&json!("Jakobi Meyers")));
    assert!(!pbp.has_column("offensiveTeamId"));
    assert!(!pbp.has_column("qbId"));

    let advanced = client.get_pbp_advanced().await.unwrap();
    assert_eq!(advanced.len(), 1);
    assert_eq!(advanced.get(0, "qbName"), Some(&json!("Mac Jones")));
}

#[tokio::test]
async fn test_get_pbp_loads_default_seasons_first() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/v1/nfl/standard/events/\d{4}/$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(6)
        .mount(&server)
        .await;

    let mut client = connect(&server).await;
    assert!(client.raw_tables().is_none());
    let pbp = client.get_pbp().await.unwrap();

    assert!(pbp.is_empty());
    assert!(client.raw_tables().is_some());
    assert!(client.cache().contains(&paths::events(season(2016))));
    assert!(client.cache().contains(&paths::events(season(2021))));
}
