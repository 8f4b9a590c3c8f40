//! Integration tests for AppsScriptClient against a stub endpoint served by
//! axum on an ephemeral port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use storage::{AppsScriptClient, EndpointConfig, MatchStore, StorageError};
use types::{Format, GameScore, MatchRecord, PlayDraw, Recorded};

#[derive(Clone, Default)]
struct StubEndpoint {
    rows: Arc<Mutex<Vec<Value>>>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    canned: Arc<Mutex<Option<(StatusCode, String)>>>,
}

impl StubEndpoint {
    fn reply_with(&self, status: StatusCode, body: &str) {
        *self.canned.lock().unwrap() = Some((status, body.to_string()));
    }

    fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

async fn exec(
    State(stub): State<StubEndpoint>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    stub.requests.lock().unwrap().push(params.clone());
    if let Some(canned) = stub.canned.lock().unwrap().clone() {
        return canned;
    }

    let body = match params.get("action").map(String::as_str) {
        Some("getMatches") => {
            let rows = stub.rows.lock().unwrap().clone();
            json!({ "success": true, "data": rows })
        }
        Some("addMatch") => {
            let Some(row) = params
                .get("data")
                .and_then(|data| serde_json::from_str::<Value>(data).ok())
            else {
                return (
                    StatusCode::OK,
                    json!({ "success": false, "error": "missing data" }).to_string(),
                );
            };
            let mut rows = stub.rows.lock().unwrap();
            rows.push(row);
            json!({ "success": true, "row": rows.len() })
        }
        _ => json!({ "success": false, "error": "Unknown action" }),
    };
    (StatusCode::OK, body.to_string())
}

async fn spawn_stub(stub: StubEndpoint) -> AppsScriptClient {
    let app = Router::new().route("/exec", get(exec)).with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub endpoint");
    let port = listener.local_addr().expect("Stub has an address").port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = EndpointConfig::new(&format!("http://127.0.0.1:{port}/exec"))
        .expect("Stub url is valid");
    AppsScriptClient::new(config)
}

fn sample_record(player: &str) -> MatchRecord {
    MatchRecord {
        id: None,
        player: player.to_string(),
        opponent: "Bo".to_string(),
        format: Format::Modern.into(),
        player_deck: "Burn".to_string(),
        opponent_deck: "Control".to_string(),
        games: GameScore::new(2, 1).into(),
        play_draw: None,
        sideboard_status: None,
        date: NaiveDate::from_ymd_opt(2024, 5, 1),
    }
}

#[tokio::test]
async fn test_append_sends_record_as_query_json() {
    let stub = StubEndpoint::default();
    let client = spawn_stub(stub.clone()).await;

    let appended = client
        .append(&sample_record("Ann"))
        .await
        .expect("HTTP client reports failures as false");
    assert!(appended);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["action"], "addMatch");
    let sent: Value = serde_json::from_str(&requests[0]["data"]).unwrap();
    assert_eq!(
        sent,
        json!({
            "player": "Ann",
            "opponent": "Bo",
            "format": "Modern",
            "playerDeck": "Burn",
            "opponentDeck": "Control",
            "games": "2-1",
            "date": "2024-05-01"
        })
    );
}

#[tokio::test]
async fn test_fetch_all_returns_appended_records() {
    let stub = StubEndpoint::default();
    let client = spawn_stub(stub.clone()).await;

    let mut second = sample_record("Cy & Dee");
    second.play_draw = Some(PlayDraw::Play.into());
    assert!(client.append(&sample_record("Ann")).await.unwrap());
    assert!(client.append(&second).await.unwrap());

    let records = client.fetch_all().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].player, "Ann");
    assert_eq!(records[1].player, "Cy & Dee");
    assert_eq!(records[1].play_draw, Some(Recorded::Known(PlayDraw::Play)));
    assert_eq!(stub.requests().last().unwrap()["action"], "getMatches");
}

#[tokio::test]
async fn test_fetch_all_keeps_hand_edited_rows() {
    let stub = StubEndpoint::default();
    stub.rows.lock().unwrap().extend([
        json!({
            "id": 2,
            "player": "Cy",
            "opponent": "Dee",
            "format": "Legacy",
            "playerDeck": "Storm",
            "opponentDeck": "Delver",
            "games": "2024-02-01T08:00:00.000Z",
            "date": "2024-02-01T08:00:00.000Z"
        }),
        json!({
            "id": 3,
            "player": "Eve",
            "opponent": "Ann",
            "format": "Oathbreaker",
            "playerDeck": "Tokens",
            "opponentDeck": "Burn",
            "games": "1-2",
            "sideboardStatus": "Game 3"
        }),
    ]);
    let client = spawn_stub(stub.clone()).await;

    let records = client.fetch_all().await;
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].games,
        Recorded::Unrecognized("2024-02-01T08:00:00.000Z".to_string())
    );
    assert_eq!(records[1].id.as_deref(), Some("3"));
    assert_eq!(
        records[1].format,
        Recorded::Unrecognized("Oathbreaker".to_string())
    );
    assert_eq!(
        types::name_pool(&records),
        vec!["Ann", "Cy", "Dee", "Eve"]
    );
}

#[tokio::test]
async fn test_fetch_all_degrades_to_empty_on_bad_shapes() {
    let stub = StubEndpoint::default();
    let client = spawn_stub(stub.clone()).await;

    for body in [
        r#"{"success": false, "data": []}"#,
        r#"{"success": true}"#,
        r#"{"success": true, "data": "rows"}"#,
        r#"[{"player": "Ann"}]"#,
        "<html>Sign in</html>",
    ] {
        stub.reply_with(StatusCode::OK, body);
        assert!(client.fetch_all().await.is_empty(), "body {body:?}");
        assert!(matches!(
            client.try_fetch_all().await,
            Err(StorageError::UnexpectedShape(_))
        ));
    }
}

#[tokio::test]
async fn test_fetch_all_degrades_to_empty_on_http_error() {
    let stub = StubEndpoint::default();
    let client = spawn_stub(stub.clone()).await;
    stub.reply_with(StatusCode::INTERNAL_SERVER_ERROR, "boom");

    assert!(client.fetch_all().await.is_empty());
    assert!(matches!(
        client.try_fetch_all().await,
        Err(StorageError::Status(500))
    ));
}

#[tokio::test]
async fn test_append_reports_false_when_not_confirmed() {
    let stub = StubEndpoint::default();
    let client = spawn_stub(stub.clone()).await;

    stub.reply_with(StatusCode::OK, r#"{"success": false, "error": "Sheet locked"}"#);
    assert_eq!(client.append(&sample_record("Ann")).await.unwrap(), false);
    match client.try_append(&sample_record("Ann")).await {
        Err(StorageError::Rejected(reason)) => assert_eq!(reason, "Sheet locked"),
        other => panic!("expected rejection, got {other:?}"),
    }

    stub.reply_with(StatusCode::OK, r#"{"success": "true"}"#);
    assert_eq!(client.append(&sample_record("Ann")).await.unwrap(), false);

    stub.reply_with(StatusCode::NOT_FOUND, "");
    assert_eq!(client.append(&sample_record("Ann")).await.unwrap(), false);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_swallowed() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = EndpointConfig::new(&format!("http://127.0.0.1:{port}/exec")).unwrap();
    let client = AppsScriptClient::new(config);

    assert!(client.fetch_all().await.is_empty());
    assert_eq!(client.append(&sample_record("Ann")).await.unwrap(), false);
    assert!(matches!(
        client.try_fetch_all().await,
        Err(StorageError::Transport(_))
    ));
}
