//! SteamGridDB client tests against an in-process fake upstream.

use assert_matches::assert_matches;
use axum::extract::{Path, RawQuery};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use sagashelf_sgdb::{SgdbClient, SgdbConfig, SgdbError, SgdbGame, SgdbGrid};

const KEY: &str = "test-key";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer test-key")
}

async fn autocomplete(headers: HeaderMap, Path(query): Path<String>) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "success": false }))).into_response();
    }
    let data = if query == "nothing" {
        json!([])
    } else {
        json!([{ "id": 42, "name": format!("{query} (match)") }, { "id": 7, "name": "other" }])
    };
    Json(json!({ "success": true, "data": data })).into_response()
}

async fn grids(
    headers: HeaderMap,
    Path(id): Path<u64>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "success": true,
        "data": [
            { "url": format!("https://cdn.example/{id}/a.png") },
            { "url": format!("https://cdn.example/{id}/b.png?{}", query.unwrap_or_default()) }
        ]
    }))
    .into_response()
}

async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/api/v2/search/autocomplete/{query}", get(autocomplete))
        .route("/api/v2/grids/game/{id}", get(grids));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/v2")
}

fn client(base_url: String, key: &str) -> SgdbClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    SgdbClient::with_client(http, SgdbConfig::new(key).with_base_url(base_url)).unwrap()
}

#[tokio::test]
async fn search_raw_passes_body_through() {
    let sgdb = client(spawn_upstream().await, KEY);

    let response = sgdb.search_raw("half life").await.unwrap();

    assert_eq!(response.status, 200);
    let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["data"][0]["name"], "half life (match)");
}

#[tokio::test]
async fn search_games_decodes_hits() {
    let sgdb = client(spawn_upstream().await, KEY);

    let games = sgdb.search_games("zelda").await.unwrap();

    assert_eq!(
        games[0],
        SgdbGame {
            id: 42,
            name: "zelda (match)".into()
        }
    );
    assert_eq!(games.len(), 2);
}

#[tokio::test]
async fn grids_request_static_box_art() {
    let sgdb = client(spawn_upstream().await, KEY);

    let grids = sgdb.grids(12).await.unwrap();

    assert_eq!(grids[0].url, "https://cdn.example/12/a.png");
    assert!(grids[1].url.contains("dimensions=600x900%2C342x482"));
    assert!(grids[1].url.contains("types=static"));
    assert!(grids[1].url.contains("styles=alternate"));
}

#[tokio::test]
async fn suggest_covers_uses_first_hit() {
    let sgdb = client(spawn_upstream().await, KEY);

    let covers = sgdb.suggest_covers("portal").await.unwrap();

    assert_eq!(covers.len(), 2);
    assert!(covers.iter().all(|c: &SgdbGrid| c.url.contains("/42/")));
}

#[tokio::test]
async fn suggest_covers_without_hit_is_empty() {
    let sgdb = client(spawn_upstream().await, KEY);

    assert!(sgdb.suggest_covers("nothing").await.unwrap().is_empty());
}

#[tokio::test]
async fn wrong_key_surfaces_upstream_status() {
    let sgdb = client(spawn_upstream().await, "wrong");

    let raw = sgdb.search_raw("zelda").await.unwrap();
    assert_eq!(raw.status, 401);

    assert_matches!(
        sgdb.search_games("zelda").await,
        Err(SgdbError::Api { status: 401, .. })
    );
}

#[tokio::test]
async fn missing_key_fails_before_request() {
    let sgdb = client("http://127.0.0.1:1/api/v2".into(), "  ");

    assert!(!sgdb.has_api_key());
    assert_matches!(sgdb.search_raw("zelda").await, Err(SgdbError::MissingApiKey));
}
