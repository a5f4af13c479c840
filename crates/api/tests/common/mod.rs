#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use sagashelf_api::config::ServerConfig;
use sagashelf_api::router::build_app_router;
use sagashelf_api::state::AppState;
use sagashelf_sgdb::{SgdbClient, SgdbConfig};
use sagashelf_store::{RecordStoreClient, RecordStoreConfig};

pub const SGDB_KEY: &str = "test-key";

/// Nothing listens on port 1; requests there fail at connect time.
pub const UNREACHABLE: &str = "http://127.0.0.1:1/api/v2";

/// Records held by the fake record store.
pub type FakeStore = Arc<Mutex<Vec<Value>>>;

// ---------------------------------------------------------------------------
// Fake record store
// ---------------------------------------------------------------------------

async fn store_list(State(store): State<FakeStore>) -> Json<Value> {
    Json(Value::Array(store.lock().unwrap().clone()))
}

async fn store_create(
    State(store): State<FakeStore>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut games = store.lock().unwrap();
    let next_id = games.iter().filter_map(|g| g["id"].as_i64()).max().unwrap_or(0) + 1;
    body["id"] = json!(next_id);
    games.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn store_replace(
    State(store): State<FakeStore>,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut games = store.lock().unwrap();
    let slot = games
        .iter_mut()
        .find(|g| g["id"] == json!(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    body["id"] = json!(id);
    *slot = body.clone();
    Ok(Json(body))
}

async fn store_remove(State(store): State<FakeStore>, Path(id): Path<i64>) -> StatusCode {
    let mut games = store.lock().unwrap();
    let before = games.len();
    games.retain(|g| g["id"] != json!(id));
    if games.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

/// Serve `games` from an in-process record store; returns its base URL.
pub async fn spawn_store(games: Value) -> (String, FakeStore) {
    let records = match games {
        Value::Array(records) => records,
        other => panic!("fake store expects an array, got {other}"),
    };
    let store: FakeStore = Arc::new(Mutex::new(records));

    let app = Router::new()
        .route("/games", routing::get(store_list).post(store_create))
        .route("/games/{id}", routing::put(store_replace).delete(store_remove))
        .with_state(Arc::clone(&store));

    (serve(app).await, store)
}

// ---------------------------------------------------------------------------
// Fake SteamGridDB
// ---------------------------------------------------------------------------

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer test-key")
}

async fn sgdb_search(headers: HeaderMap, Path(query): Path<String>) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, r#"{"success":false,"errors":["Unauthorized"]}"#)
            .into_response();
    }
    match query.as_str() {
        "teapot" => (StatusCode::IM_A_TEAPOT, "short and stout").into_response(),
        "nothing" => Json(json!({ "success": true, "data": [] })).into_response(),
        _ => Json(json!({
            "success": true,
            "data": [{ "id": 42, "name": query }, { "id": 7, "name": "Other" }]
        }))
        .into_response(),
    }
}

async fn sgdb_grids(headers: HeaderMap, Path(id): Path<u64>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id == 404 {
        return (StatusCode::NOT_FOUND, r#"{"success":false}"#).into_response();
    }
    Json(json!({
        "success": true,
        "data": [
            { "url": format!("https://cdn.example/{id}/a.png") },
            { "url": format!("https://cdn.example/{id}/b.png") }
        ]
    }))
    .into_response()
}

/// In-process SteamGridDB; returns the `/api/v2` base URL.
pub async fn spawn_sgdb() -> String {
    let app = Router::new()
        .route("/api/v2/search/autocomplete/{query}", routing::get(sgdb_search))
        .route("/api/v2/grids/game/{id}", routing::get(sgdb_grids));

    format!("{}/api/v2", serve(app).await)
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(sgdb_base_url: &str, sgdb_key: &str, store_url: Option<&str>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        sgdb: SgdbConfig::new(sgdb_key).with_base_url(sgdb_base_url),
        record_store: store_url.map(RecordStoreConfig::new),
    }
}

/// Build the application router for `config` through the same
/// [`build_app_router`] the binary uses.
pub fn build_app(config: ServerConfig) -> Router {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let sgdb = SgdbClient::with_client(http.clone(), config.sgdb.clone()).unwrap();
    let store = config
        .record_store
        .clone()
        .map(|c| RecordStoreClient::with_client(http, c));

    let state = AppState {
        config: Arc::new(config.clone()),
        sgdb,
        store,
    };
    build_app_router(state, &config)
}

/// App wired to a fake SteamGridDB and a fake store holding `games`.
pub async fn build_test_app(games: Value) -> (Router, FakeStore) {
    let sgdb = spawn_sgdb().await;
    let (store_url, store) = spawn_store(games).await;
    let app = build_app(test_config(&sgdb, SGDB_KEY, Some(&store_url)));
    (app, store)
}

/// App wired to a fake SteamGridDB and no record store.
pub async fn build_proxy_app() -> Router {
    let sgdb = spawn_sgdb().await;
    build_app(test_config(&sgdb, SGDB_KEY, None))
}

/// Three games, two sagas spelled differently, one without saga.
pub fn zelda_collection() -> Value {
    json!([
        { "id": 1, "title": "Zelda", "saga": "the legend of zelda" },
        { "id": 2, "title": "Link's Awakening", "saga": "THE LEGEND OF ZELDA" },
        { "id": 3, "title": "Tetris" }
    ])
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
