#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use pokedex_sources::RemoteApiAdapter;
use pokedex_sources::sources::LocalFileAdapter;

pub const INDEX_FILE: &str = "pockemons.json";

/// `mon01`, `mon02`, ... in index order.
pub fn names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("mon{:02}", i)).collect()
}

fn stats_json() -> Value {
    json!([
        {"base_stat": 40, "stat": {"name": "hp"}},
        {"base_stat": 50, "stat": {"name": "attack"}},
        {"base_stat": 45, "stat": {"name": "defense"}},
        {"base_stat": 60, "stat": {"name": "special-attack"}},
        {"base_stat": 55, "stat": {"name": "special-defense"}},
        {"base_stat": 70, "stat": {"name": "speed"}}
    ])
}

pub fn local_document(name: &str) -> Value {
    json!({
        "name": name,
        "height": 7,
        "weight": 69,
        "types": ["grass", "poison"],
        "stats": stats_json(),
        "sprites": {
            "front_default": format!("https://img.test/{name}.png"),
            "other": {
                "official-artwork": {"front_default": format!("https://img.test/art/{name}.png")}
            }
        }
    })
}

pub fn remote_document(name: &str) -> Value {
    json!({
        "id": 1,
        "name": name,
        "height": 7,
        "weight": 69,
        "types": [
            {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.test/type/12/"}},
            {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.test/type/4/"}}
        ],
        "stats": stats_json(),
        "sprites": {
            "front_default": format!("https://img.test/{name}.png"),
            "other": {
                "dream_world": {"front_default": format!("https://img.test/dream/{name}.svg")},
                "official-artwork": {"front_default": format!("https://img.test/art/{name}.png")}
            }
        }
    })
}

/// Writes an index of `names` plus one document per name, except those in
/// `missing`.
pub fn local_dataset(names: &[String], missing: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    write_local_dataset(dir.path(), names, missing);
    dir
}

pub fn write_local_dataset(dir: &Path, names: &[String], missing: &[&str]) {
    let index: Vec<Value> = names.iter().map(|n| json!({"name": n})).collect();
    fs::write(dir.join(INDEX_FILE), Value::Array(index).to_string()).expect("write index");
    for name in names {
        if missing.contains(&name.as_str()) {
            continue;
        }
        fs::write(
            dir.join(format!("{}.json", name.to_lowercase())),
            local_document(name).to_string(),
        )
        .expect("write document");
    }
}

pub fn local_adapter(dir: &Path) -> LocalFileAdapter {
    LocalFileAdapter::new(dir, INDEX_FILE)
}

pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("build client")
}

pub fn remote_adapter(base_url: &str) -> RemoteApiAdapter {
    RemoteApiAdapter::with_client(base_url, test_client())
}

struct StubData {
    base: String,
    names: Vec<String>,
    broken: Vec<String>,
    garbled: Vec<String>,
}

#[derive(Deserialize)]
struct Window {
    offset: Option<usize>,
    limit: Option<usize>,
}

async fn stub_list(State(data): State<Arc<StubData>>, Query(window): Query<Window>) -> Json<Value> {
    let offset = window.offset.unwrap_or(0);
    let limit = window.limit.unwrap_or(20);
    let count = data.names.len();
    let end = (offset + limit).min(count);
    let start = offset.min(count);
    let results: Vec<Value> = data.names[start..end]
        .iter()
        .map(|n| json!({"name": n, "url": format!("{}/pokemon/{}/", data.base, n)}))
        .collect();
    let next = (offset + limit < count)
        .then(|| format!("{}/pokemon?offset={}&limit={}", data.base, offset + limit, limit));
    let previous = (offset > 0).then(|| {
        format!(
            "{}/pokemon?offset={}&limit={}",
            data.base,
            offset.saturating_sub(limit),
            limit
        )
    });
    Json(json!({"count": count, "next": next, "previous": previous, "results": results}))
}

async fn stub_detail(State(data): State<Arc<StubData>>, UrlPath(name): UrlPath<String>) -> Response {
    let name = name.trim_end_matches('/').to_string();
    if data.broken.contains(&name) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if data.garbled.contains(&name) {
        return (StatusCode::OK, [("content-type", "application/json")], "{\"name\":").into_response();
    }
    if !data.names.contains(&name) {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }
    Json(remote_document(&name)).into_response()
}

/// Serves a PokeAPI-shaped stub on an ephemeral port and returns its base URL.
pub async fn spawn_pokeapi_stub(names: Vec<String>, broken: &[&str], garbled: &[&str]) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let base = format!("http://{}", listener.local_addr().expect("stub addr"));
    let data = Arc::new(StubData {
        base: base.clone(),
        names,
        broken: broken.iter().map(|s| s.to_string()).collect(),
        garbled: garbled.iter().map(|s| s.to_string()).collect(),
    });
    let app = Router::new()
        .route("/pokemon", get(stub_list))
        .route("/pokemon/{name}", get(stub_detail))
        .route("/pokemon/{name}/", get(stub_detail))
        .with_state(data);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    base
}
