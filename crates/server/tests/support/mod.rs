#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use server::routes;
use server::AppState;
use service::auth::AuthConfig;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub data_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}

/// App over a fresh temp data dir, pre-filled with `collections`.
pub async fn build_app(collections: &[(&str, Value)]) -> anyhow::Result<TestApp> {
    let data_dir = std::env::temp_dir().join(format!("rental_api_test_{}", Uuid::new_v4()));
    tokio::fs::create_dir_all(&data_dir).await?;
    for (name, records) in collections {
        let mut doc = serde_json::Map::new();
        doc.insert(name.to_string(), records.clone());
        tokio::fs::write(data_dir.join(format!("{name}.json")), serde_json::to_vec_pretty(&doc)?).await?;
    }
    let state = AppState::from_data_dir(
        &data_dir.to_string_lossy(),
        AuthConfig::new(TEST_SECRET, 3600),
    )
    .await?;
    let router = routes::build_router(state.clone());
    Ok(TestApp { router, state, data_dir })
}

pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

/// Send one request through the router; JSON bodies are parsed, others kept as text.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<Reply> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body)?).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let text = String::from_utf8_lossy(&bytes).to_string();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok(Reply { status, body, text })
}

/// The raw document currently on disk for `resource`.
pub async fn on_disk(app: &TestApp, resource: &str) -> anyhow::Result<Value> {
    let bytes = tokio::fs::read(app.data_dir.join(format!("{resource}.json"))).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
