// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use online_wallet::application::{WalletService, validate_deposit};
use online_wallet::domain::{Amount, Balance};
use online_wallet::storage::{MemoryStore, SqliteStore};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(WalletService<SqliteStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = WalletService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Path of the database file used by [`test_service`]
pub fn db_path(temp_dir: &TempDir) -> String {
    temp_dir.path().join("test.db").to_str().unwrap().to_string()
}

/// Fund the wallet with an opening deposit
pub async fn fund(service: &WalletService<SqliteStore>, amount: Amount) -> Result<Balance> {
    Ok(service.deposit(validate_deposit(amount)?).await?)
}

/// Memory-backed service sharing its store with the caller
pub fn memory_service(store: &MemoryStore) -> WalletService<Arc<MemoryStore>> {
    WalletService::new(Arc::new(store.clone()))
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
