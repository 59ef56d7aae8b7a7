//! HTTP boundary for the wallet.
//!
//! Handlers validate request amounts before calling the engine and map
//! [`WalletError`](crate::application::WalletError) onto status codes.

mod error;
mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::WalletService;
use crate::storage::SharedStore;

pub use error::ApiError;
pub use handlers::{BalanceResponse, DepositRequest, HealthResponse, WithdrawalRequest};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub wallet: Arc<WalletService<SharedStore>>,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        Self {
            wallet: Arc::new(WalletService::new(store)),
        }
    }
}

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/onlinewallet/balance", get(handlers::get_balance))
        .route("/onlinewallet/deposit", post(handlers::deposit))
        .route("/onlinewallet/withdraw", post(handlers::withdraw))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `host:port` and serve the wallet API until the process exits.
pub async fn serve(host: &str, port: u16, store: SharedStore) -> Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    let addr = listener.local_addr()?;
    info!(%addr, "Online wallet API listening");

    axum::serve(listener, create_router(AppState::new(store)))
        .await
        .context("HTTP server failed")?;
    Ok(())
}
