//! Mapping of wallet errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::application::WalletError;
use crate::storage::StoreError;

/// Error returned by the HTTP handlers.
#[derive(Debug)]
pub struct ApiError(pub WalletError);

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            WalletError::InvalidAmount(_) | WalletError::InsufficientBalance { .. } => {
                StatusCode::BAD_REQUEST
            }
            WalletError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            WalletError::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match &self.0 {
            WalletError::InvalidAmount(_) => "VALIDATION_ERROR",
            WalletError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            WalletError::Store(StoreError::Conflict { .. }) => "CONFLICT",
            WalletError::Store(StoreError::Backend(_)) => "STORE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self.0 {
            WalletError::Store(StoreError::Backend(err)) => {
                error!(error = %format!("{err:#}"), "Ledger store failure");
                "Internal storage error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        });

        (self.status_code(), Json(body)).into_response()
    }
}
