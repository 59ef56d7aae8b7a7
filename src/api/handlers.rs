//! Wallet and health endpoints.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::application::{validate_deposit, validate_withdrawal};
use crate::domain::{Amount, Balance};

use super::{ApiError, AppState};

/// Request body for a deposit.
#[derive(Debug, Deserialize, Serialize)]
pub struct DepositRequest {
    pub amount: Amount,
}

/// Request body for a withdrawal.
#[derive(Debug, Deserialize, Serialize)]
pub struct WithdrawalRequest {
    pub amount: Amount,
}

/// Balance returned by every wallet endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct BalanceResponse {
    pub amount: Amount,
}

impl From<Balance> for BalanceResponse {
    fn from(balance: Balance) -> Self {
        Self {
            amount: balance.amount,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn get_balance(State(state): State<AppState>) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.wallet.get_balance().await?;
    Ok(Json(balance.into()))
}

pub async fn deposit(
    State(state): State<AppState>,
    Json(request): Json<DepositRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let deposit = validate_deposit(request.amount)?;
    let balance = state.wallet.deposit(deposit).await?;
    Ok(Json(balance.into()))
}

pub async fn withdraw(
    State(state): State<AppState>,
    Json(request): Json<WithdrawalRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let withdrawal = validate_withdrawal(request.amount)?;
    let balance = state.wallet.withdraw(withdrawal).await?;
    Ok(Json(balance.into()))
}
