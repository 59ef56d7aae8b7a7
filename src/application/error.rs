use thiserror::Error;

use crate::domain::{Amount, LedgerError};
use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Insufficient balance: balance {balance}, requested {requested}")]
    InsufficientBalance { balance: Amount, requested: Amount },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WalletError {
    pub fn is_insufficient_balance(&self) -> bool {
        matches!(self, WalletError::InsufficientBalance { .. })
    }
}

impl From<LedgerError> for WalletError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance { balance, requested } => {
                WalletError::InsufficientBalance { balance, requested }
            }
            LedgerError::AmountOverflow { .. } => WalletError::InvalidAmount(err.to_string()),
        }
    }
}
