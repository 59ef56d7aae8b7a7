//! Boundary checks run by callers (CLI, HTTP) before invoking the wallet.
//!
//! `WalletService::deposit` and `WalletService::withdraw` assume their amount
//! is non-negative and do not check it again.

use rust_decimal::Decimal;

use crate::domain::{Amount, Deposit, Withdrawal, format_amount};

use super::WalletError;

pub fn validate_deposit(amount: Amount) -> Result<Deposit, WalletError> {
    ensure_non_negative(amount)?;
    Ok(Deposit { amount })
}

pub fn validate_withdrawal(amount: Amount) -> Result<Withdrawal, WalletError> {
    ensure_non_negative(amount)?;
    Ok(Withdrawal { amount })
}

fn ensure_non_negative(amount: Amount) -> Result<(), WalletError> {
    if amount < Decimal::ZERO {
        return Err(WalletError::InvalidAmount(format!(
            "amount must not be negative, got {}",
            format_amount(amount)
        )));
    }
    Ok(())
}
