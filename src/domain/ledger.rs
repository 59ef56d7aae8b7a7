use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{Amount, Balance, WalletEntry};

/// A requested change to the wallet balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Deposit(Amount),
    Withdrawal(Amount),
}

impl Movement {
    /// Signed delta this movement applies to the balance.
    pub fn delta(&self) -> Amount {
        match *self {
            Movement::Deposit(amount) => amount,
            // Keep zero unsigned so a no-op withdrawal stores "0", not "-0"
            Movement::Withdrawal(amount) if amount.is_zero() => Decimal::ZERO,
            Movement::Withdrawal(amount) => -amount,
        }
    }
}

/// Derive the balance from the most recent entry.
/// An empty ledger has a zero balance.
pub fn current_balance(last: Option<&WalletEntry>) -> Result<Balance, LedgerError> {
    let Some(entry) = last else {
        return Ok(Balance::zero());
    };

    entry
        .balance_after()
        .map(|amount| Balance { amount })
        .ok_or(LedgerError::AmountOverflow {
            balance: entry.balance_before,
            amount: entry.amount,
        })
}

/// Build the entry that applies `movement` on top of `last`.
///
/// Every entry the wallet appends goes through here, so no movement can
/// produce an entry whose resulting balance is negative.
pub fn next_entry(last: Option<&WalletEntry>, movement: Movement) -> Result<WalletEntry, LedgerError> {
    let balance_before = current_balance(last)?.amount;
    let delta = movement.delta();

    let balance_after = balance_before
        .checked_add(delta)
        .ok_or(LedgerError::AmountOverflow {
            balance: balance_before,
            amount: delta,
        })?;

    if balance_after < Decimal::ZERO {
        return Err(LedgerError::InsufficientBalance {
            balance: balance_before,
            requested: delta.abs(),
        });
    }

    let sequence = last.map(|entry| entry.sequence + 1).unwrap_or(1);

    Ok(WalletEntry::from_parts(
        Uuid::new_v4(),
        sequence,
        balance_before,
        delta,
        Utc::now(),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    InsufficientBalance { balance: Amount, requested: Amount },
    /// The resulting balance does not fit in an `Amount`
    AmountOverflow { balance: Amount, amount: Amount },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::InsufficientBalance { balance, requested } => {
                write!(
                    f,
                    "Withdrawal of {} exceeds current balance of {}",
                    requested, balance
                )
            }
            LedgerError::AmountOverflow { balance, amount } => {
                write!(f, "Amount {} overflows balance of {}", amount, balance)
            }
        }
    }
}

impl std::error::Error for LedgerError {}
