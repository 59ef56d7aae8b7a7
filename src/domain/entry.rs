use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

pub type EntryId = Uuid;

/// A wallet entry records one balance transition of the wallet.
/// Entries are immutable and only ever appended; the current balance is
/// derived from the most recent one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEntry {
    pub id: EntryId,
    /// 1-based position in the ledger, strictly increasing
    pub sequence: i64,
    /// Balance immediately before this entry was applied
    pub balance_before: Amount,
    /// Signed delta: positive for deposits, negative for withdrawals
    pub amount: Amount,
    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
}

impl WalletEntry {
    /// Rebuild an entry from its persisted parts. New entries are produced by
    /// [`super::next_entry`], which enforces the balance invariant.
    pub fn from_parts(
        id: EntryId,
        sequence: i64,
        balance_before: Amount,
        amount: Amount,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sequence,
            balance_before,
            amount,
            recorded_at,
        }
    }

    /// Balance once this entry is applied, or `None` if it is not representable.
    pub fn balance_after(&self) -> Option<Amount> {
        self.balance_before.checked_add(self.amount)
    }

    pub fn is_withdrawal(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// Current wallet balance, recomputed from the ledger on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub amount: Amount,
}

impl Balance {
    pub fn zero() -> Self {
        Self {
            amount: Decimal::ZERO,
        }
    }
}

/// Request to add funds. The amount is expected to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub amount: Amount,
}

/// Request to take funds out. The amount is expected to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub amount: Amount,
}
