use tracing::{debug, info, warn};

use crate::domain::{
    Balance, Deposit, LedgerError, Movement, Withdrawal, current_balance, format_amount,
    next_entry,
};
use crate::storage::{LedgerStore, SqliteStore, StoreError};

use super::WalletError;

/// The wallet balance engine.
///
/// Holds no state of its own: every operation reads the last ledger entry from
/// the store, derives the balance from it and, for mutations, appends exactly
/// one new entry.
pub struct WalletService<S> {
    store: S,
}

impl<S: LedgerStore> WalletService<S> {
    /// Create a new wallet service over the given ledger store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current balance, derived from the most recent entry.
    pub async fn get_balance(&self) -> Result<Balance, WalletError> {
        let last = self.store.last_entry().await?;
        let balance = current_balance(last.as_ref()).map_err(|err| {
            StoreError::Backend(anyhow::Error::new(err).context("Last wallet entry is unreadable"))
        })?;
        debug!(balance = %balance.amount, "Derived balance from last entry");
        Ok(balance)
    }

    /// Add funds. The amount is assumed to be non-negative.
    pub async fn deposit(&self, deposit: Deposit) -> Result<Balance, WalletError> {
        self.apply(Movement::Deposit(deposit.amount)).await
    }

    /// Take funds out. Fails with [`WalletError::InsufficientBalance`] when the
    /// amount exceeds the current balance, in which case nothing is appended.
    pub async fn withdraw(&self, withdrawal: Withdrawal) -> Result<Balance, WalletError> {
        self.apply(Movement::Withdrawal(withdrawal.amount)).await
    }

    async fn apply(&self, movement: Movement) -> Result<Balance, WalletError> {
        let last = self.store.last_entry().await?;

        let entry = match next_entry(last.as_ref(), movement) {
            Ok(entry) => entry,
            Err(LedgerError::InsufficientBalance { balance, requested }) => {
                warn!(
                    balance = %balance,
                    requested = %requested,
                    "Rejected withdrawal: insufficient balance"
                );
                return Err(WalletError::InsufficientBalance { balance, requested });
            }
            Err(err) => {
                warn!(error = %err, "Rejected movement");
                return Err(err.into());
            }
        };

        self.store.append_entry(&entry).await?;

        let balance = current_balance(Some(&entry))?;
        info!(
            sequence = entry.sequence,
            delta = %entry.amount,
            balance = %format_amount(balance.amount),
            "Appended wallet entry"
        );
        Ok(balance)
    }
}

impl WalletService<SqliteStore> {
    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, WalletError> {
        let store = SqliteStore::open(database_path)
            .await
            .map_err(StoreError::from)?;
        Ok(Self::new(store))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, WalletError> {
        let store = SqliteStore::connect(database_path)
            .await
            .map_err(StoreError::from)?;
        Ok(Self::new(store))
    }
}
