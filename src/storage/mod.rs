mod memory;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::WalletEntry;

pub use memory::*;
pub use sqlite::*;

/// SQL migration for the wallet entry ledger
pub const MIGRATION_001_WALLET_ENTRIES: &str = include_str!("migrations/001_wallet_entries.sql");

#[derive(Error, Debug)]
pub enum StoreError {
    /// The ledger moved on since the caller read its last entry.
    #[error("Ledger was modified concurrently: entry {sequence} is no longer next")]
    Conflict { sequence: i64 },

    #[error("Storage error: {0:#}")]
    Backend(#[from] anyhow::Error),
}

/// Durable, append-only record of wallet entries.
///
/// `append_entry` uses optimistic concurrency: the entry is written only if its
/// sequence directly follows the store's current last entry. Otherwise nothing
/// is written and [`StoreError::Conflict`] is returned.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Most recent entry, or `None` for an empty ledger.
    async fn last_entry(&self) -> Result<Option<WalletEntry>, StoreError>;

    /// Append an entry. Durable once this returns `Ok`.
    async fn append_entry(&self, entry: &WalletEntry) -> Result<(), StoreError>;
}

/// Type-erased store shared between request handlers.
pub type SharedStore = Arc<dyn LedgerStore>;

#[async_trait]
impl<T: LedgerStore + ?Sized> LedgerStore for Arc<T> {
    async fn last_entry(&self) -> Result<Option<WalletEntry>, StoreError> {
        (**self).last_entry().await
    }

    async fn append_entry(&self, entry: &WalletEntry) -> Result<(), StoreError> {
        (**self).append_entry(entry).await
    }
}
