use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::WalletEntry;

use super::{LedgerStore, StoreError};

/// In-memory ledger store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<Vec<WalletEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing ledger, oldest entry first.
    pub fn with_entries(entries: Vec<WalletEntry>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Copy of every entry currently held, oldest first.
    pub async fn snapshot(&self) -> Vec<WalletEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn last_entry(&self) -> Result<Option<WalletEntry>, StoreError> {
        Ok(self.entries.read().await.last().cloned())
    }

    async fn append_entry(&self, entry: &WalletEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let last_sequence = entries.last().map(|e| e.sequence).unwrap_or(0);
        if entry.sequence != last_sequence + 1 {
            return Err(StoreError::Conflict {
                sequence: entry.sequence,
            });
        }
        entries.push(entry.clone());
        Ok(())
    }
}
