use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::WalletEntry;

use super::{LedgerStore, MIGRATION_001_WALLET_ENTRIES, StoreError};

/// SQLite-backed ledger store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect with explicit options.
    pub async fn connect_with(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePool::connect_with(options)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Connect to an existing database file. The path is used verbatim, never
    /// parsed as a URL.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        Self::connect_with(SqliteConnectOptions::new().filename(path)).await
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_WALLET_ENTRIES)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Open the database file at `path`, creating and migrating it if needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let store = Self::connect_with(options).await?;
        store.migrate().await?;
        Ok(store)
    }

    async fn fetch_last_entry(&self) -> Result<Option<WalletEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, sequence, balance_before, amount, recorded_at
            FROM wallet_entries
            ORDER BY sequence DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch last wallet entry")?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<WalletEntry> {
        let id_str: String = row.get("id");
        let balance_before_str: String = row.get("balance_before");
        let amount_str: String = row.get("amount");
        let recorded_at_str: String = row.get("recorded_at");

        Ok(WalletEntry::from_parts(
            Uuid::parse_str(&id_str).context("Invalid entry ID")?,
            row.get("sequence"),
            Decimal::from_str(&balance_before_str).context("Invalid balance_before")?,
            Decimal::from_str(&amount_str).context("Invalid amount")?,
            DateTime::parse_from_rfc3339(&recorded_at_str)
                .context("Invalid recorded_at timestamp")?
                .with_timezone(&Utc),
        ))
    }
}

#[async_trait]
impl LedgerStore for SqliteStore {
    async fn last_entry(&self) -> Result<Option<WalletEntry>, StoreError> {
        Ok(self.fetch_last_entry().await?)
    }

    async fn append_entry(&self, entry: &WalletEntry) -> Result<(), StoreError> {
        // Insert only if the entry directly follows the current last one
        let result = sqlx::query(
            r#"
            INSERT INTO wallet_entries (id, sequence, balance_before, amount, recorded_at)
            SELECT ?, ?, ?, ?, ?
            WHERE (SELECT COALESCE(MAX(sequence), 0) FROM wallet_entries) = ?
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.sequence)
        .bind(entry.balance_before.to_string())
        .bind(entry.amount.to_string())
        .bind(entry.recorded_at.to_rfc3339())
        .bind(entry.sequence - 1)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 1 => Ok(()),
            Ok(_) => Err(StoreError::Conflict {
                sequence: entry.sequence,
            }),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Err(StoreError::Conflict {
                    sequence: entry.sequence,
                })
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context("Failed to append wallet entry")
                .into()),
        }
    }
}
