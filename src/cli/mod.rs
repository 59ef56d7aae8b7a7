use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api;
use crate::application::{WalletService, validate_deposit, validate_withdrawal};
use crate::config::Settings;
use crate::domain::{Amount, format_amount, parse_amount};
use crate::storage::{MemoryStore, SharedStore, SqliteStore};
use crate::telemetry;

/// Online Wallet - single-account balance ledger
#[derive(Parser)]
#[command(name = "online-wallet")]
#[command(about = "A wallet whose balance is derived from an append-only ledger of entries")]
#[command(version)]
pub struct Cli {
    /// Database file path (overrides the configured path)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Show the current balance
    Balance,

    /// Deposit funds into the wallet
    Deposit {
        /// Amount to deposit (e.g., "50.00" or "50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Withdraw funds from the wallet
    Withdraw {
        /// Amount to withdraw (e.g., "50.00" or "50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Serve the wallet over HTTP
    Serve {
        /// Address to bind (overrides the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Keep the ledger in memory instead of the database file
        #[arg(long)]
        in_memory: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        self.run_with_output(&mut std::io::stdout()).await
    }

    /// Run the command, writing its report to `out`.
    pub async fn run_with_output<W: Write>(self, out: &mut W) -> Result<()> {
        let settings =
            Settings::load(self.config.as_deref()).context("Failed to load configuration")?;

        let directive = telemetry::filter_directive(
            std::env::var("RUST_LOG").ok().as_deref(),
            self.verbose,
            &settings.log.level,
        );
        telemetry::init(&directive, settings.log.json);

        let database = self
            .database
            .clone()
            .unwrap_or_else(|| settings.database.path.clone());

        match self.command {
            Commands::Init => {
                WalletService::init(&database).await?;
                writeln!(out, "Database initialized: {}", database)?;
            }

            Commands::Balance => {
                let service = WalletService::connect(&database).await?;
                let balance = service.get_balance().await?;
                writeln!(out, "Balance: {}", format_amount(balance.amount))?;
            }

            Commands::Deposit { amount } => {
                let deposit = validate_deposit(parse_cli_amount(&amount)?)?;
                let service = WalletService::connect(&database).await?;
                let balance = service.deposit(deposit).await?;
                writeln!(
                    out,
                    "Deposited {}. Balance: {}",
                    format_amount(deposit.amount),
                    format_amount(balance.amount)
                )?;
            }

            Commands::Withdraw { amount } => {
                let withdrawal = validate_withdrawal(parse_cli_amount(&amount)?)?;
                let service = WalletService::connect(&database).await?;
                let balance = service.withdraw(withdrawal).await?;
                writeln!(
                    out,
                    "Withdrew {}. Balance: {}",
                    format_amount(withdrawal.amount),
                    format_amount(balance.amount)
                )?;
            }

            Commands::Serve {
                host,
                port,
                in_memory,
            } => {
                let host = host.unwrap_or(settings.server.host);
                let port = port.unwrap_or(settings.server.port);

                let store: SharedStore = if in_memory {
                    Arc::new(MemoryStore::new())
                } else {
                    Arc::new(SqliteStore::open(&database).await?)
                };

                api::serve(&host, port, store).await?;
            }
        }

        Ok(())
    }
}

fn parse_cli_amount(input: &str) -> Result<Amount> {
    parse_amount(input).context("Invalid amount format. Use '50.00' or '50'")
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_parse_deposit_command() {
        let cli = Cli::try_parse_from(["online-wallet", "deposit", "100.50"]).unwrap();
        assert!(matches!(cli.command, Commands::Deposit { amount } if amount == "100.50"));
        assert!(cli.database.is_none());
    }

    #[test]
    fn test_negative_amount_reaches_validation() {
        let cli = Cli::try_parse_from(["online-wallet", "withdraw", "-5"]).unwrap();
        let Commands::Withdraw { amount } = cli.command else {
            panic!("expected withdraw command");
        };

        let parsed = parse_cli_amount(&amount).unwrap();
        assert_eq!(parsed, dec!(-5));
        assert!(validate_withdrawal(parsed).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "online-wallet",
            "balance",
            "--database",
            "/tmp/w.db",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.database.as_deref(), Some("/tmp/w.db"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "online-wallet",
            "serve",
            "--port",
            "9000",
            "--in-memory",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Serve {
                host: None,
                port: Some(9000),
                in_memory: true
            }
        ));
    }

    #[test]
    fn test_invalid_amount() {
        assert!(parse_cli_amount("ten").is_err());
    }
}
