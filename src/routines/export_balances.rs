use std::path::{Path, PathBuf};
use std::sync::Arc;

use error_stack::{Report, Result, ResultExt};
use indicatif::ProgressBar;
use thiserror::Error;

use crate::blockchain::prelude::*;
use crate::cli::progress::{finish_progress, new_progress, ProgressBarExt};

use super::fetch_balances::{fetch_all_balances, WalletBalances};
use super::routine::{Routine, RoutineError};

pub const EXPORT_PATH: &str = "balances.csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write the CSV file")]
    WriteError,
    #[error("Aggregated record is missing an entry")]
    IncompleteRecord,
}

/// Fetch → aggregate → `balances.csv`. The file is only created once the
/// record is fully assembled, so a failed fetch leaves no partial
/// artifact behind.
pub struct ExportBalancesRoutine {
    source: Arc<dyn BalanceSource>,
    tokens: Vec<ERC20TokenInfo>,
    wallet_addresses: Vec<Box<str>>,
    output_path: PathBuf,
}

impl ExportBalancesRoutine {
    pub fn new(
        source: Arc<dyn BalanceSource>,
        tokens: Vec<ERC20TokenInfo>,
        wallet_addresses: Vec<Box<str>>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            tokens,
            wallet_addresses,
            output_path: output_path.into(),
        }
    }
}

#[async_trait::async_trait]
impl Routine for ExportBalancesRoutine {
    fn name(&self) -> &str {
        "Export balances"
    }

    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        log::info!(
            "Exporting balances of {} wallets to {}",
            self.wallet_addresses.len(),
            self.output_path.display()
        );

        let progress = new_progress(ProgressBar::new_spinner());

        progress.trace("☁️  Fetching balances from the node");
        let balances =
            fetch_all_balances(self.source.as_ref(), &self.tokens, &self.wallet_addresses)
                .await
                .change_context(RoutineError::FetchFailed)?;

        progress.trace("📝 Writing the CSV file");
        write_csv(
            &self.output_path,
            &self.tokens,
            &self.wallet_addresses,
            &balances,
        )
        .change_context(RoutineError::ExportFailed)?;

        progress.info("✅ CSV file has been saved");
        finish_progress(&progress);

        Ok(())
    }
}

/// Header is `Wallet,<token display name>...,ETH`; one row per wallet in
/// configured order. Creates or overwrites `path`.
fn write_csv(
    path: &Path,
    tokens: &[ERC20TokenInfo],
    wallet_addresses: &[Box<str>],
    balances: &WalletBalances,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)
        .change_context(ExportError::WriteError)
        .attach_printable_lazy(|| format!("Path: {}", path.display()))?;

    let mut header = Vec::with_capacity(tokens.len() + 2);
    header.push("Wallet");
    header.extend(tokens.iter().map(|token| token.token_name.as_ref()));
    header.push(NATIVE_SYMBOL);
    writer
        .write_record(&header)
        .change_context(ExportError::WriteError)?;

    for wallet in wallet_addresses {
        let assets = balances.get(&wallet.to_string()).ok_or_else(|| {
            Report::new(ExportError::IncompleteRecord)
                .attach_printable(format!("Wallet {} is absent from the record", wallet))
        })?;

        let mut row = Vec::with_capacity(tokens.len() + 2);
        row.push(wallet.to_string());
        for token in tokens {
            let amount = assets.get(token.token_symbol.as_ref()).ok_or_else(|| {
                Report::new(ExportError::IncompleteRecord).attach_printable(format!(
                    "Wallet {} has no {} entry",
                    wallet, token.token_symbol
                ))
            })?;
            row.push(amount.clone());
        }
        let native = assets.get(NATIVE_SYMBOL).ok_or_else(|| {
            Report::new(ExportError::IncompleteRecord)
                .attach_printable(format!("Wallet {} has no {} entry", wallet, NATIVE_SYMBOL))
        })?;
        row.push(native.clone());

        writer
            .write_record(&row)
            .change_context(ExportError::WriteError)?;
    }

    writer.flush().change_context(ExportError::WriteError)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::fetch_balances::tests::{
        example_source, two_wallets, usdt, WALLET_A, WALLET_B,
    };

    #[tokio::test]
    async fn test_export_writes_header_and_rows_in_wallet_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balances.csv");

        let routine = ExportBalancesRoutine::new(
            Arc::new(example_source()),
            vec![usdt()],
            two_wallets(),
            &path,
        );
        routine.run().await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 3); // header + one row per wallet
        assert_eq!(lines[0], "Wallet,USDT,ETH");
        assert_eq!(lines[1], format!("{},5,2", WALLET_A));
        assert_eq!(lines[2], format!("{},1,0", WALLET_B));
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balances.csv");

        let routine = ExportBalancesRoutine::new(
            Arc::new(example_source().failing_for(WALLET_B)),
            vec![usdt()],
            two_wallets(),
            &path,
        );

        assert!(routine.run().await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_export_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balances.csv");
        std::fs::write(&path, "stale contents\n").unwrap();

        let routine = ExportBalancesRoutine::new(
            Arc::new(example_source()),
            vec![usdt()],
            two_wallets(),
            &path,
        );
        routine.run().await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Wallet,USDT,ETH"));
    }
}
