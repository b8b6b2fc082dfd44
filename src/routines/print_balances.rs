use std::sync::Arc;

use error_stack::ResultExt;
use indicatif::ProgressBar;

use crate::blockchain::prelude::*;
use crate::cli::progress::{finish_progress, new_progress, ProgressBarExt};

use super::fetch_balances::{fetch_all_balances, WalletBalances};
use super::routine::{Routine, RoutineError};

const WALLET_SEPARATOR: &str = "-----------------------------------";

/// Fetch → aggregate → dump to stdout. Wallets print in configured
/// order; within a wallet, ETH first, then tokens in configured order.
pub struct PrintBalancesRoutine {
    source: Arc<dyn BalanceSource>,
    tokens: Vec<ERC20TokenInfo>,
    wallet_addresses: Vec<Box<str>>,
}

impl PrintBalancesRoutine {
    pub fn new(
        source: Arc<dyn BalanceSource>,
        tokens: Vec<ERC20TokenInfo>,
        wallet_addresses: Vec<Box<str>>,
    ) -> Self {
        Self {
            source,
            tokens,
            wallet_addresses,
        }
    }
}

#[async_trait::async_trait]
impl Routine for PrintBalancesRoutine {
    fn name(&self) -> &str {
        "Print balances"
    }

    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        log::info!(
            "Printing balances of {} wallets for {} tokens",
            self.wallet_addresses.len(),
            self.tokens.len()
        );

        let progress = new_progress(ProgressBar::new_spinner());

        progress.trace("☁️  Fetching balances from the node");
        let balances =
            fetch_all_balances(self.source.as_ref(), &self.tokens, &self.wallet_addresses)
                .await
                .change_context(RoutineError::FetchFailed)?;

        progress.trace("🖨️  Dumping balances to the console");
        for line in render_wallet_lines(&self.tokens, &self.wallet_addresses, &balances) {
            println!("{}", line);
        }

        progress.info("✅ Balances printed");
        finish_progress(&progress);

        Ok(())
    }
}

/// The console dump as lines, so ordering is testable without capturing
/// stdout.
fn render_wallet_lines(
    tokens: &[ERC20TokenInfo],
    wallet_addresses: &[Box<str>],
    balances: &WalletBalances,
) -> Vec<String> {
    let mut symbols = Vec::with_capacity(tokens.len() + 1);
    symbols.push(NATIVE_SYMBOL.to_owned());
    symbols.extend(tokens.iter().map(|token| token.token_symbol.to_string()));

    let mut lines = Vec::new();
    for wallet in wallet_addresses {
        let Some(assets) = balances.get(&wallet.to_string()) else {
            continue;
        };

        lines.push(format!("Wallet: {}", wallet));
        for symbol in &symbols {
            if let Some(amount) = assets.get(symbol) {
                lines.push(format!("Token: {}", symbol));
                lines.push(format!("Balance: {}", amount));
            }
        }
        lines.push(WALLET_SEPARATOR.to_owned());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::fetch_balances::tests::{
        example_source, two_wallets, usdt, WALLET_A, WALLET_B,
    };

    #[tokio::test]
    async fn test_dump_follows_configured_wallet_order() {
        let source = example_source();
        let wallets = two_wallets();
        let tokens = vec![usdt()];

        let balances = fetch_all_balances(&source, &tokens, &wallets)
            .await
            .unwrap();
        let lines = render_wallet_lines(&tokens, &wallets, &balances);

        assert_eq!(
            lines,
            vec![
                format!("Wallet: {}", WALLET_A),
                "Token: ETH".to_owned(),
                "Balance: 2".to_owned(),
                "Token: USDT".to_owned(),
                "Balance: 5".to_owned(),
                WALLET_SEPARATOR.to_owned(),
                format!("Wallet: {}", WALLET_B),
                "Token: ETH".to_owned(),
                "Balance: 0".to_owned(),
                "Token: USDT".to_owned(),
                "Balance: 1".to_owned(),
                WALLET_SEPARATOR.to_owned(),
            ]
        );
    }
}
