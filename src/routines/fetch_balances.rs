use std::collections::HashMap;

use error_stack::{Report, Result, ResultExt};
use ethers::types::U256;
use futures::future::try_join_all;
use thiserror::Error;

use crate::blockchain::prelude::*;

/// Wallet address → asset symbol → decimal-string amount. Built fresh
/// each run, never persisted.
pub type WalletBalances = HashMap<String, HashMap<String, String>>;

#[derive(Error, Debug)]
pub enum AggregateBalancesError {
    #[error("Balance fetch failed")]
    FetchFailed,
    #[error("Fetched balances are missing a wallet entry")]
    MissingWallet,
    #[error("Token balance maps are not aligned with the token list")]
    MisalignedTokenBalances,
}

/// Raw native-coin amounts for every wallet, keyed by the configured
/// wallet string. One request per wallet, all in flight at once; the
/// first failure aborts the whole batch.
pub async fn fetch_native_balances(
    source: &dyn BalanceSource,
    wallet_addresses: &[Box<str>],
) -> Result<HashMap<String, U256>, FetchBalanceError> {
    log::debug!(
        "Fetching native balances for {} wallets",
        wallet_addresses.len()
    );

    let requests = wallet_addresses.iter().map(|wallet| async move {
        let balance = source.fetch_native_balance(wallet).await?;
        Ok::<_, Report<FetchBalanceError>>((wallet.to_string(), balance))
    });

    let balances = try_join_all(requests).await?;
    Ok(balances.into_iter().collect())
}

/// Raw `balanceOf` amounts of one token for every wallet. Same
/// fan-out/fan-in shape as the native variant, hitting the token
/// contract instead.
pub async fn fetch_token_balances(
    source: &dyn BalanceSource,
    token: &ERC20TokenInfo,
    wallet_addresses: &[Box<str>],
) -> Result<HashMap<String, U256>, FetchBalanceError> {
    log::debug!(
        "Fetching {} balances for {} wallets",
        token.token_symbol,
        wallet_addresses.len()
    );

    let requests = wallet_addresses.iter().map(|wallet| async move {
        let balance = source
            .fetch_erc20_balance(&token.contract_address, wallet)
            .await
            .attach_printable_lazy(|| {
                format!("Token: {} ({})", token.token_symbol, token.contract_address)
            })?;
        Ok::<_, Report<FetchBalanceError>>((wallet.to_string(), balance))
    });

    let balances = try_join_all(requests).await?;
    Ok(balances.into_iter().collect())
}

/// Fires the native fan-out and one fan-out per token concurrently, then
/// reshapes the joined results into the per-wallet record. No partial
/// results: any failed call fails the whole operation.
pub async fn fetch_all_balances(
    source: &dyn BalanceSource,
    tokens: &[ERC20TokenInfo],
    wallet_addresses: &[Box<str>],
) -> Result<WalletBalances, AggregateBalancesError> {
    let native = fetch_native_balances(source, wallet_addresses);
    let per_token = tokens
        .iter()
        .map(|token| fetch_token_balances(source, token, wallet_addresses));

    let (native_balances, token_balances) =
        futures::try_join!(native, try_join_all(per_token))
            .change_context(AggregateBalancesError::FetchFailed)?;

    aggregate_balances(tokens, wallet_addresses, &native_balances, &token_balances)
}

/// Reshape the flat per-call maps into wallet → symbol → decimal amount.
/// `token_balances` is index-aligned with `tokens`. Every wallet must
/// appear in every map; a hole fails the whole aggregation.
pub fn aggregate_balances(
    tokens: &[ERC20TokenInfo],
    wallet_addresses: &[Box<str>],
    native_balances: &HashMap<String, U256>,
    token_balances: &[HashMap<String, U256>],
) -> Result<WalletBalances, AggregateBalancesError> {
    if tokens.len() != token_balances.len() {
        return Err(Report::new(AggregateBalancesError::MisalignedTokenBalances)
            .attach_printable(format!(
                "{} tokens but {} balance maps",
                tokens.len(),
                token_balances.len()
            )));
    }

    let mut record = WalletBalances::with_capacity(wallet_addresses.len());

    for wallet in wallet_addresses {
        let wallet = wallet.to_string();

        let native = native_balances.get(&wallet).ok_or_else(|| {
            Report::new(AggregateBalancesError::MissingWallet)
                .attach_printable(format!("Wallet {} has no native balance entry", wallet))
        })?;

        let mut assets = HashMap::with_capacity(tokens.len() + 1);
        assets.insert(NATIVE_SYMBOL.to_owned(), to_decimal_string(*native));

        for (token, balances) in tokens.iter().zip(token_balances) {
            let balance = balances.get(&wallet).ok_or_else(|| {
                Report::new(AggregateBalancesError::MissingWallet).attach_printable(format!(
                    "Wallet {} has no {} balance entry",
                    wallet, token.token_symbol
                ))
            })?;
            assets.insert(token.token_symbol.to_string(), to_decimal_string(*balance));
        }

        record.insert(wallet, assets);
    }

    Ok(record)
}
