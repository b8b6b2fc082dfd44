mod blockchain;
mod cli;
mod config;
mod routines;

use std::sync::Arc;

use crate::blockchain::prelude::*;
use crate::config::app_config::AppConfig;
use crate::routines::export_balances::{ExportBalancesRoutine, EXPORT_PATH};
use crate::routines::print_balances::PrintBalancesRoutine;
use crate::routines::routine::Routine;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = AppConfig::load();

    let source: Arc<dyn BalanceSource> = match NodeBalanceSource::new(&config.rpc) {
        Ok(source) => Arc::new(source),
        Err(report) => {
            log::error!("Failed to set up the node connection: {:?}", report);
            return;
        }
    };

    let tokens = TOKENS.to_vec();
    let wallet_addresses = config.wallets.addresses.clone();

    // `print` is the default; `export` is the only other word we accept.
    let routine: Box<dyn Routine> = match std::env::args().nth(1).as_deref() {
        Some("export") => Box::new(ExportBalancesRoutine::new(
            source,
            tokens,
            wallet_addresses,
            EXPORT_PATH,
        )),
        _ => Box::new(PrintBalancesRoutine::new(source, tokens, wallet_addresses)),
    };

    match routine.run().await {
        Ok(()) => log::info!("✅ {}: OK", routine.name()),
        Err(report) => log::error!("❌ {}: {:?}", routine.name(), report),
    }
}
