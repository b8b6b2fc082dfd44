use std::fmt::Debug;

use async_trait::async_trait;
use error_stack::Result;
use ethers::types::U256;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchBalanceError {
    #[error("Not a valid EVM address")]
    InvalidAddress,
    #[error("RPC request failed")]
    RpcError,
    #[error("Received data in an unexpected format")]
    DataFormatError,
}

/// Narrow view of the node: the two balance lookups the pipeline needs,
/// in base units. Implementations do not retry, cache, or enforce
/// timeouts beyond whatever the transport defaults to.
#[async_trait]
pub trait BalanceSource: Send + Sync + Debug {
    async fn fetch_native_balance(&self, wallet_address: &str)
        -> Result<U256, FetchBalanceError>;

    async fn fetch_erc20_balance(
        &self,
        contract_address: &str,
        wallet_address: &str,
    ) -> Result<U256, FetchBalanceError>;
}
