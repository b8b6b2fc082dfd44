use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use error_stack::{Result, ResultExt};
use ethers::abi::Abi;
use ethers::contract::Contract;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{Address, U256};

use crate::config::rpc_config::RpcConfig;

use super::balance_source::{BalanceSource, FetchBalanceError};

/// ABI shared by every token contract we bind; read-only subset.
const ERC20_ABI_JSON: &str = include_str!("../abi/erc20.json");

/// `BalanceSource` backed by a JSON-RPC node over HTTP.
#[derive(Debug)]
pub struct NodeBalanceSource {
    provider: Arc<Provider<Http>>,
    erc20_abi: Abi,
}

impl NodeBalanceSource {
    pub fn new(config: &RpcConfig) -> Result<Self, FetchBalanceError> {
        let url = config.endpoint_url();
        let provider = Provider::<Http>::try_from(url.as_str())
            .change_context(FetchBalanceError::RpcError)
            .attach_printable_lazy(|| format!("Invalid RPC endpoint: {}", url))?;

        let erc20_abi: Abi = serde_json::from_str(ERC20_ABI_JSON)
            .change_context(FetchBalanceError::DataFormatError)
            .attach_printable("Bundled ERC20 ABI should parse")?;

        Ok(Self {
            provider: Arc::new(provider),
            erc20_abi,
        })
    }

    fn parse_address(address: &str) -> Result<Address, FetchBalanceError> {
        Address::from_str(address)
            .change_context(FetchBalanceError::InvalidAddress)
            .attach_printable_lazy(|| format!("Address: {}", address))
    }
}

#[async_trait]
impl BalanceSource for NodeBalanceSource {
    async fn fetch_native_balance(
        &self,
        wallet_address: &str,
    ) -> Result<U256, FetchBalanceError> {
        let address = Self::parse_address(wallet_address)?;

        self.provider
            .get_balance(address, None)
            .await
            .change_context(FetchBalanceError::RpcError)
            .attach_printable_lazy(|| {
                format!("Failed to fetch native balance of {}", wallet_address)
            })
    }

    async fn fetch_erc20_balance(
        &self,
        contract_address: &str,
        wallet_address: &str,
    ) -> Result<U256, FetchBalanceError> {
        let contract_addr = Self::parse_address(contract_address)?;
        let wallet_addr = Self::parse_address(wallet_address)?;

        let contract = Contract::new(
            contract_addr,
            self.erc20_abi.clone(),
            Arc::clone(&self.provider),
        );

        let balance: U256 = contract
            .method("balanceOf", wallet_addr)
            .change_context(FetchBalanceError::DataFormatError)
            .attach_printable("balanceOf should exist on the bundled ERC20 ABI")?
            .call()
            .await
            .change_context(FetchBalanceError::RpcError)
            .attach_printable_lazy(|| {
                format!(
                    "Failed to fetch balance of token {} for {}",
                    contract_address, wallet_address
                )
            })?;

        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_abi_exposes_balance_of() {
        let abi: Abi = serde_json::from_str(ERC20_ABI_JSON).unwrap();
        assert!(abi.function("balanceOf").is_ok());
    }

    #[test]
    fn test_parse_address_rejects_garbage() {
        assert!(NodeBalanceSource::parse_address("not-an-address").is_err());
        assert!(
            NodeBalanceSource::parse_address("0xdac17f958d2ee523a2206206994597c13d831ec7").is_ok()
        );
    }
}
