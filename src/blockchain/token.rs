#![allow(clippy::upper_case_acronyms)] // Tokens are upper case acronyms on the crypto space

/// A contract token we report on. The symbol keys the per-wallet record,
/// the name labels the CSV column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ERC20TokenInfo {
    pub token_name: Box<str>,
    pub token_symbol: Box<str>,
    pub contract_address: Box<str>,
}

impl ERC20TokenInfo {
    pub fn new(token_name: &str, token_symbol: &str, contract_address: &str) -> Self {
        Self {
            token_name: token_name.into(),
            token_symbol: token_symbol.into(),
            contract_address: contract_address.into(),
        }
    }
}
