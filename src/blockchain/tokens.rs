use std::sync::LazyLock;

use super::token::ERC20TokenInfo;

/// Reserved record key for the chain's intrinsic currency, which is
/// queried via `eth_getBalance` instead of a contract call.
pub const NATIVE_SYMBOL: &str = "ETH";

/// Mainnet tokens every run reports on. The list is fixed; output columns
/// are derived from it in order.
pub static TOKENS: LazyLock<Vec<ERC20TokenInfo>> = LazyLock::new(|| {
    vec![
        ERC20TokenInfo::new(
            "USDT",
            "USDT",
            "0xdac17f958d2ee523a2206206994597c13d831ec7",
        ),
        ERC20TokenInfo::new(
            "BNB",
            "BNB",
            "0xB8c77482e45F1F44dE1745F52C74426C631bDD52",
        ),
        ERC20TokenInfo::new(
            "USDC",
            "USDC",
            "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        ),
        ERC20TokenInfo::new(
            "MATIC",
            "MATIC",
            "0x7d1afa7b718fb893db30a3abc0cfc608aacfebb0",
        ),
    ]
});
