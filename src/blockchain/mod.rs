pub mod node;
pub mod token;
pub mod tokens;
pub mod units;

pub mod prelude {
    pub use super::node::balance_source::{BalanceSource, FetchBalanceError};
    pub use super::node::ethereum_node::NodeBalanceSource;
    pub use super::token::ERC20TokenInfo;
    pub use super::tokens::{NATIVE_SYMBOL, TOKENS};
    pub use super::units::to_decimal_string;
}
