pub mod export_balances;
pub mod fetch_balances;
pub mod print_balances;
pub mod routine;
