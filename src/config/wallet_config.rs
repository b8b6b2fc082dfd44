#[derive(serde::Deserialize, Debug, Clone)]
pub struct WalletConfig {
    pub addresses: Vec<Box<str>>,
}
