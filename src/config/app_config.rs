use config::Config;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub rpc: super::rpc_config::RpcConfig,
    pub wallets: super::wallet_config::WalletConfig,
}

impl AppConfig {
    /// Reads `Config.toml` from the working directory. Loaded once in
    /// `main` and passed down; routines never reach for globals.
    pub fn load() -> Self {
        match Config::builder()
            .add_source(config::File::with_name("Config"))
            .build()
        {
            Ok(config) => config,
            Err(e) => match e {
                config::ConfigError::NotFound(property) => {
                    panic!("Missing config property: {:?}", property);
                }
                _ => {
                    panic!("Error reading config file: {:?}", e);
                }
            },
        }
        .try_deserialize()
        .expect("Should deserialize built config into struct")
    }
}
