#[derive(serde::Deserialize, Debug, Clone)]
pub struct RpcConfig {
    pub infura_project_id: Box<str>,
    pub url: Option<Box<str>>,
}

impl RpcConfig {
    /// Full node endpoint. An explicit `url` overrides the Infura id.
    pub fn endpoint_url(&self) -> String {
        match &self.url {
            Some(url) => url.to_string(),
            None => format!("https://mainnet.infura.io/v3/{}", self.infura_project_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_from_project_id() {
        let config = RpcConfig {
            infura_project_id: "abc123".into(),
            url: None,
        };
        assert_eq!(
            config.endpoint_url(),
            "https://mainnet.infura.io/v3/abc123"
        );
    }

    #[test]
    fn test_explicit_url_wins() {
        let config = RpcConfig {
            infura_project_id: "abc123".into(),
            url: Some("http://localhost:8545".into()),
        };
        assert_eq!(config.endpoint_url(), "http://localhost:8545");
    }
}
