//! Configuration loading for the exchange
//!
//! Supports JSON configuration files for:
//! - Server bind address
//! - Log level
//! - Accounts with their initial wallet balances

use hermes_core::{AccountId, Amount, Asset};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::application::ProvisionAccountCommand;

/// Root configuration for the exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Exchange name/identifier
    #[serde(default = "default_exchange_name")]
    pub name: String,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Default log filter, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Accounts to create at startup
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

fn default_exchange_name() -> String {
    "Hermes Exchange".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            name: default_exchange_name(),
            server: ServerConfig::default(),
            log_level: default_log_level(),
            accounts: Vec::new(),
        }
    }
}

impl ExchangeConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Two funded demo traders on BTC_BRL
    pub fn with_demo_accounts() -> Self {
        let accounts = vec![
            AccountConfig {
                id: Some(Uuid::from_u128(0x11111111_1111_1111_1111_111111111111)),
                name: "John Doe".to_string(),
                wallets: vec![
                    WalletConfig::new("BTC", Amount::new(15, 1)),
                    WalletConfig::new("BRL", Amount::new(20000000, 2)),
                ],
            },
            AccountConfig {
                id: Some(Uuid::from_u128(0x22222222_2222_2222_2222_222222222222)),
                name: "Jane Doe".to_string(),
                wallets: vec![
                    WalletConfig::new("BTC", Amount::new(5, 1)),
                    WalletConfig::new("BRL", Amount::new(30500000, 2)),
                ],
            },
        ];

        Self {
            accounts,
            ..Default::default()
        }
    }

    /// Apply `HOST` and `PORT` from the environment, if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Account to create at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Fixed account id; generated when absent
    #[serde(default)]
    pub id: Option<AccountId>,
    pub name: String,
    #[serde(default)]
    pub wallets: Vec<WalletConfig>,
}

impl From<&AccountConfig> for ProvisionAccountCommand {
    fn from(config: &AccountConfig) -> Self {
        ProvisionAccountCommand {
            account_id: config.id,
            name: config.name.clone(),
            wallets: config
                .wallets
                .iter()
                .map(|w| (w.asset.clone(), w.balance))
                .collect(),
        }
    }
}

/// Initial balance of one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletConfig {
    pub asset: Asset,
    pub balance: Amount,
}

impl WalletConfig {
    pub fn new(asset: impl Into<Asset>, balance: Amount) -> Self {
        Self {
            asset: asset.into(),
            balance,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
