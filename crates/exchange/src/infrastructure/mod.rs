pub mod config;
mod logging;

pub use config::{AccountConfig, ConfigError, ExchangeConfig, ServerConfig, WalletConfig};
pub use logging::init_logging;
