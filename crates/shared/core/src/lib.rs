//! Hermes Core Domain
//!
//! Pure domain types for the Hermes spot exchange.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod instruments;
pub mod validation;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    Account, AccountId, Order, OrderId, OrderRequest, OrderStatus, Side, Trade, TradeId, Wallet,
    WalletId,
};
pub use instruments::{InstrumentPair, PAIR_DELIMITER};
pub use validation::{MAX_PRICE, MAX_QUANTITY, OrderValidator, RequiredCoverage, ValidationError};
pub use values::{
    Amount, Asset, Price, Quantity, STORAGE_SCALE, Timestamp, canonical, to_storage_scale,
};
