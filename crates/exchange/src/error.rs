use hermes_core::{AccountId, Amount, Asset, OrderId, ValidationError};
use hermes_matching::{MatchingError, SettlementStep};
use hermes_ports::{LedgerError, StoreError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Every failure the exchange reports to its callers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    #[error("price must be greater than zero, got {0}")]
    InvalidPrice(Decimal),

    #[error("quantity must be greater than zero, got {0}")]
    InvalidQuantity(Decimal),

    #[error("quantity {0} exceeds maximum limit")]
    QuantityOverLimit(Decimal),

    #[error("price {0} exceeds maximum limit")]
    PriceOverLimit(Decimal),

    #[error("invalid order side: {0}")]
    InvalidSide(String),

    #[error("invalid instrument pair format: {0}")]
    InvalidPairFormat(String),

    #[error("wallet not found for account {account_id}, asset {asset}")]
    WalletNotFound { account_id: AccountId, asset: Asset },

    #[error("insufficient {asset} balance for account {account_id}: required {required}, available {available}")]
    InsufficientBalance {
        account_id: AccountId,
        asset: Asset,
        required: Amount,
        available: Amount,
    },

    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("persistence failure: {0}")]
    PersistenceFailure(#[from] StoreError),

    #[error("settlement failure at {step}: {source}")]
    SettlementFailure {
        step: SettlementStep,
        #[source]
        source: LedgerError,
    },
}

/// Coarse classification for transports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is unacceptable
    Validation,
    NotFound,
    /// The request was valid but could not be carried out against current state
    Conflict,
    Internal,
}

impl ExchangeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExchangeError::InvalidPrice(_)
            | ExchangeError::InvalidQuantity(_)
            | ExchangeError::QuantityOverLimit(_)
            | ExchangeError::PriceOverLimit(_)
            | ExchangeError::InvalidSide(_)
            | ExchangeError::InvalidPairFormat(_)
            | ExchangeError::WalletNotFound { .. }
            | ExchangeError::InsufficientBalance { .. } => ErrorKind::Validation,
            ExchangeError::OrderNotFound(_) => ErrorKind::NotFound,
            ExchangeError::SettlementFailure { .. } => ErrorKind::Conflict,
            ExchangeError::PersistenceFailure(_) => ErrorKind::Internal,
        }
    }
}

impl From<ValidationError> for ExchangeError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidPrice(p) => ExchangeError::InvalidPrice(p),
            ValidationError::InvalidQuantity(q) => ExchangeError::InvalidQuantity(q),
            ValidationError::QuantityOverLimit(q) => ExchangeError::QuantityOverLimit(q),
            ValidationError::PriceOverLimit(p) => ExchangeError::PriceOverLimit(p),
            ValidationError::InvalidSide(s) => ExchangeError::InvalidSide(s),
            ValidationError::InvalidPairFormat(s) => ExchangeError::InvalidPairFormat(s),
        }
    }
}

impl From<MatchingError> for ExchangeError {
    fn from(err: MatchingError) -> Self {
        match err {
            MatchingError::Validation(e) => e.into(),
            MatchingError::Persistence(e) => ExchangeError::PersistenceFailure(e),
            MatchingError::Settlement { step, source } => {
                ExchangeError::SettlementFailure { step, source }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
