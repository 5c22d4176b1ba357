use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons an order request is refused before it reaches the book
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
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
}
