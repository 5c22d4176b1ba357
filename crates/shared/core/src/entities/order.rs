use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, OrderStatus, Side};
use crate::instruments::InstrumentPair;
use crate::validation::{OrderValidator, ValidationError};
use crate::values::{Price, Quantity, to_storage_scale};

/// Unique identifier for an order
pub type OrderId = Uuid;

/// An order as submitted by a client, before any validation
///
/// Side and pair are kept as raw strings so that malformed input is reported
/// through the validator's error kinds rather than at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub account_id: AccountId,
    pub instrument_pair: String,
    pub side: String,
    pub price: Price,
    pub quantity: Quantity,
}

impl OrderRequest {
    pub fn new(
        account_id: AccountId,
        instrument_pair: impl Into<String>,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            account_id,
            instrument_pair: instrument_pair.into(),
            side: side.as_str().to_string(),
            price,
            quantity,
        }
    }

    /// Same request with price and quantity rescaled to the storage scale
    pub fn at_storage_scale(mut self) -> Self {
        self.price = to_storage_scale(self.price);
        self.quantity = to_storage_scale(self.quantity);
        self
    }
}

/// A limit order resting in (or having passed through) the book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub account_id: AccountId,
    pub instrument_pair: InstrumentPair,
    pub side: Side,
    /// Limit price
    pub price: Price,
    /// Original quantity
    pub quantity: Quantity,
    /// Quantity not yet executed; `0 <= remaining_quantity <= quantity`
    pub remaining_quantity: Quantity,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Arrival sequence assigned by the store on create; breaks ties between
    /// equal `created_at` values
    pub sequence: u64,
}

impl Order {
    /// Validate a request and build a fresh `OPEN` order from it
    pub fn from_request(
        request: OrderRequest,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        // Bounds apply to the submitted values, before rescaling
        let (pair, side) = OrderValidator::validate(&request)?;
        let submitted = (request.price, request.quantity);
        let request = request.at_storage_scale();
        if request.price.is_zero() {
            return Err(ValidationError::InvalidPrice(submitted.0));
        }
        if request.quantity.is_zero() {
            return Err(ValidationError::InvalidQuantity(submitted.1));
        }
        Ok(Self::new_with_time(
            request.account_id,
            pair,
            side,
            request.price,
            request.quantity,
            timestamp,
        ))
    }

    /// Create a new `OPEN` order with explicit timestamp
    pub fn new_with_time(
        account_id: AccountId,
        instrument_pair: InstrumentPair,
        side: Side,
        price: Price,
        quantity: Quantity,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            instrument_pair,
            side,
            price,
            quantity,
            remaining_quantity: quantity,
            status: OrderStatus::Open,
            created_at: timestamp,
            updated_at: timestamp,
            sequence: 0,
        }
    }

    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_quantity.is_zero()
    }

    /// Quantity executed so far
    pub fn filled_quantity(&self) -> Quantity {
        self.quantity - self.remaining_quantity
    }

    /// Reduce the remaining quantity by an executed amount and recompute status
    pub fn apply_execution(&mut self, quantity: Quantity, timestamp: DateTime<Utc>) -> OrderStatus {
        self.remaining_quantity = (self.remaining_quantity - quantity).max(Decimal::ZERO);
        self.status = OrderStatus::after_execution(self.remaining_quantity, self.quantity);
        self.updated_at = timestamp;
        self.status
    }

    /// Withdraw whatever is still resting
    pub fn cancel(&mut self, timestamp: DateTime<Utc>) {
        self.status = OrderStatus::Cancelled;
        self.updated_at = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(side: Side, price: Decimal, quantity: Decimal) -> OrderRequest {
        OrderRequest::new(Uuid::new_v4(), "BTC_BRL", side, price, quantity)
    }

    #[test]
    fn test_from_request_opens_order() {
        let order =
            Order::from_request(request(Side::Buy, dec!(100.00), dec!(1.0)), Utc::now()).unwrap();

        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.remaining_quantity, order.quantity);
        assert_eq!(order.instrument_pair.base(), "BTC");
        assert!(order.is_buy());
    }

    #[test]
    fn test_from_request_rescales_to_storage() {
        let order = Order::from_request(
            request(Side::Sell, dec!(10.123456789), dec!(0.5)),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(order.price, dec!(10.12345679));
    }

    #[test]
    fn test_from_request_rejects_invalid() {
        let result = Order::from_request(request(Side::Buy, dec!(0), dec!(1)), Utc::now());
        assert_eq!(result.unwrap_err(), ValidationError::InvalidPrice(dec!(0)));
    }

    #[test]
    fn test_bounds_checked_before_rescaling() {
        let result = Order::from_request(
            request(Side::Buy, dec!(100000000.000000004), dec!(1)),
            Utc::now(),
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::PriceOverLimit(dec!(100000000.000000004))
        );

        let result = Order::from_request(
            request(Side::Sell, dec!(100), dec!(1000.000000004)),
            Utc::now(),
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::QuantityOverLimit(dec!(1000.000000004))
        );

        // Positive values that vanish at storage scale are refused
        let result = Order::from_request(
            request(Side::Buy, dec!(100), dec!(0.000000004)),
            Utc::now(),
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::InvalidQuantity(dec!(0.000000004))
        );
        let result = Order::from_request(
            request(Side::Buy, dec!(0.000000001), dec!(1)),
            Utc::now(),
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::InvalidPrice(dec!(0.000000001))
        );
    }

    #[test]
    fn test_apply_execution_transitions() {
        let mut order =
            Order::from_request(request(Side::Buy, dec!(100), dec!(1.0)), Utc::now()).unwrap();

        assert_eq!(
            order.apply_execution(dec!(0.4), Utc::now()),
            OrderStatus::PartiallyFilled
        );
        assert_eq!(order.remaining_quantity, dec!(0.6));
        assert_eq!(order.filled_quantity(), dec!(0.4));

        assert_eq!(
            order.apply_execution(dec!(0.6), Utc::now()),
            OrderStatus::Filled
        );
        assert!(order.is_filled());
    }
}
