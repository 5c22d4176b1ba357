use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ValidationError;
use crate::entities::{Order, OrderRequest, Side};
use crate::instruments::InstrumentPair;
use crate::values::{Amount, Asset, Price, Quantity};

/// Largest quantity a single order may carry
pub const MAX_QUANTITY: Quantity = dec!(1000);

/// Largest limit price a single order may carry
pub const MAX_PRICE: Price = dec!(100000000);

/// Asset and amount an account must hold before an order is accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredCoverage {
    pub asset: Asset,
    pub amount: Amount,
}

/// Validates order requests against the fixed system bounds
pub struct OrderValidator;

impl OrderValidator {
    /// Check a request, stopping at the first failure.
    ///
    /// Order of checks: price > 0, quantity > 0, quantity bound, price bound,
    /// side, pair format. Returns the parsed pair and side on success.
    pub fn validate(request: &OrderRequest) -> Result<(InstrumentPair, Side), ValidationError> {
        if request.price <= Decimal::ZERO {
            return Err(ValidationError::InvalidPrice(request.price));
        }
        if request.quantity <= Decimal::ZERO {
            return Err(ValidationError::InvalidQuantity(request.quantity));
        }
        if request.quantity > MAX_QUANTITY {
            return Err(ValidationError::QuantityOverLimit(request.quantity));
        }
        if request.price > MAX_PRICE {
            return Err(ValidationError::PriceOverLimit(request.price));
        }
        let side: Side = request
            .side
            .parse()
            .map_err(|_| ValidationError::InvalidSide(request.side.clone()))?;
        let pair = InstrumentPair::parse(&request.instrument_pair)?;

        Ok((pair, side))
    }

    /// Worst-case amount the order can consume at its limit price.
    ///
    /// A buy spends the quote asset (`price * quantity`); a sell delivers the
    /// base asset (`quantity`).
    pub fn required_coverage(order: &Order) -> RequiredCoverage {
        match order.side {
            Side::Buy => RequiredCoverage {
                asset: order.instrument_pair.quote().to_string(),
                amount: order.price * order.quantity,
            },
            Side::Sell => RequiredCoverage {
                asset: order.instrument_pair.base().to_string(),
                amount: order.quantity,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn raw(pair: &str, side: &str, price: Decimal, quantity: Decimal) -> OrderRequest {
        OrderRequest {
            account_id: Uuid::new_v4(),
            instrument_pair: pair.to_string(),
            side: side.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_valid_orders() {
        let (pair, side) =
            OrderValidator::validate(&raw("BTC_BRL", "BUY", dec!(100.00), dec!(1.0))).unwrap();
        assert_eq!(pair.as_str(), "BTC_BRL");
        assert_eq!(side, Side::Buy);

        let (_, side) =
            OrderValidator::validate(&raw("ETH_BTC", "SELL", dec!(0.060), dec!(2.5))).unwrap();
        assert_eq!(side, Side::Sell);
    }

    #[test]
    fn test_price_must_be_positive() {
        for price in [dec!(0), dec!(-1)] {
            assert_eq!(
                OrderValidator::validate(&raw("BTC_BRL", "BUY", price, dec!(1))),
                Err(ValidationError::InvalidPrice(price))
            );
        }
    }

    #[test]
    fn test_quantity_must_be_positive() {
        for quantity in [dec!(0), dec!(-0.1)] {
            assert_eq!(
                OrderValidator::validate(&raw("BTC_BRL", "BUY", dec!(100), quantity)),
                Err(ValidationError::InvalidQuantity(quantity))
            );
        }
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            OrderValidator::validate(&raw("BTC_BRL", "SELL", dec!(100), dec!(1001))),
            Err(ValidationError::QuantityOverLimit(dec!(1001)))
        );
        assert_eq!(
            OrderValidator::validate(&raw("BTC_BRL", "BUY", dec!(100000001), dec!(1))),
            Err(ValidationError::PriceOverLimit(dec!(100000001)))
        );
        // Bounds are inclusive
        assert!(
            OrderValidator::validate(&raw("BTC_BRL", "BUY", MAX_PRICE, MAX_QUANTITY)).is_ok()
        );
    }

    #[test]
    fn test_side_and_pair() {
        assert_eq!(
            OrderValidator::validate(&raw("BTC_BRL", "HOLD", dec!(100), dec!(1))),
            Err(ValidationError::InvalidSide("HOLD".to_string()))
        );
        for pair in ["BTCBRL", "_BRL", "BTC_", "A_B_C"] {
            assert_eq!(
                OrderValidator::validate(&raw(pair, "BUY", dec!(100), dec!(1))),
                Err(ValidationError::InvalidPairFormat(pair.to_string()))
            );
        }
    }

    #[test]
    fn test_first_failure_wins() {
        // Bad price, quantity, side and pair at once: price is reported
        assert_eq!(
            OrderValidator::validate(&raw("BAD", "HOLD", dec!(0), dec!(0))),
            Err(ValidationError::InvalidPrice(dec!(0)))
        );
        // Over-limit quantity is reported before over-limit price
        assert_eq!(
            OrderValidator::validate(&raw("BTC_BRL", "BUY", dec!(200000000), dec!(2000))),
            Err(ValidationError::QuantityOverLimit(dec!(2000)))
        );
        // Side is checked before pair
        assert_eq!(
            OrderValidator::validate(&raw("BAD", "HOLD", dec!(1), dec!(1))),
            Err(ValidationError::InvalidSide("HOLD".to_string()))
        );
    }

    #[test]
    fn test_required_coverage() {
        let pair = InstrumentPair::parse("BTC_BRL").unwrap();
        let account = Uuid::new_v4();

        let buy = Order::new_with_time(
            account,
            pair.clone(),
            Side::Buy,
            dec!(200000.00),
            dec!(0.5),
            Utc::now(),
        );
        assert_eq!(
            OrderValidator::required_coverage(&buy),
            RequiredCoverage {
                asset: "BRL".to_string(),
                amount: dec!(100000.00),
            }
        );

        let sell = Order::new_with_time(
            account,
            pair,
            Side::Sell,
            dec!(200000.00),
            dec!(0.5),
            Utc::now(),
        );
        assert_eq!(
            OrderValidator::required_coverage(&sell),
            RequiredCoverage {
                asset: "BTC".to_string(),
                amount: dec!(0.5),
            }
        );
    }
}
