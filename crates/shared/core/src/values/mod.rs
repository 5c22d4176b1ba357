use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity value - uses Decimal for precision
pub type Quantity = Decimal;

/// Balance or notional amount of a single asset
pub type Amount = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Asset symbol, e.g. "BTC" or "BRL"
pub type Asset = String;

/// Fractional digits kept for every persisted price, quantity and balance
pub const STORAGE_SCALE: u32 = 8;

/// Rescale a value to the fixed storage scale (banker's rounding past 8 digits).
pub fn to_storage_scale(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(STORAGE_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Canonical form of a decimal: trailing zeros stripped, so `100` and `100.00`
/// produce the same key.
pub fn canonical(value: Decimal) -> Decimal {
    value.normalize()
}
