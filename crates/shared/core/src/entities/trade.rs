use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::OrderId;
use crate::instruments::InstrumentPair;
use crate::values::{Amount, Price, Quantity};

/// Unique identifier for a trade
pub type TradeId = Uuid;

/// One execution between a buy order and a sell order
///
/// Trades reference orders by id only and are never updated once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub instrument_pair: InstrumentPair,
    pub buyer_order_id: OrderId,
    pub seller_order_id: OrderId,
    /// Always the resting (maker) order's limit price
    pub price: Price,
    pub quantity: Quantity,
    pub executed_at: DateTime<Utc>,
}

impl Trade {
    /// Create a new trade with explicit timestamp
    pub fn new_with_time(
        instrument_pair: InstrumentPair,
        buyer_order_id: OrderId,
        seller_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument_pair,
            buyer_order_id,
            seller_order_id,
            price,
            quantity,
            executed_at: timestamp,
        }
    }

    /// Returns the notional value of the trade (price * quantity)
    pub fn notional(&self) -> Amount {
        self.price * self.quantity
    }

    /// Whether the given order took part in this trade
    pub fn involves(&self, order_id: OrderId) -> bool {
        self.buyer_order_id == order_id || self.seller_order_id == order_id
    }
}
