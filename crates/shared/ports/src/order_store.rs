use std::cmp::Ordering;

use async_trait::async_trait;
use hermes_core::{AccountId, InstrumentPair, Order, OrderId, OrderStatus, Price, Quantity, Side};

use crate::error::StoreResult;

/// Selection of resting orders a taker may execute against
///
/// Encodes self-trade exclusion, price eligibility and price-time priority so
/// every storage backend applies the same rule.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingCriteria {
    /// The taker's account; its own resting orders are never returned
    pub exclude_account: AccountId,
    pub pair: InstrumentPair,
    /// Side of the resting orders (opposite of the taker)
    pub maker_side: Side,
    /// The taker's limit price
    pub limit_price: Price,
}

impl MatchingCriteria {
    pub fn for_taker(taker: &Order) -> Self {
        Self {
            exclude_account: taker.account_id,
            pair: taker.instrument_pair.clone(),
            maker_side: taker.side.opposite(),
            limit_price: taker.price,
        }
    }

    pub fn taker_is_buy(&self) -> bool {
        self.maker_side == Side::Sell
    }

    /// Whether a stored order is an eligible maker under these criteria
    pub fn admits(&self, order: &Order) -> bool {
        order.account_id != self.exclude_account
            && order.instrument_pair == self.pair
            && order.side == self.maker_side
            && order.status.is_active()
            && if self.taker_is_buy() {
                order.price <= self.limit_price
            } else {
                order.price >= self.limit_price
            }
    }

    /// Price-time priority between two eligible makers.
    ///
    /// Best price for the taker first (cheapest ask for a buyer, highest bid
    /// for a seller), then earliest arrival.
    pub fn priority(&self, a: &Order, b: &Order) -> Ordering {
        let by_price = if self.taker_is_buy() {
            a.price.cmp(&b.price)
        } else {
            b.price.cmp(&a.price)
        };
        by_price
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.sequence.cmp(&b.sequence))
    }
}

/// Persistence of orders and their mutable state
#[async_trait]
pub trait OrderStore: Send {
    /// Persist a new order. The store assigns its arrival `sequence` and
    /// returns the stored copy.
    async fn create_order(&mut self, order: Order) -> StoreResult<Order>;

    /// Point lookup; with a filter, only orders in one of the given statuses
    async fn get_order(
        &mut self,
        id: OrderId,
        status_filter: Option<&[OrderStatus]>,
    ) -> StoreResult<Option<Order>>;

    async fn update_status(&mut self, id: OrderId, status: OrderStatus) -> StoreResult<()>;

    async fn update_remaining_and_status(
        &mut self,
        id: OrderId,
        remaining: Quantity,
        status: OrderStatus,
    ) -> StoreResult<()>;

    /// All `OPEN` or `PARTIALLY_FILLED` orders for a pair, in no particular order
    async fn open_orders(&mut self, pair: &InstrumentPair) -> StoreResult<Vec<Order>>;

    /// Eligible makers in price-time priority (see [`MatchingCriteria`])
    async fn matching_orders(&mut self, criteria: &MatchingCriteria) -> StoreResult<Vec<Order>>;
}
