use std::cmp::Reverse;
use std::collections::BTreeMap;

use hermes_core::{InstrumentPair, Price, Quantity, Side, canonical};
use hermes_ports::OrderStore;
use serde::Serialize;

use crate::error::MatchingResult;

/// Total resting quantity at one price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceLevel {
    pub price: Price,
    pub quantity: Quantity,
}

/// Price-level projection of a pair's resting orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBookView {
    pub instrument_pair: InstrumentPair,
    /// Best (highest) bid first
    pub bids: Vec<PriceLevel>,
    /// Best (lowest) ask first
    pub asks: Vec<PriceLevel>,
}

impl OrderBookView {
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}

/// Read-only aggregation of the book into price levels
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderBookAggregator;

impl OrderBookAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate every active order of `pair`.
    ///
    /// Returns `None` when nothing rests on the pair. Prices are grouped by
    /// their canonical value, so `100` and `100.00` land on one level.
    pub async fn aggregate<T>(
        &self,
        tx: &mut T,
        pair: &str,
    ) -> MatchingResult<Option<OrderBookView>>
    where
        T: OrderStore + ?Sized,
    {
        let pair = InstrumentPair::parse(pair)?;
        let orders = tx.open_orders(&pair).await?;
        if orders.is_empty() {
            return Ok(None);
        }

        let mut bids: BTreeMap<Reverse<Price>, Quantity> = BTreeMap::new();
        let mut asks: BTreeMap<Price, Quantity> = BTreeMap::new();
        for order in &orders {
            let price = canonical(order.price);
            let slot = match order.side {
                Side::Buy => bids.entry(Reverse(price)).or_default(),
                Side::Sell => asks.entry(price).or_default(),
            };
            *slot += order.remaining_quantity;
        }

        let level = |price: Price, quantity: Quantity| PriceLevel {
            price,
            quantity: canonical(quantity),
        };
        Ok(Some(OrderBookView {
            instrument_pair: pair,
            bids: bids.into_iter().map(|(Reverse(p), q)| level(p, q)).collect(),
            asks: asks.into_iter().map(|(p, q)| level(p, q)).collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchingError;
    use chrono::Utc;
    use hermes_core::{Order, OrderStatus, ValidationError};
    use hermes_ports::TransactionManager;
    use hermes_store::InMemoryStore;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn order(side: Side, price: Price, qty: Quantity) -> Order {
        Order::new_with_time(
            Uuid::new_v4(),
            InstrumentPair::parse("BTC_BRL").unwrap(),
            side,
            price,
            qty,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_equal_prices_collapse_into_one_level() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.create_order(order(Side::Buy, dec!(100), dec!(1.0)))
            .await
            .unwrap();
        tx.create_order(order(Side::Buy, dec!(100.00), dec!(0.4)))
            .await
            .unwrap();

        let view = OrderBookAggregator::new()
            .aggregate(&mut tx, "BTC_BRL")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(view.bids.len(), 1);
        assert_eq!(view.bids[0].price.to_string(), "100");
        assert_eq!(view.bids[0].quantity, dec!(1.4));
        assert!(view.asks.is_empty());
    }

    #[tokio::test]
    async fn test_level_ordering_and_remaining_quantities() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        for (side, price, qty) in [
            (Side::Buy, dec!(98), dec!(1)),
            (Side::Buy, dec!(99), dec!(2)),
            (Side::Sell, dec!(102), dec!(1)),
            (Side::Sell, dec!(101), dec!(3)),
        ] {
            tx.create_order(order(side, price, qty)).await.unwrap();
        }
        let partial = tx
            .create_order(order(Side::Sell, dec!(101), dec!(1)))
            .await
            .unwrap();
        tx.update_remaining_and_status(partial.id, dec!(0.5), OrderStatus::PartiallyFilled)
            .await
            .unwrap();
        let cancelled = tx
            .create_order(order(Side::Buy, dec!(99.5), dec!(7)))
            .await
            .unwrap();
        tx.update_status(cancelled.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        let view = OrderBookAggregator::new()
            .aggregate(&mut tx, "BTC_BRL")
            .await
            .unwrap()
            .unwrap();

        let bids: Vec<_> = view.bids.iter().map(|l| (l.price, l.quantity)).collect();
        let asks: Vec<_> = view.asks.iter().map(|l| (l.price, l.quantity)).collect();
        assert_eq!(bids, vec![(dec!(99), dec!(2)), (dec!(98), dec!(1))]);
        assert_eq!(asks, vec![(dec!(101), dec!(3.5)), (dec!(102), dec!(1))]);
        assert_eq!(view.best_bid().map(|l| l.price), Some(dec!(99)));
        assert_eq!(view.best_ask().map(|l| l.price), Some(dec!(101)));
    }

    #[tokio::test]
    async fn test_empty_book_is_none() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();

        let view = OrderBookAggregator::new()
            .aggregate(&mut tx, "ETH_BRL")
            .await
            .unwrap();
        assert!(view.is_none());
    }

    #[tokio::test]
    async fn test_bad_pair_is_rejected() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();

        let err = OrderBookAggregator::new()
            .aggregate(&mut tx, "BTCBRL")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            MatchingError::Validation(ValidationError::InvalidPairFormat("BTCBRL".to_string()))
        );
    }
}
