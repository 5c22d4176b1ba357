use std::sync::Arc;

use hermes_matching::{OrderBookAggregator, OrderBookView};
use hermes_ports::{Transaction, TransactionManager};

use crate::error::Result;

/// Aggregated bid/ask levels for one pair; `None` when nothing rests on it
pub struct GetOrderBookUseCase<M: TransactionManager> {
    store: Arc<M>,
    aggregator: OrderBookAggregator,
}

impl<M: TransactionManager> GetOrderBookUseCase<M> {
    pub fn new(store: Arc<M>) -> Self {
        Self {
            store,
            aggregator: OrderBookAggregator::new(),
        }
    }

    pub async fn execute(&self, instrument_pair: &str) -> Result<Option<OrderBookView>> {
        let mut tx = self.store.begin().await?;
        let view = self.aggregator.aggregate(&mut tx, instrument_pair).await;
        tx.rollback().await?;
        Ok(view?)
    }
}
