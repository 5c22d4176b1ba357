use std::sync::Arc;

use hermes_core::{Order, OrderId, Trade};
use hermes_ports::{OrderStore, TradeStore, Transaction, TransactionManager};

use crate::error::{ExchangeError, Result};

#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    /// Every execution the order took part in, oldest first
    pub trades: Vec<Trade>,
}

pub struct GetOrderUseCase<M: TransactionManager> {
    store: Arc<M>,
}

impl<M: TransactionManager> GetOrderUseCase<M> {
    pub fn new(store: Arc<M>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, order_id: OrderId) -> Result<OrderDetails> {
        let mut tx = self.store.begin().await?;
        let order = tx
            .get_order(order_id, None)
            .await?
            .ok_or(ExchangeError::OrderNotFound(order_id))?;
        let trades = tx.trades_for_order(order_id).await?;
        tx.rollback().await?;

        Ok(OrderDetails { order, trades })
    }
}
