use std::sync::Arc;

use hermes_core::{Order, OrderId, OrderStatus};
use hermes_ports::{Clock, OrderStore, Transaction, TransactionManager};

use crate::error::Result;

/// Withdraw the resting part of an order
///
/// Only `OPEN` and `PARTIALLY_FILLED` orders can be cancelled. Anything else,
/// including an unknown id, is a no-op reported as `None`.
pub struct CancelOrderUseCase<M, C>
where
    M: TransactionManager,
    C: Clock,
{
    store: Arc<M>,
    clock: Arc<C>,
}

impl<M, C> CancelOrderUseCase<M, C>
where
    M: TransactionManager,
    C: Clock,
{
    pub fn new(store: Arc<M>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(&self, order_id: OrderId) -> Result<Option<Order>> {
        let mut tx = self.store.begin().await?;

        let active = tx
            .get_order(order_id, Some(&OrderStatus::ACTIVE[..]))
            .await?;
        let Some(mut order) = active else {
            tx.rollback().await?;
            log::info!("cancel of order {} ignored: not active", order_id);
            return Ok(None);
        };

        order.cancel(self.clock.now());
        tx.update_status(order.id, OrderStatus::Cancelled).await?;
        tx.commit().await?;

        log::info!(
            "order {} cancelled with {} remaining",
            order.id,
            order.remaining_quantity
        );
        Ok(Some(order))
    }
}
