use async_trait::async_trait;
use hermes_core::{OrderId, Trade};

use crate::error::StoreResult;

/// Insert-only trade history
#[async_trait]
pub trait TradeStore: Send {
    async fn create_trade(&mut self, trade: &Trade) -> StoreResult<()>;

    /// Trades in which the order was buyer or seller, oldest first
    async fn trades_for_order(&mut self, order_id: OrderId) -> StoreResult<Vec<Trade>>;
}
