use std::sync::Arc;

use hermes_core::{Order, OrderRequest, OrderValidator, Timestamp, Trade};
use hermes_matching::MatchingEngine;
use hermes_ports::{BalanceLedger, Clock, OrderStore, Transaction, TransactionManager};

use crate::error::{ExchangeError, Result};

#[derive(Debug, Clone)]
pub struct PlaceOrderResult {
    /// The taker as it stands after matching
    pub order: Order,
    /// Executions made by this placement, in matching order
    pub trades: Vec<Trade>,
}

/// Validate, check coverage, persist and match a limit order as one unit of work
pub struct PlaceOrderUseCase<M, C>
where
    M: TransactionManager,
    C: Clock,
{
    store: Arc<M>,
    clock: Arc<C>,
    engine: MatchingEngine,
}

impl<M, C> PlaceOrderUseCase<M, C>
where
    M: TransactionManager,
    C: Clock,
{
    pub fn new(store: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            engine: MatchingEngine::new(),
        }
    }

    pub async fn execute(&self, request: OrderRequest) -> Result<PlaceOrderResult> {
        log::info!(
            "placing {} {} order for account {}",
            request.side,
            request.instrument_pair,
            request.account_id
        );

        let now = self.clock.now();
        // Nothing is written before validation passes
        let order = Order::from_request(request, now)?;

        let mut tx = self.store.begin().await?;
        match self.place(&mut tx, order, now).await {
            Ok(result) => {
                tx.commit().await?;
                log::info!(
                    "order {} accepted: {} with {} trade(s)",
                    result.order.id,
                    result.order.status,
                    result.trades.len()
                );
                Ok(result)
            }
            Err(err) => {
                log::warn!("order placement rolled back: {}", err);
                if let Err(rollback) = tx.rollback().await {
                    log::error!("rollback failed: {}", rollback);
                }
                Err(err)
            }
        }
    }

    async fn place(
        &self,
        tx: &mut M::Tx,
        order: Order,
        now: Timestamp,
    ) -> Result<PlaceOrderResult> {
        let coverage = OrderValidator::required_coverage(&order);
        let wallet = tx
            .balance(order.account_id, &coverage.asset)
            .await?
            .ok_or_else(|| ExchangeError::WalletNotFound {
                account_id: order.account_id,
                asset: coverage.asset.clone(),
            })?;
        if !wallet.covers(coverage.amount) {
            return Err(ExchangeError::InsufficientBalance {
                account_id: order.account_id,
                asset: coverage.asset,
                required: coverage.amount,
                available: wallet.balance,
            });
        }

        let mut taker = tx.create_order(order).await?;
        let trades = self.engine.run(tx, &mut taker, now).await?;

        Ok(PlaceOrderResult {
            order: taker,
            trades,
        })
    }
}
