use hermes_core::{Order, Timestamp, Trade};
use hermes_ports::{BalanceLedger, MatchingCriteria, OrderStore, TradeStore};

use crate::error::MatchingResult;
use crate::settlement::TradeSettlement;

/// Standard price-time priority matching engine (FIFO)
///
/// Orders are matched based on:
/// 1. Best price for the taker (lowest ask for a buy, highest bid for a sell)
/// 2. Time priority (first in, first out at same price)
///
/// Self-trades are excluded and every execution happens at the resting
/// order's price.
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchingEngine {
    settlement: TradeSettlement,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self {
            settlement: TradeSettlement::new(),
        }
    }

    pub fn name(&self) -> &str {
        "Price-Time Priority"
    }

    /// Match a freshly persisted taker against the resting book.
    ///
    /// Eligible makers are fetched once, in priority order, and consumed until
    /// the taker is filled. The first failing settlement aborts the run; the
    /// caller is expected to roll the transaction back.
    pub async fn run<T>(
        &self,
        tx: &mut T,
        taker: &mut Order,
        now: Timestamp,
    ) -> MatchingResult<Vec<Trade>>
    where
        T: OrderStore + BalanceLedger + TradeStore + ?Sized,
    {
        let criteria = MatchingCriteria::for_taker(taker);
        let makers = tx.matching_orders(&criteria).await?;
        if makers.is_empty() {
            log::debug!("order {} rests without a match", taker.id);
            return Ok(Vec::new());
        }

        let mut trades = Vec::new();
        for mut maker in makers {
            if taker.is_filled() {
                break;
            }
            let quantity = taker.remaining_quantity.min(maker.remaining_quantity);
            if quantity.is_zero() {
                continue;
            }
            let trade = self
                .settlement
                .execute(tx, taker, &mut maker, quantity, now)
                .await?;
            trades.push(trade);
        }

        log::debug!(
            "order {} matched {} trade(s), remaining {}",
            taker.id,
            trades.len(),
            taker.remaining_quantity
        );
        Ok(trades)
    }
}
