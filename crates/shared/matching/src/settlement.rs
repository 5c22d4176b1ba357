use hermes_core::{Order, Quantity, Side, Timestamp, Trade, to_storage_scale};
use hermes_ports::{BalanceLedger, OrderStore, TradeStore};

use crate::error::{MatchingError, MatchingResult, SettlementStep};

/// Executes one match between a taker and a maker
///
/// Every write goes through the caller's transaction; a failure at any step
/// leaves the earlier writes to be discarded with it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TradeSettlement;

impl TradeSettlement {
    pub fn new() -> Self {
        Self
    }

    /// Record the trade, update both orders, then move base and quote.
    ///
    /// `quantity` must be positive and no larger than either order's
    /// remaining quantity. Both orders are updated in place to their
    /// persisted state.
    pub async fn execute<T>(
        &self,
        tx: &mut T,
        taker: &mut Order,
        maker: &mut Order,
        quantity: Quantity,
        now: Timestamp,
    ) -> MatchingResult<Trade>
    where
        T: OrderStore + BalanceLedger + TradeStore + ?Sized,
    {
        let (buyer, seller) = match taker.side {
            Side::Buy => (&*taker, &*maker),
            Side::Sell => (&*maker, &*taker),
        };
        let buyer_account = buyer.account_id;
        let seller_account = seller.account_id;

        // Resting order's price governs
        let trade = Trade::new_with_time(
            maker.instrument_pair.clone(),
            buyer.id,
            seller.id,
            maker.price,
            quantity,
            now,
        );
        tx.create_trade(&trade).await?;

        for order in [&mut *taker, &mut *maker] {
            let status = order.apply_execution(quantity, now);
            tx.update_remaining_and_status(order.id, order.remaining_quantity, status)
                .await?;
        }

        let base = trade.instrument_pair.base();
        let quote = trade.instrument_pair.quote();
        let total = to_storage_scale(trade.notional());

        tx.debit(seller_account, base, quantity)
            .await
            .map_err(|e| MatchingError::at_step(SettlementStep::DebitSellerBase, e))?;
        tx.credit(buyer_account, base, quantity)
            .await
            .map_err(|e| MatchingError::at_step(SettlementStep::CreditBuyerBase, e))?;
        tx.debit(buyer_account, quote, total)
            .await
            .map_err(|e| MatchingError::at_step(SettlementStep::DebitBuyerQuote, e))?;
        tx.credit(seller_account, quote, total)
            .await
            .map_err(|e| MatchingError::at_step(SettlementStep::CreditSellerQuote, e))?;

        log::debug!(
            "trade {} on {}: {} @ {} (buyer order {}, seller order {})",
            trade.id,
            trade.instrument_pair,
            trade.quantity,
            trade.price,
            trade.buyer_order_id,
            trade.seller_order_id
        );

        Ok(trade)
    }
}
