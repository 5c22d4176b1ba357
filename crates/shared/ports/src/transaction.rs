use async_trait::async_trait;

use crate::account_store::AccountStore;
use crate::error::StoreResult;
use crate::ledger::BalanceLedger;
use crate::order_store::OrderStore;
use crate::trade_store::TradeStore;

/// One unit of work over every store
///
/// Mutations made through a transaction become visible to other readers only
/// after `commit`. Dropping it without committing discards them, exactly like
/// `rollback`.
#[async_trait]
pub trait Transaction: OrderStore + BalanceLedger + TradeStore + AccountStore + Send {
    async fn commit(self) -> StoreResult<()>;

    async fn rollback(self) -> StoreResult<()>;
}

/// Factory for transactions, injected into every use case
///
/// Implementations must isolate concurrent transactions well enough that two
/// placements can never both consume the same resting quantity or both spend
/// the same balance.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    type Tx: Transaction;

    async fn begin(&self) -> StoreResult<Self::Tx>;
}
