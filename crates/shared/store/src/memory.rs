use std::sync::Arc;

use async_trait::async_trait;
use hermes_clock::SystemClock;
use hermes_core::{
    Account, AccountId, Amount, InstrumentPair, Order, OrderId, OrderStatus, Quantity, Trade,
    Wallet, to_storage_scale,
};
use hermes_ports::{
    AccountStore, BalanceLedger, Clock, LedgerError, LedgerResult, MatchingCriteria, OrderStore,
    StoreError, StoreResult, TradeStore, Transaction, TransactionManager,
};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::state::{StoreState, Undo};

/// In-memory store shared by every use case
///
/// Cloning is cheap and yields a handle to the same data.
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Store that stamps wallet and order updates with the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
            clock,
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionManager for InMemoryStore {
    type Tx = InMemoryTransaction;

    async fn begin(&self) -> StoreResult<InMemoryTransaction> {
        let state = Arc::clone(&self.state).lock_owned().await;
        Ok(InMemoryTransaction {
            state,
            journal: Vec::new(),
            clock: Arc::clone(&self.clock),
        })
    }
}

/// Exclusive unit of work over an [`InMemoryStore`]
///
/// Writes go straight to the locked state and record their inverse in a
/// journal. `commit` forgets the journal; `rollback` or drop replays it
/// newest first.
pub struct InMemoryTransaction {
    state: OwnedMutexGuard<StoreState>,
    journal: Vec<Undo>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTransaction {
    fn adjust(&mut self, account_id: AccountId, asset: &str, delta: Amount) -> LedgerResult<()> {
        let now = self.clock.now();
        let wallet = self
            .state
            .wallet_mut(account_id, asset)
            .ok_or_else(|| LedgerError::insufficient(account_id, asset))?;
        let balance = wallet
            .balance_after(delta)
            .ok_or_else(|| LedgerError::insufficient(account_id, asset))?;

        self.journal.push(Undo::RestoreWallet(wallet.clone()));
        wallet.balance = balance;
        wallet.updated_at = now;
        Ok(())
    }

    /// Journal the current version of an order and hand it out for mutation
    fn order_for_update(&mut self, id: OrderId) -> StoreResult<&mut Order> {
        let order = self
            .state
            .orders
            .get_mut(&id)
            .ok_or_else(|| StoreError::missing("order", id))?;
        self.journal.push(Undo::RestoreOrder(order.clone()));
        Ok(order)
    }

    fn revert(&mut self) {
        while let Some(undo) = self.journal.pop() {
            self.state.revert(undo);
        }
    }
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        if !self.journal.is_empty() {
            log::trace!("uncommitted transaction dropped");
            self.revert();
        }
    }
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(mut self) -> StoreResult<()> {
        self.journal.clear();
        log::trace!("transaction committed");
        Ok(())
    }

    async fn rollback(mut self) -> StoreResult<()> {
        self.revert();
        log::trace!("transaction rolled back");
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryTransaction {
    async fn create_order(&mut self, mut order: Order) -> StoreResult<Order> {
        if self.state.orders.contains_key(&order.id) {
            return Err(StoreError::duplicate("order", order.id));
        }
        order.price = to_storage_scale(order.price);
        order.quantity = to_storage_scale(order.quantity);
        order.remaining_quantity = to_storage_scale(order.remaining_quantity);

        let last_sequence = self.state.last_sequence;
        order.sequence = self.state.next_sequence();
        self.journal.push(Undo::CreateOrder {
            id: order.id,
            last_sequence,
        });

        self.state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_order(
        &mut self,
        id: OrderId,
        status_filter: Option<&[OrderStatus]>,
    ) -> StoreResult<Option<Order>> {
        Ok(self
            .state
            .orders
            .get(&id)
            .filter(|order| status_filter.is_none_or(|statuses| statuses.contains(&order.status)))
            .cloned())
    }

    async fn update_status(&mut self, id: OrderId, status: OrderStatus) -> StoreResult<()> {
        let now = self.clock.now();
        let order = self.order_for_update(id)?;
        order.status = status;
        order.updated_at = now;
        Ok(())
    }

    async fn update_remaining_and_status(
        &mut self,
        id: OrderId,
        remaining: Quantity,
        status: OrderStatus,
    ) -> StoreResult<()> {
        let now = self.clock.now();
        let order = self.order_for_update(id)?;
        order.remaining_quantity = to_storage_scale(remaining);
        order.status = status;
        order.updated_at = now;
        Ok(())
    }

    async fn open_orders(&mut self, pair: &InstrumentPair) -> StoreResult<Vec<Order>> {
        Ok(self
            .state
            .orders
            .values()
            .filter(|order| &order.instrument_pair == pair && order.status.is_active())
            .cloned()
            .collect())
    }

    async fn matching_orders(&mut self, criteria: &MatchingCriteria) -> StoreResult<Vec<Order>> {
        let mut makers: Vec<Order> = self
            .state
            .orders
            .values()
            .filter(|order| criteria.admits(order))
            .cloned()
            .collect();
        makers.sort_by(|a, b| criteria.priority(a, b));
        Ok(makers)
    }
}

#[async_trait]
impl BalanceLedger for InMemoryTransaction {
    async fn debit(
        &mut self,
        account_id: AccountId,
        asset: &str,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.adjust(account_id, asset, -to_storage_scale(amount))
    }

    async fn credit(
        &mut self,
        account_id: AccountId,
        asset: &str,
        amount: Amount,
    ) -> LedgerResult<()> {
        self.adjust(account_id, asset, to_storage_scale(amount))
    }

    async fn balance(&mut self, account_id: AccountId, asset: &str) -> StoreResult<Option<Wallet>> {
        Ok(self
            .state
            .wallets
            .get(&(account_id, asset.to_string()))
            .cloned())
    }

    async fn balances(&mut self, account_id: AccountId) -> StoreResult<Vec<Wallet>> {
        let mut wallets: Vec<Wallet> = self
            .state
            .wallets
            .values()
            .filter(|wallet| wallet.account_id == account_id)
            .cloned()
            .collect();
        wallets.sort_by(|a, b| a.asset.cmp(&b.asset));
        Ok(wallets)
    }

    async fn open_wallet(
        &mut self,
        account_id: AccountId,
        asset: &str,
        initial_balance: Amount,
    ) -> StoreResult<Wallet> {
        let key = (account_id, asset.to_string());
        if let Some(existing) = self.state.wallets.get(&key) {
            return Ok(existing.clone());
        }

        let wallet = Wallet::new_with_time(
            account_id,
            asset,
            to_storage_scale(initial_balance),
            self.clock.now(),
        );
        self.state.wallets.insert(key.clone(), wallet.clone());
        self.journal.push(Undo::OpenWallet(key));
        Ok(wallet)
    }
}

#[async_trait]
impl TradeStore for InMemoryTransaction {
    async fn create_trade(&mut self, trade: &Trade) -> StoreResult<()> {
        if self.state.trade_ids.contains(&trade.id) {
            return Err(StoreError::duplicate("trade", trade.id));
        }
        let mut trade = trade.clone();
        trade.price = to_storage_scale(trade.price);
        trade.quantity = to_storage_scale(trade.quantity);

        self.state.trade_ids.insert(trade.id);
        self.state.trades.push(trade);
        self.journal.push(Undo::CreateTrade);
        Ok(())
    }

    async fn trades_for_order(&mut self, order_id: OrderId) -> StoreResult<Vec<Trade>> {
        let mut trades: Vec<Trade> = self
            .state
            .trades
            .iter()
            .filter(|trade| trade.involves(order_id))
            .cloned()
            .collect();
        trades.sort_by_key(|trade| trade.executed_at);
        Ok(trades)
    }
}

#[async_trait]
impl AccountStore for InMemoryTransaction {
    async fn create_account(&mut self, account: &Account) -> StoreResult<()> {
        if self.state.accounts.contains_key(&account.id) {
            return Err(StoreError::duplicate("account", account.id));
        }
        self.state.accounts.insert(account.id, account.clone());
        self.journal.push(Undo::CreateAccount(account.id));
        Ok(())
    }

    async fn get_account(&mut self, id: AccountId) -> StoreResult<Option<Account>> {
        Ok(self.state.accounts.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use hermes_clock::ManualClock;
    use hermes_core::Side;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn btc_brl() -> InstrumentPair {
        InstrumentPair::parse("BTC_BRL").unwrap()
    }

    fn sell(account: AccountId, price: Amount) -> Order {
        Order::new_with_time(account, btc_brl(), Side::Sell, price, dec!(1), Utc::now())
    }

    #[tokio::test]
    async fn test_commit_publishes_changes() {
        let store = InMemoryStore::new();
        let order = sell(Uuid::new_v4(), dec!(100));

        let mut tx = store.begin().await.unwrap();
        tx.create_order(order.clone()).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let stored = tx.get_order(order.id, None).await.unwrap().unwrap();
        assert_eq!(stored.id, order.id);
        assert_eq!(stored.sequence, 1);
    }

    #[tokio::test]
    async fn test_rollback_and_drop_discard_changes() {
        let store = InMemoryStore::new();
        let account = Uuid::new_v4();

        let mut tx = store.begin().await.unwrap();
        tx.open_wallet(account, "BTC", dec!(1)).await.unwrap();
        tx.rollback().await.unwrap();

        {
            let mut tx = store.begin().await.unwrap();
            tx.open_wallet(account, "BRL", dec!(1)).await.unwrap();
            // dropped without commit
        }

        let mut tx = store.begin().await.unwrap();
        assert!(tx.balances(account).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_begin_waits_for_open_transaction() {
        let store = InMemoryStore::new();
        let tx = store.begin().await.unwrap();

        let blocked =
            tokio::time::timeout(std::time::Duration::from_millis(50), store.begin()).await;
        assert!(blocked.is_err());

        drop(tx);
        assert!(store.begin().await.is_ok());
    }

    #[tokio::test]
    async fn test_sequences_are_increasing() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();

        let first = tx.create_order(sell(Uuid::new_v4(), dec!(1))).await.unwrap();
        let second = tx.create_order(sell(Uuid::new_v4(), dec!(1))).await.unwrap();
        assert!(first.sequence < second.sequence);

        let duplicate = tx.create_order(first.clone()).await;
        assert!(matches!(duplicate, Err(StoreError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_get_order_status_filter() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let order = tx.create_order(sell(Uuid::new_v4(), dec!(1))).await.unwrap();

        tx.update_status(order.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        assert!(
            tx.get_order(order.id, Some(&OrderStatus::ACTIVE[..]))
                .await
                .unwrap()
                .is_none()
        );
        let cancelled = tx.get_order(order.id, None).await.unwrap().unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let missing = tx.update_status(Uuid::new_v4(), OrderStatus::Filled).await;
        assert!(matches!(missing, Err(StoreError::Missing { .. })));
    }

    #[tokio::test]
    async fn test_matching_orders_in_priority() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let taker_account = Uuid::new_v4();
        let t0 = Utc::now();

        let mut older = sell(Uuid::new_v4(), dec!(100));
        older.created_at = t0;
        let mut newer = sell(Uuid::new_v4(), dec!(100));
        newer.created_at = t0 + Duration::seconds(1);
        let mut cheaper = sell(Uuid::new_v4(), dec!(99));
        cheaper.created_at = t0 + Duration::seconds(2);
        let too_expensive = sell(Uuid::new_v4(), dec!(101));
        let own = sell(taker_account, dec!(98));

        for order in [&newer, &too_expensive, &older, &own, &cheaper] {
            tx.create_order(order.clone()).await.unwrap();
        }

        let taker = Order::new_with_time(
            taker_account,
            btc_brl(),
            Side::Buy,
            dec!(100),
            dec!(3),
            Utc::now(),
        );
        let makers = tx
            .matching_orders(&MatchingCriteria::for_taker(&taker))
            .await
            .unwrap();
        let ids: Vec<_> = makers.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![cheaper.id, older.id, newer.id]);

        assert_eq!(tx.open_orders(&btc_brl()).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_debit_and_credit() {
        let clock = Arc::new(ManualClock::starting_now());
        let store = InMemoryStore::with_clock(clock.clone());
        let account = Uuid::new_v4();
        let mut tx = store.begin().await.unwrap();

        let opened = tx.open_wallet(account, "BTC", dec!(1.5)).await.unwrap();
        clock.advance(Duration::seconds(1));

        tx.debit(account, "BTC", dec!(0.5)).await.unwrap();
        tx.credit(account, "BTC", dec!(0.25)).await.unwrap();
        let wallet = tx.balance(account, "BTC").await.unwrap().unwrap();
        assert_eq!(wallet.balance, dec!(1.25));
        assert!(wallet.updated_at > opened.updated_at);

        // Debit to exactly zero is allowed, below zero is not
        assert!(tx.debit(account, "BTC", dec!(1.25)).await.is_ok());
        assert_eq!(
            tx.debit(account, "BTC", dec!(0.00000001)).await,
            Err(LedgerError::insufficient(account, "BTC"))
        );
    }

    #[tokio::test]
    async fn test_missing_wallet_is_rejected() {
        let store = InMemoryStore::new();
        let account = Uuid::new_v4();
        let mut tx = store.begin().await.unwrap();

        assert_eq!(
            tx.credit(account, "BRL", dec!(10)).await,
            Err(LedgerError::insufficient(account, "BRL"))
        );
        assert!(tx.debit(account, "BRL", dec!(10)).await.is_err());
        assert!(tx.balance(account, "BRL").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_wallet_is_idempotent() {
        let store = InMemoryStore::new();
        let account = Uuid::new_v4();
        let mut tx = store.begin().await.unwrap();

        let first = tx.open_wallet(account, "BRL", dec!(100)).await.unwrap();
        let again = tx.open_wallet(account, "BRL", dec!(999)).await.unwrap();
        assert_eq!(first, again);

        tx.open_wallet(account, "BTC", dec!(0)).await.unwrap();
        let assets: Vec<_> = tx
            .balances(account)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.asset)
            .collect();
        assert_eq!(assets, vec!["BRL", "BTC"]);
    }

    #[tokio::test]
    async fn test_trades_for_order() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let buyer = Uuid::new_v4();
        let t0 = Utc::now();

        let first = Trade::new_with_time(btc_brl(), buyer, Uuid::new_v4(), dec!(1), dec!(1), t0);
        let second = Trade::new_with_time(
            btc_brl(),
            buyer,
            Uuid::new_v4(),
            dec!(1),
            dec!(1),
            t0 + Duration::seconds(1),
        );
        let unrelated =
            Trade::new_with_time(btc_brl(), Uuid::new_v4(), Uuid::new_v4(), dec!(1), dec!(1), t0);

        tx.create_trade(&second).await.unwrap();
        tx.create_trade(&unrelated).await.unwrap();
        tx.create_trade(&first).await.unwrap();

        let ids: Vec<_> = tx
            .trades_for_order(buyer)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_accounts() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let account = Account::new_with_time("John Doe", Utc::now());

        tx.create_account(&account).await.unwrap();
        assert_eq!(tx.get_account(account.id).await.unwrap(), Some(account.clone()));
        assert!(matches!(
            tx.create_account(&account).await,
            Err(StoreError::Duplicate { .. })
        ));
    }

    #[tokio::test]
    async fn test_undo_journal_restores_every_mutation() {
        let store = InMemoryStore::new();
        let account = Uuid::new_v4();

        let mut tx = store.begin().await.unwrap();
        let resting = tx.create_order(sell(account, dec!(100))).await.unwrap();
        tx.open_wallet(account, "BTC", dec!(2)).await.unwrap();
        tx.commit().await.unwrap();
        let committed = store.state.lock().await.clone();

        for discard_by_drop in [false, true] {
            let mut tx = store.begin().await.unwrap();
            let placed = tx.create_order(sell(account, dec!(101))).await.unwrap();
            tx.update_remaining_and_status(resting.id, dec!(0.5), OrderStatus::PartiallyFilled)
                .await
                .unwrap();
            tx.update_status(resting.id, OrderStatus::Cancelled)
                .await
                .unwrap();
            tx.debit(account, "BTC", dec!(0.5)).await.unwrap();
            tx.credit(account, "BTC", dec!(0.25)).await.unwrap();
            tx.open_wallet(account, "BRL", dec!(1000)).await.unwrap();
            tx.create_trade(&Trade::new_with_time(
                btc_brl(),
                placed.id,
                resting.id,
                dec!(100),
                dec!(0.5),
                Utc::now(),
            ))
            .await
            .unwrap();
            tx.create_account(&Account::new_with_time("Jane Doe", Utc::now()))
                .await
                .unwrap();

            if discard_by_drop {
                drop(tx);
            } else {
                tx.rollback().await.unwrap();
            }
            assert_eq!(*store.state.lock().await, committed);
        }

        // Sequence numbering resumes where the committed state left off
        let mut tx = store.begin().await.unwrap();
        let next = tx.create_order(sell(account, dec!(1))).await.unwrap();
        assert_eq!(next.sequence, resting.sequence + 1);
    }

    #[tokio::test]
    async fn test_commit_keeps_mutations() {
        let store = InMemoryStore::new();
        let account = Uuid::new_v4();

        let mut tx = store.begin().await.unwrap();
        tx.open_wallet(account, "BTC", dec!(2)).await.unwrap();
        tx.debit(account, "BTC", dec!(0.5)).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let wallet = tx.balance(account, "BTC").await.unwrap().unwrap();
        assert_eq!(wallet.balance, dec!(1.5));
    }

    #[tokio::test]
    async fn test_credit_overflow_is_rejected() {
        let store = InMemoryStore::new();
        let account = Uuid::new_v4();
        let mut tx = store.begin().await.unwrap();

        tx.open_wallet(account, "BRL", Decimal::MAX).await.unwrap();
        assert_eq!(
            tx.credit(account, "BRL", dec!(1)).await,
            Err(LedgerError::insufficient(account, "BRL"))
        );
        let wallet = tx.balance(account, "BRL").await.unwrap().unwrap();
        assert_eq!(wallet.balance, Decimal::MAX);
    }
}
