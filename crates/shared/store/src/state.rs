use std::collections::{HashMap, HashSet};

use hermes_core::{Account, AccountId, Asset, Order, OrderId, Trade, TradeId, Wallet};

/// Everything the exchange persists
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct StoreState {
    pub orders: HashMap<OrderId, Order>,
    /// Last arrival sequence handed out
    pub last_sequence: u64,
    pub wallets: HashMap<(AccountId, Asset), Wallet>,
    /// Append-only, in execution order
    pub trades: Vec<Trade>,
    pub trade_ids: HashSet<TradeId>,
    pub accounts: HashMap<AccountId, Account>,
}

/// Inverse of one mutation made inside a transaction
#[derive(Debug)]
pub(crate) enum Undo {
    CreateOrder { id: OrderId, last_sequence: u64 },
    /// Order as it was before an update
    RestoreOrder(Order),
    OpenWallet((AccountId, Asset)),
    /// Wallet as it was before a debit or credit
    RestoreWallet(Wallet),
    CreateTrade,
    CreateAccount(AccountId),
}

impl StoreState {
    pub fn next_sequence(&mut self) -> u64 {
        self.last_sequence += 1;
        self.last_sequence
    }

    pub fn wallet_mut(&mut self, account_id: AccountId, asset: &str) -> Option<&mut Wallet> {
        self.wallets.get_mut(&(account_id, asset.to_string()))
    }

    /// Apply the inverse of a single mutation
    pub fn revert(&mut self, undo: Undo) {
        match undo {
            Undo::CreateOrder { id, last_sequence } => {
                self.orders.remove(&id);
                self.last_sequence = last_sequence;
            }
            Undo::RestoreOrder(order) => {
                self.orders.insert(order.id, order);
            }
            Undo::OpenWallet(key) => {
                self.wallets.remove(&key);
            }
            Undo::RestoreWallet(wallet) => {
                self.wallets
                    .insert((wallet.account_id, wallet.asset.clone()), wallet);
            }
            Undo::CreateTrade => {
                if let Some(trade) = self.trades.pop() {
                    self.trade_ids.remove(&trade.id);
                }
            }
            Undo::CreateAccount(id) => {
                self.accounts.remove(&id);
            }
        }
    }
}
