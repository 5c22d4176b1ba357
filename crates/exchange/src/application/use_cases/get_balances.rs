use std::sync::Arc;

use hermes_core::{AccountId, Wallet};
use hermes_ports::{BalanceLedger, Transaction, TransactionManager};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct AccountBalances {
    pub account_id: AccountId,
    /// Sorted by asset
    pub wallets: Vec<Wallet>,
}

pub struct GetBalancesUseCase<M: TransactionManager> {
    store: Arc<M>,
}

impl<M: TransactionManager> GetBalancesUseCase<M> {
    pub fn new(store: Arc<M>) -> Self {
        Self { store }
    }

    /// All wallets of an account, or `None` if it holds none
    pub async fn execute(&self, account_id: AccountId) -> Result<Option<AccountBalances>> {
        let mut tx = self.store.begin().await?;
        let wallets = tx.balances(account_id).await;
        tx.rollback().await?;

        let wallets = wallets?;
        if wallets.is_empty() {
            return Ok(None);
        }
        Ok(Some(AccountBalances {
            account_id,
            wallets,
        }))
    }
}
