use std::sync::Arc;

use hermes_core::{Account, AccountId, Amount, Asset, Wallet};
use hermes_ports::{AccountStore, BalanceLedger, Clock, Transaction, TransactionManager};
use rust_decimal::Decimal;

use crate::error::{ExchangeError, Result};

#[derive(Debug, Clone)]
pub struct ProvisionAccountCommand {
    /// Fixed id for seeded accounts; a fresh one is generated otherwise
    pub account_id: Option<AccountId>,
    pub name: String,
    pub wallets: Vec<(Asset, Amount)>,
}

#[derive(Debug, Clone)]
pub struct ProvisionAccountResult {
    pub account: Account,
    pub wallets: Vec<Wallet>,
}

/// Create an account and open its wallets in one transaction
///
/// Re-provisioning an existing account is harmless: the account is kept and
/// wallets that already exist keep their balance.
pub struct ProvisionAccountUseCase<M, C>
where
    M: TransactionManager,
    C: Clock,
{
    store: Arc<M>,
    clock: Arc<C>,
}

impl<M, C> ProvisionAccountUseCase<M, C>
where
    M: TransactionManager,
    C: Clock,
{
    pub fn new(store: Arc<M>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(
        &self,
        command: ProvisionAccountCommand,
    ) -> Result<ProvisionAccountResult> {
        let now = self.clock.now();
        let account = match command.account_id {
            Some(id) => Account::with_id(id, command.name, now),
            None => Account::new_with_time(command.name, now),
        };

        if let Some((asset, balance)) = command
            .wallets
            .iter()
            .find(|(_, balance)| *balance < Decimal::ZERO)
        {
            return Err(ExchangeError::InsufficientBalance {
                account_id: account.id,
                asset: asset.clone(),
                required: Decimal::ZERO,
                available: *balance,
            });
        }

        let mut tx = self.store.begin().await?;
        let account = match tx.get_account(account.id).await? {
            Some(existing) => existing,
            None => {
                tx.create_account(&account).await?;
                account
            }
        };

        let mut wallets = Vec::with_capacity(command.wallets.len());
        for (asset, balance) in &command.wallets {
            wallets.push(tx.open_wallet(account.id, asset, *balance).await?);
        }
        tx.commit().await?;

        log::info!(
            "provisioned account {} ({}) with {} wallet(s)",
            account.id,
            account.name,
            wallets.len()
        );
        Ok(ProvisionAccountResult { account, wallets })
    }
}
