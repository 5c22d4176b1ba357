use async_trait::async_trait;
use hermes_core::{AccountId, Amount, Wallet};

use crate::error::{LedgerResult, StoreResult};

/// Per-account, per-asset balances
///
/// Wallet balances change only through `debit`/`credit`, always inside the
/// caller's transaction. Neither operation clamps: a debit that would leave a
/// negative balance is rejected.
#[async_trait]
pub trait BalanceLedger: Send {
    /// Decrease a balance. Fails with `InsufficientOrMissingWallet` if the
    /// wallet is absent or the result would go negative.
    async fn debit(&mut self, account_id: AccountId, asset: &str, amount: Amount)
    -> LedgerResult<()>;

    /// Increase a balance. Fails only if the wallet is absent.
    async fn credit(
        &mut self,
        account_id: AccountId,
        asset: &str,
        amount: Amount,
    ) -> LedgerResult<()>;

    async fn balance(&mut self, account_id: AccountId, asset: &str) -> StoreResult<Option<Wallet>>;

    /// Every wallet of an account; empty if it has none
    async fn balances(&mut self, account_id: AccountId) -> StoreResult<Vec<Wallet>>;

    /// Create the wallet for (account, asset) with an initial balance. If it
    /// already exists the existing wallet is returned untouched.
    async fn open_wallet(
        &mut self,
        account_id: AccountId,
        asset: &str,
        initial_balance: Amount,
    ) -> StoreResult<Wallet>;
}
