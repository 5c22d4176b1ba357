use async_trait::async_trait;
use hermes_core::{Account, AccountId};

use crate::error::StoreResult;

#[async_trait]
pub trait AccountStore: Send {
    /// Fails with `StoreError::Duplicate` if the id is taken
    async fn create_account(&mut self, account: &Account) -> StoreResult<()>;

    async fn get_account(&mut self, id: AccountId) -> StoreResult<Option<Account>>;
}
