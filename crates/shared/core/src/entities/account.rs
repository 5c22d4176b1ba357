//! Accounts and their per-asset wallets.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::values::{Amount, Asset};

pub type AccountId = Uuid;
pub type WalletId = Uuid;

/// Owner of orders and wallets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new_with_time(name: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), name, timestamp)
    }

    /// Account with a caller-chosen id (seed data, migrations)
    pub fn with_id(id: AccountId, name: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: timestamp,
        }
    }
}

/// Balance of one asset held by one account
///
/// At most one wallet exists per (account, asset). Balances never go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    pub account_id: AccountId,
    pub asset: Asset,
    pub balance: Amount,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    pub fn new_with_time(
        account_id: AccountId,
        asset: impl Into<Asset>,
        balance: Amount,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            asset: asset.into(),
            balance,
            updated_at: timestamp,
        }
    }

    /// True if `amount` can be debited without going negative
    pub fn covers(&self, amount: Amount) -> bool {
        self.balance >= amount
    }

    /// Balance after adding a signed delta, or `None` if it would go negative
    /// or overflow
    pub fn balance_after(&self, delta: Decimal) -> Option<Amount> {
        self.balance
            .checked_add(delta)
            .filter(|next| *next >= Decimal::ZERO)
    }
}
