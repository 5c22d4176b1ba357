use hermes_core::{AccountId, Asset};
use thiserror::Error;

/// Failures reported by a storage backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),

    #[error("duplicate {entity}: {id}")]
    Duplicate { entity: &'static str, id: String },

    #[error("{entity} not found: {id}")]
    Missing { entity: &'static str, id: String },
}

impl StoreError {
    pub fn missing(entity: &'static str, id: impl ToString) -> Self {
        StoreError::Missing {
            entity,
            id: id.to_string(),
        }
    }

    pub fn duplicate(entity: &'static str, id: impl ToString) -> Self {
        StoreError::Duplicate {
            entity,
            id: id.to_string(),
        }
    }
}

/// Failures of a relative balance update
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No wallet for (account, asset), or a debit would take it below zero
    #[error("insufficient balance or wallet not found: account {account_id}, asset {asset}")]
    InsufficientOrMissingWallet { account_id: AccountId, asset: Asset },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    pub fn insufficient(account_id: AccountId, asset: &str) -> Self {
        LedgerError::InsufficientOrMissingWallet {
            account_id,
            asset: asset.to_string(),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
