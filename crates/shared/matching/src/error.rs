use std::fmt;

use hermes_core::ValidationError;
use hermes_ports::{LedgerError, StoreError};
use thiserror::Error;

/// The four balance movements of a trade, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementStep {
    DebitSellerBase,
    CreditBuyerBase,
    DebitBuyerQuote,
    CreditSellerQuote,
}

impl fmt::Display for SettlementStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            SettlementStep::DebitSellerBase => "debit seller base",
            SettlementStep::CreditBuyerBase => "credit buyer base",
            SettlementStep::DebitBuyerQuote => "debit buyer quote",
            SettlementStep::CreditSellerQuote => "credit seller quote",
        };
        f.write_str(step)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),

    #[error("settlement failed at {step}: {source}")]
    Settlement {
        step: SettlementStep,
        #[source]
        source: LedgerError,
    },
}

impl MatchingError {
    /// Classify a ledger failure raised while moving balances.
    ///
    /// Storage faults stay persistence failures; only a missing or
    /// under-funded wallet is a settlement failure.
    pub(crate) fn at_step(step: SettlementStep, error: LedgerError) -> Self {
        match error {
            LedgerError::Store(store) => MatchingError::Persistence(store),
            other => MatchingError::Settlement {
                step,
                source: other,
            },
        }
    }
}

pub type MatchingResult<T> = std::result::Result<T, MatchingError>;
