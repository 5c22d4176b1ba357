//! Hermes Ports
//!
//! Port definitions (traits) for the Hermes spot exchange.
//! These define the boundaries between domain logic and infrastructure:
//! any backend (relational, embedded, in-memory) may implement them.

mod account_store;
mod clock;
mod error;
mod ledger;
mod order_store;
mod trade_store;
mod transaction;

pub use account_store::AccountStore;
pub use clock::Clock;
pub use error::{LedgerError, LedgerResult, StoreError, StoreResult};
pub use ledger::BalanceLedger;
pub use order_store::{MatchingCriteria, OrderStore};
pub use trade_store::TradeStore;
pub use transaction::{Transaction, TransactionManager};
