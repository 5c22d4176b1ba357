//! Hermes Store
//!
//! In-memory implementation of every storage port behind a single
//! [`TransactionManager`](hermes_ports::TransactionManager).
//!
//! A transaction holds the store's lock from `begin` until it is committed,
//! rolled back or dropped. It writes in place and journals the inverse of
//! each write; rollback or drop replays the journal, so a failed unit of
//! work leaves no trace and only touched records are ever copied.

mod memory;
mod state;

pub use memory::{InMemoryStore, InMemoryTransaction};
