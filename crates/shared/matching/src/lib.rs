//! Hermes Matching
//!
//! Price-time priority matching, trade settlement and order book aggregation.
//! Everything here runs inside a caller-supplied transaction and owns no
//! state of its own.

mod aggregator;
mod error;
mod price_time;
mod settlement;

pub use aggregator::{OrderBookAggregator, OrderBookView, PriceLevel};
pub use error::{MatchingError, MatchingResult, SettlementStep};
pub use price_time::MatchingEngine;
pub use settlement::TradeSettlement;
