//! Instrument definitions for tradeable markets

mod pair;

pub use pair::{InstrumentPair, PAIR_DELIMITER};
