use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::ValidationError;

/// Separator between the base and quote asset in a pair key
pub const PAIR_DELIMITER: char = '_';

/// Market identifier `BASE_QUOTE`, e.g. `BTC_BRL` (BTC priced in BRL)
///
/// Only constructible through [`InstrumentPair::parse`], so a held value always
/// has exactly two non-empty components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstrumentPair {
    key: String,
    split: usize,
}

impl InstrumentPair {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if !Self::is_valid(value) {
            return Err(ValidationError::InvalidPairFormat(value.to_string()));
        }
        // is_valid guarantees exactly one delimiter
        let split = value.find(PAIR_DELIMITER).unwrap_or_default();
        Ok(Self {
            key: value.to_string(),
            split,
        })
    }

    /// Exactly two non-empty components separated by one delimiter
    pub fn is_valid(value: &str) -> bool {
        let mut parts = value.split(PAIR_DELIMITER);
        matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(base), Some(quote), None) if !base.is_empty() && !quote.is_empty()
        )
    }

    /// The asset being bought or sold
    pub fn base(&self) -> &str {
        &self.key[..self.split]
    }

    /// The asset the price is expressed in
    pub fn quote(&self) -> &str {
        &self.key[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for InstrumentPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl AsRef<str> for InstrumentPair {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl TryFrom<String> for InstrumentPair {
    type Error = ValidationError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        InstrumentPair::parse(&value)
    }
}

impl TryFrom<&str> for InstrumentPair {
    type Error = ValidationError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        InstrumentPair::parse(value)
    }
}

impl From<InstrumentPair> for String {
    fn from(pair: InstrumentPair) -> Self {
        pair.key
    }
}
