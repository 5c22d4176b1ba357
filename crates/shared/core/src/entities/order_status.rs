use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::Quantity;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Resting with nothing executed yet
    Open,
    /// Some quantity executed, remainder still resting
    PartiallyFilled,
    /// Completely executed
    Filled,
    /// Withdrawn from the book by the owner
    Cancelled,
}

impl OrderStatus {
    /// Statuses that are still eligible to match
    pub const ACTIVE: [OrderStatus; 2] = [OrderStatus::Open, OrderStatus::PartiallyFilled];

    /// Returns true if the order is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }

    /// Returns true if the order is still resting in the book
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Open | OrderStatus::PartiallyFilled)
    }

    /// Status implied by an order's remaining quantity after an execution
    pub fn after_execution(remaining: Quantity, original: Quantity) -> Self {
        if remaining.is_zero() {
            OrderStatus::Filled
        } else if remaining == original {
            OrderStatus::Open
        } else {
            OrderStatus::PartiallyFilled
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "OPEN",
            OrderStatus::PartiallyFilled => "PARTIALLY_FILLED",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
