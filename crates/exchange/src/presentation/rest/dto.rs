use chrono::{DateTime, Utc};
use hermes_core::{Order, Trade, Wallet};
use hermes_matching::{OrderBookView, PriceLevel};
use serde::{Deserialize, Serialize};

use crate::application::{AccountBalances, OrderDetails, PlaceOrderResult};

/// Request to place a limit order
///
/// Every field is taken as a string and parsed by the handler, so malformed
/// values surface as `400` with a field-specific message.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    pub account_id: String,
    pub instrument_pair: String,
    /// `BUY` or `SELL`
    pub order_type: String,
    pub price: String,
    pub quantity: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub account_id: String,
    pub instrument_pair: String,
    pub order_type: String,
    pub price: String,
    pub quantity: String,
    pub remaining_quantity: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub trades: Vec<TradeResponse>,
}

impl OrderResponse {
    pub fn from_order(order: &Order, trades: &[Trade]) -> Self {
        Self {
            order_id: order.id.to_string(),
            account_id: order.account_id.to_string(),
            instrument_pair: order.instrument_pair.to_string(),
            order_type: order.side.to_string(),
            price: order.price.to_string(),
            quantity: order.quantity.to_string(),
            remaining_quantity: order.remaining_quantity.to_string(),
            status: order.status.to_string(),
            created_at: order.created_at,
            updated_at: order.updated_at,
            trades: trades.iter().map(TradeResponse::from).collect(),
        }
    }
}

impl From<&PlaceOrderResult> for OrderResponse {
    fn from(result: &PlaceOrderResult) -> Self {
        Self::from_order(&result.order, &result.trades)
    }
}

impl From<&OrderDetails> for OrderResponse {
    fn from(details: &OrderDetails) -> Self {
        Self::from_order(&details.order, &details.trades)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TradeResponse {
    pub trade_id: String,
    pub buyer_order_id: String,
    pub seller_order_id: String,
    pub price: String,
    pub quantity: String,
    pub executed_at: DateTime<Utc>,
}

impl From<&Trade> for TradeResponse {
    fn from(trade: &Trade) -> Self {
        Self {
            trade_id: trade.id.to_string(),
            buyer_order_id: trade.buyer_order_id.to_string(),
            seller_order_id: trade.seller_order_id.to_string(),
            price: trade.price.to_string(),
            quantity: trade.quantity.to_string(),
            executed_at: trade.executed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderResponse {
    pub order_id: String,
    /// False when the order was missing or no longer active
    pub cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderBookResponse {
    pub instrument_pair: String,
    pub bids: Vec<LevelResponse>,
    pub asks: Vec<LevelResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelResponse {
    pub price: String,
    pub quantity: String,
}

impl From<&PriceLevel> for LevelResponse {
    fn from(level: &PriceLevel) -> Self {
        Self {
            price: level.price.to_string(),
            quantity: level.quantity.to_string(),
        }
    }
}

impl From<&OrderBookView> for OrderBookResponse {
    fn from(view: &OrderBookView) -> Self {
        Self {
            instrument_pair: view.instrument_pair.to_string(),
            bids: view.bids.iter().map(LevelResponse::from).collect(),
            asks: view.asks.iter().map(LevelResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BalancesResponse {
    pub account_id: String,
    pub balances: Vec<BalanceResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    pub asset: String,
    pub balance: String,
}

impl From<&Wallet> for BalanceResponse {
    fn from(wallet: &Wallet) -> Self {
        Self {
            asset: wallet.asset.clone(),
            balance: wallet.balance.to_string(),
        }
    }
}

impl From<&AccountBalances> for BalancesResponse {
    fn from(balances: &AccountBalances) -> Self {
        Self {
            account_id: balances.account_id.to_string(),
            balances: balances.wallets.iter().map(BalanceResponse::from).collect(),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
