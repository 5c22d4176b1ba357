mod account;
mod order;
mod order_status;
mod side;
mod trade;

pub use account::{Account, AccountId, Wallet, WalletId};
pub use order::{Order, OrderId, OrderRequest};
pub use order_status::OrderStatus;
pub use side::Side;
pub use trade::{Trade, TradeId};
