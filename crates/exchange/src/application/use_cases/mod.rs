mod cancel_order;
mod get_balances;
mod get_order;
mod get_order_book;
mod place_order;
mod provision_account;

pub use cancel_order::CancelOrderUseCase;
pub use get_balances::{AccountBalances, GetBalancesUseCase};
pub use get_order::{GetOrderUseCase, OrderDetails};
pub use get_order_book::GetOrderBookUseCase;
pub use place_order::{PlaceOrderResult, PlaceOrderUseCase};
pub use provision_account::{
    ProvisionAccountCommand, ProvisionAccountResult, ProvisionAccountUseCase,
};
