pub mod use_cases;

pub use use_cases::{
    // Order management
    AccountBalances,
    CancelOrderUseCase,
    GetBalancesUseCase,
    GetOrderBookUseCase,
    GetOrderUseCase,
    OrderDetails,
    PlaceOrderResult,
    PlaceOrderUseCase,
    // Account provisioning
    ProvisionAccountCommand,
    ProvisionAccountResult,
    ProvisionAccountUseCase,
};
