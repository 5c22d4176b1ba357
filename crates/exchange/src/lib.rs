//! Hermes Exchange
//!
//! A single-venue spot exchange: limit orders on `BASE_QUOTE` pairs are
//! matched with price-time priority and settled against per-account wallets.
//!
//! # Architecture
//!
//! - **Application**: use cases (place order, cancel order, order book,
//!   balances, account provisioning), each running in one store transaction
//! - **Infrastructure**: configuration and logging bootstrap
//! - **Presentation**: JSON REST API
//!
//! Domain types live in `hermes-core`, storage traits in `hermes-ports`, the
//! matching engine in `hermes-matching` and the in-memory backend in
//! `hermes-store`.
//!
//! # Example
//!
//! ```ignore
//! use hermes_exchange::{Exchange, ExchangeConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let exchange = Exchange::from_config(ExchangeConfig::with_demo_accounts())
//!         .await
//!         .unwrap();
//!     exchange.run().await.unwrap();
//! }
//! ```

pub mod application;
pub mod error;
pub mod infrastructure;
pub mod presentation;

pub use application::{
    AccountBalances, CancelOrderUseCase, GetBalancesUseCase, GetOrderBookUseCase,
    GetOrderUseCase, OrderDetails, PlaceOrderResult, PlaceOrderUseCase, ProvisionAccountCommand,
    ProvisionAccountResult, ProvisionAccountUseCase,
};
pub use error::{ErrorKind, ExchangeError, Result};
pub use infrastructure::{ConfigError, ExchangeConfig, init_logging};
pub use presentation::{AppState, create_router};

use axum::Router;
use hermes_clock::SystemClock;
use hermes_core::{AccountId, Order, OrderId, OrderRequest};
use hermes_matching::OrderBookView;
use hermes_ports::Clock;
use hermes_store::InMemoryStore;
use std::sync::Arc;
use tokio::net::TcpListener;

/// The exchange service: one store, one clock, and the use cases over them
pub struct Exchange<C: Clock + 'static> {
    pub config: ExchangeConfig,
    pub clock: Arc<C>,
    pub store: Arc<InMemoryStore>,
}

impl<C: Clock + 'static> Exchange<C> {
    /// Create an empty exchange driven by the given clock
    pub fn with_clock(config: ExchangeConfig, clock: Arc<C>) -> Self {
        let store_clock: Arc<dyn Clock> = clock.clone();
        let store = Arc::new(InMemoryStore::with_clock(store_clock));

        Exchange {
            config,
            clock,
            store,
        }
    }

    /// Provision every account listed in the configuration
    pub async fn seed_accounts(&self) -> Result<Vec<ProvisionAccountResult>> {
        let use_case =
            ProvisionAccountUseCase::new(Arc::clone(&self.store), Arc::clone(&self.clock));
        let mut provisioned = Vec::with_capacity(self.config.accounts.len());
        for account in &self.config.accounts {
            provisioned.push(use_case.execute(account.into()).await?);
        }
        Ok(provisioned)
    }

    pub async fn provision_account(
        &self,
        command: ProvisionAccountCommand,
    ) -> Result<ProvisionAccountResult> {
        ProvisionAccountUseCase::new(Arc::clone(&self.store), Arc::clone(&self.clock))
            .execute(command)
            .await
    }

    pub async fn place_order(&self, request: OrderRequest) -> Result<PlaceOrderResult> {
        PlaceOrderUseCase::new(Arc::clone(&self.store), Arc::clone(&self.clock))
            .execute(request)
            .await
    }

    pub async fn cancel_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        CancelOrderUseCase::new(Arc::clone(&self.store), Arc::clone(&self.clock))
            .execute(order_id)
            .await
    }

    pub async fn get_order(&self, order_id: OrderId) -> Result<OrderDetails> {
        GetOrderUseCase::new(Arc::clone(&self.store))
            .execute(order_id)
            .await
    }

    pub async fn order_book(&self, instrument_pair: &str) -> Result<Option<OrderBookView>> {
        GetOrderBookUseCase::new(Arc::clone(&self.store))
            .execute(instrument_pair)
            .await
    }

    pub async fn balances(&self, account_id: AccountId) -> Result<Option<AccountBalances>> {
        GetBalancesUseCase::new(Arc::clone(&self.store))
            .execute(account_id)
            .await
    }

    /// Create the REST API router
    pub fn rest_router(&self) -> Router {
        let state = Arc::new(AppState::new(
            Arc::clone(&self.clock),
            Arc::clone(&self.store),
        ));

        create_router(state)
    }

    /// Run the exchange server
    pub async fn run(self) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.bind_address();
        let router = self.rest_router();

        log::info!("{} listening on {}", self.config.name, addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

impl Exchange<SystemClock> {
    /// Create an empty exchange on wall-clock time
    pub fn new(config: ExchangeConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Create an exchange and provision the configured accounts
    pub async fn from_config(config: ExchangeConfig) -> Result<Self> {
        let exchange = Self::new(config);
        exchange.seed_accounts().await?;
        Ok(exchange)
    }
}
