use axum::{
    Router,
    routing::{get, post},
};
use hermes_ports::Clock;
use hermes_store::InMemoryStore;
use std::sync::Arc;

use super::handlers;

/// Application state shared across handlers
pub struct AppState<C: Clock> {
    pub clock: Arc<C>,
    pub store: Arc<InMemoryStore>,
}

impl<C: Clock> AppState<C> {
    pub fn new(clock: Arc<C>, store: Arc<InMemoryStore>) -> Self {
        AppState { clock, store }
    }
}

/// Create the REST API router
pub fn create_router<C: Clock + 'static>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/orders", post(handlers::place_order::<C>))
        .route("/orders/{id}", get(handlers::get_order::<C>))
        .route("/orders/{id}/cancel", post(handlers::cancel_order::<C>))
        .route(
            "/orderbook/{instrument_pair}",
            get(handlers::order_book::<C>),
        )
        .route("/accounts/{id}/balance", get(handlers::balances::<C>))
        .with_state(state)
}
