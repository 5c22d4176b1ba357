use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use hermes_core::OrderRequest;
use hermes_ports::Clock;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    CancelOrderUseCase, GetBalancesUseCase, GetOrderBookUseCase, GetOrderUseCase,
    PlaceOrderUseCase,
};
use crate::presentation::rest::{ApiError, dto::*};

use super::AppState;

/// POST /orders
pub async fn place_order<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let Json(req) = payload?;

    let account_id = parse_uuid("account_id", &req.account_id)?;
    let price = parse_decimal("price", &req.price)?;
    let quantity = parse_decimal("quantity", &req.quantity)?;

    // Side and pair stay raw so the validator reports them
    let request = OrderRequest {
        account_id,
        instrument_pair: req.instrument_pair,
        side: req.order_type,
        price,
        quantity,
    };

    let use_case = PlaceOrderUseCase::new(Arc::clone(&state.store), Arc::clone(&state.clock));
    let result = use_case.execute(request).await?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from(&result))))
}

/// POST /orders/{id}/cancel
pub async fn cancel_order<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    Path(order_id): Path<String>,
) -> Result<Json<CancelOrderResponse>, ApiError> {
    let order_id = parse_uuid("order_id", &order_id)?;

    let use_case = CancelOrderUseCase::new(Arc::clone(&state.store), Arc::clone(&state.clock));
    let cancelled = use_case.execute(order_id).await?;

    Ok(Json(CancelOrderResponse {
        order_id: order_id.to_string(),
        cancelled: cancelled.is_some(),
        status: cancelled.map(|order| order.status.to_string()),
    }))
}

/// GET /orders/{id}
pub async fn get_order<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_uuid("order_id", &order_id)?;

    let details = GetOrderUseCase::new(Arc::clone(&state.store))
        .execute(order_id)
        .await?;

    Ok(Json(OrderResponse::from(&details)))
}

/// GET /orderbook/{instrument_pair}
pub async fn order_book<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    Path(instrument_pair): Path<String>,
) -> Result<Json<OrderBookResponse>, ApiError> {
    let view = GetOrderBookUseCase::new(Arc::clone(&state.store))
        .execute(&instrument_pair)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("no open orders for {}", instrument_pair))
        })?;

    Ok(Json(OrderBookResponse::from(&view)))
}

/// GET /accounts/{id}/balance
pub async fn balances<C: Clock>(
    State(state): State<Arc<AppState<C>>>,
    Path(account_id): Path<String>,
) -> Result<Json<BalancesResponse>, ApiError> {
    let account_id = parse_uuid("account_id", &account_id)?;

    let balances = GetBalancesUseCase::new(Arc::clone(&state.store))
        .execute(account_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("no wallets for account {}", account_id)))?;

    Ok(Json(BalancesResponse::from(&balances)))
}

fn parse_uuid(param: &str, value: &str) -> Result<Uuid, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::invalid_parameter(param, "invalid UUID"))
}

fn parse_decimal(param: &str, value: &str) -> Result<Decimal, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::invalid_parameter(param, "invalid decimal"))
}
