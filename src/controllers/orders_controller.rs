use axum::{Json, body::Bytes, extract::State};

use crate::{
    AppState,
    error::AppError,
    models::Order,
    services::validation,
};

// POST /orders
//
// The body is taken as raw bytes so malformed JSON, a missing content type
// and out-of-range fields all end up as the same 422 shape.
pub async fn create_order(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Order>, AppError> {
    let new_order = validation::parse_order_body(&body).map_err(AppError::Validation)?;

    let order = state.store.create(&new_order).await?;
    tracing::info!(
        id = order.id,
        symbol = %order.symbol,
        quantity = order.quantity,
        price = order.price,
        order_type = %order.order_type,
        "order created"
    );

    Ok(Json(order))
}

// GET /orders
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state.store.list().await?;
    Ok(Json(orders))
}
