use anyhow::anyhow;
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::order::event::CreateOrder;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::order::{CreateOrderRequest, CreatedOrderResponse, OrderResponse};

pub async fn create_order(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<CreatedOrderResponse>)> {
    req.validate(&())?;

    // The saga runs on a detached task: a client that disconnects
    // mid-request cannot cancel the future between a reservation and
    // its compensation, which would leak decremented spaces.
    let intake = registry.order_intake();
    let event: CreateOrder = req.into();
    let order_id = tokio::spawn(async move { intake.create_order(event).await })
        .await
        .map_err(|e| AppError::UnexpectedError(anyhow!(e)))??;

    tracing::info!(order_id = %order_id, "order created");
    Ok((StatusCode::CREATED, Json(CreatedOrderResponse { order_id })))
}

pub async fn show_order_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    registry
        .order_repository()
        .find_all()
        .await
        .map(|orders| orders.into_iter().map(OrderResponse::from).collect())
        .map(Json)
}
