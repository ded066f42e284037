//! Public order handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::notifications::NotificationJob;
use crate::orders::place_order;
use crate::utils::{AppError, AppJson, AppResult};
use shared::ApiResponse;
use shared::models::Order;
use shared::request::PlaceOrderRequest;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// POST /api/orders - place a new order
///
/// The placement workflow validates, reserves stock and persists; the
/// confirmation notifications are enqueued after the record is durable and
/// never affect the response.
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<PlaceOrderRequest>,
) -> AppResult<impl IntoResponse> {
    let order = place_order(&state.db, payload).await?;

    state.notifications.enqueue(NotificationJob::OrderPlaced {
        order: order.clone(),
    });

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            order,
            "Order placed successfully",
        )),
    ))
}

/// GET /api/orders/user/:email - order history, case-insensitive email match
pub async fn list_by_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, MAX_LIMIT);

    let repo = OrderRepository::new(state.db.clone());
    let (orders, total) = repo.find_by_email_page(&email, page, limit).await?;
    Ok(Json(ApiResponse::paginated(orders, page, limit, total)))
}

/// GET /api/orders/:id - single order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;
    Ok(Json(ApiResponse::ok(order)))
}
