//! Admin handlers: catalog CRUD, order management, enquiry management,
//! dashboard statistics.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::db::repository::{EnquiryRepository, OrderRepository, ProductRepository};
use crate::notifications::NotificationJob;
use crate::utils::{AppError, AppJson, AppResult};
use shared::ApiResponse;
use shared::models::{Enquiry, Order, OrderStatus, Product, ProductCreate, ProductUpdate};
use shared::request::{EnquiryStatusUpdate, OrderStatusUpdate};

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 100;

// =============================================================================
// Products
// =============================================================================

/// GET /api/admin/products - all products, including inactive
pub async fn list_products(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all_admin().await?;
    Ok(Json(ApiResponse::ok(products)))
}

/// POST /api/admin/products - create product
pub async fn create_product(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    AppJson(payload): AppJson<ProductCreate>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;

    tracing::info!(
        product_id = %product.id,
        name = %product.name,
        operator = %admin.username,
        "Product created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            product,
            "Product created successfully",
        )),
    ))
}

/// PUT /api/admin/products/:id - partial update
pub async fn update_product(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ProductUpdate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    payload.validate()?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .update(&id, payload)
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::NotFound(_) => {
                AppError::not_found("Product not found")
            }
            other => other.into(),
        })?;

    tracing::info!(product_id = %product.id, operator = %admin.username, "Product updated");

    Ok(Json(ApiResponse::ok_with_message(
        product,
        "Product updated successfully",
    )))
}

/// DELETE /api/admin/products/:id - soft delete
pub async fn delete_product(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.deactivate(&id).await.map_err(|e| match e {
        crate::db::repository::RepoError::NotFound(_) => AppError::not_found("Product not found"),
        other => other.into(),
    })?;

    tracing::info!(product_id = %product.id, operator = %admin.username, "Product deactivated");

    Ok(Json(ApiResponse::message("Product deleted successfully")))
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Status filter; `all` (or absent) disables it
    pub status: Option<String>,
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

/// GET /api/admin/orders - all orders, optional status filter
pub async fn list_orders(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let status = match query.status.as_deref() {
        None | Some("all") => None,
        Some(raw) => Some(raw.parse::<OrderStatus>().map_err(AppError::validation)?),
    };

    let page = query.page.max(1);
    let limit = query.limit.clamp(1, MAX_LIMIT);

    let repo = OrderRepository::new(state.db.clone());
    let (orders, total) = repo.find_page(status, page, limit).await?;
    Ok(Json(ApiResponse::paginated(orders, page, limit, total)))
}

/// PUT /api/admin/orders/:id/status - set order status
///
/// Any enumerated status may follow any other. Customer notifications go
/// out for every status except `pending`; their outcome never affects this
/// response.
pub async fn update_order_status(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<OrderStatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.update_status(&id, payload.status).await?;

    tracing::info!(
        order_id = %order.id,
        status = %order.status,
        operator = %admin.username,
        "Order status updated"
    );

    if payload.status != OrderStatus::Pending {
        state
            .notifications
            .enqueue(NotificationJob::OrderStatusChanged {
                order: order.clone(),
            });
    }

    Ok(Json(ApiResponse::ok_with_message(
        order,
        "Order status updated successfully",
    )))
}

// =============================================================================
// Enquiries
// =============================================================================

/// GET /api/admin/enquiries - all enquiries, newest first
pub async fn list_enquiries(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Enquiry>>>> {
    let repo = EnquiryRepository::new(state.db.clone());
    let enquiries = repo.find_all().await?;
    Ok(Json(ApiResponse::ok(enquiries)))
}

/// PUT /api/admin/enquiries/:id/status - set enquiry status
pub async fn update_enquiry_status(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<EnquiryStatusUpdate>,
) -> AppResult<Json<ApiResponse<Enquiry>>> {
    let repo = EnquiryRepository::new(state.db.clone());
    let enquiry = repo.update_status(&id, payload.status).await?;

    tracing::info!(
        enquiry_id = %enquiry.id,
        status = %enquiry.status,
        operator = %admin.username,
        "Enquiry status updated"
    );

    state
        .notifications
        .enqueue(NotificationJob::EnquiryStatusChanged {
            enquiry: enquiry.clone(),
        });

    Ok(Json(ApiResponse::ok_with_message(
        enquiry,
        "Status updated successfully",
    )))
}

// =============================================================================
// Dashboard stats
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_products: u64,
    pub total_orders: u64,
    pub pending_orders: u64,
    pub total_revenue: f64,
    /// Orders created in the last 30 days
    pub recent_orders: u64,
    pub completed_orders_count: u64,
}

/// GET /api/admin/stats - dashboard statistics
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<AdminStats>>> {
    let products = ProductRepository::new(state.db.clone());
    let orders = OrderRepository::new(state.db.clone());

    let thirty_days_ago =
        chrono::Utc::now().timestamp_millis() - chrono::Duration::days(30).num_milliseconds();

    let (total_products, total_orders, pending_orders, completed, recent_orders) = tokio::join!(
        products.count_active(),
        orders.count_all(),
        orders.count_by_status(OrderStatus::Pending),
        orders.completed_revenue(),
        orders.count_since(thirty_days_ago),
    );
    let completed = completed?;

    Ok(Json(ApiResponse::ok(AdminStats {
        total_products: total_products?,
        total_orders: total_orders?,
        pending_orders: pending_orders?,
        total_revenue: completed.revenue,
        recent_orders: recent_orders?,
        completed_orders_count: completed.count,
    })))
}
