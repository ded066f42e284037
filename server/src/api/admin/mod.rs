//! Admin API module
//!
//! Every route here sits behind the capability-token middleware
//! (`/api/admin/` prefix check in `auth::middleware::require_admin`).

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            "/products/{id}",
            put(handler::update_product).delete(handler::delete_product),
        )
        .route("/orders", get(handler::list_orders))
        .route("/orders/{id}/status", put(handler::update_order_status))
        .route("/enquiries", get(handler::list_enquiries))
        .route(
            "/enquiries/{id}/status",
            put(handler::update_enquiry_status),
        )
        .route("/stats", get(handler::stats))
}
