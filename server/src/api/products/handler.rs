//! Public catalog handlers
//!
//! Storefront-facing reads: only active products are visible here.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{ProductRepository, product::ProductFilter};
use crate::utils::{AppError, AppResult};
use shared::ApiResponse;
use shared::models::{Category, Product};

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    /// Category filter; `all` (or absent) disables it
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
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

/// GET /api/products - filtered, paginated catalog listing
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let category = match query.category.as_deref() {
        None | Some("all") => None,
        Some(raw) => Some(raw.parse::<Category>().map_err(AppError::validation)?),
    };

    let page = query.page.max(1);
    let limit = query.limit.clamp(1, MAX_LIMIT);
    let filter = ProductFilter {
        category,
        min_price: query.min_price,
        max_price: query.max_price,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };

    let repo = ProductRepository::new(state.db.clone());
    let (products, total) = repo.find_page(&filter, page, limit).await?;
    Ok(Json(ApiResponse::paginated(products, page, limit, total)))
}

/// GET /api/products/categories - distinct categories among active products
pub async fn categories(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let repo = ProductRepository::new(state.db.clone());
    let categories = repo.distinct_categories().await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/products/:id - single active product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_active_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(Json(ApiResponse::ok(product)))
}
