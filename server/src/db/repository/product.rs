//! Product Repository

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, CountRow, RepoError, RepoResult, strip_table_prefix};
use shared::models::{Category, Product, ProductCreate, ProductUpdate};

const PRODUCT_TABLE: &str = "product";

/// Field projection returning ids as strings
const PRODUCT_FIELDS: &str =
    "<string>id AS id, name, description, price, category, image, stock, isActive, createdAt";

/// Catalog listing filters (public storefront)
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Case-insensitive substring over name and description
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StockRow {
    #[allow(dead_code)]
    stock: i64,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Page of active products matching the filter, newest first,
    /// together with the total match count.
    pub async fn find_page(
        &self,
        filter: &ProductFilter,
        page: u32,
        limit: u32,
    ) -> RepoResult<(Vec<Product>, u64)> {
        let mut conditions = vec!["isActive = true"];
        if filter.category.is_some() {
            conditions.push("category = $category");
        }
        if filter.min_price.is_some() {
            conditions.push("price >= $min_price");
        }
        if filter.max_price.is_some() {
            conditions.push("price <= $max_price");
        }
        if filter.search.is_some() {
            conditions.push(
                "(string::contains(string::lowercase(name), $search) \
                 OR string::contains(string::lowercase(description), $search))",
            );
        }
        let where_clause = conditions.join(" AND ");

        let list_query = format!(
            "SELECT {PRODUCT_FIELDS} FROM product WHERE {where_clause} \
             ORDER BY createdAt DESC LIMIT $limit START $start"
        );
        let count_query = format!("SELECT count() FROM product WHERE {where_clause} GROUP ALL");

        let start = (page.max(1) - 1) as i64 * limit as i64;
        let mut query = self
            .base
            .db()
            .query(list_query)
            .query(count_query)
            .bind(("limit", limit as i64))
            .bind(("start", start));
        if let Some(category) = filter.category {
            query = query.bind(("category", category));
        }
        if let Some(min_price) = filter.min_price {
            query = query.bind(("min_price", min_price));
        }
        if let Some(max_price) = filter.max_price {
            query = query.bind(("max_price", max_price));
        }
        if let Some(search) = &filter.search {
            query = query.bind(("search", search.to_lowercase()));
        }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|row| row.count).unwrap_or(0);
        Ok((products, total))
    }

    /// All products including inactive ones, newest first (admin view)
    pub async fn find_all_admin(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query(format!(
                "SELECT {PRODUCT_FIELDS} FROM product ORDER BY createdAt DESC"
            ))
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let key = strip_table_prefix(PRODUCT_TABLE, id);
        let products: Vec<Product> = self
            .base
            .db()
            .query(format!(
                "SELECT {PRODUCT_FIELDS} FROM type::thing('product', $key)"
            ))
            .bind(("key", key.to_string()))
            .await?
            .take(0)?;
        Ok(products.into_iter().next())
    }

    /// Find a product the storefront may show (active only)
    pub async fn find_active_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        Ok(self.find_by_id(id).await?.filter(|p| p.is_active))
    }

    /// Distinct categories among active products, in first-seen order
    pub async fn distinct_categories(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT VALUE category FROM product WHERE isActive = true")
            .await?
            .take(0)?;
        let mut distinct = Vec::new();
        for category in categories {
            if !distinct.contains(&category) {
                distinct.push(category);
            }
        }
        Ok(distinct)
    }

    /// Number of active products (dashboard stats)
    pub async fn count_active(&self) -> RepoResult<u64> {
        let counts: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM product WHERE isActive = true GROUP ALL")
            .await?
            .take(0)?;
        Ok(counts.first().map(|row| row.count).unwrap_or(0))
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let product = Product {
            id: String::new(),
            name: data.name,
            description: data.description.unwrap_or_default(),
            price: data.price,
            category: data.category,
            image: data.image.unwrap_or_default(),
            stock: data.stock,
            is_active: true,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let key = Uuid::new_v4().simple().to_string();
        self.base
            .db()
            .query("CREATE type::thing('product', $key) CONTENT $content")
            .bind(("key", key.clone()))
            .bind(("content", product))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Partial update
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let key = strip_table_prefix(PRODUCT_TABLE, id).to_string();

        // Build dynamic SET clauses with proper type bindings
        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.image.is_some() {
            set_parts.push("image = $image");
        }
        if data.stock.is_some() {
            set_parts.push("stock = $stock");
        }
        if data.is_active.is_some() {
            set_parts.push("isActive = $is_active");
        }

        if set_parts.is_empty() {
            // No fields to update
            return self
                .find_by_id(&key)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")));
        }

        let query_str = format!(
            "UPDATE type::thing('product', $key) SET {} RETURN NONE",
            set_parts.join(", ")
        );

        let mut query = self.base.db().query(query_str).bind(("key", key.clone()));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }
        if let Some(v) = data.image {
            query = query.bind(("image", v));
        }
        if let Some(v) = data.stock {
            query = query.bind(("stock", v));
        }
        if let Some(v) = data.is_active {
            query = query.bind(("is_active", v));
        }
        query.await?.check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
    }

    /// Soft delete: mark inactive, keep the record for historical orders
    pub async fn deactivate(&self, id: &str) -> RepoResult<Product> {
        let key = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        self.base
            .db()
            .query("UPDATE type::thing('product', $key) SET isActive = false RETURN NONE")
            .bind(("key", key.clone()))
            .await?
            .check()?;
        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
    }

    /// Compare-and-swap stock reservation.
    ///
    /// Decrements only when the product tracks stock and has at least `qty`
    /// left; returns whether the reservation was applied. A concurrent order
    /// that wins the race makes this return `false` instead of overselling.
    pub async fn try_reserve_stock(&self, id: &str, qty: u32) -> RepoResult<bool> {
        let key = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        let rows: Vec<StockRow> = self
            .base
            .db()
            .query(
                "UPDATE type::thing('product', $key) SET stock -= $qty \
                 WHERE stock != NONE AND stock >= $qty RETURN stock",
            )
            .bind(("key", key))
            .bind(("qty", qty as i64))
            .await?
            .take(0)?;
        Ok(!rows.is_empty())
    }

    /// Undo a reservation made by [`Self::try_reserve_stock`]
    pub async fn release_stock(&self, id: &str, qty: u32) -> RepoResult<()> {
        let key = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        self.base
            .db()
            .query(
                "UPDATE type::thing('product', $key) SET stock += $qty \
                 WHERE stock != NONE RETURN NONE",
            )
            .bind(("key", key))
            .bind(("qty", qty as i64))
            .await?
            .check()?;
        Ok(())
    }
}
