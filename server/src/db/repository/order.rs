//! Order Repository
//!
//! Orders are append-only: created once by the placement workflow, then
//! only `status` changes through admin action. No delete path exists.

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, CountRow, RepoError, RepoResult, strip_table_prefix};
use shared::models::{Order, OrderStatus};

const ORDER_TABLE: &str = "order";

const ORDER_FIELDS: &str = "<string>id AS id, customerInfo, items, total, status, \
     deliveryOption, paymentMethod, paymentStatus, notes, createdAt";

/// Completed-order aggregate for the dashboard
#[derive(Debug, Default, Deserialize)]
pub struct RevenueRow {
    pub count: u64,
    pub revenue: f64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a freshly computed order (id must be empty) and return it
    /// with its assigned id.
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let key = Uuid::new_v4().simple().to_string();
        self.base
            .db()
            .query("CREATE type::thing('order', $key) CONTENT $content")
            .bind(("key", key.clone()))
            .bind(("content", order))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let key = strip_table_prefix(ORDER_TABLE, id);
        let orders: Vec<Order> = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM type::thing('order', $key)"
            ))
            .bind(("key", key.to_string()))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Case-insensitive exact email match, newest first, with total count.
    ///
    /// New orders store lowercased emails, but the stored side is lowercased
    /// too so records predating normalization still match.
    pub async fn find_by_email_page(
        &self,
        email: &str,
        page: u32,
        limit: u32,
    ) -> RepoResult<(Vec<Order>, u64)> {
        let needle = email.trim().to_lowercase();
        let start = (page.max(1) - 1) as i64 * limit as i64;
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM order \
                 WHERE string::lowercase(customerInfo.email) = $email \
                 ORDER BY createdAt DESC LIMIT $limit START $start"
            ))
            .query(
                "SELECT count() FROM order \
                 WHERE string::lowercase(customerInfo.email) = $email GROUP ALL",
            )
            .bind(("email", needle))
            .bind(("limit", limit as i64))
            .bind(("start", start))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|row| row.count).unwrap_or(0);
        Ok((orders, total))
    }

    /// Admin listing: optional status filter, newest first, with total count
    pub async fn find_page(
        &self,
        status: Option<OrderStatus>,
        page: u32,
        limit: u32,
    ) -> RepoResult<(Vec<Order>, u64)> {
        let where_clause = if status.is_some() {
            "WHERE status = $status"
        } else {
            ""
        };
        let start = (page.max(1) - 1) as i64 * limit as i64;

        let mut query = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM order {where_clause} \
                 ORDER BY createdAt DESC LIMIT $limit START $start"
            ))
            .query(format!("SELECT count() FROM order {where_clause} GROUP ALL"))
            .bind(("limit", limit as i64))
            .bind(("start", start));
        if let Some(status) = status {
            query = query.bind(("status", status));
        }

        let mut result = query.await?;
        let orders: Vec<Order> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|row| row.count).unwrap_or(0);
        Ok((orders, total))
    }

    /// Set the status of an existing order
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let key = strip_table_prefix(ORDER_TABLE, id).to_string();
        self.base
            .db()
            .query("UPDATE type::thing('order', $key) SET status = $status RETURN NONE")
            .bind(("key", key.clone()))
            .bind(("status", status))
            .await?
            .check()?;
        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound("Order not found".to_string()))
    }

    pub async fn count_all(&self) -> RepoResult<u64> {
        let counts: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM order GROUP ALL")
            .await?
            .take(0)?;
        Ok(counts.first().map(|row| row.count).unwrap_or(0))
    }

    pub async fn count_by_status(&self, status: OrderStatus) -> RepoResult<u64> {
        let counts: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM order WHERE status = $status GROUP ALL")
            .bind(("status", status))
            .await?
            .take(0)?;
        Ok(counts.first().map(|row| row.count).unwrap_or(0))
    }

    /// Orders created at or after the given unix-millis timestamp
    pub async fn count_since(&self, since_millis: i64) -> RepoResult<u64> {
        let counts: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM order WHERE createdAt >= $since GROUP ALL")
            .bind(("since", since_millis))
            .await?
            .take(0)?;
        Ok(counts.first().map(|row| row.count).unwrap_or(0))
    }

    /// Count and summed totals of completed orders
    pub async fn completed_revenue(&self) -> RepoResult<RevenueRow> {
        let rows: Vec<RevenueRow> = self
            .base
            .db()
            .query(
                "SELECT count() AS count, math::sum(total) AS revenue \
                 FROM order WHERE status = 'completed' GROUP ALL",
            )
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }
}
