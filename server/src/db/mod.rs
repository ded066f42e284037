//! Database Module
//!
//! Embedded SurrealDB storage (RocksDB backend) and startup schema.

pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "bakehouse";
const DATABASE: &str = "storefront";

/// Indexes backing the hot query paths: catalog filtering, per-customer
/// order history and admin status filtering.
const SCHEMA: &str = "
    DEFINE INDEX IF NOT EXISTS product_category ON TABLE product COLUMNS category;
    DEFINE INDEX IF NOT EXISTS product_active ON TABLE product COLUMNS isActive;
    DEFINE INDEX IF NOT EXISTS order_customer_email ON TABLE order COLUMNS customerInfo.email;
    DEFINE INDEX IF NOT EXISTS order_status ON TABLE order COLUMNS status;
    DEFINE INDEX IF NOT EXISTS order_created ON TABLE order COLUMNS createdAt;
    DEFINE INDEX IF NOT EXISTS enquiry_status ON TABLE enquiry COLUMNS status;
";

/// Database service, owner of the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the store at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database connection established (SurrealDB RocksDB at {db_path})");

        Ok(Self { db })
    }
}

/// Apply idempotent schema definitions.
///
/// Also used by tests against the in-memory engine.
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema statement failed: {e}")))?;
    Ok(())
}
