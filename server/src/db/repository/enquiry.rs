//! Enquiry Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use shared::models::{Enquiry, EnquiryStatus};

const ENQUIRY_TABLE: &str = "enquiry";

const ENQUIRY_FIELDS: &str =
    "<string>id AS id, name, phone, email, enquiryType, message, status, createdAt";

#[derive(Clone)]
pub struct EnquiryRepository {
    base: BaseRepository,
}

impl EnquiryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, enquiry: Enquiry) -> RepoResult<Enquiry> {
        let key = Uuid::new_v4().simple().to_string();
        self.base
            .db()
            .query("CREATE type::thing('enquiry', $key) CONTENT $content")
            .bind(("key", key.clone()))
            .bind(("content", enquiry))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create enquiry".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Enquiry>> {
        let key = strip_table_prefix(ENQUIRY_TABLE, id);
        let enquiries: Vec<Enquiry> = self
            .base
            .db()
            .query(format!(
                "SELECT {ENQUIRY_FIELDS} FROM type::thing('enquiry', $key)"
            ))
            .bind(("key", key.to_string()))
            .await?
            .take(0)?;
        Ok(enquiries.into_iter().next())
    }

    /// All enquiries, newest first (admin view)
    pub async fn find_all(&self) -> RepoResult<Vec<Enquiry>> {
        let enquiries: Vec<Enquiry> = self
            .base
            .db()
            .query(format!(
                "SELECT {ENQUIRY_FIELDS} FROM enquiry ORDER BY createdAt DESC"
            ))
            .await?
            .take(0)?;
        Ok(enquiries)
    }

    pub async fn update_status(&self, id: &str, status: EnquiryStatus) -> RepoResult<Enquiry> {
        let key = strip_table_prefix(ENQUIRY_TABLE, id).to_string();
        self.base
            .db()
            .query("UPDATE type::thing('enquiry', $key) SET status = $status RETURN NONE")
            .bind(("key", key.clone()))
            .bind(("status", status))
            .await?
            .check()?;
        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound("Enquiry not found".to_string()))
    }
}
