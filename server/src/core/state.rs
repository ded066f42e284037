//! Server state
//!
//! [`ServerState`] holds shared references to every service a handler may
//! need. Cloning is shallow (Arc/handle clones), so axum can hand a copy to
//! each request.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio_util::sync::CancellationToken;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::notifications::NotificationService;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable)
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// Capability token service
    pub jwt: Arc<JwtService>,
    /// Notification queue (fire-and-forget enqueue)
    pub notifications: NotificationService,
    /// Cancels background workers on shutdown
    pub shutdown: CancellationToken,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt: Arc<JwtService>,
        notifications: NotificationService,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            config,
            db,
            jwt,
            notifications,
            shutdown,
        }
    }

    /// Initialize the full server state: work directory, database,
    /// token service and the notification worker.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be initialized.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.db_path();
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let shutdown = CancellationToken::new();
        let notifications = NotificationService::start(config.notify.clone(), shutdown.clone());
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), db_service.db, jwt, notifications, shutdown)
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
