//! Bakehouse Server - bakery storefront backend
//!
//! # Architecture overview
//!
//! - **HTTP API** (`api`): RESTful storefront and admin interface
//! - **Database** (`db`): embedded SurrealDB storage and repositories
//! - **Orders** (`orders`): the order placement workflow and money math
//! - **Notifications** (`notifications`): queued email/text dispatch
//! - **Auth** (`auth`): argon2 credential check + JWT capability tokens
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/           # config, state, server lifecycle
//! ├── api/            # HTTP routes and handlers
//! ├── auth/           # credential, JWT, middleware
//! ├── db/             # database layer and repositories
//! ├── orders/         # placement workflow, money arithmetic
//! ├── notifications/  # queue, worker, transports, templates
//! └── utils/          # errors, extractors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notifications;
pub mod orders;
pub mod utils;

// Re-export public types
pub use auth::{AdminCredential, CurrentAdmin, JwtService};
pub use core::{Config, Server, ServerState};
pub use notifications::{NotificationJob, NotificationService, NotificationWorker};
pub use utils::{AppError, AppJson, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured events on the "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____        __        __
   / __ )____ _/ /_____  / /_  ____  __  __________
  / __  / __ `/ //_/ _ \/ __ \/ __ \/ / / / ___/ _ \
 / /_/ / /_/ / ,< /  __/ / / / /_/ / /_/ (__  )  __/
/_____/\__,_/_/|_|\___/_/ /_/\____/\__,_/____/\___/
    "#
    );
}
