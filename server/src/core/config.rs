//! Server configuration
//!
//! Every setting can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | ./data | Work directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_DIR | - | enable daily-rolling file logs |
//! | JWT_SECRET / JWT_EXPIRATION_MINUTES | - / 1440 | capability token signing |
//! | ADMIN_USERNAME / ADMIN_PASSWORD_HASH | admin / - | admin credential (argon2 PHC hash) |
//! | BRAND_NAME, ADMIN_EMAIL, ADMIN_PHONE, EMAIL_API_URL, EMAIL_API_KEY, EMAIL_FROM, MESSAGE_API_URL, MESSAGE_API_TOKEN, MESSAGE_FROM, DEFAULT_COUNTRY_CODE, PICKUP_ADDRESS, PICKUP_HOURS, CURRENCY_SYMBOL, NOTIFY_QUEUE_CAPACITY | see below | notification dispatch |

use std::path::PathBuf;

use crate::auth::{AdminCredential, JwtConfig};

/// Notification dispatch settings
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub brand_name: String,
    /// Admin alert recipients; unset disables the respective alerts
    pub admin_email: Option<String>,
    pub admin_phone: Option<String>,
    /// Email gateway; unset disables email delivery entirely
    pub email_api_url: Option<String>,
    pub email_api_key: Option<String>,
    pub email_from: String,
    /// Message gateway; unset disables text delivery entirely
    pub message_api_url: Option<String>,
    pub message_api_token: Option<String>,
    pub message_from: Option<String>,
    /// Prepended to national phone numbers during msisdn normalization
    pub default_country_code: String,
    pub pickup_address: String,
    pub pickup_hours: String,
    pub currency: String,
    pub queue_capacity: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            brand_name: "Bakehouse".to_string(),
            admin_email: None,
            admin_phone: None,
            email_api_url: None,
            email_api_key: None,
            email_from: "orders@bakehouse.example".to_string(),
            message_api_url: None,
            message_api_token: None,
            message_from: None,
            default_country_code: "+91".to_string(),
            pickup_address: "Bakehouse, 12 Main Road".to_string(),
            pickup_hours: "10:00 - 21:00".to_string(),
            currency: "₹".to_string(),
            queue_capacity: 256,
        }
    }
}

impl NotifyConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            brand_name: std::env::var("BRAND_NAME").unwrap_or(defaults.brand_name),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_phone: std::env::var("ADMIN_PHONE").ok(),
            email_api_url: std::env::var("EMAIL_API_URL").ok(),
            email_api_key: std::env::var("EMAIL_API_KEY").ok(),
            email_from: std::env::var("EMAIL_FROM").unwrap_or(defaults.email_from),
            message_api_url: std::env::var("MESSAGE_API_URL").ok(),
            message_api_token: std::env::var("MESSAGE_API_TOKEN").ok(),
            message_from: std::env::var("MESSAGE_FROM").ok(),
            default_country_code: std::env::var("DEFAULT_COUNTRY_CODE")
                .unwrap_or(defaults.default_country_code),
            pickup_address: std::env::var("PICKUP_ADDRESS").unwrap_or(defaults.pickup_address),
            pickup_hours: std::env::var("PICKUP_HOURS").unwrap_or(defaults.pickup_hours),
            currency: std::env::var("CURRENCY_SYMBOL").unwrap_or(defaults.currency),
            queue_capacity: std::env::var("NOTIFY_QUEUE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.queue_capacity),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Daily-rolling file logs when set
    pub log_dir: Option<String>,
    /// Capability token settings
    pub jwt: JwtConfig,
    /// Configured admin credential
    pub admin: AdminCredential,
    /// Notification dispatch settings
    pub notify: NotifyConfig,
}

impl Config {
    /// Load configuration from environment variables, using defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt: JwtConfig::default(),
            admin: load_admin_credential(),
            notify: NotifyConfig::from_env(),
        }
    }

    /// Override the bind/work settings, commonly for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn db_path(&self) -> PathBuf {
        self.database_dir().join("bakehouse.db")
    }

    /// Create the work directory layout if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        if let Some(log_dir) = &self.log_dir {
            std::fs::create_dir_all(log_dir)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Load the admin credential from the environment
///
/// # Panics
///
/// In release builds, panics when neither `ADMIN_PASSWORD_HASH` nor
/// `ADMIN_PASSWORD` is set. Debug builds generate and log a temporary
/// password instead.
fn load_admin_credential() -> AdminCredential {
    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());

    if let Ok(hash) = std::env::var("ADMIN_PASSWORD_HASH") {
        return AdminCredential::new(username, hash);
    }
    if let Ok(password) = std::env::var("ADMIN_PASSWORD") {
        tracing::warn!("ADMIN_PASSWORD is plain text, prefer ADMIN_PASSWORD_HASH");
        return AdminCredential::from_plain(username, &password)
            .expect("Failed to hash admin password");
    }

    #[cfg(debug_assertions)]
    {
        let password = AdminCredential::generate_password();
        tracing::warn!(
            %password,
            "No admin credential configured, generated a temporary development password"
        );
        AdminCredential::from_plain(username, &password).expect("Failed to hash admin password")
    }
    #[cfg(not(debug_assertions))]
    {
        panic!("ADMIN_PASSWORD_HASH must be set in production");
    }
}
