//! Notification dispatch
//!
//! Fire-and-forget fan-out of email and text notifications triggered by
//! order/enquiry state changes, decoupled from the request cycle through an
//! explicit queue + worker.

pub mod service;
pub mod templates;
pub mod transport;
pub mod types;
pub mod worker;

pub use service::NotificationService;
pub use types::NotificationJob;
pub use worker::NotificationWorker;
