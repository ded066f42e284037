//! Notification queue types

use shared::models::{Enquiry, Order};

/// A queued notification job carrying the entity snapshot it is about.
///
/// Jobs are enqueued by handlers after the primary record is durable and
/// consumed by the worker; their outcome never reaches the caller.
#[derive(Debug, Clone)]
pub enum NotificationJob {
    OrderPlaced { order: Order },
    OrderStatusChanged { order: Order },
    EnquiryReceived { enquiry: Enquiry },
    EnquiryStatusChanged { enquiry: Enquiry },
}

impl NotificationJob {
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationJob::OrderPlaced { .. } => "order_placed",
            NotificationJob::OrderStatusChanged { .. } => "order_status_changed",
            NotificationJob::EnquiryReceived { .. } => "enquiry_received",
            NotificationJob::EnquiryStatusChanged { .. } => "enquiry_status_changed",
        }
    }
}

/// An outbound email
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// An outbound phone-number-addressed text message
#[derive(Debug, Clone, PartialEq)]
pub struct TextMessage {
    pub to: String,
    pub body: String,
}

/// A single concrete delivery rendered from a job
#[derive(Debug, Clone)]
pub enum Delivery {
    Email(EmailMessage),
    Message(TextMessage),
}

impl Delivery {
    /// Destination description for logs
    pub fn describe(&self) -> String {
        match self {
            Delivery::Email(msg) => format!("email:{}", msg.to),
            Delivery::Message(msg) => format!("message:{}", msg.to),
        }
    }
}
