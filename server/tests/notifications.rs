//! Notification worker tests with mock transports
//!
//! The worker must retry failing transports with bounded attempts,
//! dead-letter exhausted deliveries without surfacing errors, and skip
//! recipients that do not exist.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use bakehouse_server::core::config::NotifyConfig;
use bakehouse_server::notifications::transport::{
    EmailTransport, MessageTransport, TransportError,
};
use bakehouse_server::notifications::types::{EmailMessage, TextMessage};
use bakehouse_server::notifications::{NotificationJob, NotificationService, NotificationWorker};
use shared::models::{
    CustomerInfo, DeliveryOption, Enquiry, EnquiryStatus, EnquiryType, Order, OrderItem,
    OrderStatus, PaymentMethod, PaymentStatus,
};

/// Email transport that fails the first `failures` sends, then succeeds
#[derive(Default)]
struct FlakyEmail {
    failures: AtomicU32,
    attempts: AtomicU32,
    sent: Mutex<Vec<EmailMessage>>,
}

impl FlakyEmail {
    fn failing(times: u32) -> Self {
        Self {
            failures: AtomicU32::new(times),
            ..Self::default()
        }
    }
}

#[async_trait]
impl EmailTransport for FlakyEmail {
    async fn send(&self, message: &EmailMessage) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(TransportError::Rejected(502));
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingMessages {
    sent: Mutex<Vec<TextMessage>>,
}

#[async_trait]
impl MessageTransport for RecordingMessages {
    async fn send(&self, message: &TextMessage) -> Result<(), TransportError> {
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

fn notify_config() -> NotifyConfig {
    NotifyConfig {
        admin_email: Some("admin@example.com".to_string()),
        admin_phone: Some("+15550000000".to_string()),
        ..NotifyConfig::default()
    }
}

fn sample_order() -> Order {
    Order {
        id: "order:abc123def456".to_string(),
        customer_info: CustomerInfo {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: None,
            city: None,
            postal_code: None,
        },
        items: vec![OrderItem {
            product_id: "product:p1".to_string(),
            name: "Cake".to_string(),
            price: 100.0,
            quantity: 2,
            image: String::new(),
        }],
        total: 200.0,
        status: OrderStatus::Preparing,
        delivery_option: DeliveryOption::Pickup,
        payment_method: PaymentMethod::Cod,
        payment_status: PaymentStatus::Pending,
        notes: None,
        created_at: 0,
    }
}

fn sample_enquiry(email: Option<&str>) -> Enquiry {
    Enquiry {
        id: "enquiry:e1".to_string(),
        name: "Sam".to_string(),
        phone: "5550001".to_string(),
        email: email.map(str::to_string),
        enquiry_type: EnquiryType::General,
        message: "Do you deliver on Sundays?".to_string(),
        status: EnquiryStatus::Pending,
        created_at: 0,
    }
}

#[tokio::test]
async fn order_placed_reaches_customer_and_admin() {
    let email = Arc::new(FlakyEmail::default());
    let messages = Arc::new(RecordingMessages::default());
    let worker = NotificationWorker::new(
        notify_config(),
        Some(email.clone()),
        Some(messages.clone()),
    );

    worker
        .process(NotificationJob::OrderPlaced {
            order: sample_order(),
        })
        .await;

    let emails = email.sent.lock().await;
    let texts = messages.sent.lock().await;
    assert_eq!(emails.len(), 2, "customer + admin email");
    assert_eq!(texts.len(), 2, "customer + admin message");
    assert!(emails.iter().any(|m| m.to == "jane@example.com"));
    assert!(emails.iter().any(|m| m.to == "admin@example.com"));
    // Phone numbers are msisdn-normalized with the default country code
    assert!(texts.iter().any(|m| m.to == "+919876543210"));
}

#[tokio::test(start_paused = true)]
async fn failing_transport_is_retried_then_succeeds() {
    // Status-change job renders exactly one email; fail it twice
    let email = Arc::new(FlakyEmail::failing(2));
    let worker = NotificationWorker::new(notify_config(), Some(email.clone()), None);

    worker
        .process(NotificationJob::OrderStatusChanged {
            order: sample_order(),
        })
        .await;

    assert_eq!(email.attempts.load(Ordering::SeqCst), 3);
    assert_eq!(email.sent.lock().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_delivery_is_dead_lettered_not_propagated() {
    let email = Arc::new(FlakyEmail::failing(u32::MAX));
    let worker = NotificationWorker::new(notify_config(), Some(email.clone()), None);

    // Completes without error even though every attempt failed
    worker
        .process(NotificationJob::OrderStatusChanged {
            order: sample_order(),
        })
        .await;

    assert_eq!(email.attempts.load(Ordering::SeqCst), 3, "bounded attempts");
    assert!(email.sent.lock().await.is_empty());
}

#[tokio::test]
async fn enquiry_without_email_skips_customer_confirmation() {
    let email = Arc::new(FlakyEmail::default());
    let messages = Arc::new(RecordingMessages::default());
    let worker = NotificationWorker::new(
        notify_config(),
        Some(email.clone()),
        Some(messages.clone()),
    );

    worker
        .process(NotificationJob::EnquiryReceived {
            enquiry: sample_enquiry(None),
        })
        .await;

    let emails = email.sent.lock().await;
    assert_eq!(emails.len(), 1, "admin alert only");
    assert_eq!(emails[0].to, "admin@example.com");

    // With an email the confirmation goes out too
    drop(emails);
    worker
        .process(NotificationJob::EnquiryReceived {
            enquiry: sample_enquiry(Some("sam@example.com")),
        })
        .await;
    let emails = email.sent.lock().await;
    assert_eq!(emails.len(), 3);
    assert!(emails.iter().any(|m| m.to == "sam@example.com"));
}

#[tokio::test]
async fn unconfigured_transports_skip_cleanly() {
    let worker = NotificationWorker::new(notify_config(), None, None);

    // Nothing to deliver with, nothing to fail with
    worker
        .process(NotificationJob::OrderPlaced {
            order: sample_order(),
        })
        .await;
}

#[tokio::test]
async fn service_enqueue_is_fire_and_forget() {
    let email = Arc::new(FlakyEmail::default());
    let shutdown = CancellationToken::new();
    let worker = NotificationWorker::new(notify_config(), Some(email.clone()), None);
    let service = NotificationService::start_with_worker(8, worker, shutdown.clone());

    service.enqueue(NotificationJob::EnquiryStatusChanged {
        enquiry: sample_enquiry(Some("sam@example.com")),
    });

    // Give the worker a moment to drain the queue
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        if !email.sent.lock().await.is_empty() {
            break;
        }
    }
    assert_eq!(email.sent.lock().await.len(), 1);

    shutdown.cancel();
}
