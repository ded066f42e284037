//! Notification Worker
//!
//! Consumes the job channel, renders each job into its deliveries and
//! dispatches them concurrently, retrying each delivery with bounded
//! attempts. Exhausted deliveries land in the dead-letter log target
//! `notifications::dead_letter`; nothing here can fail a request.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::config::NotifyConfig;
use crate::notifications::templates;
use crate::notifications::transport::{
    EmailTransport, HttpEmailTransport, HttpMessageTransport, MessageTransport,
};
use crate::notifications::types::{Delivery, NotificationJob};

const MAX_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;

pub struct NotificationWorker {
    config: NotifyConfig,
    email: Option<Arc<dyn EmailTransport>>,
    messages: Option<Arc<dyn MessageTransport>>,
}

impl NotificationWorker {
    pub fn new(
        config: NotifyConfig,
        email: Option<Arc<dyn EmailTransport>>,
        messages: Option<Arc<dyn MessageTransport>>,
    ) -> Self {
        Self {
            config,
            email,
            messages,
        }
    }

    /// Build transports from configuration; unconfigured gateways stay off
    pub fn from_config(config: NotifyConfig) -> Self {
        let email = HttpEmailTransport::from_config(&config)
            .map(|t| Arc::new(t) as Arc<dyn EmailTransport>);
        let messages = HttpMessageTransport::from_config(&config)
            .map(|t| Arc::new(t) as Arc<dyn MessageTransport>);
        if email.is_none() {
            tracing::warn!("Email gateway not configured, email notifications disabled");
        }
        if messages.is_none() {
            tracing::warn!("Message gateway not configured, text notifications disabled");
        }
        Self::new(config, email, messages)
    }

    /// Run the worker (blocks until the channel closes or shutdown fires)
    pub async fn run(self, mut rx: mpsc::Receiver<NotificationJob>, shutdown: CancellationToken) {
        tracing::info!("Notification worker started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Notification worker received shutdown signal");
                    break;
                }
                job = rx.recv() => {
                    let Some(job) = job else {
                        tracing::info!("Notification channel closed, worker stopping");
                        break;
                    };
                    self.process(job).await;
                }
            }
        }
    }

    /// Render and dispatch every delivery of one job concurrently
    pub async fn process(&self, job: NotificationJob) {
        let kind = job.kind();
        let deliveries = templates::deliveries_for(&job, &self.config);
        tracing::debug!(kind, count = deliveries.len(), "Dispatching notifications");
        futures::future::join_all(
            deliveries
                .into_iter()
                .map(|delivery| self.dispatch(kind, delivery)),
        )
        .await;
    }

    async fn dispatch(&self, kind: &str, delivery: Delivery) {
        for attempt in 1..=MAX_ATTEMPTS {
            let result = match &delivery {
                Delivery::Email(msg) => match &self.email {
                    Some(transport) => transport.send(msg).await,
                    None => {
                        tracing::debug!(kind, "No email transport, skipping delivery");
                        return;
                    }
                },
                Delivery::Message(msg) => match &self.messages {
                    Some(transport) => transport.send(msg).await,
                    None => {
                        tracing::debug!(kind, "No message transport, skipping delivery");
                        return;
                    }
                },
            };

            match result {
                Ok(()) => {
                    tracing::debug!(kind, destination = %delivery.describe(), "Notification delivered");
                    return;
                }
                Err(e) if attempt < MAX_ATTEMPTS => {
                    tracing::warn!(
                        kind,
                        attempt,
                        error = %e,
                        "Notification attempt failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(
                        RETRY_BASE_DELAY_MS * attempt as u64,
                    ))
                    .await;
                }
                Err(e) => {
                    tracing::error!(
                        target: "notifications::dead_letter",
                        kind,
                        destination = %delivery.describe(),
                        attempts = MAX_ATTEMPTS,
                        error = %e,
                        "Notification dropped after final attempt"
                    );
                }
            }
        }
    }
}
