//! Notification Service
//!
//! Handler-facing side of the dispatcher: a bounded queue whose enqueue
//! never blocks and never surfaces an error. The paired worker drains it
//! in the background.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;

use crate::core::config::NotifyConfig;
use crate::notifications::types::NotificationJob;
use crate::notifications::worker::NotificationWorker;

#[derive(Clone)]
pub struct NotificationService {
    tx: mpsc::Sender<NotificationJob>,
}

impl NotificationService {
    /// Build the queue and spawn the worker consuming it
    pub fn start(config: NotifyConfig, shutdown: CancellationToken) -> Self {
        let capacity = config.queue_capacity;
        let worker = NotificationWorker::from_config(config);
        Self::start_with_worker(capacity, worker, shutdown)
    }

    /// Start with a pre-built worker (tests inject mock transports here)
    pub fn start_with_worker(
        capacity: usize,
        worker: NotificationWorker,
        shutdown: CancellationToken,
    ) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        tokio::spawn(worker.run(rx, shutdown));
        Self { tx }
    }

    /// Fire-and-forget enqueue.
    ///
    /// A full or closed queue drops the job with a log line; delivery is
    /// best-effort and at-most-once by contract.
    pub fn enqueue(&self, job: NotificationJob) {
        match self.tx.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(job)) => {
                tracing::warn!(kind = job.kind(), "Notification queue full, dropping job");
            }
            Err(TrySendError::Closed(job)) => {
                tracing::warn!(kind = job.kind(), "Notification queue closed, dropping job");
            }
        }
    }
}
