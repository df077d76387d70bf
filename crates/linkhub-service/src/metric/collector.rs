//! Bounded in-process queue of usage events.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tracing::{debug, info};

use linkhub_core::traits::MetricsSink;

/// Queues usage events and records them from a background task.
///
/// Enqueueing never waits: events that do not fit are dropped.
#[derive(Debug, Clone)]
pub struct MetricCollector {
    sender: mpsc::Sender<&'static str>,
    dropped: Arc<AtomicU64>,
}

impl MetricCollector {
    /// Starts the recording task and returns a handle to its queue.
    ///
    /// The task exits once every handle has been dropped.
    pub fn spawn(capacity: usize) -> Self {
        let (sender, mut receiver) = mpsc::channel::<&'static str>(capacity.max(1));

        tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                info!(target: "linkhub::metrics", event, "Usage event");
            }
            debug!("Metrics queue closed");
        });

        Self {
            sender,
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of events dropped because the queue was full or closed.
    pub fn dropped_events(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl MetricsSink for MetricCollector {
    fn enqueue(&self, event: &'static str) {
        if let Err(e) = self.sender.try_send(event) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            debug!(event, error = %e, "Dropping usage event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_full_queue_drops_events() {
        let collector = MetricCollector::spawn(1);

        // The recording task cannot run until this test yields.
        collector.enqueue("user sign in");
        collector.enqueue("user sign in");
        collector.enqueue("user sign up");

        assert_eq!(collector.dropped_events(), 2);
    }

    #[tokio::test]
    async fn test_queue_drains() {
        let collector = MetricCollector::spawn(4);
        collector.enqueue("user sign up");

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        collector.enqueue("user sign in");
        assert_eq!(collector.dropped_events(), 0);
    }
}
