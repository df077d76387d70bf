//! Fire-and-forget usage metrics.

/// Receives usage events such as `"user sign in"`.
///
/// Implementations must never block the caller and never fail it; an
/// event that cannot be recorded is dropped.
pub trait MetricsSink: Send + Sync + std::fmt::Debug + 'static {
    /// Queue an event for recording.
    fn enqueue(&self, event: &'static str);
}

/// A sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn enqueue(&self, _event: &'static str) {}
}
