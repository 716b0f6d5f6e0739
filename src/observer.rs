//! Delivery observers.
//!
//! Tracking calls never report delivery outcomes to their caller. Observers are
//! the only place those outcomes become visible.

use std::sync::RwLock;

use tracing::{debug, warn};

use crate::client::ClientError;
use crate::event::EventEnvelope;

/// Receives the outcome of every dispatched envelope.
///
/// Callbacks run on the runtime task that performed the request, so they should
/// return quickly.
pub trait DeliveryObserver: Send + Sync {
    /// Called after the endpoint accepted an envelope.
    fn on_delivered(&self, _envelope: &EventEnvelope) {}

    /// Called when an envelope could not be delivered.
    fn on_delivery_error(&self, envelope: &EventEnvelope, error: &ClientError);
}

/// Default observer: reports outcomes through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DeliveryObserver for TracingObserver {
    fn on_delivered(&self, envelope: &EventEnvelope) {
        debug!(
            kind = %envelope.kind,
            project_id = %envelope.project_id,
            "Event delivered"
        );
    }

    fn on_delivery_error(&self, envelope: &EventEnvelope, error: &ClientError) {
        warn!(
            kind = %envelope.kind,
            project_id = %envelope.project_id,
            error = %error,
            "Event delivery failed"
        );
    }
}

/// Observer that discards every outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DeliveryObserver for NoopObserver {
    fn on_delivery_error(&self, _envelope: &EventEnvelope, _error: &ClientError) {}
}

/// Counters collected by [`StatsObserver`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    /// Envelopes accepted by the endpoint
    pub delivered: u64,

    /// Envelopes that failed in transport or were rejected by the endpoint
    pub failed: u64,

    /// Failures caused by the endpoint answering with a non-success status
    pub rejected: u64,
}

/// Observer that counts outcomes and forwards them to an inner observer.
pub struct StatsObserver<O = TracingObserver> {
    inner: O,
    stats: RwLock<DeliveryStats>,
}

impl StatsObserver<TracingObserver> {
    /// Create a stats observer that also logs through `tracing`.
    pub fn new() -> Self {
        Self::wrap(TracingObserver)
    }
}

impl Default for StatsObserver<TracingObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: DeliveryObserver> StatsObserver<O> {
    /// Create a stats observer around another observer.
    pub fn wrap(inner: O) -> Self {
        Self {
            inner,
            stats: RwLock::new(DeliveryStats::default()),
        }
    }

    /// Get current delivery statistics.
    pub fn stats(&self) -> DeliveryStats {
        self.stats.read().map(|s| s.clone()).unwrap_or_default()
    }
}

impl<O: DeliveryObserver> DeliveryObserver for StatsObserver<O> {
    fn on_delivered(&self, envelope: &EventEnvelope) {
        if let Ok(mut stats) = self.stats.write() {
            stats.delivered += 1;
        }
        self.inner.on_delivered(envelope);
    }

    fn on_delivery_error(&self, envelope: &EventEnvelope, error: &ClientError) {
        if let Ok(mut stats) = self.stats.write() {
            stats.failed += 1;
            if error.status().is_some() {
                stats.rejected += 1;
            }
        }
        self.inner.on_delivery_error(envelope, error);
    }
}
