//! Pressure history store
//!
//! Owned, injectable log of simulated pressure samples plus the observer
//! list that gets told about every published update. Delivery is
//! synchronous and ordered: observers run on the publishing task, in
//! subscription order, after the sample has been stored.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use domain::{PressureSample, PressureUpdate};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, trace};

/// Receives every update published to a [`PressureHistory`]
pub trait PressureObserver: Send + Sync {
    fn on_update(&self, update: &PressureUpdate);
}

/// Closure-based observer for simple cases
pub struct FnObserver<F>(pub F);

impl<F> PressureObserver for FnObserver<F>
where
    F: Fn(&PressureUpdate) + Send + Sync,
{
    fn on_update(&self, update: &PressureUpdate) {
        (self.0)(update);
    }
}

impl<F> std::fmt::Debug for FnObserver<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnObserver")
    }
}

/// Handle returned by [`PressureHistory::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Aggregate view of the stored history
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistorySummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub first_at: DateTime<Utc>,
    pub last_at: DateTime<Utc>,
}

type ObserverEntry = (SubscriptionId, Arc<dyn PressureObserver>);

/// In-memory, append-only pressure history with change notification
///
/// Keeps every sample for the lifetime of the store; there is no cap.
pub struct PressureHistory {
    samples: RwLock<Vec<PressureSample>>,
    observers: RwLock<Vec<ObserverEntry>>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for PressureHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PressureHistory")
            .field("samples", &self.samples.read().len())
            .field("observers", &self.observers.read().len())
            .finish()
    }
}

impl Default for PressureHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl PressureHistory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: RwLock::new(Vec::new()),
            observers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Create a store shareable between the simulator and its consumers
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Append a sample without notifying observers
    ///
    /// A sample stamped earlier than the last stored one is stored with the
    /// previous timestamp so the sequence stays chronologically ordered.
    /// Returns the sample as stored.
    pub fn append(&self, sample: PressureSample) -> PressureSample {
        let mut samples = self.samples.write();
        let stored = match samples.last() {
            Some(last) if sample.observed_at() < last.observed_at() => {
                debug!(
                    observed_at = %sample.observed_at(),
                    last_at = %last.observed_at(),
                    "Sample timestamp went backwards, reusing previous timestamp"
                );
                PressureSample::new(sample.value(), last.observed_at())
            },
            _ => sample,
        };
        samples.push(stored);
        stored
    }

    /// Append a sample and notify every current subscriber
    pub fn publish(&self, sample: PressureSample) -> PressureUpdate {
        let stored = self.append(sample);
        let update = PressureUpdate::new(stored);

        // Observers run without any of our locks held, so they may read the
        // history or unsubscribe themselves.
        let observers: Vec<Arc<dyn PressureObserver>> = self
            .observers
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        trace!(observers = observers.len(), value = stored.value(), "Publishing pressure update");
        for observer in &observers {
            observer.on_update(&update);
        }

        update
    }

    /// Owned copy of the full history, oldest first
    #[must_use]
    pub fn snapshot(&self) -> Vec<PressureSample> {
        self.samples.read().clone()
    }

    /// Owned copy of the last `n` samples, oldest first
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<PressureSample> {
        let samples = self.samples.read();
        let start = samples.len().saturating_sub(n);
        samples[start..].to_vec()
    }

    #[must_use]
    pub fn latest(&self) -> Option<PressureSample> {
        self.samples.read().last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.read().is_empty()
    }

    /// Min / max / mean over the whole history; `None` while empty
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn summary(&self) -> Option<HistorySummary> {
        let samples = self.samples.read();
        let first = samples.first()?;
        let last = samples.last()?;

        let (min, max, sum) = samples.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), s| (min.min(s.value()), max.max(s.value()), sum + s.value()),
        );

        Some(HistorySummary {
            count: samples.len(),
            min,
            max,
            mean: sum / samples.len() as f64,
            first_at: first.observed_at(),
            last_at: last.observed_at(),
        })
    }

    /// Register an observer for future updates
    pub fn subscribe(&self, observer: Arc<dyn PressureObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, observer));
        debug!(subscription = id.0, "Pressure observer subscribed");
        id
    }

    /// Remove an observer; takes effect before the next publish
    ///
    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        let removed = observers.len() != before;
        if removed {
            debug!(subscription = id.0, "Pressure observer unsubscribed");
        }
        removed
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.observers.read().len()
    }
}
