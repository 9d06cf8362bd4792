//! Asynchronous delivery of activity records.
//!
//! Route handlers must not wait on history writes, so the service wraps the
//! configured sink in a [`QueuedActivitySink`]: records go onto a bounded
//! channel and a dedicated blocking worker hands them to the real sink. When
//! the queue is full the record is dropped with a warning.

use std::sync::Arc;

use cityroute_lib::{ActivityRecord, ActivitySink, Error as LibError};
use tokio::sync::mpsc::{self, error::TrySendError, Sender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Records buffered ahead of a slow sink before new ones are dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Activity sink that forwards records to a background worker.
#[derive(Debug, Clone)]
pub struct QueuedActivitySink {
    sender: Sender<ActivityRecord>,
}

impl QueuedActivitySink {
    /// Start the worker and return the queueing front end.
    ///
    /// Must be called from within a Tokio runtime. The worker exits once every
    /// clone of the returned sink has been dropped.
    pub fn spawn(inner: Arc<dyn ActivitySink>) -> Self {
        Self::spawn_with_handle(inner, DEFAULT_QUEUE_CAPACITY).0
    }

    /// Like [`QueuedActivitySink::spawn`] with an explicit queue capacity,
    /// also returning the worker handle.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn spawn_with_handle(
        inner: Arc<dyn ActivitySink>,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::channel::<ActivityRecord>(capacity);
        let worker = tokio::task::spawn_blocking(move || {
            while let Some(record) = receiver.blocking_recv() {
                let identity = record.identity.clone();
                if let Err(error) = inner.record(record) {
                    warn!(%error, identity = %identity, "failed to deliver activity record");
                }
            }
            debug!("activity queue closed");
        });
        (Self { sender }, worker)
    }
}

impl ActivitySink for QueuedActivitySink {
    fn record(&self, record: ActivityRecord) -> cityroute_lib::Result<()> {
        match self.sender.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(record)) => {
                warn!(
                    identity = %record.identity,
                    capacity = self.sender.max_capacity(),
                    "activity queue full, dropping record"
                );
                Ok(())
            }
            Err(TrySendError::Closed(_)) => Err(LibError::ActivitySink {
                message: "activity queue is closed".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use cityroute_lib::{MemoryActivitySink, RouteAlgorithm, RouteResult};

    fn record(identity: &str) -> ActivityRecord {
        let result = RouteResult {
            from: "Ballari".to_string(),
            to: "Hospet".to_string(),
            path: vec!["Ballari".to_string(), "Hospet".to_string()],
            coordinates: vec![None, None],
            distance_km: 60.0,
            time_hours: 1.2,
            algorithm: RouteAlgorithm::AStar,
            hops: 1,
        };
        ActivityRecord::route_search(identity, &result)
    }

    #[tokio::test]
    async fn records_reach_inner_sink_in_order() {
        let memory = Arc::new(MemoryActivitySink::new());
        let (queue, worker) = QueuedActivitySink::spawn_with_handle(memory.clone(), 8);

        queue.record(record("ada")).unwrap();
        queue.record(record("grace")).unwrap();
        drop(queue);
        worker.await.unwrap();

        let identities: Vec<String> = memory.records().into_iter().map(|r| r.identity).collect();
        assert_eq!(identities, vec!["ada", "grace"]);
    }

    #[tokio::test]
    async fn inner_failures_do_not_stop_the_worker() {
        let rejecting = Arc::new(MemoryActivitySink::rejecting());
        let (queue, worker) = QueuedActivitySink::spawn_with_handle(rejecting, 8);

        assert!(queue.record(record("ada")).is_ok());
        assert!(queue.record(record("grace")).is_ok());
        drop(queue);
        worker.await.unwrap();
    }

    /// Holds every record until the test releases the gate.
    struct GatedSink {
        gate: Arc<Mutex<()>>,
        delivered: MemoryActivitySink,
    }

    impl ActivitySink for GatedSink {
        fn record(&self, record: ActivityRecord) -> cityroute_lib::Result<()> {
            let _open = self.gate.lock().unwrap_or_else(|e| e.into_inner());
            self.delivered.record(record)
        }
    }

    #[tokio::test]
    async fn full_queue_drops_records_without_failing() {
        let gate = Arc::new(Mutex::new(()));
        let sink = Arc::new(GatedSink {
            gate: gate.clone(),
            delivered: MemoryActivitySink::new(),
        });
        let closed = gate.lock().unwrap();
        let (queue, worker) = QueuedActivitySink::spawn_with_handle(sink.clone(), 1);

        // One record can be in flight and one buffered; the rest are dropped.
        for identity in ["ada", "grace", "alan", "edsger"] {
            assert!(queue.record(record(identity)).is_ok());
        }
        drop(closed);
        drop(queue);
        worker.await.unwrap();

        let delivered = sink.delivered.records();
        assert!(!delivered.is_empty());
        assert!(delivered.len() <= 2, "delivered {}", delivered.len());
        assert_eq!(delivered[0].identity, "ada");
    }
}
