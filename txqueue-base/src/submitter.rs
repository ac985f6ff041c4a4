use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use derive_new::new;
use tracing::{info, instrument};

use txqueue_core::{score, Payload, QueueResult, QueueStore, SubmissionId, SubmissionRecord};

use crate::metrics::SubmitterMetrics;
use crate::settings::Settings;

/// Producer-side entry point: turns a payload and a priority into a stored,
/// indexed, PROPOSED record.
///
/// One `submit` is a single atomic store round-trip: identifier and score
/// are computed locally, then the record and its index entry are written as
/// one unit via [`QueueStore::enqueue`]. If that write fails, nothing is
/// observable and the caller may retry. After the write the service never
/// mutates the record again; status transitions belong to the external
/// processor.
#[derive(Debug, new)]
pub struct SubmissionService {
    store: Arc<dyn QueueStore>,
    default_priority: u8,
    record_ttl: Duration,
    metrics: SubmitterMetrics,
}

impl SubmissionService {
    /// Create a service configured from [`Settings`].
    pub fn from_settings(
        store: Arc<dyn QueueStore>,
        settings: &Settings,
        metrics: SubmitterMetrics,
    ) -> Self {
        Self::new(
            store,
            settings.default_priority,
            settings.record_ttl(),
            metrics,
        )
    }

    /// Enqueue `payload` at the configured default priority.
    pub async fn submit_default(&self, payload: Payload) -> QueueResult<SubmissionId> {
        self.submit(payload, self.default_priority).await
    }

    /// Enqueue `payload` at `priority` and return its identifier.
    ///
    /// Higher priority means processed sooner; among equal priorities the
    /// earlier submission goes first. The record expires `record_ttl` after
    /// this call regardless of what the processor does with it.
    #[instrument(skip(self, payload))]
    pub async fn submit(&self, payload: Payload, priority: u8) -> QueueResult<SubmissionId> {
        let id = SubmissionId::generate();
        let score = score(priority, unix_now_seconds());
        // The reserved-field guard fires here, before anything is written.
        let record = SubmissionRecord::proposed(id.clone(), score, payload)?;

        if let Err(e) = self
            .store
            .enqueue(&id, &record, score, self.record_ttl)
            .await
        {
            self.metrics.submissions_failed.inc();
            return Err(e);
        }
        self.metrics.submissions_ok.inc();
        if let Ok(len) = self.store.len().await {
            self.metrics.queue_length.set(len as i64);
        }

        info!(%id, score, "Enqueued submission");
        Ok(id)
    }
}

/// Seconds since the unix epoch; clamps to zero on a pre-epoch clock.
fn unix_now_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
