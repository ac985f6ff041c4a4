use std::sync::Arc;
use std::time::Duration;

use derive_new::new;
use serde_json::Value;
use tokio::time::{sleep, Instant};
use tracing::{debug, instrument};

use txqueue_core::{QueueResult, ReceiptProvider, RecordStore, SubmissionId, SubmissionRecord};

use crate::metrics::PollerMetrics;
use crate::settings::Settings;

/// How one poll ended. Neither running out of time nor a missing record is
/// an error; the caller decides whether to keep waiting, abandon or
/// re-submit.
#[derive(Debug)]
pub enum PollOutcome {
    /// The record reached SUCCESS, FAILED or DROPPED before the deadline.
    Finished(SubmissionRecord),
    /// A record existed on the final read but had not finished in time.
    TimedOut,
    /// No record on the final read: never created, or already expired.
    Absent,
}

impl PollOutcome {
    /// The finished record, if this poll produced one.
    pub fn finished(self) -> Option<SubmissionRecord> {
        match self {
            PollOutcome::Finished(record) => Some(record),
            _ => None,
        }
    }
}

/// Re-reads a record on a fixed cadence until it reaches a terminal status
/// or a deadline elapses.
///
/// Transient absence between reads is swallowed (the processor may simply
/// not have written yet); decode failures and store errors are not. The
/// deadline is the only cancellation primitive: a PROPOSED record cannot be
/// recalled, only awaited, dropped by the processor, or left to expire.
#[derive(Debug, new)]
pub struct StatusPoller {
    store: Arc<dyn RecordStore>,
    timeout: Duration,
    interval: Duration,
    metrics: PollerMetrics,
}

impl StatusPoller {
    /// Create a poller configured from [`Settings`].
    pub fn from_settings(
        store: Arc<dyn RecordStore>,
        settings: &Settings,
        metrics: PollerMetrics,
    ) -> Self {
        Self::new(
            store,
            settings.poll_timeout(),
            settings.poll_interval(),
            metrics,
        )
    }

    /// Wait until the record under `id` finishes, times out, or turns out to
    /// be absent.
    ///
    /// The outcome is decided by the final read before the deadline, which
    /// keeps the three cases distinguishable: a terminal record yields
    /// [`PollOutcome::Finished`], a live-but-unfinished record yields
    /// [`PollOutcome::TimedOut`], no record at all yields
    /// [`PollOutcome::Absent`].
    #[instrument(skip(self), fields(id = %id))]
    pub async fn poll(&self, id: &SubmissionId) -> QueueResult<PollOutcome> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match self.store.get(id).await? {
                Some(record) if record.status.is_terminal() => {
                    debug!(status = %record.status, "Submission finished");
                    self.metrics.finished.inc();
                    return Ok(PollOutcome::Finished(record));
                }
                read => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(if read.is_some() {
                            debug!("Poll deadline elapsed before a terminal status");
                            self.metrics.timed_out.inc();
                            PollOutcome::TimedOut
                        } else {
                            debug!("No record within the poll deadline");
                            self.metrics.absent.inc();
                            PollOutcome::Absent
                        });
                    }
                    // Never sleep past the deadline; the last read happens
                    // at it.
                    sleep(self.interval.min(deadline - now)).await;
                }
            }
        }
    }

    /// Poll `id` and, if it finished successfully, resolve its result handle
    /// against the execution backend. `None` for every other outcome, and
    /// for terminal records that carry no handle (FAILED, DROPPED).
    pub async fn poll_receipt(
        &self,
        id: &SubmissionId,
        executor: &dyn ReceiptProvider,
    ) -> QueueResult<Option<Value>> {
        match self.poll(id).await?.finished() {
            Some(record) => match record.result_handle {
                Some(handle) => executor.receipt(&handle).await,
                None => Ok(None),
            },
            None => Ok(None),
        }
    }
}
