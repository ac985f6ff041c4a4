use prometheus::{IntCounter, IntCounterVec, IntGauge, Opts, Registry};

/// Metrics for queue services, backed by one prometheus registry.
#[derive(Clone, Debug)]
pub struct QueueMetrics {
    registry: Registry,
    submissions: IntCounterVec,
    queue_length: IntGauge,
    poll_outcomes: IntCounterVec,
}

impl QueueMetrics {
    /// Create and register all queue metrics on `registry`.
    pub fn new(registry: Registry) -> prometheus::Result<Self> {
        let submissions = IntCounterVec::new(
            Opts::new("submissions_total", "Number of submit calls by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(submissions.clone()))?;

        let queue_length = IntGauge::new(
            "queue_length",
            "Number of identifiers currently in the priority index",
        )?;
        registry.register(Box::new(queue_length.clone()))?;

        let poll_outcomes = IntCounterVec::new(
            Opts::new("poll_outcomes_total", "Number of finished polls by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(poll_outcomes.clone()))?;

        Ok(Self {
            registry,
            submissions,
            queue_length,
            poll_outcomes,
        })
    }

    /// The registry all queue metrics are registered on.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Metric handles held by the submission service.
#[derive(Clone, Debug)]
pub struct SubmitterMetrics {
    pub(crate) submissions_ok: IntCounter,
    pub(crate) submissions_failed: IntCounter,
    pub(crate) queue_length: IntGauge,
}

impl SubmitterMetrics {
    /// Pick the submitter's handles out of the shared metrics.
    pub fn new(metrics: &QueueMetrics) -> Self {
        Self {
            submissions_ok: metrics.submissions.with_label_values(&["ok"]),
            submissions_failed: metrics.submissions.with_label_values(&["error"]),
            queue_length: metrics.queue_length.clone(),
        }
    }
}

/// Metric handles held by the status poller.
#[derive(Clone, Debug)]
pub struct PollerMetrics {
    pub(crate) finished: IntCounter,
    pub(crate) timed_out: IntCounter,
    pub(crate) absent: IntCounter,
}

impl PollerMetrics {
    /// Pick the poller's handles out of the shared metrics.
    pub fn new(metrics: &QueueMetrics) -> Self {
        Self {
            finished: metrics.poll_outcomes.with_label_values(&["finished"]),
            timed_out: metrics.poll_outcomes.with_label_values(&["timed_out"]),
            absent: metrics.poll_outcomes.with_label_values(&["absent"]),
        }
    }
}
