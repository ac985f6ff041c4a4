use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use auto_impl::auto_impl;

use crate::{QueueResult, SubmissionId, SubmissionRecord};

/// Key-value store holding one record per identifier, with expiration.
///
/// Records become unreadable once their ttl elapses, independent of status;
/// an expired record is indistinguishable from one that never existed.
/// Absence is always a valid outcome, never an error.
#[async_trait]
#[auto_impl(&, Box, Arc)]
pub trait RecordStore: Send + Sync + Debug {
    /// Atomically write one record, readable for `ttl` from now. Overwrites
    /// any previous record under the same identifier (this is how the
    /// external processor publishes status transitions).
    async fn put(
        &self,
        id: &SubmissionId,
        record: &SubmissionRecord,
        ttl: Duration,
    ) -> QueueResult<()>;

    /// Fetch and decode the record under `id`, or `None` if it was never
    /// created or has expired.
    async fn get(&self, id: &SubmissionId) -> QueueResult<Option<SubmissionRecord>>;
}

/// Ordered index mapping identifier → score, consumed lowest score first.
///
/// The index only orders work; it is never authoritative for status. Every
/// identifier in it has (or once had) a record in the [`RecordStore`].
#[async_trait]
#[auto_impl(&, Box, Arc)]
pub trait PriorityIndex: Send + Sync + Debug {
    /// Insert `id` at `score`, or move it there if already present.
    async fn index(&self, id: &SubmissionId, score: u64) -> QueueResult<()>;

    /// The identifier with the lowest score, without removing it.
    async fn peek_next(&self) -> QueueResult<Option<SubmissionId>>;

    /// Atomically remove and return the identifier with the lowest score.
    ///
    /// This is the processor's claim primitive: an identifier popped here is
    /// observed by exactly one caller, so two processors draining the same
    /// index never pick up the same entry.
    async fn pop_next(&self) -> QueueResult<Option<SubmissionId>>;

    /// Drop `id` from the index if present.
    async fn remove(&self, id: &SubmissionId) -> QueueResult<()>;

    /// Number of identifiers currently indexed.
    async fn len(&self) -> QueueResult<usize>;

    /// Whether the index holds no identifiers.
    async fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.len().await? == 0)
    }
}

/// A store that can write a record and its index entry as one atomic unit.
///
/// This is the linearizable enqueue the submission service relies on: the
/// record and its index entry become visible together or not at all, so a
/// partial failure can never leave an orphaned index entry or an un-indexed
/// record behind.
#[async_trait]
#[auto_impl(&, Box, Arc)]
pub trait QueueStore: RecordStore + PriorityIndex {
    /// Write `record` (readable for `ttl`) and index `id` at `score`,
    /// all-or-nothing.
    async fn enqueue(
        &self,
        id: &SubmissionId,
        record: &SubmissionRecord,
        score: u64,
        ttl: Duration,
    ) -> QueueResult<()>;
}
