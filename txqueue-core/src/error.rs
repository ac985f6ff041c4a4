use std::error::Error as StdError;

use crate::SubmissionId;

/// The result of interacting with the queue or its backing store.
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors surfaced by the record codec, the store traits and the services
/// built on top of them.
///
/// Two caller-visible conditions are deliberately *not* errors: a poll that
/// reaches its deadline and a record that was never created (or has expired)
/// are ordinary outcomes, modeled on the poller's output type instead.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// A stored record could not be decoded. Surfaced to the caller without
    /// retry; a malformed record never becomes readable again on its own.
    #[error("Malformed record for {0}: {1}")]
    MalformedRecord(SubmissionId, String),

    /// A submission payload used a field name the record body reserves for
    /// itself. Rejected at encode time rather than silently overwritten.
    #[error("Payload field {0:?} collides with a reserved record field")]
    ReservedPayloadKey(String),

    /// The backing store could not be reached or refused a write. Transient;
    /// the caller may retry the whole submit or poll operation.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] Box<dyn StdError + Send + Sync>),
}

impl QueueError {
    /// Wrap any store/transport error into the transient
    /// [`QueueError::StoreUnavailable`] variant.
    pub fn store_unavailable<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::StoreUnavailable(Box::new(err))
    }
}
