use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::{QueueError, QueueResult, SubmissionId};

/// Caller-supplied fields describing one unit of work (destination, amount,
/// arbitrary metadata). Opaque to the queue; only the external processor
/// interprets it.
pub type Payload = Map<String, Value>;

/// Record body field names a payload may not use.
pub const RESERVED_FIELDS: [&str; 3] = ["score", "status", "result_handle"];

/// Processing status of a submission.
///
/// `Proposed` is the only initial state; the other three are terminal and
/// mutually exclusive. A record only ever moves `Proposed` → terminal,
/// never away from a terminal state.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// Enqueued, not yet executed by the processor.
    Proposed,
    /// Executed and confirmed; the record carries a result handle.
    Success,
    /// Executed and reverted/failed.
    Failed,
    /// Discarded by the processor without execution.
    Dropped,
}

impl SubmissionStatus {
    /// Whether no further transitions can occur.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Proposed)
    }
}

/// One unit of work as held by the record store.
///
/// The identifier is the store key and is not serialized into the body; the
/// codec takes it alongside the raw bytes (and puts it back) so that errors
/// and logs can always name the record they belong to. Payload fields are
/// flattened next to the reserved body fields on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Store key of this record.
    #[serde(skip)]
    pub id: SubmissionId,
    /// Sort key, written once at creation, immutable afterwards.
    pub score: u64,
    /// Current processing status.
    pub status: SubmissionStatus,
    /// Opaque reference to the execution outcome; set by the processor on
    /// terminal success, absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_handle: Option<String>,
    /// Caller-supplied fields, flattened into the record body.
    #[serde(flatten)]
    pub payload: Payload,
}

impl SubmissionRecord {
    /// Build the initial record for a fresh submission.
    ///
    /// Rejects payloads that use a reserved body field name; silently
    /// letting a payload `status` overwrite the real one would corrupt the
    /// record on the wire.
    pub fn proposed(id: SubmissionId, score: u64, payload: Payload) -> QueueResult<Self> {
        if let Some(key) = RESERVED_FIELDS.iter().find(|k| payload.contains_key(**k)) {
            return Err(QueueError::ReservedPayloadKey(key.to_string()));
        }
        Ok(Self {
            id,
            score,
            status: SubmissionStatus::Proposed,
            result_handle: None,
            payload,
        })
    }

    /// Encode the record body for transport/storage.
    pub fn to_bytes(&self) -> QueueResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| QueueError::MalformedRecord(self.id.clone(), e.to_string()))
    }

    /// Decode a record body fetched under `id`.
    ///
    /// Fails with [`QueueError::MalformedRecord`] when the bytes are not
    /// valid JSON or omit/mangle a required field such as `status`.
    pub fn from_bytes(id: SubmissionId, bytes: &[u8]) -> QueueResult<Self> {
        let mut record: Self = serde_json::from_slice(bytes).map_err(|e| {
            warn!(%id, error = %e, "Failed to decode record");
            QueueError::MalformedRecord(id.clone(), e.to_string())
        })?;
        record.id = id;
        Ok(record)
    }
}
