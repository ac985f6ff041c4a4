use std::fmt;

use rand::RngCore;

/// Prefix shared by every generated submission identifier.
pub const ID_PREFIX: &str = "tx-";

/// Number of random bytes behind an identifier (rendered as 16 hex digits,
/// 64 bits of entropy; collisions are negligible at any realistic
/// submission volume).
pub const ID_RANDOM_BYTES: usize = 8;

/// Unique identifier of one submission; doubles as its record-store key.
///
/// Identifiers are drawn from the process RNG, never from the clock alone,
/// so bursts of submissions within the same second stay distinct.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Generate a fresh identifier: `"tx-"` + 16 lowercase hex digits.
    pub fn generate() -> Self {
        let mut buf = [0u8; ID_RANDOM_BYTES];
        rand::thread_rng().fill_bytes(&mut buf);
        Self(format!("{ID_PREFIX}{}", hex::encode(buf)))
    }

    /// View the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SubmissionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SubmissionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
