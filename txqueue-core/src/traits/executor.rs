use std::fmt::Debug;

use async_trait::async_trait;
use auto_impl::auto_impl;
use serde_json::Value;

use crate::QueueResult;

/// Receipt-lookup seam to the execution backend.
///
/// The queue never executes anything itself; once a submission reaches
/// SUCCESS its record carries a result handle, and this is the only shape in
/// which the executor is consumed: handle in, opaque receipt out. `None`
/// means the backend does not (yet) know the handle.
#[async_trait]
#[auto_impl(&, Box, Arc)]
pub trait ReceiptProvider: Send + Sync + Debug {
    /// Look up the receipt behind a completed submission's result handle.
    async fn receipt(&self, result_handle: &str) -> QueueResult<Option<Value>>;
}
