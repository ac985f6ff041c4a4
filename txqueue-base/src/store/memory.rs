use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

use txqueue_core::{
    PriorityIndex, QueueResult, QueueStore, RecordStore, SubmissionId, SubmissionRecord,
};

/// In-process store and priority index behind a single lock.
///
/// Records are held as their encoded bytes, so every read goes through the
/// record codec exactly as it would against a networked store, and expire at
/// a per-record deadline. The index is a set ordered by `(score, id)`; the
/// processor consumes it lowest score first. One mutex covers both maps,
/// which makes `enqueue` trivially all-or-nothing and the store safe to
/// share across any number of producers, processors and pollers.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<SubmissionId, StoredRecord>,
    index: BTreeSet<(u64, SubmissionId)>,
    scores: HashMap<SubmissionId, u64>,
}

#[derive(Debug)]
struct StoredRecord {
    bytes: Vec<u8>,
    expires_at: Instant,
}

impl StoredRecord {
    fn expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

impl Inner {
    fn write_record(&mut self, id: &SubmissionId, bytes: Vec<u8>, ttl: Duration) {
        self.records.insert(
            id.clone(),
            StoredRecord {
                bytes,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    fn write_index(&mut self, id: &SubmissionId, score: u64) {
        if let Some(old) = self.scores.insert(id.clone(), score) {
            self.index.remove(&(old, id.clone()));
        }
        self.index.insert((score, id.clone()));
    }

    fn drop_index(&mut self, id: &SubmissionId) {
        if let Some(score) = self.scores.remove(id) {
            self.index.remove(&(score, id.clone()));
        }
    }
}

impl MemoryStore {
    /// Write raw bytes under `id`, bypassing the codec. This is the shape in
    /// which an external processor (or anything else with store access)
    /// publishes record bodies; reads still decode and can surface
    /// `MalformedRecord`.
    pub async fn put_raw(&self, id: &SubmissionId, bytes: Vec<u8>, ttl: Duration) {
        self.inner.lock().await.write_record(id, bytes, ttl);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put(
        &self,
        id: &SubmissionId,
        record: &SubmissionRecord,
        ttl: Duration,
    ) -> QueueResult<()> {
        let bytes = record.to_bytes()?;
        self.inner.lock().await.write_record(id, bytes, ttl);
        Ok(())
    }

    async fn get(&self, id: &SubmissionId) -> QueueResult<Option<SubmissionRecord>> {
        let mut inner = self.inner.lock().await;
        let Some(stored) = inner.records.get(id) else {
            return Ok(None);
        };
        if stored.expired() {
            trace!(%id, "Record expired, dropping");
            inner.records.remove(id);
            return Ok(None);
        }
        SubmissionRecord::from_bytes(id.clone(), &stored.bytes).map(Some)
    }
}

#[async_trait]
impl PriorityIndex for MemoryStore {
    async fn index(&self, id: &SubmissionId, score: u64) -> QueueResult<()> {
        self.inner.lock().await.write_index(id, score);
        Ok(())
    }

    async fn peek_next(&self) -> QueueResult<Option<SubmissionId>> {
        let inner = self.inner.lock().await;
        Ok(inner.index.first().map(|(_, id)| id.clone()))
    }

    async fn pop_next(&self) -> QueueResult<Option<SubmissionId>> {
        let mut inner = self.inner.lock().await;
        let Some((_, id)) = inner.index.pop_first() else {
            return Ok(None);
        };
        inner.scores.remove(&id);
        Ok(Some(id))
    }

    async fn remove(&self, id: &SubmissionId) -> QueueResult<()> {
        self.inner.lock().await.drop_index(id);
        Ok(())
    }

    async fn len(&self) -> QueueResult<usize> {
        Ok(self.inner.lock().await.index.len())
    }
}

#[async_trait]
impl QueueStore for MemoryStore {
    async fn enqueue(
        &self,
        id: &SubmissionId,
        record: &SubmissionRecord,
        score: u64,
        ttl: Duration,
    ) -> QueueResult<()> {
        // Encode outside the critical section; an encode failure leaves
        // nothing observable.
        let bytes = record.to_bytes()?;
        let mut inner = self.inner.lock().await;
        inner.write_record(id, bytes, ttl);
        inner.write_index(id, score);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use txqueue_core::{Payload, QueueError, SubmissionStatus};

    use super::*;

    fn record(id: &SubmissionId, score: u64) -> SubmissionRecord {
        SubmissionRecord::proposed(id.clone(), score, Payload::new()).unwrap()
    }

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn index_pops_lowest_score_first() {
        let store = MemoryStore::default();
        let (a, b, c) = (
            SubmissionId::generate(),
            SubmissionId::generate(),
            SubmissionId::generate(),
        );
        store.index(&b, 20).await.unwrap();
        store.index(&a, 10).await.unwrap();
        store.index(&c, 30).await.unwrap();

        assert_eq!(store.peek_next().await.unwrap(), Some(a.clone()));
        assert_eq!(store.pop_next().await.unwrap(), Some(a));
        assert_eq!(store.pop_next().await.unwrap(), Some(b));
        assert_eq!(store.pop_next().await.unwrap(), Some(c));
        assert_eq!(store.pop_next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn reindexing_moves_an_id_instead_of_duplicating_it() {
        let store = MemoryStore::default();
        let id = SubmissionId::generate();
        store.index(&id, 50).await.unwrap();
        store.index(&id, 5).await.unwrap();

        assert_eq!(store.len().await.unwrap(), 1);
        assert_eq!(store.pop_next().await.unwrap(), Some(id));
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn records_expire_after_their_ttl() {
        let store = MemoryStore::default();
        let id = SubmissionId::generate();
        store.put(&id, &record(&id, 1), Duration::from_secs(1)).await.unwrap();
        assert!(store.get(&id).await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn repeated_reads_of_an_unfinished_record_are_identical() {
        let store = MemoryStore::default();
        let id = SubmissionId::generate();
        store.put(&id, &record(&id, 9), TTL).await.unwrap();

        let first = store.get(&id).await.unwrap().unwrap();
        let second = store.get(&id).await.unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.status, SubmissionStatus::Proposed);
    }

    #[tokio::test]
    async fn unreadable_bytes_surface_as_malformed_record() {
        let store = MemoryStore::default();
        let id = SubmissionId::generate();
        store.put_raw(&id, b"{broken".to_vec(), TTL).await;

        let err = store.get(&id).await.unwrap_err();
        assert!(matches!(err, QueueError::MalformedRecord(bad, _) if bad == id));
    }

    #[tokio::test]
    async fn enqueue_writes_record_and_index_together() {
        let store = MemoryStore::default();
        let id = SubmissionId::generate();
        store.enqueue(&id, &record(&id, 7), 7, TTL).await.unwrap();

        assert_eq!(store.peek_next().await.unwrap(), Some(id.clone()));
        assert_eq!(store.get(&id).await.unwrap().unwrap().score, 7);
    }
}
