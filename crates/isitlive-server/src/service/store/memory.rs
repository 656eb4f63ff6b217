use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    MonitorId, MonitorRecord, MonitorStore, NewMonitorRecord, StoreBackend, StoreResult,
};
use crate::utility::tracing_targets::TRACING_TARGET_STORE;

/// Monitor store kept in process memory.
///
/// Ids are issued from a counter starting at 1. The counter advances while
/// the write lock is held, so key order is insertion order.
#[derive(Debug, Default)]
pub struct InMemoryMonitorStore {
    records: RwLock<BTreeMap<u64, MonitorRecord>>,
    sequence: AtomicU64,
}

impl InMemoryMonitorStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MonitorStore for InMemoryMonitorStore {
    #[inline]
    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }

    async fn create(&self, monitor: NewMonitorRecord) -> StoreResult<MonitorRecord> {
        let status = monitor.resolved_status();

        // No await past this point: a dropped request either inserts or not.
        let mut records = self.records.write().await;
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;

        let record = MonitorRecord {
            id: MonitorId::Sequence(sequence),
            name: monitor.name,
            url: monitor.url,
            status,
            last_checked_utc: None,
        };

        records.insert(sequence, record.clone());
        drop(records);

        tracing::debug!(target: TRACING_TARGET_STORE, monitor_id = %record.id, "Monitor stored in memory");
        Ok(record)
    }

    async fn get(&self, id: &MonitorId) -> StoreResult<Option<MonitorRecord>> {
        let MonitorId::Sequence(sequence) = id else {
            return Ok(None);
        };

        let records = self.records.read().await;
        Ok(records.get(sequence).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<MonitorRecord>> {
        let mut monitors: Vec<_> = self.records.read().await.values().cloned().collect();

        // Stable, so equal names keep key (insertion) order.
        monitors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(monitors)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use uuid::Uuid;

    use super::*;
    use crate::service::store::DEFAULT_STATUS;

    #[tokio::test]
    async fn empty_store_lists_nothing() -> anyhow::Result<()> {
        let store = InMemoryMonitorStore::new();
        assert!(store.list().await?.is_empty());
        assert_eq!(store.get(&MonitorId::Sequence(1)).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() -> anyhow::Result<()> {
        let store = InMemoryMonitorStore::new();

        let first = store.create(NewMonitorRecord::new("a", "https://a.example")).await?;
        let second = store.create(NewMonitorRecord::new("b", "https://b.example")).await?;

        assert_eq!(first.id, MonitorId::Sequence(1));
        assert_eq!(second.id, MonitorId::Sequence(2));
        assert_eq!(first.status, DEFAULT_STATUS);
        assert_eq!(first.last_checked_utc, None);

        assert_eq!(store.get(&first.id).await?, Some(first));
        Ok(())
    }

    #[tokio::test]
    async fn keeps_explicit_status() -> anyhow::Result<()> {
        let store = InMemoryMonitorStore::new();
        let monitor = NewMonitorRecord::new("a", "https://a.example").with_status("DOWN");

        let created = store.create(monitor).await?;
        assert_eq!(created.status, "DOWN");
        Ok(())
    }

    #[tokio::test]
    async fn uuid_ids_are_unknown() -> anyhow::Result<()> {
        let store = InMemoryMonitorStore::new();
        store.create(NewMonitorRecord::new("a", "https://a.example")).await?;

        assert_eq!(store.get(&MonitorId::Uuid(Uuid::nil())).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn list_orders_by_name_then_insertion() -> anyhow::Result<()> {
        let store = InMemoryMonitorStore::new();
        for (name, url) in [
            ("Zebra", "https://zebra.com"),
            ("apple", "https://lower.com"),
            ("Apple", "https://apple-1.com"),
            ("Banana", "https://banana.com"),
            ("Apple", "https://apple-2.com"),
        ] {
            store.create(NewMonitorRecord::new(name, url)).await?;
        }

        let listed: Vec<_> = store
            .list()
            .await?
            .into_iter()
            .map(|m| (m.name, m.url))
            .collect();

        // Ordinal comparison puts uppercase before lowercase.
        let expected = [
            ("Apple", "https://apple-1.com"),
            ("Apple", "https://apple-2.com"),
            ("Banana", "https://banana.com"),
            ("Zebra", "https://zebra.com"),
            ("apple", "https://lower.com"),
        ];
        let expected: Vec<_> = expected
            .iter()
            .map(|(n, u)| (n.to_string(), u.to_string()))
            .collect();

        assert_eq!(listed, expected);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_creates_and_reads() -> anyhow::Result<()> {
        let store = Arc::new(InMemoryMonitorStore::new());

        let writers: Vec<_> = (0..100)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let monitor = NewMonitorRecord::new(format!("m{i:03}"), "https://example.com");
                    store.create(monitor).await
                })
            })
            .collect();

        let readers: Vec<_> = (0..50)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let snapshot = store.list().await?;
                    let fetched = store.get(&MonitorId::Sequence(i + 1)).await?;
                    anyhow::Ok((snapshot, fetched))
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for writer in writers {
            ids.insert(writer.await??.id);
        }

        for reader in readers {
            let (snapshot, fetched) = reader.await??;
            assert!(snapshot.len() <= 100);
            assert!(snapshot.iter().all(|r| !r.name.is_empty() && !r.url.is_empty()));
            assert!(snapshot.windows(2).all(|w| w[0].name <= w[1].name));
            if let Some(record) = fetched {
                assert!(!record.name.is_empty());
                assert_eq!(record.status, "UNKNOWN");
            }
        }

        assert_eq!(ids.len(), 100);
        assert_eq!(store.list().await?.len(), 100);
        Ok(())
    }
}
