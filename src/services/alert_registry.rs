use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, watch};

use crate::models::{AlertId, AlertRecord};

/// A registered alert plus the cancellation flag its monitor listens on.
#[derive(Debug)]
pub struct AlertHandle {
    pub record: AlertRecord,
    pub cancel: watch::Receiver<bool>,
}

#[async_trait]
pub trait AlertRegistry: Send + Sync {
    /// Stores the record under a fresh id. Duplicates are allowed.
    async fn create(&self, record: AlertRecord) -> AlertHandle;

    /// Snapshot in insertion order.
    async fn list(&self) -> Vec<AlertRecord>;

    /// Removes every record matching `(phone, asset)` and cancels their
    /// monitors. Returns how many were removed.
    async fn delete(&self, phone: &str, asset: &str) -> usize;

    /// Removes and cancels a single record.
    async fn remove(&self, id: AlertId) -> bool;

    /// Cancels every monitor without touching the records.
    async fn cancel_all(&self);
}

struct Entry {
    record: AlertRecord,
    cancel_tx: watch::Sender<bool>,
}

impl Entry {
    fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }
}

#[derive(Default)]
pub struct InMemoryAlertRegistry {
    entries: RwLock<Vec<Entry>>,
    next_id: AtomicU64,
}

impl InMemoryAlertRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertRegistry for InMemoryAlertRegistry {
    async fn create(&self, mut record: AlertRecord) -> AlertHandle {
        record.id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let (cancel_tx, cancel) = watch::channel(false);

        self.entries.write().await.push(Entry {
            record: record.clone(),
            cancel_tx,
        });

        AlertHandle { record, cancel }
    }

    async fn list(&self) -> Vec<AlertRecord> {
        self.entries
            .read()
            .await
            .iter()
            .map(|e| e.record.clone())
            .collect()
    }

    async fn delete(&self, phone: &str, asset: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();

        entries.retain(|e| {
            if e.record.matches(phone, asset) {
                e.cancel();
                false
            } else {
                true
            }
        });

        before - entries.len()
    }

    async fn remove(&self, id: AlertId) -> bool {
        let mut entries = self.entries.write().await;

        match entries.iter().position(|e| e.record.id == id) {
            Some(idx) => {
                entries.remove(idx).cancel();
                true
            }
            None => false,
        }
    }

    async fn cancel_all(&self) {
        for e in self.entries.read().await.iter() {
            e.cancel();
        }
    }
}
