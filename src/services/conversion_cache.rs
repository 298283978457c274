use std::{
    collections::HashMap,
    future::Future,
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use tokio::time::Instant;

use crate::error::AppError;

type PairKey = (String, String);

#[derive(Debug, Clone, Copy)]
struct Entry {
    rate: f64,
    expires_at: Instant,
    last_used: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<PairKey, Entry>,
    // monotonically increasing use counter for LRU ordering
    clock: u64,
}

/// Bounded rate cache keyed by `(source, target)`.
///
/// Entries live for `ttl`. When a new pair would exceed `capacity`, expired
/// entries are dropped first, then the least recently used one.
#[derive(Debug)]
pub struct ConversionCache {
    inner: Mutex<Inner>,
    capacity: usize,
    ttl: Duration,
}

impl ConversionCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached rate if present and not expired.
    pub fn get(&self, source: &str, target: &str) -> Option<f64> {
        let now = Instant::now();
        let mut inner = self.lock();
        let key = (source.to_string(), target.to_string());

        match inner.entries.get(&key).copied() {
            Some(entry) if entry.expires_at > now => {
                inner.clock += 1;
                let tick = inner.clock;
                if let Some(e) = inner.entries.get_mut(&key) {
                    e.last_used = tick;
                }
                Some(entry.rate)
            }
            Some(_) => {
                inner.entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, source: &str, target: &str, rate: f64) {
        let now = Instant::now();
        let mut inner = self.lock();
        let key = (source.to_string(), target.to_string());

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            inner.entries.retain(|_, e| e.expires_at > now);

            if inner.entries.len() >= self.capacity {
                let oldest = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, e)| e.last_used)
                    .map(|(k, _)| k.clone());
                if let Some(k) = oldest {
                    tracing::debug!(
                        source = %k.0,
                        target = %k.1,
                        "evicting least recently used rate"
                    );
                    inner.entries.remove(&k);
                }
            }
        }

        inner.clock += 1;
        let last_used = inner.clock;
        inner.entries.insert(
            key,
            Entry {
                rate,
                expires_at: now + self.ttl,
                last_used,
            },
        );
    }

    /// Cached rate, or the result of `fetch` (stored when it yields a rate).
    ///
    /// The lock is released while `fetch` runs, so two concurrent misses on
    /// the same pair may both reach the upstream.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        source: &str,
        target: &str,
        fetch: F,
    ) -> Result<Option<f64>, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<f64>, AppError>>,
    {
        if let Some(rate) = self.get(source, target) {
            tracing::debug!(source, target, rate, "conversion cache hit");
            return Ok(Some(rate));
        }

        let fetched = fetch().await?;
        if let Some(rate) = fetched {
            self.insert(source, target, rate);
        }

        Ok(fetched)
    }
}
