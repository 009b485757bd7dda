use async_trait::async_trait;
use blaster_core::store::{ensure_target_url, ensure_valid_code, Result};
use blaster_core::{ExpirationPolicy, ShortCode, StoreError, UrlStore};
use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// In-memory storage entry for a URL mapping.
#[derive(Debug, Clone)]
struct Entry {
    url: String,
    expire_at: Option<Timestamp>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expire_at
            .is_some_and(|expire_at| Timestamp::now() >= expire_at)
    }
}

/// In-memory implementation of [`UrlStore`] using DashMap.
///
/// Intended as a test double for the Redis store: expiry is evaluated lazily
/// on access, and [`InMemoryStore::set_available`] makes every backend
/// operation fail with [`StoreError::Unavailable`]. Clones share the same map.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    storage: Arc<DashMap<String, Entry>>,
    available: Arc<AtomicBool>,
    expiration: ExpirationPolicy,
}

impl InMemoryStore {
    /// Creates a new store using the default expiration policy.
    pub fn new() -> Self {
        Self::with_expiration(ExpirationPolicy::default())
    }

    /// Creates a new store whose plain saves use `expiration`.
    pub fn with_expiration(expiration: ExpirationPolicy) -> Self {
        Self {
            storage: Arc::new(DashMap::new()),
            available: Arc::new(AtomicBool::new(true)),
            expiration,
        }
    }

    /// Simulates the backend going down (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    fn ensure_available(&self, operation: &str) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!(
                "{operation}: in-memory backend marked down"
            )))
        }
    }

    /// Returns the live entry for `key`, evicting it if it has expired.
    fn live_entry(&self, key: &str) -> Option<Entry> {
        let entry = self.storage.get(key)?;
        if entry.is_expired() {
            drop(entry);
            self.storage.remove_if(key, |_, e| e.is_expired());
            return None;
        }
        Some(entry.clone())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlStore for InMemoryStore {
    fn expiration(&self) -> &ExpirationPolicy {
        &self.expiration
    }

    async fn save_url_mapping_with(
        &self,
        code: &ShortCode,
        url: &str,
        expiration: ExpirationPolicy,
    ) -> Result<()> {
        ensure_valid_code(code)?;
        ensure_target_url(url)?;
        let ttl = expiration.ttl_secs()?;
        self.ensure_available("failed to save mapping")?;

        let expire_at = match ttl {
            None => None,
            Some(secs) => {
                let secs = i64::try_from(secs).map_err(|e| {
                    StoreError::InvalidExpiration(format!("ttl of {secs}s is too large: {e}"))
                })?;
                let expire_at = Timestamp::now()
                    .checked_add(SignedDuration::from_secs(secs))
                    .map_err(|e| {
                        StoreError::InvalidExpiration(format!("ttl of {secs}s overflows: {e}"))
                    })?;
                Some(expire_at)
            }
        };

        // Last write wins.
        self.storage.insert(
            code.as_str().to_owned(),
            Entry {
                url: url.to_owned(),
                expire_at,
            },
        );
        debug!(code = %code, ?expire_at, "saved mapping in memory");
        Ok(())
    }

    async fn retrieve_initial_url(&self, code: &ShortCode) -> Result<String> {
        ensure_valid_code(code)?;
        self.ensure_available("failed to fetch mapping")?;
        trace!(code = %code, "looking up mapping in memory");

        self.live_entry(code.as_str())
            .map(|entry| entry.url)
            .ok_or_else(|| StoreError::NotFound(code.to_string()))
    }

    async fn check_if_short_url_exists(&self, code: &ShortCode) -> bool {
        if ensure_valid_code(code).is_err() {
            return false;
        }
        if let Err(e) = self.ensure_available("failed to check mapping") {
            warn!(code = %code, error = %e, "treating unavailable backend as missing code");
            return false;
        }
        self.live_entry(code.as_str()).is_some()
    }

    async fn delete_url_mapping(&self, code: &ShortCode) -> Result<()> {
        ensure_valid_code(code)?;
        self.ensure_available("failed to delete mapping")?;
        let removed = self.storage.remove(code.as_str()).is_some();
        debug!(code = %code, removed, "deleted mapping from memory");
        Ok(())
    }
}
