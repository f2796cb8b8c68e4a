use crate::cache::cipher::RecordCipher;
use crate::domain::{CacheEntry, CacheInfo};
use crate::ports::{Clock, StorageBackend, SystemClock};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::config::{AppConfig, EncryptionSettings};
use shared::{Error, Result, TtlMs};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// TTL-aware key/value cache over a [`StorageBackend`], optionally encrypted.
///
/// The encryption mode is fixed at construction and applies to every key.
/// Expiry is lazy: an expired record stays on the backend until the next
/// read of its key or a [`CacheStore::clear`].
pub struct CacheStore {
    backend: Arc<dyn StorageBackend>,
    cipher: Option<RecordCipher>,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    pub fn new(backend: Arc<dyn StorageBackend>, encryption: &EncryptionSettings) -> Self {
        let cipher = encryption
            .is_active()
            .then(|| RecordCipher::from_key(&encryption.key));

        Self {
            backend,
            cipher,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn from_config(backend: Arc<dyn StorageBackend>, config: &AppConfig) -> Self {
        Self::new(backend, &config.cache.encryption)
    }

    /// Replace the wall clock used for `storedAt` and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn encryption_enabled(&self) -> bool {
        self.cipher.is_some()
    }

    /// Store `value` under `key`. `ttl_secs` of `None` or `Some(0)` never expires.
    ///
    /// Backend failures are returned as-is and not retried.
    pub fn set<T>(&self, key: &str, value: &T, ttl_secs: Option<u64>) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)
            .map_err(|e| Error::Serialization(format!("Failed to serialize value: {}", e)))?;
        let entry = CacheEntry::new(
            value,
            self.clock.now_ms(),
            ttl_secs.and_then(TtlMs::from_secs).map(|ttl| ttl.0),
        );

        let record = self.seal(&entry)?;

        self.backend.write(key, &record).inspect_err(|e| {
            error!(key, error = %e, "Failed to write cache record");
        })
    }

    /// Self-healing read.
    ///
    /// Returns the stored value, or `default` when the key is absent, expired,
    /// undecryptable, undecodable or unreadable. Expired and damaged records
    /// are removed on the way out; nothing here is reported to the caller.
    ///
    /// A live record whose value does not fit `T` also yields `default`, but
    /// stays in place for readers that ask for the right type.
    pub fn get<T>(&self, key: &str, default: T) -> T
    where
        T: DeserializeOwned,
    {
        match self.read_live(key) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                debug!(key, error = %e, "Cached value has a different shape than requested");
                default
            }),
            Ok(None) => default,
            Err(e) => {
                warn!(key, error = %e, "Removing unreadable cache record");
                if let Err(remove_err) = self.backend.delete(key) {
                    warn!(key, error = %remove_err, "Failed to remove unreadable cache record");
                }
                default
            }
        }
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.delete(key).inspect_err(|e| {
            error!(key, error = %e, "Failed to remove cache record");
        })
    }

    pub fn clear(&self) -> Result<()> {
        self.backend.clear_all().inspect_err(|e| {
            error!(error = %e, "Failed to clear cache");
        })
    }

    /// Diagnostics only: a failing backend yields zeroed figures.
    pub fn get_info(&self) -> CacheInfo {
        let encryption_enabled = self.encryption_enabled();

        match self.backend.stats() {
            Ok(stats) => CacheInfo::from_stats(stats, encryption_enabled),
            Err(e) => {
                warn!(error = %e, "Failed to read cache statistics");
                CacheInfo::zeroed(encryption_enabled)
            }
        }
    }

    fn read_live(&self, key: &str) -> Result<Option<Value>> {
        let record = match self.backend.read(key)? {
            Some(record) if !record.is_empty() => record,
            _ => return Ok(None),
        };

        let entry = self.open(&record)?;

        if !entry.is_live(self.clock.now_ms()) {
            debug!(key, "Cache entry expired, removing");
            self.backend.delete(key)?;
            return Ok(None);
        }

        Ok(Some(entry.value))
    }

    fn seal(&self, entry: &CacheEntry) -> Result<String> {
        let text = serde_json::to_string(entry)
            .map_err(|e| Error::Serialization(format!("Failed to serialize entry: {}", e)))?;

        match &self.cipher {
            Some(cipher) => cipher.encrypt(&text),
            None => Ok(text),
        }
    }

    fn open(&self, record: &str) -> Result<CacheEntry> {
        let text = match &self.cipher {
            Some(cipher) => cipher.decrypt(record)?,
            None => record.to_string(),
        };

        serde_json::from_str(&text)
            .map_err(|e| Error::Corruption(format!("Failed to deserialize entry: {}", e)))
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("encryption_enabled", &self.encryption_enabled())
            .finish()
    }
}
