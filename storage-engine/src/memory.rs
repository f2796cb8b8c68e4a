use dashmap::DashMap;
use satchel::StorageBackend;
use satchel::domain::StorageStats;
use shared::{Error, Result};
use std::sync::{Mutex, MutexGuard};

/// In-process storage bounded by a byte quota.
///
/// Size is counted as key bytes plus value bytes. A write that would take the
/// total past the quota is refused with [`Error::Storage`] and leaves the
/// previous record in place.
pub struct MemoryBackend {
    records: DashMap<String, String>,
    used: Mutex<u64>,
    limit_bytes: u64,
}

impl MemoryBackend {
    pub fn new(limit_bytes: u64) -> Self {
        Self {
            records: DashMap::new(),
            used: Mutex::new(0),
            limit_bytes,
        }
    }

    fn footprint(key: &str, value: &str) -> u64 {
        (key.len() + value.len()) as u64
    }

    // Mutations hold this lock so the quota check and the map update agree.
    fn used(&self) -> Result<MutexGuard<'_, u64>> {
        self.used
            .lock()
            .map_err(|_| Error::Storage("storage accounting lock poisoned".to_string()))
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut used = self.used()?;

        let outgoing = self
            .records
            .get(key)
            .map(|entry| Self::footprint(key, entry.value()))
            .unwrap_or(0);
        let projected = *used - outgoing + Self::footprint(key, value);

        if projected > self.limit_bytes {
            return Err(Error::Storage(format!(
                "storage quota exceeded: {} of {} bytes",
                projected, self.limit_bytes
            )));
        }

        self.records.insert(key.to_string(), value.to_string());
        *used = projected;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut used = self.used()?;
        if let Some((key, value)) = self.records.remove(key) {
            *used -= Self::footprint(&key, &value);
        }
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        let mut used = self.used()?;
        self.records.clear();
        *used = 0;
        Ok(())
    }

    fn stats(&self) -> Result<StorageStats> {
        let used = *self.used()?;
        let mut keys: Vec<String> = self.records.iter().map(|e| e.key().clone()).collect();
        keys.sort();

        Ok(StorageStats {
            keys,
            current_size: used,
            limit_size: self.limit_bytes,
        })
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("entry_count", &self.records.len())
            .field("used_bytes", &self.used.lock().map(|u| *u).unwrap_or_default())
            .field("limit_bytes", &self.limit_bytes)
            .finish()
    }
}
