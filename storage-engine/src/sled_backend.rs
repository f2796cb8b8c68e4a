use satchel::StorageBackend;
use satchel::domain::StorageStats;
use shared::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Sled-based durable storage for cache records
pub struct SledBackend {
    db: sled::Db,
    limit_bytes: u64,
}

impl SledBackend {
    /// Open (or create) the database at `path`.
    /// Creates the parent directory if it doesn't exist
    pub fn open(path: impl AsRef<Path>, limit_bytes: u64) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create directory: {}", e)))?;
        }

        let db = sled::open(path)
            .map_err(|e| Error::Storage(format!("Failed to open Sled database: {}", e)))?;

        Ok(Self { db, limit_bytes })
    }

    fn flush(&self) -> Result<()> {
        self.db
            .flush()
            .map_err(|e| Error::Storage(format!("Failed to flush database: {}", e)))?;
        Ok(())
    }
}

impl StorageBackend for SledBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| Error::Storage(format!("Failed to read record: {}", e)))?;

        match value {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|e| Error::Corruption(format!("Record is not UTF-8: {}", e))),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| Error::Storage(format!("Failed to write record: {}", e)))?;
        self.flush()
    }

    fn delete(&self, key: &str) -> Result<()> {
        let removed = self
            .db
            .remove(key.as_bytes())
            .map_err(|e| Error::Storage(format!("Failed to delete record: {}", e)))?
            .is_some();
        debug!(key, removed, "Deleted record");
        self.flush()
    }

    fn clear_all(&self) -> Result<()> {
        self.db
            .clear()
            .map_err(|e| Error::Storage(format!("Failed to clear database: {}", e)))?;
        self.flush()
    }

    fn stats(&self) -> Result<StorageStats> {
        let mut stats = StorageStats {
            limit_size: self.limit_bytes,
            ..StorageStats::default()
        };

        for result in self.db.iter() {
            let (key, value) = result
                .map_err(|e| Error::Storage(format!("Failed to iterate database: {}", e)))?;

            stats.current_size += (key.len() + value.len()) as u64;
            stats.keys.push(String::from_utf8_lossy(&key).into_owned());
        }

        Ok(stats)
    }
}

impl std::fmt::Debug for SledBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledBackend")
            .field("limit_bytes", &self.limit_bytes)
            .finish()
    }
}
