//! Test doubles for the cache ports.

use crate::domain::StorageStats;
use crate::ports::{Clock, StorageBackend};
use shared::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

#[derive(Default)]
pub struct MapBackend {
    records: Mutex<BTreeMap<String, String>>,
}

impl MapBackend {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MapBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.put_raw(key, value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.records.lock().unwrap().remove(key);
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        self.records.lock().unwrap().clear();
        Ok(())
    }

    fn stats(&self) -> Result<StorageStats> {
        let records = self.records.lock().unwrap();
        Ok(StorageStats {
            keys: records.keys().cloned().collect(),
            current_size: records.iter().map(|(k, v)| (k.len() + v.len()) as u64).sum(),
            limit_size: 1024 * 1024,
        })
    }
}

/// Backend whose reads (and optionally everything else) fail.
pub struct FlakyBackend {
    fail_all: bool,
    deletes: AtomicUsize,
}

impl FlakyBackend {
    pub fn failing_reads() -> Self {
        Self {
            fail_all: false,
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn failing_everything() -> Self {
        Self {
            fail_all: true,
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn delete_attempts(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    fn outcome(&self) -> Result<()> {
        if self.fail_all {
            Err(Error::Storage("disk unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl StorageBackend for FlakyBackend {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Storage("read failed".to_string()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<()> {
        self.outcome()
    }

    fn delete(&self, _key: &str) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }

    fn clear_all(&self) -> Result<()> {
        self.outcome()
    }

    fn stats(&self) -> Result<StorageStats> {
        self.outcome().map(|_| StorageStats::default())
    }
}

pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: AtomicI64::new(start_ms),
        }
    }

    pub fn advance(&self, ms: i64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
