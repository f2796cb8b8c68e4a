use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the cache persists for every key, before optional encryption.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub value: Value,
    pub stored_at: i64,            // UTC timestamp in milliseconds
    pub ttl_millis: Option<u64>,   // None = never expires
}

impl CacheEntry {
    pub fn new(value: Value, stored_at: i64, ttl_millis: Option<u64>) -> Self {
        Self {
            value,
            stored_at,
            ttl_millis,
        }
    }

    /// Live iff there is no TTL or `now <= stored_at + ttl`.
    pub fn is_live(&self, now_ms: i64) -> bool {
        match self.ttl_millis {
            None => true,
            Some(ttl) => {
                let ttl = i64::try_from(ttl).unwrap_or(i64::MAX);
                now_ms <= self.stored_at.saturating_add(ttl)
            }
        }
    }
}

/// Aggregate figures reported by a storage backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageStats {
    pub keys: Vec<String>,
    pub current_size: u64,
    pub limit_size: u64,
}

/// Cache diagnostics. Zeroed when the backend cannot report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInfo {
    pub keys: Vec<String>,
    pub current_size: u64,
    pub limit_size: u64,
    pub encryption_enabled: bool,
}

impl CacheInfo {
    pub fn from_stats(stats: StorageStats, encryption_enabled: bool) -> Self {
        Self {
            keys: stats.keys,
            current_size: stats.current_size,
            limit_size: stats.limit_size,
            encryption_enabled,
        }
    }

    pub fn zeroed(encryption_enabled: bool) -> Self {
        Self {
            encryption_enabled,
            ..Self::default()
        }
    }
}
