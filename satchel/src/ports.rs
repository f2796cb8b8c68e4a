#![deny(clippy::all)]

use crate::domain::StorageStats;
use shared::Result;

// Ports are the collaborators the cache and the request client are built on.
// Every one of them is injected so tests can substitute doubles.

/// Port for the raw key/value persistence underneath the cache.
///
/// Operations are synchronous and atomic per key from the caller's point of view.
pub trait StorageBackend: Send + Sync + 'static {
    /// Raw record for `key`, `None` when absent.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
    fn clear_all(&self) -> Result<()>;
    fn stats(&self) -> Result<StorageStats>;
}

/// Port for the bearer token attached to outgoing requests.
pub trait AuthTokenProvider: Send + Sync {
    /// Current token, `None` when signed out. Errors are treated as "no token".
    fn token(&self) -> Result<Option<String>>;
}

/// Port for fire-and-forget user feedback (busy indicator, toasts).
pub trait UiFeedback: Send + Sync {
    fn show_busy(&self, label: &str);
    fn hide_busy(&self);
    fn notify(&self, message: &str);
}

/// Port for wall-clock time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
