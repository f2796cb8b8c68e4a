pub mod auth;
pub mod cache;
pub mod domain;
pub mod feedback;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CacheStore, RecordCipher};
pub use domain::{CacheEntry, CacheInfo, StorageStats};
pub use feedback::{BusyGuard, NoopFeedback, TracingFeedback};
pub use ports::{AuthTokenProvider, Clock, StorageBackend, SystemClock, UiFeedback};
