// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Backend write/delete/clear failure. Reaches the caller unmodified.
    #[error("storage: {0}")]
    Storage(String),
    /// Undecryptable or undecodable record. Never leaves the cache read path.
    #[error("corrupt record: {0}")]
    Corruption(String),
    #[error("encryption: {0}")]
    Encryption(String),
    #[error("serialization: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlMs(pub u64);

impl TtlMs {
    /// A TTL of zero seconds means "never expires".
    pub fn from_secs(secs: u64) -> Option<Self> {
        (secs > 0).then(|| TtlMs(secs.saturating_mul(1000)))
    }
}

pub mod config;
