pub mod cipher;
pub mod store;

pub use cipher::RecordCipher;
pub use store::CacheStore;
