// Storage backends the cache can be mounted on.
pub mod memory;
pub mod sled_backend;

pub use memory::MemoryBackend;
pub use sled_backend::SledBackend;
