//! Storage backend port for schemakv
//!
//! The core consumes storage through a narrow capability trait: get, set,
//! delete, clear and key enumeration, each an asynchronous single-result
//! call. Concrete stores live behind this boundary; the crate ships only a
//! volatile in-memory backend, used for tests and as the fallback store
//! for environments without a persistent one.

mod memory;
mod port;

pub use memory::MemoryBackend;
pub use port::{BackendError, BackendFuture, BackendResult, StorageBackend};
