//! # Storage Backend Trait

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use thiserror::Error;

/// Opaque failure surfaced unchanged from a storage backend.
///
/// The core never retries; retry policy belongs to the backend or the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage backend failure: {0}")]
pub struct BackendError(String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Boxed single-result future, keeping the trait object-safe
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = BackendResult<T>> + Send + 'a>>;

/// Backend trait for key-value storage
///
/// Every operation completes exactly once with a success value or a
/// failure. The core assumes single-key writes are atomic from the
/// caller's perspective and adds no locking or queuing of its own.
pub trait StorageBackend: Send + Sync {
    /// Read the raw value stored under a key, `None` when absent
    fn get(&self, key: &str) -> BackendFuture<'_, Option<Value>>;

    /// Store a raw value under a key, replacing any previous value
    fn set(&self, key: &str, value: Value) -> BackendFuture<'_, ()>;

    /// Remove the value stored under a key (absent keys are not an error)
    fn delete(&self, key: &str) -> BackendFuture<'_, ()>;

    /// Remove every stored entry
    fn clear(&self) -> BackendFuture<'_, ()>;

    /// Enumerate stored key names as a snapshot at call time
    fn keys(&self) -> BackendFuture<'_, Vec<String>>;
}
