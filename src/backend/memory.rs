//! In-memory storage backend
//!
//! Volatile store over a `RwLock<HashMap>`. State lives for the lifetime
//! of the process; nothing is persisted.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::port::{BackendError, BackendFuture, StorageBackend};

/// Volatile in-memory backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> BackendFuture<'_, Option<Value>> {
        let result = self
            .data
            .read()
            .map_err(|e| BackendError::new(e.to_string()))
            .map(|data| data.get(key).cloned());
        Box::pin(async move { result })
    }

    fn set(&self, key: &str, value: Value) -> BackendFuture<'_, ()> {
        let result = self
            .data
            .write()
            .map_err(|e| BackendError::new(e.to_string()))
            .map(|mut data| {
                data.insert(key.to_string(), value);
            });
        Box::pin(async move { result })
    }

    fn delete(&self, key: &str) -> BackendFuture<'_, ()> {
        let result = self
            .data
            .write()
            .map_err(|e| BackendError::new(e.to_string()))
            .map(|mut data| {
                data.remove(key);
            });
        Box::pin(async move { result })
    }

    fn clear(&self) -> BackendFuture<'_, ()> {
        let result = self
            .data
            .write()
            .map_err(|e| BackendError::new(e.to_string()))
            .map(|mut data| data.clear());
        Box::pin(async move { result })
    }

    fn keys(&self) -> BackendFuture<'_, Vec<String>> {
        let result = self
            .data
            .read()
            .map_err(|e| BackendError::new(e.to_string()))
            .map(|data| data.keys().cloned().collect());
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_then_get_returns_value() {
        let backend = MemoryBackend::new();
        backend.set("user", json!({ "name": "Alice" })).await.unwrap();

        let value = backend.get("user").await.unwrap();
        assert_eq!(value, Some(json!({ "name": "Alice" })));
    }

    #[tokio::test]
    async fn test_get_absent_key_is_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_previous_value() {
        let backend = MemoryBackend::new();
        backend.set("count", json!(1)).await.unwrap();
        backend.set("count", json!(2)).await.unwrap();

        assert_eq!(backend.get("count").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let backend = MemoryBackend::new();
        backend.set("key", json!(true)).await.unwrap();

        backend.delete("key").await.unwrap();
        assert_eq!(backend.get("key").await.unwrap(), None);

        // Deleting an absent key succeeds
        backend.delete("key").await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let backend = MemoryBackend::new();
        backend.set("a", json!(1)).await.unwrap();
        backend.set("b", json!(2)).await.unwrap();

        backend.clear().await.unwrap();
        assert!(backend.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_keys_snapshot() {
        let backend = MemoryBackend::new();
        backend.set("a", json!(1)).await.unwrap();
        backend.set("b", json!(2)).await.unwrap();

        let mut keys = backend.keys().await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}
