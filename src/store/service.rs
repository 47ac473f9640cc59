//! Safe storage service
//!
//! Orchestrates the storage backend port and the schema validator into a
//! typed get/set/has/delete/clear surface. The service holds no cache and
//! no locks; all mutable state lives in the backend.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::backend::StorageBackend;
use crate::observability::Logger;
use crate::schema::{validate, JsonSchema};

use super::errors::{StoreError, StoreResult};
use super::key::TypedKey;

/// Type-safe, schema-validated view over a storage backend.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct SafeStore {
    backend: Arc<dyn StorageBackend>,
}

impl SafeStore {
    /// Creates a store over the given backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Creates a store over an already-shared backend.
    pub fn with_backend(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Reads and validates the value stored under `key`.
    ///
    /// An absent key is `Ok(None)`, not an error. A present value is
    /// validated against `schema` before being decoded into `T`; a value
    /// that fails validation is never returned and never coerced.
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &str,
        schema: &JsonSchema,
    ) -> StoreResult<Option<T>> {
        schema.check_structure()?;
        self.get_unchecked(key, schema).await
    }

    /// Validates `value` against `schema`, then writes it under `key`.
    ///
    /// A rejected value performs no backend I/O; the entry's prior state
    /// is untouched.
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        schema: &JsonSchema,
        value: &T,
    ) -> StoreResult<()> {
        schema.check_structure()?;
        self.set_unchecked(key, schema, value).await
    }

    /// Reads and validates the value bound to a typed key.
    pub async fn get_key<T: DeserializeOwned>(&self, key: &TypedKey<T>) -> StoreResult<Option<T>> {
        // Structure was checked when the key was constructed
        self.get_unchecked(key.name(), key.schema()).await
    }

    /// Validates and writes the value bound to a typed key.
    pub async fn set_key<T: Serialize>(&self, key: &TypedKey<T>, value: &T) -> StoreResult<()> {
        self.set_unchecked(key.name(), key.schema(), value).await
    }

    /// Reports whether a value exists under `key`.
    ///
    /// Existence is independent of value shape; no validation runs.
    pub async fn has(&self, key: &str) -> StoreResult<bool> {
        let raw = self.backend.get(key).await?;
        Ok(raw.is_some())
    }

    /// Removes the value stored under `key`.
    pub async fn delete(&self, key: &str) -> StoreResult<()> {
        self.backend.delete(key).await?;
        Ok(())
    }

    /// Removes every stored entry.
    pub async fn clear(&self) -> StoreResult<()> {
        self.backend.clear().await?;
        Ok(())
    }

    /// Returns a snapshot of stored key names at call time.
    ///
    /// Not a live view: later writes do not appear in the returned
    /// vector, and re-iterating it restarts the same snapshot.
    pub async fn keys(&self) -> StoreResult<Vec<String>> {
        let keys = self.backend.keys().await?;
        Ok(keys)
    }

    async fn get_unchecked<T: DeserializeOwned>(
        &self,
        key: &str,
        schema: &JsonSchema,
    ) -> StoreResult<Option<T>> {
        let raw = self.backend.get(key).await?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        if let Err(violation) = validate(schema, &raw).ok() {
            Logger::warn(
                "get_rejected",
                &[
                    ("key", key),
                    ("path", &violation.path),
                    ("reason", &violation.reason.to_string()),
                ],
            );
            return Err(StoreError::validation(key, violation));
        }

        let decoded = serde_json::from_value(raw).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(decoded))
    }

    async fn set_unchecked<T: Serialize>(
        &self,
        key: &str,
        schema: &JsonSchema,
        value: &T,
    ) -> StoreResult<()> {
        let raw: Value = serde_json::to_value(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;

        if let Err(violation) = validate(schema, &raw).ok() {
            Logger::warn(
                "set_rejected",
                &[
                    ("key", key),
                    ("path", &violation.path),
                    ("reason", &violation.reason.to_string()),
                ],
            );
            return Err(StoreError::validation(key, violation));
        }

        self.backend.set(key, raw).await.map_err(|e| {
            Logger::error("backend_set_failed", &[("key", key)]);
            StoreError::Backend(e)
        })?;
        Ok(())
    }
}
