//! Storage Service Tests
//!
//! End-to-end behavior of `SafeStore` over the in-memory backend:
//! - Round-trip: get after set returns the written value unchanged
//! - Rejected writes never reach the backend
//! - Absence is a normal outcome, not an error
//! - Validation failures name the key, path and violated constraint

use schemakv::backend::MemoryBackend;
use schemakv::schema::{JsonSchema, ViolationReason};
use schemakv::store::{SafeStore, StoreError, TypedKey};
use serde::{Deserialize, Serialize};
use serde_json::json;

fn store() -> SafeStore {
    SafeStore::new(MemoryBackend::new())
}

// =============================================================================
// Round-trip
// =============================================================================

#[tokio::test]
async fn test_round_trip_preserves_value() {
    let store = store();

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        theme: String,
        font_size: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        sidebar: Option<bool>,
    }

    let schema = JsonSchema::object(
        [
            ("theme", JsonSchema::string_enum(["light", "dark"])),
            ("font_size", JsonSchema::integer_range(Some(6), Some(72))),
            ("sidebar", JsonSchema::boolean()),
        ],
        ["theme", "font_size"],
    );

    let settings = Settings {
        theme: "dark".into(),
        font_size: 14,
        sidebar: None,
    };
    store.set("settings", &schema, &settings).await.unwrap();

    let loaded: Option<Settings> = store.get("settings", &schema).await.unwrap();
    assert_eq!(loaded, Some(settings));
}

#[tokio::test]
async fn test_set_overwrites_previous_value() {
    let store = store();
    let schema = JsonSchema::string();

    store.set("greeting", &schema, &"hello").await.unwrap();
    store.set("greeting", &schema, &"world").await.unwrap();

    let value: Option<String> = store.get("greeting", &schema).await.unwrap();
    assert_eq!(value, Some("world".to_string()));
}

// =============================================================================
// Absence vs. invalidity
// =============================================================================

#[tokio::test]
async fn test_absent_key_is_ok_none() {
    let store = store();
    let value: Option<String> = store.get("missing", &JsonSchema::string()).await.unwrap();
    assert_eq!(value, None);
}

#[tokio::test]
async fn test_invalid_stored_data_is_an_error_not_none() {
    let store = store();

    // Write under a permissive schema, read back under a stricter one,
    // as an incompatible application upgrade would
    store
        .set("count", &JsonSchema::number(), &3.5)
        .await
        .unwrap();

    let err = store
        .get::<i64>("count", &JsonSchema::integer())
        .await
        .unwrap_err();

    match err {
        StoreError::Validation { key, violation } => {
            assert_eq!(key, "count");
            assert_eq!(violation.reason, ViolationReason::NotInteger);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// =============================================================================
// Write rejection (all-or-nothing)
// =============================================================================

#[tokio::test]
async fn test_rejected_write_never_reaches_backend() {
    let store = store();
    let schema = JsonSchema::number_range(None, Some(10.0));

    store.set("count", &schema, &5.0).await.unwrap();

    // Over the maximum: rejected before the backend is touched
    let err = store.set("count", &schema, &42.0).await.unwrap_err();
    assert_eq!(err.violation().unwrap().reason, ViolationReason::OutOfRange);

    let value: Option<f64> = store.get("count", &schema).await.unwrap();
    assert_eq!(value, Some(5.0));
}

#[tokio::test]
async fn test_rejected_write_on_fresh_key_stores_nothing() {
    let store = store();
    let schema = JsonSchema::string_const("hello");

    assert!(store.set("greeting", &schema, &"goodbye").await.is_err());
    assert!(!store.has("greeting").await.unwrap());
}

// =============================================================================
// Tuple and object scenarios
// =============================================================================

#[tokio::test]
async fn test_tuple_schema_round_trip_and_rejection() {
    let store = store();
    let schema = JsonSchema::tuple([JsonSchema::boolean(), JsonSchema::number()]);

    store.set("pair", &schema, &json!([true, 1])).await.unwrap();
    let value: Option<(bool, f64)> = store.get("pair", &schema).await.unwrap();
    assert_eq!(value, Some((true, 1.0)));

    let err = store
        .set("pair", &schema, &json!([true, 1, "extra"]))
        .await
        .unwrap_err();
    assert!(matches!(
        err.violation().unwrap().reason,
        ViolationReason::TupleLengthMismatch { .. }
    ));
}

#[tokio::test]
async fn test_validation_error_reports_nested_path() {
    let store = store();
    let schema = JsonSchema::object(
        [(
            "address",
            JsonSchema::object(
                [("city", JsonSchema::string()), ("zip", JsonSchema::string())],
                ["city", "zip"],
            ),
        )],
        ["address"],
    );

    let err = store
        .set("user", &schema, &json!({ "address": { "city": "NYC" } }))
        .await
        .unwrap_err();

    let violation = err.violation().unwrap();
    assert_eq!(violation.path, "$.address");
    assert_eq!(
        violation.reason,
        ViolationReason::MissingRequiredProperty("zip".into())
    );
}

// =============================================================================
// Pass-through operations
// =============================================================================

#[tokio::test]
async fn test_has_delete_clear_involve_no_validation() {
    let store = store();
    store
        .set("token", &JsonSchema::string(), &"abc")
        .await
        .unwrap();

    // `has` is about existence, not shape: no schema argument exists
    assert!(store.has("token").await.unwrap());

    store.delete("token").await.unwrap();
    assert!(!store.has("token").await.unwrap());

    store
        .set("a", &JsonSchema::integer(), &1)
        .await
        .unwrap();
    store.clear().await.unwrap();
    assert!(store.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_keys_lists_current_entries() {
    let store = store();
    let schema = JsonSchema::integer();

    store.set("a", &schema, &1).await.unwrap();
    store.set("b", &schema, &2).await.unwrap();

    let mut keys = store.keys().await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
}

// =============================================================================
// Typed keys
// =============================================================================

#[tokio::test]
async fn test_typed_key_binds_schema_and_type_once() {
    let store = store();

    let font_size: TypedKey<i64> =
        TypedKey::new("font_size", JsonSchema::integer_range(Some(6), Some(72))).unwrap();

    store.set_key(&font_size, &14).await.unwrap();
    assert_eq!(store.get_key(&font_size).await.unwrap(), Some(14));

    let err = store.set_key(&font_size, &500).await.unwrap_err();
    assert_eq!(err.violation().unwrap().reason, ViolationReason::OutOfRange);
}

#[tokio::test]
async fn test_caller_chosen_type_is_what_comes_back() {
    let store = store();

    // The declared type parameter is the static type of the result
    store
        .set("greeting", &JsonSchema::string_const("hello"), &"hello")
        .await
        .unwrap();

    let narrow: Option<String> = store
        .get("greeting", &JsonSchema::string_const("hello"))
        .await
        .unwrap();
    assert_eq!(narrow, Some("hello".to_string()));
}

// =============================================================================
// Concurrent use
// =============================================================================

#[tokio::test]
async fn test_concurrent_operations_on_shared_store() {
    let store = store();
    let schema = JsonSchema::integer();

    let mut handles = Vec::new();
    for i in 0..8i64 {
        let store = store.clone();
        let schema = schema.clone();
        handles.push(tokio::spawn(async move {
            let key = format!("key{}", i);
            store.set(&key, &schema, &i).await.unwrap();
            let value: Option<i64> = store.get(&key, &schema).await.unwrap();
            assert_eq!(value, Some(i));
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.keys().await.unwrap().len(), 8);
}
