// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::models::Collection;
use dompet::store::{JsonFileStore, RecordStore, SqliteStore, merge_patch};
use dompet::Error;
use serde_json::{Map, Value, json};
use tempfile::tempdir;

fn record(id: &str, created_at: &str, amount: i64) -> Value {
    json!({
        "id": id,
        "amount": amount,
        "type": "expense",
        "category": "Makan",
        "date": "2025-01-01T00:00:00.000Z",
        "note": "",
        "createdAt": created_at,
    })
}

fn ids(values: &[Value]) -> Vec<&str> {
    values.iter().map(|v| v["id"].as_str().unwrap()).collect()
}

fn patch(v: Value) -> Map<String, Value> {
    v.as_object().unwrap().clone()
}

/// The behaviour every backend must share.
fn exercise(store: &mut dyn RecordStore) {
    assert!(store.list_all(Collection::Transactions).unwrap().is_empty());

    store
        .insert(Collection::Transactions, record("one", "2025-01-01T00:00:00.000Z", 10))
        .unwrap();
    store
        .insert_many(
            Collection::Transactions,
            vec![
                record("two", "2025-01-02T00:00:00.000Z", 20),
                record("three", "2025-01-02T00:00:00.000Z", 30),
            ],
        )
        .unwrap();
    let all = store.list_all(Collection::Transactions).unwrap();
    assert_eq!(ids(&all), vec!["two", "three", "one"]);

    // Collections are independent.
    assert!(store.list_all(Collection::Budgets).unwrap().is_empty());

    let updated = store
        .update(
            Collection::Transactions,
            "three",
            &patch(json!({"note": "patched", "id": "hijack", "createdAt": "never"})),
        )
        .unwrap();
    assert_eq!(updated["note"], "patched");
    assert_eq!(updated["id"], "three");
    assert_eq!(updated["amount"], 30);
    assert_eq!(updated["createdAt"], "2025-01-02T00:00:00.000Z");

    let err = store
        .update(Collection::Transactions, "missing", &patch(json!({"note": "x"})))
        .unwrap_err();
    assert_eq!(
        err,
        Error::NotFound {
            collection: Collection::Transactions,
            id: "missing".into()
        }
    );

    store.delete(Collection::Transactions, "one").unwrap();
    assert!(matches!(
        store.delete(Collection::Transactions, "one"),
        Err(Error::NotFound { .. })
    ));
    let all = store.list_all(Collection::Transactions).unwrap();
    assert_eq!(ids(&all), vec!["two", "three"]);
    assert_eq!(all[1]["note"], "patched");
}

#[test]
fn json_file_store_contract() {
    let dir = tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("data").join("db.json"));
    exercise(&mut store);
}

#[test]
fn sqlite_store_contract() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    exercise(&mut store);
}

#[test]
fn sqlite_store_on_disk_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dompet.sqlite");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store
            .insert(Collection::Tags, json!({"id": "t1", "name": "Rumah", "createdAt": "x"}))
            .unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(ids(&store.list_all(Collection::Tags).unwrap()), vec!["t1"]);
}

#[test]
fn json_document_has_five_named_arrays() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");
    let mut store = JsonFileStore::new(&path);
    store
        .insert(Collection::Goals, json!({"id": "g1", "targetAmount": 100}))
        .unwrap();

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    for name in ["entries", "budgets", "recurring", "goals", "tags"] {
        assert!(doc[name].is_array(), "{name} missing");
    }
    assert_eq!(doc["goals"][0]["id"], "g1");
}

#[test]
fn json_file_store_reads_partial_documents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, r#"{"entries": [{"id": "e1"}]}"#).unwrap();
    let store = JsonFileStore::new(&path);
    assert_eq!(store.list_all(Collection::Transactions).unwrap().len(), 1);
    assert!(store.list_all(Collection::Tags).unwrap().is_empty());
}

#[test]
fn corrupt_json_document_is_store_unavailable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = JsonFileStore::new(&path);
    let err = store.list_all(Collection::Transactions).unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)));
    assert!(!err.is_caller_fault());
}

#[test]
fn merge_patch_leaves_identity_alone() {
    let mut r = record("keep", "2025-01-01T00:00:00.000Z", 10);
    merge_patch(&mut r, &patch(json!({"id": "other", "amount": 99, "extra": true})));
    assert_eq!(r["id"], "keep");
    assert_eq!(r["amount"], 99);
    assert_eq!(r["extra"], true);
}
