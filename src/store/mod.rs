// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence behind a single [RecordStore] interface.
//!
//! Records cross this boundary as JSON objects so that every backend can
//! apply partial updates the same way. Which backend is active is decided
//! once, from the [Config], when the process starts.

mod json_file;
mod rest;
mod sqlite;

pub use json_file::JsonFileStore;
pub use rest::RestStore;
pub use sqlite::SqliteStore;

use serde_json::{Map, Value};

use crate::config::{Backend, Config};
use crate::error::Result;
use crate::models::Collection;

/// Fields a patch may never change.
pub const IMMUTABLE_FIELDS: [&str; 2] = ["id", "createdAt"];

pub trait RecordStore {
    /// Short name of the backend, for logs.
    fn backend(&self) -> &'static str;

    /// Every record in the collection, newest first.
    fn list_all(&self, collection: Collection) -> Result<Vec<Value>>;

    /// Store `records` at the front of the collection, keeping their order,
    /// and return them as stored.
    fn insert_many(&mut self, collection: Collection, records: Vec<Value>) -> Result<Vec<Value>>;

    /// Merge `patch` into the record with the given id and return the result.
    ///
    /// Returns [crate::Error::NotFound] when no record has that id.
    fn update(&mut self, collection: Collection, id: &str, patch: &Map<String, Value>)
    -> Result<Value>;

    /// Returns [crate::Error::NotFound] when no record has that id.
    fn delete(&mut self, collection: Collection, id: &str) -> Result<()>;

    fn insert(&mut self, collection: Collection, record: Value) -> Result<Value> {
        let mut stored = self.insert_many(collection, vec![record])?;
        Ok(stored.pop().unwrap_or(Value::Null))
    }
}

/// Open the backend selected by `config`.
pub fn open(config: &Config) -> Result<Box<dyn RecordStore>> {
    let store: Box<dyn RecordStore> = match &config.backend {
        Backend::Remote { url, key } => Box::new(RestStore::new(url, key)?),
        Backend::Sqlite(path) => Box::new(SqliteStore::open(path)?),
        Backend::JsonFile(path) => Box::new(JsonFileStore::new(path)),
    };
    tracing::debug!("Using {} record store", store.backend());
    Ok(store)
}

/// Shallow merge of `patch` into `record`, leaving the immutable fields alone.
pub fn merge_patch(record: &mut Value, patch: &Map<String, Value>) {
    if let Value::Object(fields) = record {
        for (key, value) in patch {
            if !IMMUTABLE_FIELDS.contains(&key.as_str()) {
                fields.insert(key.clone(), value.clone());
            }
        }
    }
}

/// A copy of `patch` without the immutable fields.
pub fn mutable_fields(patch: &Map<String, Value>) -> Map<String, Value> {
    patch
        .iter()
        .filter(|(key, _)| !IMMUTABLE_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

pub(crate) fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}
