// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{RecordStore, merge_patch, record_id};
use crate::error::{Error, Result};
use crate::models::Collection;

/// The whole local database: one array per collection.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    entries: Vec<Value>,
    #[serde(default)]
    budgets: Vec<Value>,
    #[serde(default)]
    recurring: Vec<Value>,
    #[serde(default)]
    goals: Vec<Value>,
    #[serde(default)]
    tags: Vec<Value>,
}

impl Document {
    fn collection_mut(&mut self, collection: Collection) -> &mut Vec<Value> {
        match collection {
            Collection::Transactions => &mut self.entries,
            Collection::Budgets => &mut self.budgets,
            Collection::Recurring => &mut self.recurring,
            Collection::Goals => &mut self.goals,
            Collection::Tags => &mut self.tags,
        }
    }

    fn into_collection(self, collection: Collection) -> Vec<Value> {
        match collection {
            Collection::Transactions => self.entries,
            Collection::Budgets => self.budgets,
            Collection::Recurring => self.recurring,
            Collection::Goals => self.goals,
            Collection::Tags => self.tags,
        }
    }
}

/// Keeps every collection in a single JSON file that is read in full and
/// rewritten in full on each mutation.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    fn load(&self) -> Result<Document> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(Error::unavailable(&self.context("read"), e)),
        };
        serde_json::from_str(&text).map_err(|e| Error::unavailable(&self.context("parse"), e))
    }

    fn save(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::unavailable(&self.context("mkdir"), e))?;
        }
        let text = serde_json::to_string_pretty(doc)
            .map_err(|e| Error::unavailable(&self.context("serialize"), e))?;
        fs::write(&self.path, text).map_err(|e| Error::unavailable(&self.context("write"), e))
    }

    fn context(&self, action: &str) -> String {
        format!("{action} {}", self.path.display())
    }
}

impl RecordStore for JsonFileStore {
    fn backend(&self) -> &'static str {
        "json-file"
    }

    fn list_all(&self, collection: Collection) -> Result<Vec<Value>> {
        Ok(self.load()?.into_collection(collection))
    }

    fn insert_many(&mut self, collection: Collection, records: Vec<Value>) -> Result<Vec<Value>> {
        let mut doc = self.load()?;
        let items = doc.collection_mut(collection);
        let older = std::mem::replace(items, records.clone());
        items.extend(older);
        self.save(&doc)?;
        Ok(records)
    }

    fn update(
        &mut self,
        collection: Collection,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<Value> {
        let mut doc = self.load()?;
        let record = doc
            .collection_mut(collection)
            .iter_mut()
            .find(|r| record_id(r) == Some(id))
            .ok_or_else(|| Error::NotFound {
                collection,
                id: id.to_string(),
            })?;
        merge_patch(record, patch);
        let updated = record.clone();
        self.save(&doc)?;
        Ok(updated)
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<()> {
        let mut doc = self.load()?;
        let items = doc.collection_mut(collection);
        let before = items.len();
        items.retain(|r| record_id(r) != Some(id));
        if items.len() == before {
            return Err(Error::NotFound {
                collection,
                id: id.to_string(),
            });
        }
        self.save(&doc)
    }
}
