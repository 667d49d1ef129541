// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed access to the record store.
//!
//! The ledger validates everything before it is written and hands callers
//! owned, typed records. It does not know which backend it is talking to.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::aggregate::{self, CategoryTotals, Summary};
use crate::codec::{self, Format};
use crate::error::{Error, Result};
use crate::models::{Collection, Record, Transaction};
use crate::store::{RecordStore, merge_patch, mutable_fields, record_id};

pub struct Ledger {
    store: Box<dyn RecordStore>,
}

impl Ledger {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Ledger { store }
    }

    /// Every record of kind `R`, newest first. Stored records that no longer
    /// match the record shape are logged and left out.
    pub fn list<R: Record>(&self) -> Result<Vec<R>> {
        let values = self.store.list_all(R::COLLECTION)?;
        Ok(values
            .into_iter()
            .filter_map(decode_stored::<R>)
            .collect())
    }

    pub fn count(&self, collection: Collection) -> Result<usize> {
        Ok(self.store.list_all(collection)?.len())
    }

    pub fn get<R: Record>(&self, id: &str) -> Result<R> {
        let value = self.find_value(R::COLLECTION, id)?;
        from_value(value)
    }

    pub fn add<R: Record>(&mut self, draft: R::Draft) -> Result<R> {
        let record = R::validate(draft, Utc::now())?;
        let stored = self.store.insert(R::COLLECTION, to_value(&record)?)?;
        tracing::info!("Added {} record {}", R::COLLECTION, record.id());
        from_value(stored)
    }

    /// Apply a partial update. The merged record must still pass validation,
    /// and the normalized result is written back, so a blank or null field
    /// takes its default just as it would on insert. `id` and `createdAt`
    /// keep their stored values.
    pub fn update<R: Record>(&mut self, id: &str, patch: Map<String, Value>) -> Result<R> {
        let mut merged = self.find_value(R::COLLECTION, id)?;
        merge_patch(&mut merged, &patch);
        let draft: R::Draft =
            serde_json::from_value(merged).map_err(|e| Error::InvalidPayload(e.to_string()))?;
        let normalized = match to_value(&R::validate(draft, Utc::now())?)? {
            Value::Object(fields) => mutable_fields(&fields),
            _ => return Err(Error::unavailable("serialize record", "not a JSON object")),
        };

        let stored = self.store.update(R::COLLECTION, id, &normalized)?;
        tracing::info!("Updated {} record {}", R::COLLECTION, id);
        from_value(stored)
    }

    pub fn delete<R: Record>(&mut self, id: &str) -> Result<()> {
        self.store.delete(R::COLLECTION, id)?;
        tracing::info!("Deleted {} record {}", R::COLLECTION, id);
        Ok(())
    }

    /// Transactions, optionally restricted to one `YYYY-MM` month.
    pub fn transactions(&self, month: Option<&str>) -> Result<Vec<Transaction>> {
        let mut all = self.list::<Transaction>()?;
        if let Some(m) = month {
            all.retain(|tx| aggregate::in_month(tx, m));
        }
        Ok(all)
    }

    pub fn summary(&self, month: Option<&str>) -> Result<Summary> {
        let all = self.list::<Transaction>()?;
        Ok(match month {
            Some(m) => aggregate::monthly_summary(&all, m),
            None => aggregate::summary(&all),
        })
    }

    pub fn category_report(&self, month: Option<&str>) -> Result<BTreeMap<String, CategoryTotals>> {
        Ok(aggregate::category_report(&self.list::<Transaction>()?, month))
    }

    pub fn export(&self, format: Format, month: Option<&str>) -> Result<Vec<u8>> {
        codec::encode(&self.transactions(month)?, format)
    }

    /// Decode an uploaded spreadsheet and store every accepted row.
    /// Returns how many rows were added.
    pub fn import(&mut self, bytes: &[u8]) -> Result<usize> {
        let decoded = codec::decode(bytes, Utc::now())?;
        if decoded.records.is_empty() {
            return Ok(0);
        }
        let values = decoded
            .records
            .iter()
            .map(to_value)
            .collect::<Result<Vec<_>>>()?;
        let stored = self.store.insert_many(Collection::Transactions, values)?;
        tracing::info!(
            "Imported {} of {} decoded transactions",
            stored.len(),
            decoded.added
        );
        Ok(stored.len())
    }

    fn find_value(&self, collection: Collection, id: &str) -> Result<Value> {
        self.store
            .list_all(collection)?
            .into_iter()
            .find(|v| record_id(v) == Some(id))
            .ok_or_else(|| Error::NotFound {
                collection,
                id: id.to_string(),
            })
    }
}

fn to_value<R: serde::Serialize>(record: &R) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| Error::unavailable("serialize record", e))
}

fn from_value<R: Record>(value: Value) -> Result<R> {
    serde_json::from_value(value)
        .map_err(|e| Error::unavailable(&format!("unreadable {} record", R::COLLECTION), e))
}

fn decode_stored<R: Record>(value: Value) -> Option<R> {
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Skipping unreadable {} record: {e}", R::COLLECTION);
            None
        }
    }
}
