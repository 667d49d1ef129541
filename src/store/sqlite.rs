// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use serde_json::{Map, Value};

use super::{RecordStore, merge_patch, record_id};
use crate::db;
use crate::error::{Error, Result};
use crate::models::Collection;

/// Relational backend: one table per collection, one row per record.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(SqliteStore {
            conn: db::open_or_init(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(SqliteStore {
            conn: db::open_in_memory()?,
        })
    }

    fn find(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let body: Option<String> = self
            .conn
            .query_row(
                &format!("SELECT body FROM {} WHERE id=?1", collection.table()),
                params![id],
                |r| r.get(0),
            )
            .optional()?;
        body.map(|b| parse_body(collection, &b)).transpose()
    }
}

fn parse_body(collection: Collection, body: &str) -> Result<Value> {
    serde_json::from_str(body)
        .map_err(|e| Error::unavailable(&format!("corrupt row in {collection}"), e))
}

fn to_body(record: &Value) -> Result<String> {
    serde_json::to_string(record).map_err(|e| Error::unavailable("serialize record", e))
}

impl RecordStore for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn list_all(&self, collection: Collection) -> Result<Vec<Value>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT body FROM {} ORDER BY created_at DESC, rowid DESC",
            collection.table()
        ))?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
        let mut data = Vec::new();
        for row in rows {
            data.push(parse_body(collection, &row?)?);
        }
        Ok(data)
    }

    fn insert_many(&mut self, collection: Collection, records: Vec<Value>) -> Result<Vec<Value>> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {}(id, created_at, body) VALUES (?1, ?2, ?3)",
                collection.table()
            ))?;
            // Rows are listed newest first, so insert back to front to keep
            // the batch order at the head of the collection.
            for record in records.iter().rev() {
                let id = record_id(record).ok_or_else(|| {
                    Error::InvalidPayload(format!("record for {collection} has no id"))
                })?;
                let created_at = record
                    .get("createdAt")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                stmt.execute(params![id, created_at, to_body(record)?])?;
            }
        }
        tx.commit()?;
        Ok(records)
    }

    fn update(
        &mut self,
        collection: Collection,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<Value> {
        let mut record = self.find(collection, id)?.ok_or_else(|| Error::NotFound {
            collection,
            id: id.to_string(),
        })?;
        merge_patch(&mut record, patch);
        self.conn.execute(
            &format!("UPDATE {} SET body=?1 WHERE id=?2", collection.table()),
            params![to_body(&record)?, id],
        )?;
        Ok(record)
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<()> {
        let n = self.conn.execute(
            &format!("DELETE FROM {} WHERE id=?1", collection.table()),
            params![id],
        )?;
        if n == 0 {
            return Err(Error::NotFound {
                collection,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
