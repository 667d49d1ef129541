// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::Collection;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Dompet", "dompet"));

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        Error::unavailable("data dir", "could not determine platform-specific data dir")
    })?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).map_err(|e| Error::unavailable("create data dir", e))?;
    Ok(data_dir.to_path_buf())
}

/// Where the JSON document lives when no other location is configured.
pub fn default_json_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("db.json"))
}

pub fn open_or_init(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::unavailable("create db dir", e))?;
    }
    let conn = Connection::open(path)
        .map_err(|e| Error::unavailable(&format!("open DB at {}", path.display()), e))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

/// One table per collection; the record itself is kept as JSON in `body`.
fn init_schema(conn: &Connection) -> Result<()> {
    let mut sql = String::new();
    for collection in Collection::ALL {
        let table = collection.table();
        sql.push_str(&format!(
            r#"
    CREATE TABLE IF NOT EXISTS {table}(
        id TEXT PRIMARY KEY,
        created_at TEXT NOT NULL,
        body TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_{table}_created_at ON {table}(created_at);
    "#
        ));
    }
    conn.execute_batch(&sql)?;
    Ok(())
}
