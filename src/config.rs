// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Process configuration read from the environment.

use std::path::PathBuf;

use crate::db;
use crate::error::Result;

pub const REMOTE_URL_VAR: &str = "SUPABASE_URL";
pub const REMOTE_KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const SQLITE_VAR: &str = "DOMPET_SQLITE";
pub const DATA_VAR: &str = "DOMPET_DATA";
pub const LOG_VAR: &str = "DOMPET_LOG";

/// Which record store the process talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Remote { url: String, key: String },
    Sqlite(PathBuf),
    JsonFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
}

impl Config {
    /// Read the configuration from the process environment, after loading a
    /// `.env` file if one is present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build the configuration from a variable lookup.
    ///
    /// A remote store needs both its URL and key; otherwise an SQLite path
    /// wins over a JSON path, and the JSON document in the platform data
    /// directory is the fallback.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend = match (var(REMOTE_URL_VAR), var(REMOTE_KEY_VAR)) {
            (Some(url), Some(key)) => Backend::Remote { url, key },
            _ => match (var(SQLITE_VAR), var(DATA_VAR)) {
                (Some(path), _) => Backend::Sqlite(PathBuf::from(path)),
                (None, Some(path)) => Backend::JsonFile(PathBuf::from(path)),
                (None, None) => Backend::JsonFile(db::default_json_path()?),
            },
        };
        Ok(Config { backend })
    }

    /// Human-readable location of the active store.
    pub fn describe(&self) -> String {
        match &self.backend {
            Backend::Remote { url, .. } => format!("remote store at {url}"),
            Backend::Sqlite(path) => format!("SQLite database at {}", path.display()),
            Backend::JsonFile(path) => format!("JSON document at {}", path.display()),
        }
    }
}
