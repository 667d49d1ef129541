// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The library error type shared by the store, validator and codec.

use crate::models::Collection;

/// The errors that may occur while handling records.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The caller's input violates a field constraint.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// No record with the given id exists in the collection.
    #[error("no {collection} record with id '{id}'")]
    NotFound { collection: Collection, id: String },

    /// The backing persistence failed to read or write.
    ///
    /// The reason is meant for logs; callers should only learn that the
    /// store is unavailable.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),

    /// The uploaded file could not be read as a spreadsheet or CSV.
    #[error("could not read uploaded file: {0}")]
    DecodeFailure(String),

    /// The workbook writer failed while producing an export.
    #[error("could not encode export: {0}")]
    EncodeFailure(String),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than by the
    /// system, i.e. whether it maps to a 4xx-style response.
    pub fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            Error::InvalidPayload(_) | Error::NotFound { .. } | Error::DecodeFailure(_)
        )
    }

    /// Log a persistence failure and wrap it as [Error::StoreUnavailable].
    pub(crate) fn unavailable(context: &str, err: impl std::fmt::Display) -> Self {
        tracing::error!("{context}: {err}");
        Error::StoreUnavailable(format!("{context}: {err}"))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Error::unavailable("sqlite", value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::unavailable("remote store", value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
