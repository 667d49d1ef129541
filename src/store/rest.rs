// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::{Map, Value};

use super::{RecordStore, mutable_fields};
use crate::error::{Error, Result};
use crate::models::Collection;

const UA: &str = concat!("dompet/", env!("CARGO_PKG_VERSION"));

/// Remote table store reached over a PostgREST-style HTTP API.
pub struct RestStore {
    client: Client,
    base_url: String,
    key: String,
}

impl RestStore {
    pub fn new(url: &str, key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent(UA)
            .build()?;
        Ok(RestStore {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        })
    }

    /// Endpoint of one collection's table.
    pub fn table_url(&self, collection: Collection) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection.table())
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=representation")
    }

    fn send(&self, builder: RequestBuilder, action: &str) -> Result<Response> {
        let response = self.request(builder).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(Error::unavailable(action, format!("{status}: {body}")))
    }
}

impl RecordStore for RestStore {
    fn backend(&self) -> &'static str {
        "remote"
    }

    fn list_all(&self, collection: Collection) -> Result<Vec<Value>> {
        let builder = self
            .client
            .get(self.table_url(collection))
            .query(&[("select", "*"), ("order", "createdAt.desc")]);
        Ok(self
            .send(builder, &format!("list {collection}"))?
            .json::<Vec<Value>>()?)
    }

    fn insert_many(&mut self, collection: Collection, records: Vec<Value>) -> Result<Vec<Value>> {
        if records.is_empty() {
            return Ok(records);
        }
        let builder = self.client.post(self.table_url(collection)).json(&records);
        Ok(self
            .send(builder, &format!("insert into {collection}"))?
            .json::<Vec<Value>>()?)
    }

    fn update(
        &mut self,
        collection: Collection,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<Value> {
        let builder = self
            .client
            .patch(self.table_url(collection))
            .query(&[("id", format!("eq.{id}"))])
            .json(&mutable_fields(patch));
        let mut rows = self
            .send(builder, &format!("update {collection}"))?
            .json::<Vec<Value>>()?;
        if rows.is_empty() {
            return Err(Error::NotFound {
                collection,
                id: id.to_string(),
            });
        }
        Ok(rows.swap_remove(0))
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<()> {
        let builder = self
            .client
            .delete(self.table_url(collection))
            .query(&[("id", format!("eq.{id}"))]);
        let response = self.send(builder, &format!("delete from {collection}"))?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let rows = response.json::<Vec<Value>>()?;
        if rows.is_empty() {
            return Err(Error::NotFound {
                collection,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
