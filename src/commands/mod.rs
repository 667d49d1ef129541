// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod dashboard;
pub mod exporter;
pub mod goals;
pub mod importer;
pub mod recurring;
pub mod reports;
pub mod tags;
pub mod transactions;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::utils::parse_decimal;

pub(crate) fn text(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name).cloned()
}

/// A decimal option; unparsable input is the caller's fault.
pub(crate) fn amount(sub: &clap::ArgMatches, name: &str) -> Result<Option<Decimal>, Error> {
    text(sub, name)
        .map(|s| parse_decimal(&s).map_err(|e| Error::InvalidPayload(format!("{e:#}"))))
        .transpose()
}

/// Collects the fields given on an `edit` command into a JSON patch.
#[derive(Default)]
pub(crate) struct Patch(Map<String, Value>);

impl Patch {
    pub(crate) fn text(mut self, sub: &clap::ArgMatches, arg: &str, field: &str) -> Self {
        if let Some(v) = text(sub, arg) {
            self.0.insert(field.to_string(), Value::String(v));
        }
        self
    }

    pub(crate) fn amount(
        mut self,
        sub: &clap::ArgMatches,
        arg: &str,
        field: &str,
    ) -> Result<Self, Error> {
        if let Some(d) = amount(sub, arg)? {
            let n = d
                .to_f64()
                .and_then(serde_json::Number::from_f64)
                .ok_or_else(|| Error::InvalidPayload(format!("{arg} {d} is out of range")))?;
            self.0.insert(field.to_string(), Value::Number(n));
        }
        Ok(self)
    }

    pub(crate) fn build(self) -> Result<Map<String, Value>, Error> {
        if self.0.is_empty() {
            return Err(Error::InvalidPayload("nothing to change".into()));
        }
        Ok(self.0)
    }
}
