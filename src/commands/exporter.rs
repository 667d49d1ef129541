// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::codec::{Format, export_file_name};
use crate::ledger::Ledger;
use crate::utils::parse_month;
use anyhow::{Context, Result};

pub fn handle(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let format: Format = sub.get_one::<String>("format").unwrap().parse()?;
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let out = sub
        .get_one::<String>("out")
        .cloned()
        .unwrap_or_else(|| export_file_name(format, month.as_deref()));

    let bytes = ledger.export(format, month.as_deref())?;
    std::fs::write(&out, bytes).with_context(|| format!("Write export to {}", out))?;
    println!("Exported entries to {} ({})", out, format.content_type());
    Ok(())
}
