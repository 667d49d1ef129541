// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use anyhow::{Context, Result};

/// Import entries from the file at `--path` and return how many were added.
pub fn handle(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<usize> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let bytes = std::fs::read(path).with_context(|| format!("Open {}", path))?;
    let added = ledger
        .import(&bytes)
        .with_context(|| format!("Import {}", path))?;
    println!("Imported {} entries from {}", added, path);
    Ok(added)
}
