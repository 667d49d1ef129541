// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Patch, text};
use crate::ledger::Ledger;
use crate::models::{Tag, TagDraft};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = TagDraft {
                name: text(sub, "name"),
                color: text(sub, "color"),
            };
            let t: Tag = ledger.add(draft)?;
            println!("Added tag '{}' ({}, id {})", t.name, t.color, t.id);
        }
        Some(("list", sub)) => {
            let data = ledger.list::<Tag>()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|t| vec![t.name.clone(), t.color.clone(), t.id.clone()])
                    .collect();
                println!("{}", pretty_table(&["Tag", "Color", "Id"], rows));
            }
        }
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let patch = Patch::default()
                .text(sub, "name", "name")
                .text(sub, "color", "color")
                .build()?;
            let t: Tag = ledger.update(id, patch)?;
            println!("Updated tag '{}'", t.name);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            ledger.delete::<Tag>(id)?;
            println!("Removed tag {}", id);
        }
        _ => {}
    }
    Ok(())
}
