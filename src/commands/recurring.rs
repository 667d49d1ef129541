// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Patch, amount, text};
use crate::ledger::Ledger;
use crate::models::{RecurringDraft, RecurringTemplate};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = RecurringDraft {
                amount: amount(sub, "amount")?,
                kind: text(sub, "type"),
                category: text(sub, "category"),
                frequency: text(sub, "frequency"),
                note: text(sub, "note"),
            };
            let r: RecurringTemplate = ledger.add(draft)?;
            println!(
                "Added {} {} {} in '{}' (id {})",
                r.frequency, r.kind, r.amount, r.category, r.id
            );
        }
        Some(("list", sub)) => {
            let data = ledger.list::<RecurringTemplate>()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|r| {
                        vec![
                            r.frequency.to_string(),
                            r.kind.to_string(),
                            fmt_money(&r.amount),
                            r.category.clone(),
                            r.note.clone(),
                            r.id.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Frequency", "Type", "Amount", "Category", "Note", "Id"],
                        rows
                    )
                );
            }
        }
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let patch = Patch::default()
                .amount(sub, "amount", "amount")?
                .text(sub, "type", "type")
                .text(sub, "frequency", "frequency")
                .text(sub, "category", "category")
                .text(sub, "note", "note")
                .build()?;
            let r: RecurringTemplate = ledger.update(id, patch)?;
            println!("Updated recurring entry {}", r.id);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            ledger.delete::<RecurringTemplate>(id)?;
            println!("Removed recurring entry {}", id);
        }
        _ => {}
    }
    Ok(())
}
