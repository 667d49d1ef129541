// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Patch, amount, text};
use crate::ledger::Ledger;
use crate::models::{Goal, GoalDraft};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = GoalDraft {
                name: text(sub, "name"),
                target_amount: amount(sub, "target")?,
                current_amount: amount(sub, "current")?,
                target_date: text(sub, "target-date"),
            };
            let g: Goal = ledger.add(draft)?;
            println!(
                "Added goal '{}' targeting {} (id {})",
                g.name, g.target_amount, g.id
            );
        }
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let patch = Patch::default()
                .text(sub, "name", "name")
                .amount(sub, "target", "targetAmount")?
                .amount(sub, "current", "currentAmount")?
                .text(sub, "target-date", "targetDate")
                .build()?;
            let g: Goal = ledger.update(id, patch)?;
            println!(
                "Updated goal '{}': {:.1}% of {}",
                g.name,
                g.progress(),
                g.target_amount
            );
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            ledger.delete::<Goal>(id)?;
            println!("Removed goal {}", id);
        }
        _ => {}
    }
    Ok(())
}

/// A goal together with its derived progress.
#[derive(Serialize)]
pub struct GoalRow {
    #[serde(flatten)]
    pub goal: Goal,
    #[serde(with = "rust_decimal::serde::float")]
    pub progress: Decimal,
}

pub fn query_rows(ledger: &Ledger) -> Result<Vec<GoalRow>> {
    Ok(ledger
        .list::<Goal>()?
        .into_iter()
        .map(|goal| GoalRow {
            progress: goal.progress().round_dp(1),
            goal,
        })
        .collect())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(ledger)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.goal.name.clone(),
                    fmt_money(&r.goal.current_amount),
                    fmt_money(&r.goal.target_amount),
                    format!("{:.1}%", r.progress),
                    r.goal.target_date.clone().unwrap_or_default(),
                    r.goal.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Name", "Saved", "Target", "Progress", "Target date", "Id"],
                rows
            )
        );
    }
    Ok(())
}
