// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Patch, amount, text};
use crate::ledger::Ledger;
use crate::models::{Budget, BudgetDraft};
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            ledger.delete::<Budget>(id)?;
            println!("Removed budget {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let draft = BudgetDraft {
        amount: amount(sub, "amount")?,
        category: text(sub, "category"),
        month: text(sub, "month"),
    };
    let b: Budget = ledger.add(draft)?;
    println!("Budget set for {} / {} = {} (id {})", b.month, b.category, b.amount, b.id);
    Ok(())
}

fn edit(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let patch = Patch::default()
        .amount(sub, "amount", "amount")?
        .text(sub, "category", "category")
        .text(sub, "month", "month")
        .build()?;
    let b: Budget = ledger.update(id, patch)?;
    println!("Updated budget {}: {} / {} = {}", b.id, b.month, b.category, b.amount);
    Ok(())
}

/// Budgets, optionally for one month only.
pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<Budget>> {
    let mut data = ledger.list::<Budget>()?;
    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month)?;
        data.retain(|b| b.month == month);
    }
    Ok(data)
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.month.clone(),
                    b.category.clone(),
                    fmt_money(&b.amount),
                    b.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Category", "Budget", "Id"], rows)
        );
    }
    Ok(())
}
