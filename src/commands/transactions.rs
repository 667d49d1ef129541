// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Patch, amount, text};
use crate::aggregate;
use crate::ledger::Ledger;
use crate::models::{Kind, Transaction, TransactionDraft};
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            ledger.delete::<Transaction>(id)?;
            println!("Removed entry {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let draft = TransactionDraft {
        amount: amount(sub, "amount")?,
        kind: text(sub, "type"),
        category: text(sub, "category"),
        occurred_at: text(sub, "date"),
        note: text(sub, "note"),
    };
    let tx: Transaction = ledger.add(draft)?;
    println!(
        "Recorded {} {} in '{}' on {} (id {})",
        tx.kind, tx.amount, tx.category, tx.occurred_at, tx.id
    );
    Ok(())
}

fn edit(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let patch = Patch::default()
        .amount(sub, "amount", "amount")?
        .text(sub, "type", "type")
        .text(sub, "category", "category")
        .text(sub, "date", "date")
        .text(sub, "note", "note")
        .build()?;
    let tx: Transaction = ledger.update(id, patch)?;
    println!("Updated entry {}: {} {} in '{}'", tx.id, tx.kind, tx.amount, tx.category);
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.occurred_at.clone(),
                    t.kind.to_string(),
                    fmt_money(&t.amount),
                    t.category.clone(),
                    t.note.clone(),
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Amount", "Category", "Note", "Id"], rows)
        );
    }
    Ok(())
}

/// Entries matching the `list` filters, newest first.
pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let mut data = ledger.transactions(month.as_deref())?;

    if let Some(kind) = sub.get_one::<String>("type") {
        let kind: Kind = kind.parse().map_err(anyhow::Error::msg)?;
        data = aggregate::filter_by_kind(&data, kind)
            .into_iter()
            .cloned()
            .collect();
    }
    if let Some(q) = sub.get_one::<String>("search") {
        data = aggregate::search(&data, q).into_iter().cloned().collect();
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
