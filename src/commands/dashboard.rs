// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::Summary;
use crate::ledger::Ledger;
use crate::models::{Budget, Collection, Goal, Record, RecurringTemplate, Tag, Transaction};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

/// How many of the latest records per collection the dashboard shows.
pub const RECENT: usize = 5;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    pub counts: Vec<(String, usize)>,
    pub recent_entries: Vec<Transaction>,
    pub recent_budgets: Vec<Budget>,
    pub recent_recurring: Vec<RecurringTemplate>,
    pub recent_goals: Vec<Goal>,
    pub recent_tags: Vec<Tag>,
}

fn recent<R: Record>(mut records: Vec<R>) -> Vec<R> {
    records.sort_by(|a, b| b.created_at().cmp(a.created_at()));
    records.truncate(RECENT);
    records
}

pub fn build(ledger: &Ledger) -> Result<Dashboard> {
    let counts = Collection::ALL
        .iter()
        .map(|c| Ok((c.to_string(), ledger.count(*c)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Dashboard {
        summary: ledger.summary(None)?,
        counts,
        recent_entries: recent(ledger.list()?),
        recent_budgets: recent(ledger.list()?),
        recent_recurring: recent(ledger.list()?),
        recent_goals: recent(ledger.list()?),
        recent_tags: recent(ledger.list()?),
    })
}

pub fn handle(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let d = build(ledger)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &d)? {
        return Ok(());
    }
    let counts = d
        .counts
        .iter()
        .map(|(name, n)| vec![name.clone(), n.to_string()])
        .collect();
    println!("{}", pretty_table(&["Collection", "Records"], counts));
    println!(
        "Income {}  Expense {}  Balance {}",
        fmt_money(&d.summary.income),
        fmt_money(&d.summary.expense),
        fmt_money(&d.summary.balance)
    );
    let entries = d
        .recent_entries
        .iter()
        .map(|t| {
            let sign = if t.kind == crate::models::Kind::Income { "+" } else { "-" };
            vec![
                format!("{sign}{}", fmt_money(&t.amount)),
                t.category.clone(),
                t.occurred_at.clone(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Amount", "Category", "Date"], entries));
    let budgets = d
        .recent_budgets
        .iter()
        .map(|b| vec![b.month.clone(), b.category.clone(), fmt_money(&b.amount)])
        .collect();
    println!("{}", pretty_table(&["Month", "Category", "Budget"], budgets));
    let goals = d
        .recent_goals
        .iter()
        .map(|g| vec![g.name.clone(), format!("{:.1}%", g.progress())])
        .collect();
    println!("{}", pretty_table(&["Goal", "Progress"], goals));
    Ok(())
}
