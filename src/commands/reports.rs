// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;

fn month(sub: &clap::ArgMatches) -> Result<Option<String>> {
    sub.get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()
}

/// `summary`: totals over every entry, or over one month.
pub fn summary(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let month = month(sub)?;
    let s = ledger.summary(month.as_deref())?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let label = month.unwrap_or_else(|| "all".to_string());
        println!(
            "{}",
            pretty_table(
                &["Period", "Income", "Expense", "Balance", "Entries"],
                vec![vec![
                    label,
                    fmt_money(&s.income),
                    fmt_money(&s.expense),
                    fmt_money(&s.balance),
                    s.count.to_string(),
                ]],
            )
        );
    }
    Ok(())
}

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("categories", sub)) => categories(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn categories(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let month = month(sub)?;
    let report = ledger.category_report(month.as_deref())?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let rows = report
            .iter()
            .map(|(category, t)| {
                vec![
                    category.clone(),
                    fmt_money(&t.income),
                    fmt_money(&t.expense),
                    t.count.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Income", "Expense", "Entries"], rows)
        );
    }
    Ok(())
}
