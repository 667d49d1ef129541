// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only totals and groupings over the transaction collection.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{DEFAULT_CATEGORY, Kind, Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    pub count: usize,
}

impl CategoryTotals {
    fn add(&mut self, tx: &Transaction) {
        match tx.kind {
            Kind::Income => self.income += tx.amount,
            Kind::Expense => self.expense += tx.amount,
        }
        self.count += 1;
    }
}

/// Income, expense and balance over every record given.
pub fn summary<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = CategoryTotals::default();
    for tx in records {
        totals.add(tx);
    }
    Summary {
        income: totals.income,
        expense: totals.expense,
        balance: totals.income - totals.expense,
        count: totals.count,
    }
}

/// Whether the stored date starts with `month`. Lexical only: no calendar
/// arithmetic and no timezone normalization.
pub fn in_month(tx: &Transaction, month: &str) -> bool {
    tx.occurred_at.get(..7) == Some(month)
}

pub fn filter_by_month<'a>(records: &'a [Transaction], month: &str) -> Vec<&'a Transaction> {
    records.iter().filter(|tx| in_month(tx, month)).collect()
}

pub fn monthly_summary(records: &[Transaction], month: &str) -> Summary {
    summary(filter_by_month(records, month))
}

/// Per-category income, expense and record count, optionally restricted to
/// one month first.
pub fn category_report(
    records: &[Transaction],
    month: Option<&str>,
) -> BTreeMap<String, CategoryTotals> {
    let mut report: BTreeMap<String, CategoryTotals> = BTreeMap::new();
    for tx in records
        .iter()
        .filter(|tx| month.is_none_or(|m| in_month(tx, m)))
    {
        let category = if tx.category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            tx.category.as_str()
        };
        report.entry(category.to_string()).or_default().add(tx);
    }
    report
}

/// Case-insensitive substring match on category or note.
pub fn search<'a>(records: &'a [Transaction], query: &str) -> Vec<&'a Transaction> {
    let q = query.to_lowercase();
    records
        .iter()
        .filter(|tx| {
            q.is_empty()
                || tx.category.to_lowercase().contains(&q)
                || tx.note.to_lowercase().contains(&q)
        })
        .collect()
}

pub fn filter_by_kind(records: &[Transaction], kind: Kind) -> Vec<&Transaction> {
    records.iter().filter(|tx| tx.kind == kind).collect()
}
