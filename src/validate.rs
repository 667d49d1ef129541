// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Field checks applied to every incoming record before it reaches a store.
//!
//! Each function takes a draft and the current instant and either returns a
//! normalized record carrying a fresh id, or [Error::InvalidPayload].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{
    Budget, BudgetDraft, DEFAULT_CATEGORY, DEFAULT_TAG_COLOR, Frequency, Goal, GoalDraft, Kind,
    RecurringDraft, RecurringTemplate, Tag, TagDraft, Transaction, TransactionDraft,
};
use crate::utils::{iso_timestamp, normalize_date};

/// A draft tagged with the kind of record it should become.
#[derive(Debug, Clone)]
pub enum Candidate {
    Transaction(TransactionDraft),
    Budget(BudgetDraft),
    Recurring(RecurringDraft),
    Goal(GoalDraft),
    Tag(TagDraft),
}

/// A record that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated {
    Transaction(Transaction),
    Budget(Budget),
    Recurring(RecurringTemplate),
    Goal(Goal),
    Tag(Tag),
}

pub fn validate(candidate: Candidate, now: DateTime<Utc>) -> Result<Validated> {
    Ok(match candidate {
        Candidate::Transaction(d) => Validated::Transaction(transaction(d, now)?),
        Candidate::Budget(d) => Validated::Budget(budget(d, now)?),
        Candidate::Recurring(d) => Validated::Recurring(recurring(d, now)?),
        Candidate::Goal(d) => Validated::Goal(goal(d, now)?),
        Candidate::Tag(d) => Validated::Tag(tag(d, now)?),
    })
}

pub fn transaction(draft: TransactionDraft, now: DateTime<Utc>) -> Result<Transaction> {
    let amount = positive_amount(draft.amount, "amount")?;
    let kind = required_kind(draft.kind.as_deref())?;
    Ok(Transaction {
        id: new_id(),
        amount,
        kind,
        category: category_or_default(draft.category),
        occurred_at: occurred_at(draft.occurred_at, now)?,
        note: draft.note.unwrap_or_default(),
        created_at: iso_timestamp(now),
    })
}

pub fn budget(draft: BudgetDraft, now: DateTime<Utc>) -> Result<Budget> {
    let amount = positive_amount(draft.amount, "budget amount")?;
    let month = match non_empty(draft.month) {
        Some(m) => checked_month(&m)?,
        None => now.format("%Y-%m").to_string(),
    };
    Ok(Budget {
        id: new_id(),
        category: category_or_default(draft.category),
        amount,
        month,
        created_at: iso_timestamp(now),
    })
}

pub fn recurring(draft: RecurringDraft, now: DateTime<Utc>) -> Result<RecurringTemplate> {
    let amount = positive_amount(draft.amount, "amount")?;
    let kind = required_kind(draft.kind.as_deref())?;
    let frequency = draft
        .frequency
        .as_deref()
        .ok_or_else(|| Error::InvalidPayload("frequency is required".into()))?
        .parse::<Frequency>()
        .map_err(Error::InvalidPayload)?;
    Ok(RecurringTemplate {
        id: new_id(),
        amount,
        kind,
        category: category_or_default(draft.category),
        frequency,
        note: draft.note.unwrap_or_default(),
        created_at: iso_timestamp(now),
    })
}

pub fn goal(draft: GoalDraft, now: DateTime<Utc>) -> Result<Goal> {
    let target_amount = positive_amount(draft.target_amount, "target amount")?;
    let current_amount = draft.current_amount.unwrap_or(Decimal::ZERO);
    if current_amount < Decimal::ZERO {
        return Err(Error::InvalidPayload(
            "current amount must not be negative".into(),
        ));
    }
    Ok(Goal {
        id: new_id(),
        name: draft.name.unwrap_or_default(),
        target_amount,
        current_amount,
        target_date: non_empty(draft.target_date),
        created_at: iso_timestamp(now),
    })
}

pub fn tag(draft: TagDraft, now: DateTime<Utc>) -> Result<Tag> {
    let name = non_empty(draft.name)
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| Error::InvalidPayload("tag name is required".into()))?;
    Ok(Tag {
        id: new_id(),
        name,
        color: non_empty(draft.color).unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string()),
        created_at: iso_timestamp(now),
    })
}

/// Dates are stored in the same millisecond UTC form imports produce.
fn occurred_at(raw: Option<String>, now: DateTime<Utc>) -> Result<String> {
    match non_empty(raw) {
        Some(raw) => normalize_date(raw.trim())
            .ok_or_else(|| Error::InvalidPayload(format!("invalid date '{raw}'"))),
        None => Ok(iso_timestamp(now)),
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn positive_amount(amount: Option<Decimal>, field: &str) -> Result<Decimal> {
    match amount {
        Some(a) if a > Decimal::ZERO => Ok(a),
        Some(a) => Err(Error::InvalidPayload(format!(
            "{field} must be greater than zero, got {a}"
        ))),
        None => Err(Error::InvalidPayload(format!("{field} must be a number"))),
    }
}

fn required_kind(kind: Option<&str>) -> Result<Kind> {
    kind.ok_or_else(|| Error::InvalidPayload("type is required".into()))?
        .parse()
        .map_err(Error::InvalidPayload)
}

pub(crate) fn checked_month(month: &str) -> Result<String> {
    let invalid = || Error::InvalidPayload(format!("invalid month '{month}', expected YYYY-MM"));
    // Month filters compare the first 7 characters, so zero padding matters.
    if month.len() != 7 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").map_err(|_| invalid())?;
    Ok(month.to_string())
}

pub(crate) fn category_or_default(category: Option<String>) -> String {
    non_empty(category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
