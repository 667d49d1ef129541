// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::validate;

/// Category used when a record arrives without one.
pub const DEFAULT_CATEGORY: &str = "Umum";

/// Display color used when a tag arrives without one.
pub const DEFAULT_TAG_COLOR: &str = "#007bff";

/// The five independent record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Transactions,
    Budgets,
    Recurring,
    Goals,
    Tags,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Transactions,
        Collection::Budgets,
        Collection::Recurring,
        Collection::Goals,
        Collection::Tags,
    ];

    /// Name of the array in the JSON document and of the table in the
    /// relational stores.
    pub fn table(self) -> &'static str {
        match self {
            Collection::Transactions => "entries",
            Collection::Budgets => "budgets",
            Collection::Recurring => "recurring",
            Collection::Goals => "goals",
            Collection::Tags => "tags",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(format!("type must be income or expense, got '{other}'")),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(format!(
                "frequency must be daily, weekly, monthly or yearly, got '{other}'"
            )),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: Kind,
    #[serde(default)]
    pub category: String,
    /// ISO-8601 date-time as stored; month matching is done on its prefix.
    #[serde(rename = "date", default)]
    pub occurred_at: String,
    #[serde(default)]
    pub note: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub month: String, // YYYY-MM
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

/// A pattern for a repeating entry. Never expanded into transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTemplate {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: Kind,
    #[serde(default)]
    pub category: String,
    pub frequency: Frequency,
    #[serde(default)]
    pub note: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub target_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub current_amount: Decimal,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl Goal {
    /// Percentage of the target reached so far; zero when the target is not
    /// positive.
    pub fn progress(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.current_amount / self.target_amount * Decimal::ONE_HUNDRED
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

/// Incoming transaction fields before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionDraft {
    #[serde(default, deserialize_with = "number_opt")]
    pub amount: Option<Decimal>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "date", default)]
    pub occurred_at: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetDraft {
    #[serde(default, deserialize_with = "number_opt")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecurringDraft {
    #[serde(default, deserialize_with = "number_opt")]
    pub amount: Option<Decimal>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "number_opt")]
    pub target_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "number_opt")]
    pub current_amount: Option<Decimal>,
    #[serde(default)]
    pub target_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Accepts JSON numbers only; a number inside a string is a type error.
fn number_opt<'de, D>(deserializer: D) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    number
        .map(|n| {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map_err(|_| D::Error::custom(format!("{text} is out of range")))
        })
        .transpose()
}

/// A record kind the store knows how to hold and the validator knows how to
/// build from a draft.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: Collection;
    type Draft: DeserializeOwned;

    fn id(&self) -> &str;
    fn created_at(&self) -> &str;

    /// Check a draft and build a normalized record with a fresh id.
    fn validate(draft: Self::Draft, now: DateTime<Utc>) -> Result<Self>;
}

impl Record for Transaction {
    const COLLECTION: Collection = Collection::Transactions;
    type Draft = TransactionDraft;

    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> &str {
        &self.created_at
    }
    fn validate(draft: Self::Draft, now: DateTime<Utc>) -> Result<Self> {
        validate::transaction(draft, now)
    }
}

impl Record for Budget {
    const COLLECTION: Collection = Collection::Budgets;
    type Draft = BudgetDraft;

    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> &str {
        &self.created_at
    }
    fn validate(draft: Self::Draft, now: DateTime<Utc>) -> Result<Self> {
        validate::budget(draft, now)
    }
}

impl Record for RecurringTemplate {
    const COLLECTION: Collection = Collection::Recurring;
    type Draft = RecurringDraft;

    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> &str {
        &self.created_at
    }
    fn validate(draft: Self::Draft, now: DateTime<Utc>) -> Result<Self> {
        validate::recurring(draft, now)
    }
}

impl Record for Goal {
    const COLLECTION: Collection = Collection::Goals;
    type Draft = GoalDraft;

    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> &str {
        &self.created_at
    }
    fn validate(draft: Self::Draft, now: DateTime<Utc>) -> Result<Self> {
        validate::goal(draft, now)
    }
}

impl Record for Tag {
    const COLLECTION: Collection = Collection::Tags;
    type Draft = TagDraft;

    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> &str {
        &self.created_at
    }
    fn validate(draft: Self::Draft, now: DateTime<Utc>) -> Result<Self> {
        validate::tag(draft, now)
    }
}
