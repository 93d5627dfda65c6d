// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::legacy_kind;
use crate::errors::{LedgerError, LedgerResult};
use anyhow::{Context, anyhow};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Expense,
    Income,
    /// Imported record whose `type` is missing or not recognised.
    /// Counts as neither income nor expense.
    #[serde(other)]
    Unknown,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Expense => "expense",
            TxType::Income => "income",
            TxType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(TxType::Expense),
            "income" => Ok(TxType::Income),
            other => Err(anyhow!("Invalid type '{}', expected expense|income", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
}

impl CategoryKind {
    /// Whether entries of type `t` belong under categories of this kind.
    pub fn accepts(&self, t: TxType) -> bool {
        matches!(
            (self, t),
            (CategoryKind::Expense, TxType::Expense) | (CategoryKind::Income, TxType::Income)
        )
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Expense => f.write_str("expense"),
            CategoryKind::Income => f.write_str("income"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredCategory")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub kind: CategoryKind,
}

/// On-disk shape of a category; older catalogs carry no `kind`.
#[derive(Deserialize)]
struct StoredCategory {
    #[serde(deserialize_with = "lenient::string")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    kind: Option<CategoryKind>,
}

impl From<StoredCategory> for Category {
    fn from(raw: StoredCategory) -> Self {
        let kind = raw.kind.unwrap_or_else(|| {
            let derived = legacy_kind(&raw.name);
            tracing::warn!(id = %raw.id, name = %raw.name, kind = %derived, "category has no kind, derived from its name");
            derived
        });
        Category {
            id: raw.id,
            name: raw.name,
            color: raw.color,
            icon: raw.icon,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default = "new_id", deserialize_with = "lenient::string")]
    pub id: String,
    /// Zero when an imported record has no usable amount.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::amount"
    )]
    pub amount: Decimal,
    #[serde(default = "unknown_type", deserialize_with = "lenient::tx_type")]
    pub r#type: TxType,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category_id: String,
    /// `None` when the stored value is not a calendar date.
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::note")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

fn unknown_type() -> TxType {
    TxType::Unknown
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Values submitted through the entry form (`tx add` / `tx edit`).
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub amount: Option<Decimal>,
    pub r#type: TxType,
    pub category_id: String,
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl TransactionDraft {
    pub fn validated_amount(&self) -> LedgerResult<Decimal> {
        match self.amount {
            Some(a) if a > Decimal::ZERO => Ok(a),
            _ => Err(LedgerError::InvalidAmount),
        }
    }

    pub fn into_transaction(
        self,
        id: String,
        created_at: Option<DateTime<Utc>>,
    ) -> LedgerResult<Transaction> {
        let amount = self.validated_amount()?;
        Ok(Transaction {
            id,
            amount,
            r#type: self.r#type,
            category_id: self.category_id,
            date: Some(self.date),
            note: self
                .note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            created_at,
        })
    }
}

/// A calendar month, used both for the displayed month and trend buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(MonthRef { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        MonthRef {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The month `n` calendar months earlier, crossing year boundaries.
    pub fn months_before(&self, n: u32) -> Self {
        let idx = self.year * 12 + self.month as i32 - 1 - n as i32;
        MonthRef {
            year: idx.div_euclid(12),
            month: idx.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn short_label(&self) -> &'static str {
        MONTH_ABBR[self.month.saturating_sub(1) as usize % 12]
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let d = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
        Ok(MonthRef::of(d))
    }
}

/// Deserializers that accept whatever an older or hand-edited backup holds.
mod lenient {
    use super::TxType;
    use chrono::{DateTime, NaiveDate, Utc};
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(d: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    pub fn amount<'de, D>(d: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match Value::deserialize(d)? {
            Value::Number(n) => parse_decimal(&n.to_string()),
            Value::String(s) => parse_decimal(s.trim()),
            _ => None,
        };
        Ok(parsed.unwrap_or(Decimal::ZERO))
    }

    pub fn tx_type<'de, D>(d: D) -> Result<TxType, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s.parse().unwrap_or(TxType::Unknown),
            _ => TxType::Unknown,
        })
    }

    pub fn note<'de, D>(d: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(d)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    pub fn date<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => parse_date_prefix(&s),
            _ => None,
        })
    }

    pub fn timestamp<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            _ => None,
        })
    }

    fn parse_decimal(s: &str) -> Option<Decimal> {
        s.parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(s))
            .ok()
    }

    // Accepts `2025-01-31` as well as full ISO timestamps.
    fn parse_date_prefix(s: &str) -> Option<NaiveDate> {
        let head = s.get(..10).unwrap_or(s);
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_before_wraps_year() {
        let m = MonthRef::new(2025, 2).unwrap();
        assert_eq!(m.months_before(1), MonthRef::new(2025, 1).unwrap());
        assert_eq!(m.months_before(2), MonthRef::new(2024, 12).unwrap());
        assert_eq!(m.months_before(14), MonthRef::new(2023, 12).unwrap());
        assert_eq!(m.months_before(2).short_label(), "Dec");
    }

    #[test]
    fn transaction_decodes_loose_fields() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id": 1712345678901, "amount": 42, "type": "expense", "categoryId": 3, "date": "not a date", "note": ""}"#,
        )
        .unwrap();
        assert_eq!(tx.id, "1712345678901");
        assert_eq!(tx.category_id, "3");
        assert_eq!(tx.amount, Decimal::from(42));
        assert!(tx.date.is_none());
        assert!(tx.note.is_none());
        assert!(tx.created_at.is_none());
    }

    #[test]
    fn transaction_tolerates_missing_amount_and_odd_type() {
        let tx: Transaction =
            serde_json::from_str(r#"{"id": "a", "type": "transfer", "categoryId": "food"}"#).unwrap();
        assert_eq!(tx.amount, Decimal::ZERO);
        assert_eq!(tx.r#type, TxType::Unknown);

        let tx: Transaction = serde_json::from_str(r#"{"amount": " 12.50 ", "type": null}"#).unwrap();
        assert_eq!(tx.amount, Decimal::new(1250, 2));
        assert_eq!(tx.r#type, TxType::Unknown);
        assert!(!tx.id.is_empty());

        let tx: Transaction = serde_json::from_str(r#"{"amount": "lots", "type": "INCOME"}"#).unwrap();
        assert_eq!(tx.amount, Decimal::ZERO);
        assert_eq!(tx.r#type, TxType::Income);
    }
}
