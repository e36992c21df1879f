//! The module contains the `Entry` type, one income or expense record.
//!
//! Entries are built from an [`EntryDraft`], which is where user input is
//! validated before anything reaches the store.
use core::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, EngineError, MoneyCents, ResultEngine};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single movement. Immutable apart from a full replace-by-id update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub amount: MoneyCents,
    pub category: Category,
    #[serde(default)]
    pub is_income: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// ISO date as stored (`YYYY-MM-DD`). Kept verbatim so rehydrated data
    /// round-trips even when it does not parse.
    pub date: String,
}

impl Entry {
    /// Calendar date of the entry, or `None` when the stored value is malformed.
    ///
    /// Full RFC 3339 timestamps are accepted and truncated to their date.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        parse_entry_date(&self.date)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income { "+" } else { "-" };
        write!(
            f,
            "{} {sign}{} {} {}",
            self.date, self.amount, self.category, self.name
        )
    }
}

pub(crate) fn parse_entry_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|ts| ts.date_naive())
        })
}

/// Fresh opaque id for a new entry.
#[must_use]
pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

/// User input for creating or replacing an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryDraft {
    pub name: String,
    pub amount: MoneyCents,
    pub category: Category,
    pub is_income: bool,
    pub details: Option<String>,
    pub date: NaiveDate,
}

impl EntryDraft {
    pub fn new(name: &str, amount: MoneyCents, category: Category, date: NaiveDate) -> Self {
        Self {
            name: name.to_string(),
            amount,
            category,
            is_income: false,
            details: None,
            date,
        }
    }

    pub fn income(mut self, is_income: bool) -> Self {
        self.is_income = is_income;
        self
    }

    pub fn details(mut self, details: Option<&str>) -> Self {
        self.details = details.map(ToString::to_string);
        self
    }

    /// Validates the draft and turns it into an [`Entry`] carrying `id`.
    ///
    /// - the name must not be empty once trimmed
    /// - the amount must not be negative
    /// - the `Income` category always yields an income entry
    pub fn into_entry(self, id: impl Into<String>) -> ResultEngine<Entry> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidEntry(
                "name must not be empty".to_string(),
            ));
        }
        if self.amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must not be negative".to_string(),
            ));
        }

        Ok(Entry {
            id: id.into(),
            name: name.to_string(),
            amount: self.amount,
            category: self.category,
            is_income: self.is_income || self.category == Category::Income,
            details: self
                .details
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
            date: self.date.format(DATE_FORMAT).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn draft_trims_and_formats() {
        let entry = EntryDraft::new("  Rent ", MoneyCents::from_units(900), Category::Fixed, date(2024, 3, 1))
            .details(Some("   "))
            .into_entry("a")
            .unwrap();
        assert_eq!(entry.name, "Rent");
        assert_eq!(entry.date, "2024-03-01");
        assert_eq!(entry.details, None);
        assert!(!entry.is_income);
    }

    #[test]
    fn draft_rejects_empty_name_and_negative_amount() {
        let empty = EntryDraft::new(" ", MoneyCents::new(1), Category::Fixed, date(2024, 3, 1));
        assert!(matches!(empty.into_entry("a"), Err(EngineError::InvalidEntry(_))));

        let negative = EntryDraft::new("x", MoneyCents::new(-1), Category::Fixed, date(2024, 3, 1));
        assert!(matches!(negative.into_entry("a"), Err(EngineError::InvalidAmount(_))));
    }

    #[test]
    fn income_category_forces_income_flag() {
        let entry = EntryDraft::new("Salary", MoneyCents::from_units(1), Category::Income, date(2024, 3, 1))
            .into_entry("a")
            .unwrap();
        assert!(entry.is_income);
    }

    #[test]
    fn deserializes_legacy_records() {
        let raw = r#"{"id":"1706745600000","name":"ארנונה","amount":420.5,"category":"קבועים","date":"2024-02-01"}"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.amount, MoneyCents::new(42_050));
        assert_eq!(entry.category, Category::Fixed);
        assert!(!entry.is_income);
        assert_eq!(entry.date(), Some(date(2024, 2, 1)));
    }

    #[test]
    fn malformed_date_is_none() {
        assert_eq!(parse_entry_date("yesterday"), None);
        assert_eq!(parse_entry_date("2024-02-30"), None);
        assert_eq!(
            parse_entry_date("2024-02-10T12:00:00.000Z"),
            Some(date(2024, 2, 10))
        );
    }
}
