//! Expense domain models
//!
//! Rows of the `expenses` table and the request shapes built around them.
//! Amounts are `Decimal` end to end and cross JSON as numbers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Maximum category label length
pub const MAX_CATEGORY_LEN: usize = 64;

/// Maximum notes length
pub const MAX_NOTES_LEN: usize = 1024;

/// A stored expense record.
///
/// There is no primary key: any number of records may share a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub expense_date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub notes: String,
}

impl Expense {
    /// Drop the date, keeping the fields a client submits.
    pub fn into_new(self) -> NewExpense {
        NewExpense {
            amount: self.amount,
            category: self.category,
            notes: self.notes,
        }
    }
}

/// An expense as submitted for a date (the date comes from the path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: String,
    #[serde(default)]
    pub notes: String,
}

impl NewExpense {
    pub fn new(amount: Decimal, category: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            notes: notes.into(),
        }
    }

    /// Check field constraints before anything touches the database.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount < Decimal::ZERO {
            return Err(ValidationError::Negative { field: "amount" });
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::Empty { field: "category" });
        }
        if self.category.chars().count() > MAX_CATEGORY_LEN {
            return Err(ValidationError::TooLong {
                field: "category",
                max: MAX_CATEGORY_LEN,
            });
        }
        if self.notes.chars().count() > MAX_NOTES_LEN {
            return Err(ValidationError::TooLong {
                field: "notes",
                max: MAX_NOTES_LEN,
            });
        }
        Ok(())
    }

    /// Attach a date, producing the stored shape.
    pub fn on(self, expense_date: NaiveDate) -> Expense {
        Expense {
            expense_date,
            amount: self.amount,
            category: self.category,
            notes: self.notes,
        }
    }
}

/// Summed amount for one category over a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>, total: Decimal) -> Self {
        Self {
            category: category.into(),
            total,
        }
    }
}

/// Inclusive date range for summaries.
///
/// Field names match the dashboard's request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "startdate")]
    pub start: NaiveDate,
    #[serde(rename = "enddate")]
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start > self.end {
            return Err(ValidationError::InvertedRange {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn new_expense_accepts_float_amounts() {
        let parsed: NewExpense =
            serde_json::from_str(r#"{"amount": 10.5, "category": "Shopping", "notes": "Bought potatoes"}"#)
                .unwrap();
        assert_eq!(parsed.amount, Decimal::new(105, 1));
        assert_eq!(parsed.category, "Shopping");
    }

    #[test]
    fn notes_default_to_empty() {
        let parsed: NewExpense =
            serde_json::from_str(r#"{"amount": 3, "category": "Food"}"#).unwrap();
        assert_eq!(parsed.notes, "");
    }

    #[test]
    fn validate_rejects_blank_category() {
        let expense = NewExpense::new(Decimal::ONE, "   ", "");
        assert_eq!(
            expense.validate(),
            Err(ValidationError::Empty { field: "category" })
        );
    }

    #[test]
    fn validate_rejects_negative_amount() {
        let expense = NewExpense::new(Decimal::new(-1, 0), "Food", "");
        assert_eq!(
            expense.validate(),
            Err(ValidationError::Negative { field: "amount" })
        );
    }

    #[test]
    fn validate_rejects_long_notes() {
        let expense = NewExpense::new(Decimal::ONE, "Food", "x".repeat(MAX_NOTES_LEN + 1));
        assert!(matches!(
            expense.validate(),
            Err(ValidationError::TooLong { field: "notes", .. })
        ));
    }

    #[test]
    fn zero_amount_is_valid() {
        assert!(NewExpense::new(Decimal::ZERO, "Food", "free sample")
            .validate()
            .is_ok());
    }

    #[test]
    fn date_range_uses_dashboard_field_names() {
        let range: DateRange =
            serde_json::from_str(r#"{"startdate": "2024-08-01", "enddate": "2024-08-05"}"#)
                .unwrap();
        assert_eq!(range.start, date("2024-08-01"));
        assert!(range.contains(date("2024-08-05")));
        assert!(!range.contains(date("2024-08-06")));
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        assert!(DateRange::new(date("2024-08-05"), date("2024-08-01")).is_err());
        assert!(DateRange::new(date("2024-08-01"), date("2024-08-01")).is_ok());
    }

    #[test]
    fn on_and_into_new_are_inverse() {
        let new = NewExpense::new(Decimal::new(100, 0), "Food", "Lunch");
        let stored = new.clone().on(date("2025-02-22"));
        assert_eq!(stored.expense_date, date("2025-02-22"));
        assert_eq!(stored.into_new(), new);
    }
}
