//! Spend-by-category breakdown
//!
//! Turns summary rows into per-category totals with their share of the grand
//! total. Shares are kept at full `Decimal` precision, so they add up to 100
//! up to the last digit of a non-terminating split (100 / 3 sums to
//! 99.99...). A zero grand total makes every share zero.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::CategoryTotal;

/// One category's slice of the total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub total: Decimal,
    pub percentage: Decimal,
}

/// Category name to share, keyed for stable JSON output
pub type Breakdown = BTreeMap<String, CategoryShare>;

/// Sum of all category totals
pub fn grand_total(rows: &[CategoryTotal]) -> Decimal {
    rows.iter().map(|row| row.total).sum()
}

/// Sum of the totals in an already computed breakdown
pub fn grand_total_of(breakdown: &Breakdown) -> Decimal {
    breakdown.values().map(|share| share.total).sum()
}

/// Compute each category's share of the grand total.
pub fn breakdown(rows: &[CategoryTotal]) -> Breakdown {
    let total = grand_total(rows);

    rows.iter()
        .map(|row| {
            let percentage = if total.is_zero() {
                Decimal::ZERO
            } else {
                row.total / total * Decimal::ONE_HUNDRED
            };
            (
                row.category.clone(),
                CategoryShare {
                    total: row.total,
                    percentage,
                },
            )
        })
        .collect()
}

/// Flatten a breakdown for display, largest share first.
///
/// Ties fall back to category name so the order is deterministic.
pub fn ranked(breakdown: &Breakdown) -> Vec<(&str, CategoryShare)> {
    let mut rows: Vec<_> = breakdown
        .iter()
        .map(|(category, share)| (category.as_str(), *share))
        .collect();
    rows.sort_by(|a, b| match b.1.percentage.cmp(&a.1.percentage) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });
    rows
}
