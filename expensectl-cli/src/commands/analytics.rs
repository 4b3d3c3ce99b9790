//! `expensectl analytics` - spend by category as a table and bar chart

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use expensectl_core::analytics::{grand_total_of, ranked};
use expensectl_core::{Breakdown, DateRange};

use super::api::{ApiArgs, ApiClient};

/// Width of a 100% bar
const BAR_WIDTH: usize = 40;

#[derive(Parser, Debug)]
pub struct AnalyticsArgs {
    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub api: ApiArgs,
}

pub async fn run_analytics(args: AnalyticsArgs) -> Result<()> {
    let range = DateRange::new(args.start, args.end)?;
    let client = ApiClient::new(&args.api)?;

    let breakdown: Breakdown = client.post("/analytics/", &range).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print!("{}", render(&range, &breakdown));
    }
    Ok(())
}

fn bar(percentage: Decimal) -> String {
    let filled = (percentage / Decimal::ONE_HUNDRED * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    "█".repeat(filled)
}

fn render(range: &DateRange, breakdown: &Breakdown) -> String {
    let mut out = format!("Expense breakdown {} to {}\n\n", range.start, range.end);

    if breakdown.is_empty() {
        out.push_str("No expenses in this range.\n");
        return out;
    }

    let rows = ranked(breakdown);
    let width = rows
        .iter()
        .map(|(category, _)| category.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());

    out.push_str(&format!("{:<width$}  {:>12}  {:>7}\n", "Category", "Total", "Share"));
    for (category, share) in &rows {
        out.push_str(&format!(
            "{:<width$}  {:>12}  {:>6}%\n",
            category,
            share.total.round_dp(2),
            share.percentage.round_dp(2)
        ));
    }
    out.push_str(&format!(
        "{:<width$}  {:>12}\n\n",
        "Total",
        grand_total_of(breakdown).round_dp(2)
    ));

    for (category, share) in &rows {
        out.push_str(&format!("{:<width$}  {}\n", category, bar(share.percentage)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use expensectl_core::CategoryShare;

    fn share(total: i64, percentage: i64) -> CategoryShare {
        CategoryShare {
            total: Decimal::from(total),
            percentage: Decimal::from(percentage),
        }
    }

    fn range() -> DateRange {
        DateRange::new(
            "2024-08-01".parse().unwrap(),
            "2024-08-31".parse().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(Decimal::ONE_HUNDRED).chars().count(), BAR_WIDTH);
        assert_eq!(bar(Decimal::from(50)).chars().count(), BAR_WIDTH / 2);
        assert!(bar(Decimal::ZERO).is_empty());
    }

    #[test]
    fn largest_share_is_listed_first() {
        let mut breakdown = Breakdown::new();
        breakdown.insert("Food".into(), share(25, 25));
        breakdown.insert("Rent".into(), share(75, 75));

        let text = render(&range(), &breakdown);
        let rent = text.find("Rent").unwrap();
        let food = text.find("Food").unwrap();
        assert!(rent < food);
        assert!(text.contains("100"));
    }

    #[test]
    fn empty_breakdown_says_so() {
        let text = render(&range(), &Breakdown::new());
        assert!(text.contains("No expenses"));
    }
}
