//! `expensectl show DATE`

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::Decimal;

use expensectl_core::NewExpense;

use super::api::{ApiArgs, ApiClient};

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Date to show (YYYY-MM-DD)
    pub date: NaiveDate,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub api: ApiArgs,
}

pub async fn run_show(args: ShowArgs) -> Result<()> {
    let client = ApiClient::new(&args.api)?;
    let expenses: Vec<NewExpense> = client.get(&format!("/expenses/{}", args.date)).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&expenses)?);
    } else {
        print!("{}", render(args.date, &expenses));
    }
    Ok(())
}

fn render(date: NaiveDate, expenses: &[NewExpense]) -> String {
    let width = expenses
        .iter()
        .map(|e| e.category.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());

    let mut out = format!("Expenses for {}\n\n", date);
    out.push_str(&format!("{:<width$}  {:>10}  Notes\n", "Category", "Amount"));
    for e in expenses {
        out.push_str(&format!(
            "{:<width$}  {:>10}  {}\n",
            e.category,
            e.amount.round_dp(2),
            e.notes
        ));
    }
    let total: Decimal = expenses.iter().map(|e| e.amount).sum();
    out.push_str(&format!("\n{:<width$}  {:>10}\n", "Total", total.round_dp(2)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_rows_and_total() {
        let expenses = vec![
            NewExpense::new(Decimal::new(1250, 2), "Food", "Lunch"),
            NewExpense::new(Decimal::new(30, 0), "Transport", ""),
        ];
        let text = render("2024-08-01".parse().unwrap(), &expenses);

        assert!(text.starts_with("Expenses for 2024-08-01"));
        assert!(text.contains("Food"));
        assert!(text.contains("12.50"));
        assert!(text.contains("Lunch"));
        assert!(text.contains("42.50"));
    }
}
