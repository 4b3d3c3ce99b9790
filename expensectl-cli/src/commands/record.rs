//! `expensectl record DATE --item AMOUNT:CATEGORY[:NOTES]...`

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::Decimal;
use serde::Deserialize;

use expensectl_core::NewExpense;

use super::api::{ApiArgs, ApiClient};

#[derive(Parser, Debug)]
pub struct RecordArgs {
    /// Date to record (YYYY-MM-DD); existing expenses on it are replaced
    pub date: NaiveDate,

    /// Expense as AMOUNT:CATEGORY[:NOTES] (repeatable)
    #[arg(long = "item", short = 'i', required = true, value_parser = parse_item)]
    pub items: Vec<NewExpense>,

    #[command(flatten)]
    pub api: ApiArgs,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

pub async fn run_record(args: RecordArgs) -> Result<()> {
    let client = ApiClient::new(&args.api)?;
    let count = args.items.len();

    let response: MessageResponse = client
        .post(&format!("/expenses/{}", args.date), &args.items)
        .await?;

    tracing::info!(expense_date = %args.date, count, "Recorded expenses");
    println!("{}", response.message);
    Ok(())
}

/// Parse `AMOUNT:CATEGORY[:NOTES]`. Notes may themselves contain colons.
fn parse_item(raw: &str) -> Result<NewExpense, String> {
    let mut parts = raw.splitn(3, ':');
    let amount = parts.next().unwrap_or_default().trim();
    let category = parts
        .next()
        .ok_or_else(|| format!("expected AMOUNT:CATEGORY[:NOTES], got '{}'", raw))?;
    let notes = parts.next().unwrap_or_default();

    let amount: Decimal = amount
        .parse()
        .map_err(|_| format!("'{}' is not an amount", amount))?;

    let expense = NewExpense::new(amount, category.trim(), notes.trim());
    expense.validate().map_err(|e| e.to_string())?;
    Ok(expense)
}
