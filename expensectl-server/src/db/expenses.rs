//! Expense operations
//!
//! Each operation opens exactly one scoped transaction and issues
//! parameterized queries only; values never reach the SQL text.
//! `replace_expenses_for_date` is the one multi-statement operation: delete
//! and re-insert share a transaction, so readers never see the date empty.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use expensectl_core::{CategoryTotal, Expense, NewExpense};

use super::database::Database;
use super::error::{DbError, DbResult};

const SELECT_FOR_DATE: &str = r#"
    SELECT expense_date, amount, category, notes
    FROM expenses
    WHERE expense_date = $1
"#;

const INSERT_EXPENSE: &str = r#"
    INSERT INTO expenses (expense_date, amount, category, notes)
    VALUES ($1, $2, $3, $4)
"#;

const DELETE_FOR_DATE: &str = "DELETE FROM expenses WHERE expense_date = $1";

const SUMMARY_BETWEEN: &str = r#"
    SELECT category, SUM(amount) AS total
    FROM expenses
    WHERE expense_date BETWEEN $1 AND $2
    GROUP BY category
    ORDER BY category
"#;

/// Data access the route layer depends on.
#[async_trait]
pub trait ExpenseStore: Send + Sync + 'static {
    /// All expenses recorded on `expense_date` (possibly none).
    async fn fetch_expenses_for_date(&self, expense_date: NaiveDate) -> DbResult<Vec<Expense>>;

    async fn insert_expense(
        &self,
        expense_date: NaiveDate,
        amount: Decimal,
        category: &str,
        notes: &str,
    ) -> DbResult<()>;

    /// Remove every expense on `expense_date`, returning how many went.
    async fn delete_expenses_for_date(&self, expense_date: NaiveDate) -> DbResult<u64>;

    /// Per-category totals for the inclusive range `[start, end]`.
    async fn fetch_expense_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<CategoryTotal>>;

    /// Swap a date's expenses for `expenses` in a single transaction.
    async fn replace_expenses_for_date(
        &self,
        expense_date: NaiveDate,
        expenses: Vec<NewExpense>,
    ) -> DbResult<()>;
}

#[derive(Debug, FromRow)]
struct ExpenseRow {
    expense_date: NaiveDate,
    amount: Decimal,
    category: String,
    notes: Option<String>,
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Self {
            expense_date: row.expense_date,
            amount: row.amount,
            category: row.category,
            notes: row.notes.unwrap_or_default(),
        }
    }
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    category: String,
    total: Decimal,
}

#[async_trait]
impl ExpenseStore for Database<PgPool> {
    async fn fetch_expenses_for_date(&self, expense_date: NaiveDate) -> DbResult<Vec<Expense>> {
        info!(%expense_date, "Fetching expenses");

        let result = self
            .run_scoped(false, move |tx| {
                Box::pin(async move {
                    let rows: Vec<ExpenseRow> = sqlx::query_as(SELECT_FOR_DATE)
                        .bind(expense_date)
                        .fetch_all(&mut **tx)
                        .await?;
                    Ok::<_, DbError>(rows.into_iter().map(Expense::from).collect::<Vec<_>>())
                })
            })
            .await;

        match &result {
            Ok(expenses) => info!(count = expenses.len(), "Fetched expenses"),
            Err(e) => error!(%expense_date, error = %e, "Error fetching expenses"),
        }
        result
    }

    async fn insert_expense(
        &self,
        expense_date: NaiveDate,
        amount: Decimal,
        category: &str,
        notes: &str,
    ) -> DbResult<()> {
        info!(%expense_date, %amount, category, "Inserting expense");

        let category_owned = category.to_owned();
        let notes_owned = notes.to_owned();
        let result = self
            .run_scoped(true, move |tx| {
                Box::pin(async move {
                    sqlx::query(INSERT_EXPENSE)
                        .bind(expense_date)
                        .bind(amount)
                        .bind(category_owned)
                        .bind(notes_owned)
                        .execute(&mut **tx)
                        .await?;
                    Ok::<_, DbError>(())
                })
            })
            .await;

        match &result {
            Ok(()) => info!(%expense_date, "Expense inserted"),
            Err(e) => error!(%expense_date, error = %e, "Error inserting expense"),
        }
        result
    }

    async fn delete_expenses_for_date(&self, expense_date: NaiveDate) -> DbResult<u64> {
        info!(%expense_date, "Deleting expenses");

        let result = self
            .run_scoped(true, move |tx| {
                Box::pin(async move {
                    let done = sqlx::query(DELETE_FOR_DATE)
                        .bind(expense_date)
                        .execute(&mut **tx)
                        .await?;
                    Ok::<_, DbError>(done.rows_affected())
                })
            })
            .await;

        match &result {
            Ok(rows) => info!(%expense_date, rows, "Expenses deleted"),
            Err(e) => error!(%expense_date, error = %e, "Error deleting expenses"),
        }
        result
    }

    async fn fetch_expense_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<CategoryTotal>> {
        info!(%start, %end, "Fetching expense summary");

        let result = self
            .run_scoped(false, move |tx| {
                Box::pin(async move {
                    let rows: Vec<SummaryRow> = sqlx::query_as(SUMMARY_BETWEEN)
                        .bind(start)
                        .bind(end)
                        .fetch_all(&mut **tx)
                        .await?;
                    Ok::<_, DbError>(rows
                        .into_iter()
                        .map(|r| CategoryTotal::new(r.category, r.total))
                        .collect::<Vec<_>>())
                })
            })
            .await;

        match &result {
            Ok(rows) => info!(categories = rows.len(), "Fetched expense summary"),
            Err(e) => error!(%start, %end, error = %e, "Error fetching expense summary"),
        }
        result
    }

    async fn replace_expenses_for_date(
        &self,
        expense_date: NaiveDate,
        expenses: Vec<NewExpense>,
    ) -> DbResult<()> {
        info!(%expense_date, count = expenses.len(), "Replacing expenses");

        let result = self
            .run_scoped(true, move |tx| {
                Box::pin(async move {
                    let removed = sqlx::query(DELETE_FOR_DATE)
                        .bind(expense_date)
                        .execute(&mut **tx)
                        .await?
                        .rows_affected();

                    for expense in expenses {
                        sqlx::query(INSERT_EXPENSE)
                            .bind(expense_date)
                            .bind(expense.amount)
                            .bind(expense.category)
                            .bind(expense.notes)
                            .execute(&mut **tx)
                            .await?;
                    }
                    Ok::<_, DbError>(removed)
                })
            })
            .await;

        match result {
            Ok(removed) => {
                info!(%expense_date, removed, "Expenses replaced");
                Ok(())
            }
            Err(e) => {
                error!(%expense_date, error = %e, "Error replacing expenses");
                Err(e)
            }
        }
    }
}
