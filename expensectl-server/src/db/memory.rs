//! In-memory `ExpenseStore` for route tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use expensectl_core::{CategoryTotal, DateRange, Expense, NewExpense};

use super::error::{DbError, DbResult};
use super::expenses::ExpenseStore;

#[derive(Default)]
pub(crate) struct MemoryStore {
    rows: Mutex<Vec<Expense>>,
    unavailable: bool,
}

impl MemoryStore {
    pub(crate) fn with_rows(rows: Vec<Expense>) -> Self {
        Self {
            rows: Mutex::new(rows),
            unavailable: false,
        }
    }

    /// A store whose every call fails as if the pool were never initialized.
    pub(crate) fn unavailable() -> Self {
        Self {
            rows: Mutex::default(),
            unavailable: true,
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<Expense> {
        self.rows.lock().unwrap().clone()
    }

    fn check(&self) -> DbResult<()> {
        if self.unavailable {
            Err(DbError::Uninitialized)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn fetch_expenses_for_date(&self, expense_date: NaiveDate) -> DbResult<Vec<Expense>> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.expense_date == expense_date)
            .cloned()
            .collect())
    }

    async fn insert_expense(
        &self,
        expense_date: NaiveDate,
        amount: Decimal,
        category: &str,
        notes: &str,
    ) -> DbResult<()> {
        self.check()?;
        self.rows
            .lock()
            .unwrap()
            .push(NewExpense::new(amount, category, notes).on(expense_date));
        Ok(())
    }

    async fn delete_expenses_for_date(&self, expense_date: NaiveDate) -> DbResult<u64> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| e.expense_date != expense_date);
        Ok((before - rows.len()) as u64)
    }

    async fn fetch_expense_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<CategoryTotal>> {
        self.check()?;
        let range = DateRange { start, end };
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for expense in self.rows.lock().unwrap().iter() {
            if !range.contains(expense.expense_date) {
                continue;
            }
            match totals.iter_mut().find(|t| t.category == expense.category) {
                Some(t) => t.total += expense.amount,
                None => totals.push(CategoryTotal::new(expense.category.clone(), expense.amount)),
            }
        }
        totals.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(totals)
    }

    async fn replace_expenses_for_date(
        &self,
        expense_date: NaiveDate,
        expenses: Vec<NewExpense>,
    ) -> DbResult<()> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|e| e.expense_date != expense_date);
        rows.extend(expenses.into_iter().map(|e| e.on(expense_date)));
        Ok(())
    }
}
