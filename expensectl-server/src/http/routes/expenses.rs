//! Expense endpoints keyed by date

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use expensectl_core::{NewExpense, ValidationError};

use crate::http::error::ApiError;
use crate::http::extractors::ValidDate;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /expenses/{date} - every expense recorded on a date
async fn list_expenses(
    State(state): State<Arc<AppState>>,
    ValidDate(date): ValidDate,
) -> Result<Json<Vec<NewExpense>>, ApiError> {
    let expenses = state.store.fetch_expenses_for_date(date).await?;

    if expenses.is_empty() {
        return Err(ApiError::NotFound {
            resource: "expenses",
            id: date.to_string(),
        });
    }

    Ok(Json(expenses.into_iter().map(|e| e.into_new()).collect()))
}

/// POST /expenses/{date} - replace a date's expenses with the submitted list
async fn replace_expenses(
    State(state): State<Arc<AppState>>,
    ValidDate(date): ValidDate,
    Json(expenses): Json<Vec<NewExpense>>,
) -> Result<Json<MessageResponse>, ApiError> {
    if expenses.is_empty() {
        return Err(ValidationError::Empty { field: "expenses" }.into());
    }
    for expense in &expenses {
        expense.validate()?;
    }

    state.store.replace_expenses_for_date(date, expenses).await?;

    Ok(Json(MessageResponse {
        message: "Expenses added/updated successfully",
    }))
}

/// Expense routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/expenses/{date}", get(list_expenses).post(replace_expenses))
}
