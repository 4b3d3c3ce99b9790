//! Spend-by-category analytics

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use expensectl_core::{breakdown, Breakdown, DateRange};

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// POST /analytics/ - category totals and shares over an inclusive range
async fn category_breakdown(
    State(state): State<Arc<AppState>>,
    Json(range): Json<DateRange>,
) -> Result<Json<Breakdown>, ApiError> {
    range.validate()?;

    let rows = state
        .store
        .fetch_expense_summary(range.start, range.end)
        .await?;

    Ok(Json(breakdown(&rows)))
}

/// Analytics routes. The dashboard posts to the trailing-slash form.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analytics/", post(category_breakdown))
        .route("/analytics", post(category_breakdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::Value;
    use tower::ServiceExt;

    use expensectl_core::NewExpense;

    use crate::db::memory::MemoryStore;
    use crate::http::server::{build_router, ServerConfig};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn seeded() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_rows(vec![
            NewExpense::new(Decimal::new(60, 0), "Food", "").on(date("2024-08-01")),
            NewExpense::new(Decimal::new(30, 0), "Rent", "").on(date("2024-08-03")),
            NewExpense::new(Decimal::new(10, 0), "Rent", "").on(date("2024-08-05")),
            NewExpense::new(Decimal::new(500, 0), "Travel", "").on(date("2024-09-01")),
        ]))
    }

    #[tokio::test]
    async fn breakdown_over_range() {
        let app = build_router(AppState::new(seeded()), &ServerConfig::default());

        let response = app
            .oneshot(request(
                "/analytics/",
                r#"{"startdate": "2024-08-01", "enddate": "2024-08-31"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body.as_object().unwrap().len(), 2);
        assert_eq!(body["Food"]["total"].as_f64(), Some(60.0));
        assert_eq!(body["Food"]["percentage"].as_f64(), Some(60.0));
        assert_eq!(body["Rent"]["total"].as_f64(), Some(40.0));
        assert_eq!(body["Rent"]["percentage"].as_f64(), Some(40.0));
    }

    #[tokio::test]
    async fn disjoint_range_is_empty_object() {
        let app = build_router(AppState::new(seeded()), &ServerConfig::default());

        let response = app
            .oneshot(request(
                "/analytics",
                r#"{"startdate": "2099-08-15", "enddate": "2099-12-30"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"{}");
    }

    #[tokio::test]
    async fn inverted_range_is_400() {
        let app = build_router(AppState::new(seeded()), &ServerConfig::default());

        let response = app
            .oneshot(request(
                "/analytics/",
                r#"{"startdate": "2024-09-01", "enddate": "2024-08-01"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
