//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use chrono::NaiveDate;

use expensectl_core::ValidationError;

use super::error::ApiError;

/// Extract and validate an ISO `YYYY-MM-DD` date from path
pub struct ValidDate(pub NaiveDate);

impl<S> FromRequestParts<S> for ValidDate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "date" }))?;

        let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "date",
                reason: "expected YYYY-MM-DD",
            })
        })?;

        Ok(Self(date))
    }
}
