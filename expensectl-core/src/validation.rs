//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Amount is below zero
    Negative { field: &'static str },

    /// String doesn't parse into the expected shape
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Range start falls after its end
    InvertedRange { start: String, end: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::Negative { field } => write!(f, "{} cannot be negative", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvertedRange { start, end } => {
                write!(f, "start date {} is after end date {}", start, end)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "category",
            max: 64,
        };
        assert_eq!(
            err.to_string(),
            "category exceeds maximum length of 64 characters"
        );
    }

    #[test]
    fn inverted_range_display() {
        let err = ValidationError::InvertedRange {
            start: "2024-08-05".into(),
            end: "2024-08-01".into(),
        };
        assert_eq!(
            err.to_string(),
            "start date 2024-08-05 is after end date 2024-08-01"
        );
    }
}
