//! Route handlers organized by resource

pub mod analytics;
pub mod expenses;
pub mod health;
