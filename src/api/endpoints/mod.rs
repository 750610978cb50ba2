//! HTTP endpoint handlers.

pub mod health;
pub mod records;
pub mod scan;
