//! SeaORM table models
//!
//! Persistence-layer records for the five tables. Enum-valued columns are
//! stored as strings and parsed into domain enums by the postgres adapters.

pub mod budgets;
pub mod categories;
pub mod reports;
pub mod transactions;
pub mod users;
