//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;
pub mod telegram;

pub use postgres::{
    PostgresBudgetRepository, PostgresCategoryRepository, PostgresReportRepository,
    PostgresTransactionRepository, PostgresUserRepository,
};
pub use telegram::TelegramClientImpl;
