//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod budget_repo;
pub mod category_repo;
pub mod report_repo;
pub mod transaction_repo;
pub mod user_repo;

#[cfg(test)]
mod integration_tests;

pub use budget_repo::PostgresBudgetRepository;
pub use category_repo::PostgresCategoryRepository;
pub use report_repo::PostgresReportRepository;
pub use transaction_repo::PostgresTransactionRepository;
pub use user_repo::PostgresUserRepository;
