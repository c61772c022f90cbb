//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::domain::entities::{
    Budget, Category, CategoryTotal, NewBudget, NewCategory, NewReport, NewTransaction, NewUser,
    Report, ReportType, Transaction, TransactionFilter, TransactionType, User,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by primary key
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Find a user by Telegram id
    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
}

/// Repository for Category entities
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category
    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError>;

    /// List a user's active categories, optionally filtered by transaction
    /// type, ordered by name.
    async fn list_for_user(
        &self,
        user_id: i64,
        kind: Option<TransactionType>,
    ) -> Result<Vec<Category>, DomainError>;
}

/// Repository for Transaction entities
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Create a new transaction
    async fn create(&self, transaction: &NewTransaction) -> Result<Transaction, DomainError>;

    /// List transactions matching the filter, newest first, each paired with
    /// its category name.
    async fn list(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<(Transaction, Option<String>)>, DomainError>;

    /// Sum transactions per category over `[start, end)` for one type,
    /// largest total first.
    async fn sum_by_category(
        &self,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        kind: TransactionType,
    ) -> Result<Vec<CategoryTotal>, DomainError>;

    /// Total amount over `[start, end)` for one type
    async fn total(
        &self,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        kind: TransactionType,
    ) -> Result<Decimal, DomainError>;

    /// Total amount for one category over an inclusive date window.
    /// Budget windows carry an explicit last-second end timestamp.
    async fn category_total(
        &self,
        user_id: i64,
        category_id: i64,
        kind: TransactionType,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Decimal, DomainError>;
}

/// Repository for Budget entities
#[async_trait]
pub trait BudgetRepository: Send + Sync {
    /// Create a new budget
    async fn create(&self, budget: &NewBudget) -> Result<Budget, DomainError>;

    /// List a user's active budgets whose window has not ended, ordered by
    /// name, each paired with its category name.
    async fn list_active_for_user(
        &self,
        user_id: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<(Budget, String)>, DomainError>;
}

/// Repository for Report entities
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Create a new report
    async fn create(&self, report: &NewReport) -> Result<Report, DomainError>;

    /// List a user's reports, optionally filtered by type, newest first
    async fn list_for_user(
        &self,
        user_id: i64,
        kind: Option<ReportType>,
    ) -> Result<Vec<Report>, DomainError>;
}
