//! Transaction service
//!
//! Records income and expense operations, resolving the user and category
//! on the fly so a first-time user can post a transaction immediately.

use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::app::periods;
use crate::domain::entities::{
    Category, MonthlyStatistics, NewCategory, NewTransaction, NewUser, Transaction,
    TransactionFilter, TransactionType, User,
};
use crate::domain::ports::{CategoryRepository, TransactionRepository, UserRepository};
use crate::error::AppError;

/// Service for recording and querying transactions
pub struct TransactionService<UR, CR, TR>
where
    UR: UserRepository,
    CR: CategoryRepository,
    TR: TransactionRepository,
{
    users: Arc<UR>,
    categories: Arc<CR>,
    transactions: Arc<TR>,
}

impl<UR, CR, TR> TransactionService<UR, CR, TR>
where
    UR: UserRepository,
    CR: CategoryRepository,
    TR: TransactionRepository,
{
    pub fn new(users: Arc<UR>, categories: Arc<CR>, transactions: Arc<TR>) -> Self {
        Self {
            users,
            categories,
            transactions,
        }
    }

    /// Record a transaction, creating the user and category when missing.
    /// Category names match case-insensitively within the transaction type.
    pub async fn add_transaction(
        &self,
        telegram_id: i64,
        amount: Decimal,
        category_name: &str,
        kind: TransactionType,
        description: Option<String>,
        transaction_date: Option<NaiveDateTime>,
    ) -> Result<(Transaction, Category), AppError> {
        let user = self.ensure_user(telegram_id).await?;
        let category = self
            .find_or_create_category(user.id, category_name, kind)
            .await?;

        let transaction = self
            .transactions
            .create(&NewTransaction {
                amount,
                description,
                kind,
                user_id: user.id,
                category_id: category.id,
                transaction_date,
            })
            .await?;

        Ok((transaction, category))
    }

    /// List a user's recent transactions, optionally narrowed by type and
    /// category name. Unknown users have no transactions.
    pub async fn get_user_transactions(
        &self,
        telegram_id: i64,
        limit: u64,
        kind: Option<TransactionType>,
        category_name: Option<&str>,
    ) -> Result<Vec<(Transaction, Option<String>)>, AppError> {
        let Some(user) = self.users.find_by_telegram_id(telegram_id).await? else {
            return Ok(Vec::new());
        };

        let category_id = match category_name {
            Some(name) => self
                .categories
                .list_for_user(user.id, None)
                .await?
                .into_iter()
                .find(|c| c.name.to_lowercase() == name.to_lowercase())
                .map(|c| c.id),
            None => None,
        };

        let filter = TransactionFilter {
            user_id: user.id,
            kind,
            category_id,
            limit,
            ..Default::default()
        };

        Ok(self.transactions.list(&filter).await?)
    }

    /// Per-category breakdown and totals for one calendar month.
    /// Defaults to the current month.
    pub async fn get_monthly_statistics(
        &self,
        telegram_id: i64,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<MonthlyStatistics, AppError> {
        let user = self.ensure_user(telegram_id).await?;

        let now = Utc::now().naive_utc();
        let target_year = year.unwrap_or_else(|| now.year());
        let target_month = month.unwrap_or_else(|| now.month());

        let (start, end) = periods::month_bounds(target_year, target_month)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid month: {}", target_month)))?;

        let income_by_category = self
            .transactions
            .sum_by_category(user.id, start, end, TransactionType::Income)
            .await?;
        let expense_by_category = self
            .transactions
            .sum_by_category(user.id, start, end, TransactionType::Expense)
            .await?;

        let total_income: Decimal = income_by_category.iter().map(|c| c.total_amount).sum();
        let total_expense: Decimal = expense_by_category.iter().map(|c| c.total_amount).sum();

        Ok(MonthlyStatistics {
            period: format!("{}-{:02}", target_year, target_month),
            total_income,
            total_expense,
            balance: total_income - total_expense,
            income_by_category,
            expense_by_category,
        })
    }

    /// Render the confirmation message for a freshly recorded transaction
    pub fn format_transaction_message(
        &self,
        transaction: &Transaction,
        category_name: Option<&str>,
    ) -> String {
        let (type_emoji, type_name) = match transaction.kind {
            TransactionType::Income => ("💰", "Income"),
            TransactionType::Expense => ("💸", "Expense"),
        };

        let mut message = format!(
            "{} <b>{}</b>\n💵 Сумма: {} руб.\n📂 Категория: {}\n📅 Дата: {}\n",
            type_emoji,
            type_name,
            transaction.amount,
            category_name.unwrap_or("Без категории"),
            transaction.transaction_date.format("%d.%m.%Y %H:%M"),
        );

        if let Some(description) = &transaction.description {
            message.push_str(&format!("📝 Описание: {}\n", description));
        }

        message
    }

    async fn ensure_user(&self, telegram_id: i64) -> Result<User, AppError> {
        if let Some(user) = self.users.find_by_telegram_id(telegram_id).await? {
            return Ok(user);
        }

        // First contact outside /start: register a placeholder profile
        Ok(self
            .users
            .create(&NewUser {
                telegram_id,
                username: Some(format!("user_{}", telegram_id)),
                first_name: Some("Пользователь".to_string()),
                ..Default::default()
            })
            .await?)
    }

    async fn find_or_create_category(
        &self,
        user_id: i64,
        name: &str,
        kind: TransactionType,
    ) -> Result<Category, AppError> {
        let existing = self
            .categories
            .list_for_user(user_id, Some(kind))
            .await?
            .into_iter()
            .find(|c| c.name.to_lowercase() == name.to_lowercase());

        if let Some(category) = existing {
            return Ok(category);
        }

        Ok(self
            .categories
            .create(&NewCategory {
                name: name.to_string(),
                description: None,
                user_id,
                kind,
            })
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        InMemoryCategoryRepository, InMemoryTransactionRepository, InMemoryUserRepository,
        test_user,
    };

    fn service() -> TransactionService<
        InMemoryUserRepository,
        InMemoryCategoryRepository,
        InMemoryTransactionRepository,
    > {
        service_with_repo(InMemoryUserRepository::new())
    }

    fn service_with_user(
        user: User,
    ) -> TransactionService<
        InMemoryUserRepository,
        InMemoryCategoryRepository,
        InMemoryTransactionRepository,
    > {
        service_with_repo(InMemoryUserRepository::new().with_user(user))
    }

    fn service_with_repo(
        users: InMemoryUserRepository,
    ) -> TransactionService<
        InMemoryUserRepository,
        InMemoryCategoryRepository,
        InMemoryTransactionRepository,
    > {
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let transactions =
            Arc::new(InMemoryTransactionRepository::new().with_categories(categories.clone()));
        TransactionService::new(Arc::new(users), categories, transactions)
    }

    #[tokio::test]
    async fn add_transaction_creates_missing_user_and_category() {
        let service = service();

        let (transaction, category) = service
            .add_transaction(
                555,
                Decimal::new(150050, 2),
                "Продукты",
                TransactionType::Expense,
                Some("Покупка продуктов".to_string()),
                None,
            )
            .await
            .unwrap();

        assert_eq!(transaction.amount, Decimal::new(150050, 2));
        assert_eq!(category.name, "Продукты");
        assert_eq!(category.kind, TransactionType::Expense);

        let user = service.users.find_by_telegram_id(555).await.unwrap();
        assert!(user.is_some());
        assert_eq!(user.unwrap().username.as_deref(), Some("user_555"));
    }

    #[tokio::test]
    async fn add_transaction_reuses_category_case_insensitively() {
        let service = service();

        let (_, first) = service
            .add_transaction(
                555,
                Decimal::from(100),
                "Продукты",
                TransactionType::Expense,
                None,
                None,
            )
            .await
            .unwrap();
        let (_, second) = service
            .add_transaction(
                555,
                Decimal::from(200),
                "продукты",
                TransactionType::Expense,
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn income_and_expense_categories_are_distinct() {
        let service = service();

        let (_, expense) = service
            .add_transaction(
                555,
                Decimal::from(100),
                "Подарки",
                TransactionType::Expense,
                None,
                None,
            )
            .await
            .unwrap();
        let (_, income) = service
            .add_transaction(
                555,
                Decimal::from(100),
                "Подарки",
                TransactionType::Income,
                None,
                None,
            )
            .await
            .unwrap();

        assert_ne!(expense.id, income.id);
    }

    #[tokio::test]
    async fn unknown_user_has_no_transactions() {
        let service = service();

        let transactions = service
            .get_user_transactions(999, 10, None, None)
            .await
            .unwrap();

        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn monthly_statistics_balances_income_and_expense() {
        let user = test_user();
        let telegram_id = user.telegram_id;
        let service = service_with_user(user);

        service
            .add_transaction(
                telegram_id,
                Decimal::from(50000),
                "Зарплата",
                TransactionType::Income,
                None,
                None,
            )
            .await
            .unwrap();
        service
            .add_transaction(
                telegram_id,
                Decimal::from(30000),
                "Продукты",
                TransactionType::Expense,
                None,
                None,
            )
            .await
            .unwrap();

        let stats = service
            .get_monthly_statistics(telegram_id, None, None)
            .await
            .unwrap();

        assert_eq!(stats.total_income, Decimal::from(50000));
        assert_eq!(stats.total_expense, Decimal::from(30000));
        assert_eq!(stats.balance, Decimal::from(20000));
        assert_eq!(stats.income_by_category.len(), 1);
        assert_eq!(stats.expense_by_category[0].category_name, "Продукты");
    }

    #[tokio::test]
    async fn format_transaction_message_includes_description() {
        let service = service();
        let (transaction, category) = service
            .add_transaction(
                555,
                Decimal::from(500),
                "Транспорт",
                TransactionType::Expense,
                Some("Метро".to_string()),
                None,
            )
            .await
            .unwrap();

        let message = service.format_transaction_message(&transaction, Some(&category.name));

        assert!(message.contains("<b>Expense</b>"));
        assert!(message.contains("💵 Сумма: 500 руб."));
        assert!(message.contains("📂 Категория: Транспорт"));
        assert!(message.contains("📝 Описание: Метро"));
    }
}
