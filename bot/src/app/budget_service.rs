//! Budget service
//!
//! Spending limits per expense category with live usage tracking.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::{
    Budget, BudgetStatus, Category, NewBudget, NewCategory, NewUser, TransactionType, User,
    budget::BUDGET_WARNING_PERCENT,
};
use crate::domain::ports::{
    BudgetRepository, CategoryRepository, TransactionRepository, UserRepository,
};
use crate::error::AppError;

/// Service for managing budgets
pub struct BudgetService<UR, CR, BR, TR>
where
    UR: UserRepository,
    CR: CategoryRepository,
    BR: BudgetRepository,
    TR: TransactionRepository,
{
    users: Arc<UR>,
    categories: Arc<CR>,
    budgets: Arc<BR>,
    transactions: Arc<TR>,
}

impl<UR, CR, BR, TR> BudgetService<UR, CR, BR, TR>
where
    UR: UserRepository,
    CR: CategoryRepository,
    BR: BudgetRepository,
    TR: TransactionRepository,
{
    pub fn new(users: Arc<UR>, categories: Arc<CR>, budgets: Arc<BR>, transactions: Arc<TR>) -> Self {
        Self {
            users,
            categories,
            budgets,
            transactions,
        }
    }

    /// Create a budget for an expense category, creating the user and the
    /// category when missing.
    pub async fn create_budget(
        &self,
        telegram_id: i64,
        name: &str,
        amount: Decimal,
        category_name: &str,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Result<Budget, AppError> {
        let user = self.ensure_user(telegram_id).await?;
        let category = self.find_or_create_category(user.id, category_name).await?;

        Ok(self
            .budgets
            .create(&NewBudget {
                name: name.to_string(),
                amount,
                user_id: user.id,
                category_id: category.id,
                start_date,
                end_date,
            })
            .await?)
    }

    /// Active budgets with the amount actually spent inside each window
    pub async fn get_user_budgets(&self, telegram_id: i64) -> Result<Vec<BudgetStatus>, AppError> {
        let Some(user) = self.users.find_by_telegram_id(telegram_id).await? else {
            return Ok(Vec::new());
        };

        let now = Utc::now().naive_utc();
        let budgets = self.budgets.list_active_for_user(user.id, now).await?;

        let mut statuses = Vec::with_capacity(budgets.len());
        for (budget, category_name) in budgets {
            let spent_amount = self
                .transactions
                .category_total(
                    user.id,
                    budget.category_id,
                    TransactionType::Expense,
                    budget.start_date,
                    budget.end_date,
                )
                .await?;

            statuses.push(BudgetStatus {
                remaining_amount: budget.amount - spent_amount,
                is_exceeded: spent_amount > budget.amount,
                spent_amount,
                category_name,
                budget,
            });
        }

        Ok(statuses)
    }

    /// Alert lines for exceeded and nearly exhausted budgets
    pub async fn check_budget_alerts(&self, telegram_id: i64) -> Result<Vec<String>, AppError> {
        let statuses = self.get_user_budgets(telegram_id).await?;

        let mut alerts = Vec::new();
        for status in statuses {
            let percentage_used = status.percentage_used();

            if status.is_exceeded {
                alerts.push(format!(
                    "🔴 <b>{}</b> ({})\nПревышение на {} руб.",
                    status.budget.name,
                    status.category_name,
                    status.spent_amount - status.budget.amount,
                ));
            } else if percentage_used >= BUDGET_WARNING_PERCENT {
                alerts.push(format!(
                    "🟡 <b>{}</b> ({})\nИспользовано {:.1}% бюджета",
                    status.budget.name, status.category_name, percentage_used,
                ));
            }
        }

        Ok(alerts)
    }

    /// Render one budget with its usage figures
    pub fn format_budget_message(&self, status: &BudgetStatus) -> String {
        let percentage_used = status.percentage_used();

        let (status_icon, status_text) = if status.is_exceeded {
            ("🔴", "Превышен")
        } else if percentage_used >= BUDGET_WARNING_PERCENT {
            ("🟡", "Близко к лимиту")
        } else {
            ("🟢", "В норме")
        };

        format!(
            "{} <b>{}</b>\n\
             📂 Категория: {}\n\
             💵 Лимит: {} руб.\n\
             💸 Потрачено: {} руб. ({:.1}%)\n\
             💰 Остаток: {} руб.\n\
             📊 Статус: {}",
            status_icon,
            status.budget.name,
            status.category_name,
            status.budget.amount,
            status.spent_amount,
            percentage_used,
            status.remaining_amount,
            status_text,
        )
    }

    async fn ensure_user(&self, telegram_id: i64) -> Result<User, AppError> {
        if let Some(user) = self.users.find_by_telegram_id(telegram_id).await? {
            return Ok(user);
        }

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

    /// Budgets only make sense for expense categories
    async fn find_or_create_category(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<Category, AppError> {
        let existing = self
            .categories
            .list_for_user(user_id, Some(TransactionType::Expense))
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
                kind: TransactionType::Expense,
            })
            .await?)
    }
}
