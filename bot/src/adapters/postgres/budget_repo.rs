//! PostgreSQL adapter for BudgetRepository

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{Budget, NewBudget};
use crate::domain::ports::BudgetRepository;
use crate::entity::{budgets, categories};
use crate::error::DomainError;

/// PostgreSQL implementation of BudgetRepository
pub struct PostgresBudgetRepository {
    db: DatabaseConnection,
}

impl PostgresBudgetRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BudgetRepository for PostgresBudgetRepository {
    async fn create(&self, budget: &NewBudget) -> Result<Budget, DomainError> {
        let model = budgets::ActiveModel {
            name: Set(budget.name.clone()),
            amount: Set(budget.amount),
            spent_amount: Set(Decimal::ZERO),
            user_id: Set(budget.user_id),
            category_id: Set(budget.category_id),
            start_date: Set(budget.start_date),
            end_date: Set(budget.end_date),
            created_at: Set(Utc::now().naive_utc()),
            is_active: Set(true),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn list_active_for_user(
        &self,
        user_id: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<(Budget, String)>, DomainError> {
        let results = budgets::Entity::find()
            .find_also_related(categories::Entity)
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::IsActive.eq(true))
            .filter(budgets::Column::EndDate.gte(now))
            .order_by_asc(budgets::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results
            .into_iter()
            .map(|(budget, category)| {
                let name = category.map(|c| c.name).unwrap_or_default();
                (budget.into(), name)
            })
            .collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<budgets::Model> for Budget {
    fn from(model: budgets::Model) -> Self {
        Budget {
            id: model.id,
            name: model.name,
            amount: model.amount,
            spent_amount: model.spent_amount,
            user_id: model.user_id,
            category_id: model.category_id,
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at,
            is_active: model.is_active,
        }
    }
}
