//! PostgreSQL adapter for CategoryRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{Category, NewCategory, TransactionType};
use crate::domain::ports::CategoryRepository;
use crate::entity::categories;
use crate::error::DomainError;

/// PostgreSQL implementation of CategoryRepository
pub struct PostgresCategoryRepository {
    db: DatabaseConnection,
}

impl PostgresCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError> {
        let model = categories::ActiveModel {
            name: Set(category.name.clone()),
            description: Set(category.description.clone()),
            user_id: Set(category.user_id),
            transaction_type: Set(category.kind.to_string()),
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

    async fn list_for_user(
        &self,
        user_id: i64,
        kind: Option<TransactionType>,
    ) -> Result<Vec<Category>, DomainError> {
        let mut query = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .filter(categories::Column::IsActive.eq(true));

        if let Some(kind) = kind {
            query = query.filter(categories::Column::TransactionType.eq(kind.to_string()));
        }

        let results = query
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Category {
            id: model.id,
            name: model.name,
            description: model.description,
            user_id: model.user_id,
            kind: model
                .transaction_type
                .parse()
                .unwrap_or(TransactionType::Expense),
            created_at: model.created_at,
            is_active: model.is_active,
        }
    }
}
