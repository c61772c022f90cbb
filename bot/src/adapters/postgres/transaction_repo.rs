//! PostgreSQL adapter for TransactionRepository

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::domain::entities::{
    CategoryTotal, NewTransaction, Transaction, TransactionFilter, TransactionType,
};
use crate::domain::ports::TransactionRepository;
use crate::entity::{categories, transactions};
use crate::error::DomainError;

/// PostgreSQL implementation of TransactionRepository
pub struct PostgresTransactionRepository {
    db: DatabaseConnection,
}

impl PostgresTransactionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn create(&self, transaction: &NewTransaction) -> Result<Transaction, DomainError> {
        let now = Utc::now().naive_utc();

        let model = transactions::ActiveModel {
            amount: Set(transaction.amount),
            description: Set(transaction.description.clone()),
            transaction_type: Set(transaction.kind.to_string()),
            user_id: Set(transaction.user_id),
            category_id: Set(transaction.category_id),
            created_at: Set(now),
            transaction_date: Set(transaction.transaction_date.unwrap_or(now)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn list(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<(Transaction, Option<String>)>, DomainError> {
        let mut query = transactions::Entity::find()
            .find_also_related(categories::Entity)
            .filter(transactions::Column::UserId.eq(filter.user_id));

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::TransactionType.eq(kind.to_string()));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(transactions::Column::CategoryId.eq(category_id));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(transactions::Column::TransactionDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(transactions::Column::TransactionDate.lte(end));
        }

        let results = query
            .order_by_desc(transactions::Column::TransactionDate)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results
            .into_iter()
            .map(|(tx, category)| (tx.into(), category.map(|c| c.name)))
            .collect())
    }

    async fn sum_by_category(
        &self,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        kind: TransactionType,
    ) -> Result<Vec<CategoryTotal>, DomainError> {
        let rows: Vec<(String, Option<Decimal>, i64)> = transactions::Entity::find()
            .select_only()
            .column_as(categories::Column::Name, "category_name")
            .column_as(transactions::Column::Amount.sum(), "total_amount")
            .column_as(transactions::Column::Id.count(), "transaction_count")
            .join(JoinType::InnerJoin, transactions::Relation::Category.def())
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::TransactionType.eq(kind.to_string()))
            .filter(transactions::Column::TransactionDate.gte(start))
            .filter(transactions::Column::TransactionDate.lt(end))
            .group_by(categories::Column::Id)
            .group_by(categories::Column::Name)
            .order_by_desc(transactions::Column::Amount.sum())
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(category_name, total_amount, transaction_count)| CategoryTotal {
                category_name,
                total_amount: total_amount.unwrap_or_default(),
                transaction_count,
            })
            .collect())
    }

    async fn total(
        &self,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        kind: TransactionType,
    ) -> Result<Decimal, DomainError> {
        let total: Option<Option<Decimal>> = transactions::Entity::find()
            .select_only()
            .column_as(transactions::Column::Amount.sum(), "total_amount")
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::TransactionType.eq(kind.to_string()))
            .filter(transactions::Column::TransactionDate.gte(start))
            .filter(transactions::Column::TransactionDate.lt(end))
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(total.flatten().unwrap_or_default())
    }

    async fn category_total(
        &self,
        user_id: i64,
        category_id: i64,
        kind: TransactionType,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Decimal, DomainError> {
        let total: Option<Option<Decimal>> = transactions::Entity::find()
            .select_only()
            .column_as(transactions::Column::Amount.sum(), "total_amount")
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::CategoryId.eq(category_id))
            .filter(transactions::Column::TransactionType.eq(kind.to_string()))
            .filter(transactions::Column::TransactionDate.gte(start))
            .filter(transactions::Column::TransactionDate.lte(end))
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(total.flatten().unwrap_or_default())
    }
}

/// Convert SeaORM model to domain entity
impl From<transactions::Model> for Transaction {
    fn from(model: transactions::Model) -> Self {
        Transaction {
            id: model.id,
            amount: model.amount,
            description: model.description,
            kind: model
                .transaction_type
                .parse()
                .unwrap_or(TransactionType::Expense),
            user_id: model.user_id,
            category_id: model.category_id,
            created_at: model.created_at,
            transaction_date: model.transaction_date,
        }
    }
}
