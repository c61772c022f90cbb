//! PostgreSQL adapter for ReportRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{NewReport, Report, ReportType};
use crate::domain::ports::ReportRepository;
use crate::entity::reports;
use crate::error::DomainError;

/// PostgreSQL implementation of ReportRepository
pub struct PostgresReportRepository {
    db: DatabaseConnection,
}

impl PostgresReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn create(&self, report: &NewReport) -> Result<Report, DomainError> {
        let model = reports::ActiveModel {
            name: Set(report.name.clone()),
            report_type: Set(report.kind.to_string()),
            user_id: Set(report.user_id),
            start_date: Set(report.start_date),
            end_date: Set(report.end_date),
            data: Set(report.data.clone()),
            created_at: Set(Utc::now().naive_utc()),
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
        kind: Option<ReportType>,
    ) -> Result<Vec<Report>, DomainError> {
        let mut query = reports::Entity::find().filter(reports::Column::UserId.eq(user_id));

        if let Some(kind) = kind {
            query = query.filter(reports::Column::ReportType.eq(kind.to_string()));
        }

        let results = query
            .order_by_desc(reports::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<reports::Model> for Report {
    fn from(model: reports::Model) -> Self {
        Report {
            id: model.id,
            name: model.name,
            kind: model.report_type.parse().unwrap_or(ReportType::Custom),
            user_id: model.user_id,
            start_date: model.start_date,
            end_date: model.end_date,
            data: model.data,
            created_at: model.created_at,
        }
    }
}
