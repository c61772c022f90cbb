//! Report domain entity
//!
//! A saved snapshot of aggregated finance data for a period.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::CategoryTotal;

/// Kind of a saved report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Monthly,
    Weekly,
    Custom,
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::Monthly => write!(f, "monthly"),
            ReportType::Weekly => write!(f, "weekly"),
            ReportType::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(ReportType::Monthly),
            "weekly" => Ok(ReportType::Weekly),
            "custom" => Ok(ReportType::Custom),
            _ => Err(format!("Unknown report type: {}", s)),
        }
    }
}

/// A persisted report
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: i64,
    pub name: String,
    pub kind: ReportType,
    pub user_id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    /// JSON payload of the aggregated data
    pub data: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Report {
    pub fn type_icon(&self) -> &'static str {
        match self.kind {
            ReportType::Monthly => "📊",
            ReportType::Weekly => "📈",
            ReportType::Custom => "📋",
        }
    }

    /// "DD.MM.YYYY - DD.MM.YYYY"
    pub fn period_description(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format("%d.%m.%Y"),
            self.end_date.format("%d.%m.%Y")
        )
    }
}

/// Data needed to create a new report
#[derive(Debug, Clone)]
pub struct NewReport {
    pub name: String,
    pub kind: ReportType,
    pub user_id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub data: Option<String>,
}

/// Month-level aggregate persisted with monthly reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub top_expense_categories: Vec<CategoryTotal>,
}
