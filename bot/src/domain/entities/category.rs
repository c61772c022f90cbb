//! Category domain entity

use chrono::NaiveDateTime;

use super::transaction::TransactionType;

/// A user-defined income or expense category
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
    pub kind: TransactionType,
    pub created_at: NaiveDateTime,
    pub is_active: bool,
}

impl Category {
    pub fn type_icon(&self) -> &'static str {
        match self.kind {
            TransactionType::Income => "📈",
            TransactionType::Expense => "📉",
        }
    }
}

/// Data needed to create a new category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
    pub kind: TransactionType,
}
