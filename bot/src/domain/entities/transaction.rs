//! Transaction domain entity
//!
//! A single income or expense operation recorded by a user.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a money flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

/// A recorded financial operation
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub description: Option<String>,
    pub kind: TransactionType,
    pub user_id: i64,
    pub category_id: i64,
    pub created_at: NaiveDateTime,
    pub transaction_date: NaiveDateTime,
}

impl Transaction {
    /// Signed amount with the ruble sign, e.g. "+1500.00 ₽"
    pub fn formatted_amount(&self) -> String {
        let sign = match self.kind {
            TransactionType::Income => "+",
            TransactionType::Expense => "-",
        };
        format!("{}{} ₽", sign, self.amount)
    }

    pub fn type_icon(&self) -> &'static str {
        match self.kind {
            TransactionType::Income => "➕",
            TransactionType::Expense => "➖",
        }
    }
}

/// Data needed to create a new transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub description: Option<String>,
    pub kind: TransactionType,
    pub user_id: i64,
    pub category_id: i64,
    /// Defaults to now when absent
    pub transaction_date: Option<NaiveDateTime>,
}

/// Filter for transaction listings
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub user_id: i64,
    pub kind: Option<TransactionType>,
    pub category_id: Option<i64>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub limit: u64,
    pub offset: u64,
}

impl TransactionFilter {
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id,
            limit: 50,
            ..Default::default()
        }
    }
}

/// Aggregated amount for one category over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_name: String,
    pub total_amount: Decimal,
    pub transaction_count: i64,
}

/// Per-category income and expense breakdown for one calendar month
#[derive(Debug, Clone)]
pub struct MonthlyStatistics {
    /// "YYYY-MM"
    pub period: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub income_by_category: Vec<CategoryTotal>,
    pub expense_by_category: Vec<CategoryTotal>,
}
