//! Budget domain entity
//!
//! A spending limit for one expense category over a fixed period.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Budget usage share above which a warning is raised, in percent.
pub const BUDGET_WARNING_PERCENT: f64 = 80.0;

/// A spending limit tied to a category and a date window
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub spent_amount: Decimal,
    pub user_id: i64,
    pub category_id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub is_active: bool,
}

impl Budget {
    pub fn remaining_amount(&self) -> Decimal {
        self.amount - self.spent_amount
    }

    /// Share of the limit already spent, in percent.
    pub fn percentage_used(&self) -> f64 {
        if self.amount.is_zero() {
            return 0.0;
        }
        ((self.spent_amount / self.amount) * Decimal::from(100))
            .to_f64()
            .unwrap_or(0.0)
    }

    pub fn is_exceeded(&self) -> bool {
        self.spent_amount > self.amount
    }

    pub fn status_icon(&self) -> &'static str {
        let used = self.percentage_used();
        if used >= 100.0 {
            "🔴"
        } else if used >= BUDGET_WARNING_PERCENT {
            "🟡"
        } else {
            "🟢"
        }
    }
}

/// Data needed to create a new budget
#[derive(Debug, Clone)]
pub struct NewBudget {
    pub name: String,
    pub amount: Decimal,
    pub user_id: i64,
    pub category_id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

/// A budget joined with its category name and live spending figures
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub category_name: String,
    pub spent_amount: Decimal,
    pub remaining_amount: Decimal,
    pub is_exceeded: bool,
}

impl BudgetStatus {
    /// Share of the limit spent according to the live figures, in percent.
    pub fn percentage_used(&self) -> f64 {
        if self.budget.amount.is_zero() {
            return 0.0;
        }
        ((self.spent_amount / self.budget.amount) * Decimal::from(100))
            .to_f64()
            .unwrap_or(0.0)
    }
}
