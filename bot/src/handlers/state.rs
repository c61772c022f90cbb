//! Conversation state
//!
//! Multi-step dialogs (adding a transaction, creating a budget) keep their
//! progress in an in-process map keyed by Telegram user id.

use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;

use crate::domain::entities::TransactionType;

/// Where a user currently is inside a multi-step dialog
#[derive(Debug, Clone, PartialEq)]
pub enum ChatState {
    /// Add-transaction flow: waiting for the amount
    AwaitingAmount { kind: TransactionType },
    /// Add-transaction flow: waiting for a category pick or a typed name
    AwaitingCategory {
        kind: TransactionType,
        amount: Decimal,
    },
    /// Add-transaction flow: waiting for a description (or skip)
    AwaitingDescription {
        kind: TransactionType,
        amount: Decimal,
        category: String,
    },
    /// Create-budget flow: waiting for the budget name
    AwaitingBudgetName,
    /// Create-budget flow: waiting for the limit amount
    AwaitingBudgetAmount { name: String },
    /// Create-budget flow: waiting for a category pick or a typed name
    AwaitingBudgetCategory { name: String, amount: Decimal },
    /// Create-budget flow: waiting for the period pick
    AwaitingBudgetPeriod {
        name: String,
        amount: Decimal,
        category: String,
    },
}

/// Per-user conversation state
#[derive(Default)]
pub struct SessionStore {
    states: RwLock<HashMap<i64, ChatState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: i64) -> Option<ChatState> {
        self.states.read().unwrap().get(&user_id).cloned()
    }

    pub fn set(&self, user_id: i64, state: ChatState) {
        self.states.write().unwrap().insert(user_id, state);
    }

    /// Drop the user's state, returning what it was
    pub fn clear(&self, user_id: i64) -> Option<ChatState> {
        self.states.write().unwrap().remove(&user_id)
    }

    pub fn is_active(&self, user_id: i64) -> bool {
        self.states.read().unwrap().contains_key(&user_id)
    }
}
