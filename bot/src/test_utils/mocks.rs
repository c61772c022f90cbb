//! Mock implementations of port traits
//!
//! In-memory repositories plus a Telegram client that records outgoing
//! traffic for assertions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::{
    Budget, Category, CategoryTotal, NewBudget, NewCategory, NewReport, NewTransaction, NewUser,
    Report, ReportType, Transaction, TransactionFilter, TransactionType, User,
};
use crate::domain::ports::{
    BudgetRepository, CategoryRepository, EditMessageText, Message, ReportRepository, SendMessage,
    TelegramApi, TransactionRepository, Update, UserRepository,
};
use crate::error::{DomainError, TelegramError};

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.next_id.fetch_max(user.id + 1, Ordering::SeqCst);
        self.users.write().unwrap().insert(user.id, user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(&id).cloned())
    }

    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.telegram_id == telegram_id)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let now = Utc::now().naive_utc();
        let created = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            telegram_id: user.telegram_id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            language_code: user.language_code.clone(),
            created_at: now,
            updated_at: now,
            is_active: true,
        };

        self.users
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }
}

// ============================================================================
// In-Memory Category Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<HashMap<i64, Category>>,
    next_id: AtomicI64,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Category name lookup used by the other mocks to emulate joins
    pub fn name_of(&self, id: i64) -> Option<String> {
        self.categories
            .read()
            .unwrap()
            .get(&id)
            .map(|c| c.name.clone())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError> {
        let created = Category {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: category.name.clone(),
            description: category.description.clone(),
            user_id: category.user_id,
            kind: category.kind,
            created_at: Utc::now().naive_utc(),
            is_active: true,
        };

        self.categories
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        kind: Option<TransactionType>,
    ) -> Result<Vec<Category>, DomainError> {
        let mut result: Vec<Category> = self
            .categories
            .read()
            .unwrap()
            .values()
            .filter(|c| c.user_id == user_id && c.is_active)
            .filter(|c| kind.map(|k| c.kind == k).unwrap_or(true))
            .cloned()
            .collect();

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }
}

// ============================================================================
// In-Memory Transaction Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryTransactionRepository {
    transactions: RwLock<Vec<Transaction>>,
    next_id: AtomicI64,
    /// Resolves category names for join-shaped queries
    categories: Option<Arc<InMemoryCategoryRepository>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self {
            transactions: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            categories: None,
        }
    }

    pub fn with_categories(mut self, categories: Arc<InMemoryCategoryRepository>) -> Self {
        self.categories = Some(categories);
        self
    }

    fn category_name(&self, id: i64) -> Option<String> {
        self.categories.as_ref().and_then(|c| c.name_of(id))
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn create(&self, transaction: &NewTransaction) -> Result<Transaction, DomainError> {
        let now = Utc::now().naive_utc();
        let created = Transaction {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            amount: transaction.amount,
            description: transaction.description.clone(),
            kind: transaction.kind,
            user_id: transaction.user_id,
            category_id: transaction.category_id,
            created_at: now,
            transaction_date: transaction.transaction_date.unwrap_or(now),
        };

        self.transactions.write().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<(Transaction, Option<String>)>, DomainError> {
        let mut matching: Vec<Transaction> = self
            .transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == filter.user_id)
            .filter(|t| filter.kind.map(|k| t.kind == k).unwrap_or(true))
            .filter(|t| {
                filter
                    .category_id
                    .map(|id| t.category_id == id)
                    .unwrap_or(true)
            })
            .filter(|t| {
                filter
                    .start_date
                    .map(|s| t.transaction_date >= s)
                    .unwrap_or(true)
            })
            .filter(|t| {
                filter
                    .end_date
                    .map(|e| t.transaction_date <= e)
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date).then(b.id.cmp(&a.id)));

        Ok(matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .map(|t| {
                let name = self.category_name(t.category_id);
                (t, name)
            })
            .collect())
    }

    async fn sum_by_category(
        &self,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        kind: TransactionType,
    ) -> Result<Vec<CategoryTotal>, DomainError> {
        let mut grouped: HashMap<i64, (Decimal, i64)> = HashMap::new();

        for t in self.transactions.read().unwrap().iter() {
            if t.user_id == user_id
                && t.kind == kind
                && t.transaction_date >= start
                && t.transaction_date < end
            {
                let entry = grouped.entry(t.category_id).or_default();
                entry.0 += t.amount;
                entry.1 += 1;
            }
        }

        let mut totals: Vec<CategoryTotal> = grouped
            .into_iter()
            .map(|(category_id, (total_amount, transaction_count))| CategoryTotal {
                category_name: self
                    .category_name(category_id)
                    .unwrap_or_else(|| format!("category-{}", category_id)),
                total_amount,
                transaction_count,
            })
            .collect();

        totals.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
        Ok(totals)
    }

    async fn total(
        &self,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        kind: TransactionType,
    ) -> Result<Decimal, DomainError> {
        Ok(self
            .transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| {
                t.user_id == user_id
                    && t.kind == kind
                    && t.transaction_date >= start
                    && t.transaction_date < end
            })
            .map(|t| t.amount)
            .sum())
    }

    async fn category_total(
        &self,
        user_id: i64,
        category_id: i64,
        kind: TransactionType,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Decimal, DomainError> {
        Ok(self
            .transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| {
                t.user_id == user_id
                    && t.category_id == category_id
                    && t.kind == kind
                    && t.transaction_date >= start
                    && t.transaction_date <= end
            })
            .map(|t| t.amount)
            .sum())
    }
}

// ============================================================================
// In-Memory Budget Repository
// ============================================================================

pub struct InMemoryBudgetRepository {
    budgets: RwLock<Vec<Budget>>,
    next_id: AtomicI64,
    categories: Arc<InMemoryCategoryRepository>,
}

impl InMemoryBudgetRepository {
    pub fn new(categories: Arc<InMemoryCategoryRepository>) -> Self {
        Self {
            budgets: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            categories,
        }
    }
}

#[async_trait]
impl BudgetRepository for InMemoryBudgetRepository {
    async fn create(&self, budget: &NewBudget) -> Result<Budget, DomainError> {
        let created = Budget {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: budget.name.clone(),
            amount: budget.amount,
            spent_amount: Decimal::ZERO,
            user_id: budget.user_id,
            category_id: budget.category_id,
            start_date: budget.start_date,
            end_date: budget.end_date,
            created_at: Utc::now().naive_utc(),
            is_active: true,
        };

        self.budgets.write().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_active_for_user(
        &self,
        user_id: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<(Budget, String)>, DomainError> {
        let mut matching: Vec<Budget> = self
            .budgets
            .read()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id && b.is_active && b.end_date >= now)
            .cloned()
            .collect();

        matching.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(matching
            .into_iter()
            .map(|b| {
                let name = self.categories.name_of(b.category_id).unwrap_or_default();
                (b, name)
            })
            .collect())
    }
}

// ============================================================================
// In-Memory Report Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: RwLock<Vec<Report>>,
    next_id: AtomicI64,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn create(&self, report: &NewReport) -> Result<Report, DomainError> {
        let created = Report {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: report.name.clone(),
            kind: report.kind,
            user_id: report.user_id,
            start_date: report.start_date,
            end_date: report.end_date,
            data: report.data.clone(),
            created_at: Utc::now().naive_utc(),
        };

        self.reports.write().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        kind: Option<ReportType>,
    ) -> Result<Vec<Report>, DomainError> {
        let mut matching: Vec<Report> = self
            .reports
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| kind.map(|k| r.kind == k).unwrap_or(true))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matching)
    }
}

// ============================================================================
// Mock Telegram Client
// ============================================================================

/// One recorded outgoing call
#[derive(Debug, Clone)]
pub enum Outgoing {
    Message(SendMessage),
    Edit(EditMessageText),
    AnswerCallback(String),
}

/// Records outgoing Bot API traffic instead of sending it
#[derive(Default)]
pub struct MockTelegramClient {
    outgoing: Mutex<Vec<Outgoing>>,
    next_message_id: AtomicI64,
}

impl MockTelegramClient {
    pub fn new() -> Self {
        Self {
            outgoing: Mutex::new(Vec::new()),
            next_message_id: AtomicI64::new(100),
        }
    }

    pub fn outgoing(&self) -> Vec<Outgoing> {
        self.outgoing.lock().unwrap().clone()
    }

    pub fn sent_messages(&self) -> Vec<SendMessage> {
        self.outgoing()
            .into_iter()
            .filter_map(|o| match o {
                Outgoing::Message(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<EditMessageText> {
        self.outgoing()
            .into_iter()
            .filter_map(|o| match o {
                Outgoing::Edit(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    /// All message and edit texts, in send order
    pub fn texts(&self) -> Vec<String> {
        self.outgoing()
            .into_iter()
            .filter_map(|o| match o {
                Outgoing::Message(m) => Some(m.text),
                Outgoing::Edit(e) => Some(e.text),
                Outgoing::AnswerCallback(_) => None,
            })
            .collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts().pop()
    }
}

#[async_trait]
impl TelegramApi for MockTelegramClient {
    async fn get_updates(
        &self,
        _offset: Option<i64>,
        _timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        Ok(Vec::new())
    }

    async fn send_message(&self, message: &SendMessage) -> Result<Message, TelegramError> {
        self.outgoing
            .lock()
            .unwrap()
            .push(Outgoing::Message(message.clone()));

        Ok(Message {
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst),
            from: None,
            chat: crate::domain::ports::Chat {
                id: message.chat_id,
            },
            text: Some(message.text.clone()),
        })
    }

    async fn edit_message_text(&self, edit: &EditMessageText) -> Result<(), TelegramError> {
        self.outgoing
            .lock()
            .unwrap()
            .push(Outgoing::Edit(edit.clone()));
        Ok(())
    }

    async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), TelegramError> {
        self.outgoing
            .lock()
            .unwrap()
            .push(Outgoing::AnswerCallback(callback_query_id.to_string()));
        Ok(())
    }
}
