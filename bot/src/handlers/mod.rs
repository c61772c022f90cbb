//! Update handlers
//!
//! The dispatcher routes incoming updates to command, menu, and conversation
//! handlers. Handlers are thin glue over the application services; the
//! per-flow logic lives in the sibling modules.

pub mod budgets;
pub mod commands;
pub mod menu;
pub mod reports;
pub mod state;
pub mod transactions;

pub use state::{ChatState, SessionStore};

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::app::{BudgetService, ReportService, TransactionService};
use crate::domain::entities::TransactionType;
use crate::domain::ports::{
    BudgetRepository, CallbackQuery, CategoryRepository, EditMessageText, Message,
    ReportRepository, SendMessage, TelegramApi, TransactionRepository, Update, UserRepository,
};
use crate::keyboards;
use crate::error::AppError;

/// Routes updates to handlers and tracks conversation state
pub struct Dispatcher<UR, CR, TR, BR, RR, TG>
where
    UR: UserRepository,
    CR: CategoryRepository,
    TR: TransactionRepository,
    BR: BudgetRepository,
    RR: ReportRepository,
    TG: TelegramApi,
{
    pub(crate) users: Arc<UR>,
    pub(crate) categories: Arc<CR>,
    pub(crate) transactions: Arc<TransactionService<UR, CR, TR>>,
    pub(crate) budgets: Arc<BudgetService<UR, CR, BR, TR>>,
    pub(crate) reports: Arc<ReportService<UR, TR, RR>>,
    pub(crate) telegram: Arc<TG>,
    pub(crate) sessions: SessionStore,
}

impl<UR, CR, TR, BR, RR, TG> Dispatcher<UR, CR, TR, BR, RR, TG>
where
    UR: UserRepository,
    CR: CategoryRepository,
    TR: TransactionRepository,
    BR: BudgetRepository,
    RR: ReportRepository,
    TG: TelegramApi,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<UR>,
        categories: Arc<CR>,
        transactions: Arc<TransactionService<UR, CR, TR>>,
        budgets: Arc<BudgetService<UR, CR, BR, TR>>,
        reports: Arc<ReportService<UR, TR, RR>>,
        telegram: Arc<TG>,
    ) -> Self {
        Self {
            users,
            categories,
            transactions,
            budgets,
            reports,
            telegram,
            sessions: SessionStore::new(),
        }
    }

    /// Handle one update end to end
    pub async fn dispatch(&self, update: Update) -> Result<(), AppError> {
        if let Some(message) = update.message {
            self.handle_message(message).await
        } else if let Some(query) = update.callback_query {
            self.handle_callback(query).await
        } else {
            Ok(())
        }
    }

    async fn handle_message(&self, message: Message) -> Result<(), AppError> {
        let Some(from) = message.from.clone() else {
            tracing::warn!("Message without sender, ignoring");
            return Ok(());
        };
        let Some(text) = message.text.clone() else {
            return Ok(());
        };
        let chat_id = message.chat.id;

        // An in-flight dialog is aborted by any command or main-menu button
        if self.sessions.is_active(from.id) {
            if text.starts_with('/') || keyboards::MAIN_MENU_BUTTONS.contains(&text.as_str()) {
                return self.cancel_conversation(from.id, chat_id).await;
            }
            return self.handle_conversation_text(&from, chat_id, &text).await;
        }

        if let Some(command) = text.split_whitespace().next().filter(|t| t.starts_with('/')) {
            return match command {
                "/start" => self.start_command(&from, chat_id).await,
                "/help" => self.help_command(chat_id).await,
                "/stats" => self.stats_command(&from, chat_id).await,
                // Unknown commands are ignored, as are bare slashes
                _ => Ok(()),
            };
        }

        match text.as_str() {
            "➕ Добавить доход" => {
                self.start_add_transaction(&from, chat_id, TransactionType::Income)
                    .await
            }
            "➖ Добавить расход" => {
                self.start_add_transaction(&from, chat_id, TransactionType::Expense)
                    .await
            }
            "📊 Мои транзакции" => self.view_transactions(&from, chat_id).await,
            "💰 Мои бюджеты" => self.budgets_menu(chat_id).await,
            "📈 Отчеты" => self.reports_menu(chat_id).await,
            "⚙️ Настройки" => self.settings_menu(chat_id).await,
            "ℹ️ Помощь" => self.help_command(chat_id).await,
            _ => self.unknown_input(chat_id).await,
        }
    }

    async fn handle_callback(&self, query: CallbackQuery) -> Result<(), AppError> {
        self.telegram.answer_callback_query(&query.id).await?;

        let Some(data) = query.data.clone() else {
            return Ok(());
        };
        // Without the originating message there is nothing to edit
        let Some(message) = query.message.clone() else {
            return Ok(());
        };
        let chat_id = message.chat.id;
        let message_id = message.message_id;
        let from = query.from;

        match data.as_str() {
            "transaction_cancel" | "cancel" => {
                self.sessions.clear(from.id);
                self.edit(EditMessageText::new(chat_id, message_id, "❌ Операция отменена"))
                    .await
            }
            "budget_cancel" => {
                self.sessions.clear(from.id);
                self.edit(EditMessageText::new(
                    chat_id,
                    message_id,
                    "❌ Создание бюджета отменено",
                ))
                .await
            }
            "description_skip" => {
                self.on_description_skip(&from, chat_id, message_id).await
            }
            "budget_create" => self.start_budget_creation(&from, chat_id, message_id).await,
            "budget_list" => self.budget_list(&from, chat_id, message_id).await,
            "budget_alerts" => self.budget_alerts(&from, chat_id, message_id).await,
            "report_monthly" => self.monthly_report(&from, chat_id, message_id).await,
            "report_weekly" => self.weekly_report(&from, chat_id, message_id).await,
            "report_list" => self.report_list(&from, chat_id, message_id).await,
            _ => {
                if let Some(category) = data.strip_prefix("budget_cat_") {
                    self.on_budget_category_callback(&from, chat_id, message_id, category)
                        .await
                } else if let Some(category) = data.strip_prefix("category_") {
                    self.on_category_callback(&from, chat_id, message_id, category)
                        .await
                } else if data.starts_with("period_") {
                    self.on_budget_period(&from, chat_id, message_id, &data).await
                } else if data.starts_with("settings_") {
                    self.settings_callback(chat_id, message_id, &data).await
                } else {
                    tracing::debug!(data = %data, "Unhandled callback");
                    Ok(())
                }
            }
        }
    }

    /// Text input while a dialog is active
    async fn handle_conversation_text(
        &self,
        from: &crate::domain::ports::TelegramUser,
        chat_id: i64,
        text: &str,
    ) -> Result<(), AppError> {
        match self.sessions.get(from.id) {
            Some(ChatState::AwaitingAmount { kind }) => {
                self.on_transaction_amount(from, chat_id, text, kind).await
            }
            Some(ChatState::AwaitingCategory { kind, amount }) => {
                self.on_category_text(from, chat_id, text, kind, amount).await
            }
            Some(ChatState::AwaitingDescription { .. }) => {
                self.on_description_text(from, chat_id, text).await
            }
            Some(ChatState::AwaitingBudgetName) => self.on_budget_name(from, chat_id, text).await,
            Some(ChatState::AwaitingBudgetAmount { name }) => {
                self.on_budget_amount(from, chat_id, text, name).await
            }
            Some(ChatState::AwaitingBudgetCategory { name, amount }) => {
                self.on_budget_category_text(from, chat_id, text, name, amount)
                    .await
            }
            // Period is picked from the inline keyboard only
            Some(ChatState::AwaitingBudgetPeriod { .. }) | None => Ok(()),
        }
    }

    pub(crate) async fn cancel_conversation(
        &self,
        user_id: i64,
        chat_id: i64,
    ) -> Result<(), AppError> {
        self.sessions.clear(user_id);
        self.send(
            SendMessage::new(chat_id, "❌ Операция отменена")
                .with_reply_keyboard(keyboards::main_keyboard()),
        )
        .await
    }

    pub(crate) async fn send(&self, message: SendMessage) -> Result<(), AppError> {
        self.telegram.send_message(&message).await?;
        Ok(())
    }

    pub(crate) async fn edit(&self, edit: EditMessageText) -> Result<(), AppError> {
        self.telegram.edit_message_text(&edit).await?;
        Ok(())
    }
}

/// Parse a user-entered amount. Accepts "1500", "150.50" and "150,50".
pub fn parse_amount(text: &str) -> Option<Decimal> {
    Decimal::from_str(text.trim().replace(',', ".").as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_both_separators() {
        assert_eq!(parse_amount("1500"), Some(Decimal::from(1500)));
        assert_eq!(parse_amount("150.50"), Some(Decimal::new(15050, 2)));
        assert_eq!(parse_amount("150,50"), Some(Decimal::new(15050, 2)));
        assert_eq!(parse_amount("  42 "), Some(Decimal::from(42)));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("12,34,56"), None);
    }

    #[test]
    fn parse_amount_keeps_sign() {
        // Positivity is enforced by the dialogs, not the parser
        assert_eq!(parse_amount("-5"), Some(Decimal::from(-5)));
    }
}
