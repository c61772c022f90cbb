//! Budget menu and the create-budget dialog

use chrono::Utc;
use rust_decimal::Decimal;

use crate::app::periods;
use crate::domain::entities::TransactionType;
use crate::domain::ports::{
    BudgetRepository, CategoryRepository, EditMessageText, ReportRepository, SendMessage,
    TelegramApi, TelegramUser, TransactionRepository, UserRepository,
};
use crate::error::AppError;
use crate::handlers::{parse_amount, ChatState, Dispatcher};
use crate::keyboards;

/// Budget amounts are stored as NUMERIC(15, 2)
const MAX_BUDGET_AMOUNT: &str = "999999999.99";

impl<UR, CR, TR, BR, RR, TG> Dispatcher<UR, CR, TR, BR, RR, TG>
where
    UR: UserRepository,
    CR: CategoryRepository,
    TR: TransactionRepository,
    BR: BudgetRepository,
    RR: ReportRepository,
    TG: TelegramApi,
{
    /// "My budgets" button
    pub(crate) async fn budgets_menu(&self, chat_id: i64) -> Result<(), AppError> {
        self.send(
            SendMessage::new(chat_id, "💰 Управление бюджетами:")
                .with_inline_keyboard(keyboards::budget_keyboard()),
        )
        .await
    }

    /// "budget_list" callback: active budgets with usage
    pub(crate) async fn budget_list(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        message_id: i64,
    ) -> Result<(), AppError> {
        match self.budgets.get_user_budgets(from.id).await {
            Ok(statuses) if statuses.is_empty() => {
                self.edit(EditMessageText::new(
                    chat_id,
                    message_id,
                    "📊 У вас пока нет активных бюджетов.\n\
                     Создайте свой первый бюджет для контроля расходов!",
                ))
                .await
            }
            Ok(statuses) => {
                let mut message = "💰 <b>Ваши активные бюджеты:</b>\n\n".to_string();
                for status in &statuses {
                    message.push_str(&self.budgets.format_budget_message(status));
                    message.push_str("\n\n");
                }

                self.edit(EditMessageText::new(chat_id, message_id, message).html())
                    .await
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to list budgets");
                self.edit(EditMessageText::new(
                    chat_id,
                    message_id,
                    "❌ Ошибка при получении бюджетов",
                ))
                .await
            }
        }
    }

    /// "budget_alerts" callback: exceeded / nearly exhausted budgets
    pub(crate) async fn budget_alerts(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        message_id: i64,
    ) -> Result<(), AppError> {
        match self.budgets.check_budget_alerts(from.id).await {
            Ok(alerts) if alerts.is_empty() => {
                self.edit(EditMessageText::new(
                    chat_id,
                    message_id,
                    "✅ Отлично! Все бюджеты в норме.\n\
                     Нет превышений или предупреждений.",
                ))
                .await
            }
            Ok(alerts) => {
                let message = format!(
                    "🔔 <b>Уведомления по бюджетам:</b>\n\n{}",
                    alerts.join("\n\n")
                );
                self.edit(EditMessageText::new(chat_id, message_id, message).html())
                    .await
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to check budget alerts");
                self.edit(EditMessageText::new(
                    chat_id,
                    message_id,
                    "❌ Ошибка при проверке уведомлений",
                ))
                .await
            }
        }
    }

    /// "budget_create" callback: start the dialog
    pub(crate) async fn start_budget_creation(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        message_id: i64,
    ) -> Result<(), AppError> {
        self.sessions.set(from.id, ChatState::AwaitingBudgetName);

        self.edit(
            EditMessageText::new(
                chat_id,
                message_id,
                "➕ <b>Создание нового бюджета</b>\n\n\
                 Введите название для вашего бюджета:\n\
                 (например: 'Продукты на февраль', 'Развлечения')",
            )
            .html()
            .with_inline_keyboard(keyboards::cancel_keyboard("budget_cancel")),
        )
        .await
    }

    /// Budget name entered
    pub(crate) async fn on_budget_name(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        text: &str,
    ) -> Result<(), AppError> {
        let name = text.trim();
        let length = name.chars().count();

        if length < 2 {
            return self
                .send(
                    SendMessage::new(
                        chat_id,
                        "❌ Название слишком короткое. Минимум 2 символа.\nПопробуйте еще раз:",
                    )
                    .with_inline_keyboard(keyboards::cancel_keyboard("budget_cancel")),
                )
                .await;
        }
        if length > 100 {
            return self
                .send(
                    SendMessage::new(
                        chat_id,
                        "❌ Название слишком длинное. Максимум 100 символов.\nПопробуйте еще раз:",
                    )
                    .with_inline_keyboard(keyboards::cancel_keyboard("budget_cancel")),
                )
                .await;
        }

        self.sessions.set(
            from.id,
            ChatState::AwaitingBudgetAmount {
                name: name.to_string(),
            },
        );

        self.send(
            SendMessage::new(
                chat_id,
                format!(
                    "✅ Название: <b>{}</b>\n\n\
                     💰 Теперь введите сумму бюджета в рублях:\n\
                     (например: 15000, 5000.50)",
                    name
                ),
            )
            .html()
            .with_inline_keyboard(keyboards::cancel_keyboard("budget_cancel")),
        )
        .await
    }

    /// Budget amount entered; offer the expense categories
    pub(crate) async fn on_budget_amount(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        text: &str,
        name: String,
    ) -> Result<(), AppError> {
        let max: Decimal = MAX_BUDGET_AMOUNT.parse().unwrap_or(Decimal::MAX);
        let amount = match parse_amount(text) {
            Some(amount) if amount > Decimal::ZERO && amount <= max => amount,
            _ => {
                return self
                    .send(
                        SendMessage::new(
                            chat_id,
                            "❌ Неверный формат суммы.\n\
                             Введите положительное число (например: 15000 или 5000.50):",
                        )
                        .with_inline_keyboard(keyboards::cancel_keyboard("budget_cancel")),
                    )
                    .await;
            }
        };

        let Some(user) = self.users.find_by_telegram_id(from.id).await? else {
            self.sessions.clear(from.id);
            return self
                .send(SendMessage::new(chat_id, "❌ Пользователь не найден"))
                .await;
        };

        let category_names: Vec<String> = self
            .categories
            .list_for_user(user.id, Some(TransactionType::Expense))
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();

        if category_names.is_empty() {
            self.sessions.clear(from.id);
            return self
                .send(SendMessage::new(
                    chat_id,
                    "❌ У вас нет категорий расходов.\n\
                     Сначала создайте транзакцию расхода, чтобы появились категории.",
                ))
                .await;
        }

        self.sessions
            .set(from.id, ChatState::AwaitingBudgetCategory { name, amount });

        self.send(
            SendMessage::new(
                chat_id,
                format!(
                    "✅ Сумма: <b>{} ₽</b>\n\n📂 Выберите категорию для бюджета:",
                    amount
                ),
            )
            .html()
            .with_inline_keyboard(keyboards::categories_keyboard(
                &category_names,
                "budget_cat_",
                "budget_cancel",
            )),
        )
        .await
    }

    /// Category picked from the inline keyboard
    pub(crate) async fn on_budget_category_callback(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        message_id: i64,
        category: &str,
    ) -> Result<(), AppError> {
        let Some(ChatState::AwaitingBudgetCategory { name, amount }) = self.sessions.get(from.id)
        else {
            return Ok(());
        };

        if category == "other" {
            return self
                .edit(
                    EditMessageText::new(chat_id, message_id, "📝 Введите название новой категории:")
                        .with_inline_keyboard(keyboards::cancel_keyboard("budget_cancel")),
                )
                .await;
        }

        self.sessions.set(
            from.id,
            ChatState::AwaitingBudgetPeriod {
                name,
                amount,
                category: category.to_string(),
            },
        );

        self.edit(
            EditMessageText::new(
                chat_id,
                message_id,
                format!(
                    "✅ Категория: <b>{}</b>\n\n📅 Выберите период действия бюджета:",
                    category
                ),
            )
            .html()
            .with_inline_keyboard(keyboards::period_keyboard()),
        )
        .await
    }

    /// Custom category name typed in
    pub(crate) async fn on_budget_category_text(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        text: &str,
        name: String,
        amount: Decimal,
    ) -> Result<(), AppError> {
        let category = text.trim();

        if category.chars().count() < 2 {
            return self
                .send(
                    SendMessage::new(
                        chat_id,
                        "❌ Название категории слишком короткое. Минимум 2 символа.\n\
                         Попробуйте еще раз:",
                    )
                    .with_inline_keyboard(keyboards::cancel_keyboard("budget_cancel")),
                )
                .await;
        }

        self.sessions.set(
            from.id,
            ChatState::AwaitingBudgetPeriod {
                name,
                amount,
                category: category.to_string(),
            },
        );

        self.send(
            SendMessage::new(
                chat_id,
                format!(
                    "✅ Категория: <b>{}</b>\n\n📅 Выберите период действия бюджета:",
                    category
                ),
            )
            .html()
            .with_inline_keyboard(keyboards::period_keyboard()),
        )
        .await
    }

    /// Period picked; create the budget
    pub(crate) async fn on_budget_period(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        message_id: i64,
        data: &str,
    ) -> Result<(), AppError> {
        let Some(ChatState::AwaitingBudgetPeriod {
            name,
            amount,
            category,
        }) = self.sessions.get(from.id)
        else {
            return Ok(());
        };

        let now = Utc::now().naive_utc();
        let window = match data {
            "period_current_month" => periods::current_month_window(now),
            "period_next_month" => periods::next_month_window(now),
            "period_custom" => {
                return self
                    .edit(
                        EditMessageText::new(
                            chat_id,
                            message_id,
                            "🗓️ Настройка пользовательского периода пока не реализована.\n\
                             Используйте готовые варианты выше.",
                        )
                        .with_inline_keyboard(keyboards::cancel_keyboard("budget_cancel")),
                    )
                    .await;
            }
            _ => return Ok(()),
        };

        let Some((start_date, end_date)) = window else {
            return Err(AppError::Internal("month out of range".to_string()));
        };

        self.sessions.clear(from.id);

        match self
            .budgets
            .create_budget(from.id, &name, amount, &category, start_date, end_date)
            .await
        {
            Ok(budget) => {
                let message = format!(
                    "🎉 <b>Бюджет успешно создан!</b>\n\n\
                     📝 Название: {}\n\
                     💰 Сумма: {} ₽\n\
                     📂 Категория: {}\n\
                     📅 Период: {} - {}\n\n\
                     💡 Теперь ваши расходы в этой категории будут отслеживаться автоматически!",
                    budget.name,
                    budget.amount,
                    category,
                    start_date.format("%d.%m.%Y"),
                    end_date.format("%d.%m.%Y"),
                );

                self.edit(EditMessageText::new(chat_id, message_id, message).html())
                    .await
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create budget");
                self.edit(EditMessageText::new(
                    chat_id,
                    message_id,
                    format!("❌ Ошибка при создании бюджета: {}", e),
                ))
                .await
            }
        }
    }
}
