//! Add-transaction dialog and transaction listing

use rust_decimal::Decimal;

use crate::domain::entities::TransactionType;
use crate::domain::ports::{
    BudgetRepository, CategoryRepository, EditMessageText, ReportRepository, SendMessage,
    TelegramApi, TelegramUser, TransactionRepository, UserRepository,
};
use crate::error::AppError;
use crate::handlers::{parse_amount, ChatState, Dispatcher};
use crate::keyboards;

impl<UR, CR, TR, BR, RR, TG> Dispatcher<UR, CR, TR, BR, RR, TG>
where
    UR: UserRepository,
    CR: CategoryRepository,
    TR: TransactionRepository,
    BR: BudgetRepository,
    RR: ReportRepository,
    TG: TelegramApi,
{
    /// Entry point for the "add income" / "add expense" buttons
    pub(crate) async fn start_add_transaction(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        kind: TransactionType,
    ) -> Result<(), AppError> {
        self.sessions.set(from.id, ChatState::AwaitingAmount { kind });

        let prompt = match kind {
            TransactionType::Income => "💰 Добавление дохода\n\nВведите сумму дохода в рублях:",
            TransactionType::Expense => "💸 Добавление расхода\n\nВведите сумму расхода в рублях:",
        };

        self.send(
            SendMessage::new(chat_id, prompt)
                .with_inline_keyboard(keyboards::cancel_keyboard("transaction_cancel")),
        )
        .await
    }

    /// Amount entered; ask for the category
    pub(crate) async fn on_transaction_amount(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        text: &str,
        kind: TransactionType,
    ) -> Result<(), AppError> {
        let amount = match parse_amount(text) {
            Some(amount) if amount > Decimal::ZERO => amount,
            Some(_) => {
                return self
                    .send(
                        SendMessage::new(chat_id, "❌ Сумма должна быть больше 0. Попробуйте снова:")
                            .with_inline_keyboard(keyboards::cancel_keyboard("transaction_cancel")),
                    )
                    .await;
            }
            None => {
                return self
                    .send(
                        SendMessage::new(
                            chat_id,
                            "❌ Неверный формат суммы. Введите число (например: 1500 или 150.50):",
                        )
                        .with_inline_keyboard(keyboards::cancel_keyboard("transaction_cancel")),
                    )
                    .await;
            }
        };

        self.sessions
            .set(from.id, ChatState::AwaitingCategory { kind, amount });

        let type_text = match kind {
            TransactionType::Income => "дохода",
            TransactionType::Expense => "расхода",
        };

        let category_names = match self.users.find_by_telegram_id(from.id).await? {
            Some(user) => self
                .categories
                .list_for_user(user.id, Some(kind))
                .await?
                .into_iter()
                .map(|c| c.name)
                .collect::<Vec<_>>(),
            None => Vec::new(),
        };

        if category_names.is_empty() {
            self.send(
                SendMessage::new(
                    chat_id,
                    format!("📝 Введите название категории для {}:", type_text),
                )
                .with_inline_keyboard(keyboards::cancel_keyboard("transaction_cancel")),
            )
            .await
        } else {
            self.send(
                SendMessage::new(
                    chat_id,
                    format!("📂 Выберите категорию для {}:", type_text),
                )
                .with_inline_keyboard(keyboards::categories_keyboard(
                    &category_names,
                    "category_",
                    "transaction_cancel",
                )),
            )
            .await
        }
    }

    /// Category picked from the inline keyboard
    pub(crate) async fn on_category_callback(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        message_id: i64,
        category: &str,
    ) -> Result<(), AppError> {
        let Some(ChatState::AwaitingCategory { kind, amount }) = self.sessions.get(from.id) else {
            return Ok(());
        };

        if category == "other" {
            return self
                .edit(
                    EditMessageText::new(chat_id, message_id, "📝 Введите название новой категории:")
                        .with_inline_keyboard(keyboards::cancel_keyboard("transaction_cancel")),
                )
                .await;
        }

        self.sessions.set(
            from.id,
            ChatState::AwaitingDescription {
                kind,
                amount,
                category: category.to_string(),
            },
        );

        self.edit(
            EditMessageText::new(chat_id, message_id, "📝 Введите описание транзакции:")
                .with_inline_keyboard(keyboards::description_keyboard()),
        )
        .await
    }

    /// Category name typed in
    pub(crate) async fn on_category_text(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        text: &str,
        kind: TransactionType,
        amount: Decimal,
    ) -> Result<(), AppError> {
        self.sessions.set(
            from.id,
            ChatState::AwaitingDescription {
                kind,
                amount,
                category: text.trim().to_string(),
            },
        );

        self.send(
            SendMessage::new(chat_id, "📝 Введите описание транзакции:")
                .with_inline_keyboard(keyboards::description_keyboard()),
        )
        .await
    }

    /// Description typed in; record the transaction
    pub(crate) async fn on_description_text(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        text: &str,
    ) -> Result<(), AppError> {
        let Some(ChatState::AwaitingDescription {
            kind,
            amount,
            category,
        }) = self.sessions.clear(from.id)
        else {
            return Ok(());
        };

        let description = match text.trim().to_lowercase().as_str() {
            "пропустить" | "skip" | "-" => None,
            _ => Some(text.trim().to_string()),
        };

        match self
            .transactions
            .add_transaction(from.id, amount, &category, kind, description, None)
            .await
        {
            Ok((transaction, category)) => {
                let summary = self
                    .transactions
                    .format_transaction_message(&transaction, Some(&category.name));

                self.send(
                    SendMessage::new(
                        chat_id,
                        format!("✅ Транзакция успешно добавлена!\n\n{}", summary),
                    )
                    .html()
                    .with_reply_keyboard(keyboards::main_keyboard()),
                )
                .await
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create transaction");
                self.send(
                    SendMessage::new(chat_id, "❌ Ошибка при создании транзакции. Попробуйте позже.")
                        .with_reply_keyboard(keyboards::main_keyboard()),
                )
                .await
            }
        }
    }

    /// Description skipped from the inline keyboard; record the transaction
    pub(crate) async fn on_description_skip(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        message_id: i64,
    ) -> Result<(), AppError> {
        let Some(ChatState::AwaitingDescription {
            kind,
            amount,
            category,
        }) = self.sessions.clear(from.id)
        else {
            return Ok(());
        };

        match self
            .transactions
            .add_transaction(from.id, amount, &category, kind, None, None)
            .await
        {
            Ok((transaction, category)) => {
                let summary = self
                    .transactions
                    .format_transaction_message(&transaction, Some(&category.name));

                self.edit(
                    EditMessageText::new(
                        chat_id,
                        message_id,
                        format!("✅ Транзакция успешно добавлена!\n\n{}", summary),
                    )
                    .html(),
                )
                .await
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create transaction");
                self.edit(EditMessageText::new(
                    chat_id,
                    message_id,
                    "❌ Ошибка при создании транзакции. Попробуйте позже.",
                ))
                .await
            }
        }
    }

    /// "My transactions" button: last 10 operations
    pub(crate) async fn view_transactions(
        &self,
        from: &TelegramUser,
        chat_id: i64,
    ) -> Result<(), AppError> {
        match self
            .transactions
            .get_user_transactions(from.id, 10, None, None)
            .await
        {
            Ok(transactions) if transactions.is_empty() => {
                self.send(SendMessage::new(
                    chat_id,
                    "📋 У вас пока нет транзакций.\n\
                     Используйте кнопки меню для добавления доходов или расходов.",
                ))
                .await
            }
            Ok(transactions) => {
                let mut message = "📊 <b>Последние 10 транзакций:</b>\n\n".to_string();

                for (i, (transaction, category_name)) in transactions.iter().enumerate() {
                    let type_emoji = match transaction.kind {
                        TransactionType::Income => "💰",
                        TransactionType::Expense => "💸",
                    };

                    message.push_str(&format!(
                        "{}. {} {} руб. - {}\n   📅 {}\n",
                        i + 1,
                        type_emoji,
                        transaction.amount,
                        category_name.as_deref().unwrap_or("Без категории"),
                        transaction.transaction_date.format("%d.%m.%Y %H:%M"),
                    ));

                    if let Some(description) = &transaction.description {
                        message.push_str(&format!("   📝 {}\n", description));
                    }

                    message.push('\n');
                }

                self.send(SendMessage::new(chat_id, message).html()).await
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to list transactions");
                self.send(SendMessage::new(chat_id, "❌ Ошибка при получении транзакций"))
                    .await
            }
        }
    }
}
