//! Command handlers: /start, /help, /stats

use rust_decimal::Decimal;

use crate::domain::entities::NewUser;
use crate::domain::ports::{
    BudgetRepository, CategoryRepository, ReportRepository, SendMessage, TelegramApi,
    TelegramUser, TransactionRepository, UserRepository,
};
use crate::error::AppError;
use crate::handlers::Dispatcher;
use crate::keyboards;

const HELP_TEXT: &str = "🤖 <b>Команды бота:</b>\n\n\
/start - Запуск бота\n\
/help - Показать справку\n\
/stats - Быстрая статистика\n\n\
📋 <b>Основные функции:</b>\n\n\
💰 <b>Транзакции:</b>\n\
• Добавление доходов и расходов\n\
• Категоризация операций\n\
• Просмотр истории\n\n\
📊 <b>Бюджеты:</b>\n\
• Создание бюджетов по категориям\n\
• Отслеживание лимитов\n\
• Уведомления о превышении\n\n\
📈 <b>Отчеты:</b>\n\
• Месячные и недельные отчеты\n\
• Анализ трат по категориям\n\
• Сохранение отчетов\n\n\
⚙️ <b>Настройки:</b>\n\
• Управление категориями\n\
• Настройка уведомлений\n\
• Очистка данных\n\n\
❓ <b>Примеры использования:</b>\n\
• 'Добавить доход' → выбор категории → ввод суммы\n\
• 'Мои бюджеты' → просмотр текущих лимитов\n\
• 'Отчеты' → выбор типа отчета";

impl<UR, CR, TR, BR, RR, TG> Dispatcher<UR, CR, TR, BR, RR, TG>
where
    UR: UserRepository,
    CR: CategoryRepository,
    TR: TransactionRepository,
    BR: BudgetRepository,
    RR: ReportRepository,
    TG: TelegramApi,
{
    /// /start: register the user or welcome a returning one
    pub(crate) async fn start_command(
        &self,
        from: &TelegramUser,
        chat_id: i64,
    ) -> Result<(), AppError> {
        tracing::info!(telegram_id = from.id, "Start command");

        let registered = match self.users.find_by_telegram_id(from.id).await {
            Ok(Some(user)) => {
                tracing::info!(telegram_id = from.id, user_id = user.id, "Known user");
                Ok(false)
            }
            Ok(None) => self
                .users
                .create(&NewUser {
                    telegram_id: from.id,
                    username: from.username.clone(),
                    first_name: Some(from.first_name.clone()),
                    last_name: from.last_name.clone(),
                    language_code: from.language_code.clone(),
                })
                .await
                .map(|user| {
                    tracing::info!(telegram_id = from.id, user_id = user.id, "User created");
                    true
                }),
            Err(e) => Err(e),
        };

        let welcome = match registered {
            Ok(true) => format!(
                "👋 Добро пожаловать, {}!\n\n\
                 🏦 Этот бот поможет вам управлять личными финансами:\n\
                 • 💰 Отслеживать доходы и расходы\n\
                 • 📊 Создавать бюджеты\n\
                 • 📈 Генерировать отчеты\n\
                 • 🔔 Получать уведомления\n\n\
                 Выберите действие в меню ниже 👇",
                from.first_name
            ),
            Ok(false) => format!(
                "👋 С возвращением, {}!\n\nВыберите действие в меню ниже 👇",
                from.first_name
            ),
            Err(e) => {
                tracing::error!(error = %e, "Start command failed");
                return self
                    .send(SendMessage::new(
                        chat_id,
                        "❌ Произошла ошибка при инициализации. Попробуйте позже.",
                    ))
                    .await;
            }
        };

        self.send(
            SendMessage::new(chat_id, welcome).with_reply_keyboard(keyboards::main_keyboard()),
        )
        .await
    }

    /// /help
    pub(crate) async fn help_command(&self, chat_id: i64) -> Result<(), AppError> {
        self.send(SendMessage::new(chat_id, HELP_TEXT).html()).await
    }

    /// /stats: current-month totals
    pub(crate) async fn stats_command(
        &self,
        from: &TelegramUser,
        chat_id: i64,
    ) -> Result<(), AppError> {
        match self.transactions.get_monthly_statistics(from.id, None, None).await {
            Ok(stats) => {
                let verdict = if stats.balance > Decimal::ZERO {
                    "✅ Месяц идет успешно!"
                } else {
                    "⚠️ Стоит пересмотреть расходы"
                };

                let message = format!(
                    "📊 <b>Быстрая статистика за {}</b>\n\n\
                     💰 Доходы: {} руб.\n\
                     💸 Расходы: {} руб.\n\
                     💵 Баланс: {} руб.\n\n\
                     {}",
                    stats.period, stats.total_income, stats.total_expense, stats.balance, verdict,
                );

                self.send(SendMessage::new(chat_id, message).html()).await
            }
            Err(e) => {
                tracing::error!(error = %e, "Stats command failed");
                self.send(SendMessage::new(chat_id, "❌ Не удалось получить статистику"))
                    .await
            }
        }
    }
}
