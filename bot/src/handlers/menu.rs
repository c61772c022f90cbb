//! Settings menu and fallbacks

use crate::domain::ports::{
    BudgetRepository, CategoryRepository, EditMessageText, ReportRepository, SendMessage,
    TelegramApi, TransactionRepository, UserRepository,
};
use crate::error::AppError;
use crate::handlers::Dispatcher;
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
    /// "Settings" button
    pub(crate) async fn settings_menu(&self, chat_id: i64) -> Result<(), AppError> {
        self.send(
            SendMessage::new(chat_id, "⚙️ Настройки бота:")
                .with_inline_keyboard(keyboards::settings_keyboard()),
        )
        .await
    }

    /// "settings_*" callbacks
    pub(crate) async fn settings_callback(
        &self,
        chat_id: i64,
        message_id: i64,
        data: &str,
    ) -> Result<(), AppError> {
        let text = match data {
            "settings_categories" => {
                "📂 Управление категориями\n\n\
                 Здесь вы можете управлять своими категориями доходов и расходов.\n\
                 Функция в разработке."
            }
            "settings_notifications" => {
                "🔔 Настройки уведомлений\n\n\
                 Здесь вы можете настроить уведомления о превышении бюджетов.\n\
                 Функция в разработке."
            }
            "settings_clear_data" => {
                "🗑️ Очистка данных\n\n\
                 ⚠️ Внимание! Эта операция удалит все ваши данные.\n\
                 Функция в разработке."
            }
            _ => return Ok(()),
        };

        self.edit(EditMessageText::new(chat_id, message_id, text)).await
    }

    /// Free text outside any dialog
    pub(crate) async fn unknown_input(&self, chat_id: i64) -> Result<(), AppError> {
        self.send(
            SendMessage::new(chat_id, "❓ Выберите действие из меню")
                .with_reply_keyboard(keyboards::main_keyboard()),
        )
        .await
    }
}
