//! Report menu callbacks

use crate::domain::ports::{
    BudgetRepository, CategoryRepository, EditMessageText, ReportRepository, SendMessage,
    TelegramApi, TelegramUser, TransactionRepository, UserRepository,
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
    /// "Reports" button
    pub(crate) async fn reports_menu(&self, chat_id: i64) -> Result<(), AppError> {
        self.send(
            SendMessage::new(chat_id, "📈 Генерация отчетов:")
                .with_inline_keyboard(keyboards::reports_keyboard()),
        )
        .await
    }

    /// "report_monthly" callback
    pub(crate) async fn monthly_report(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        message_id: i64,
    ) -> Result<(), AppError> {
        match self
            .reports
            .generate_monthly_report(from.id, None, None, true)
            .await
        {
            Ok(report) => {
                self.edit(
                    EditMessageText::new(
                        chat_id,
                        message_id,
                        format!("📊 <b>Месячный отчет</b>\n\n{}", report),
                    )
                    .html(),
                )
                .await
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to generate monthly report");
                self.edit(EditMessageText::new(
                    chat_id,
                    message_id,
                    "❌ Ошибка при создании отчета",
                ))
                .await
            }
        }
    }

    /// "report_weekly" callback
    pub(crate) async fn weekly_report(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        message_id: i64,
    ) -> Result<(), AppError> {
        match self.reports.generate_weekly_report(from.id).await {
            Ok(report) => {
                self.edit(
                    EditMessageText::new(
                        chat_id,
                        message_id,
                        format!("📈 <b>Недельный отчет</b>\n\n{}", report),
                    )
                    .html(),
                )
                .await
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to generate weekly report");
                self.edit(EditMessageText::new(
                    chat_id,
                    message_id,
                    "❌ Ошибка при создании отчета",
                ))
                .await
            }
        }
    }

    /// "report_list" callback: saved reports, newest first
    pub(crate) async fn report_list(
        &self,
        from: &TelegramUser,
        chat_id: i64,
        message_id: i64,
    ) -> Result<(), AppError> {
        match self.reports.get_user_reports(from.id, 10).await {
            Ok(reports) if reports.is_empty() => {
                self.edit(EditMessageText::new(
                    chat_id,
                    message_id,
                    "📚 У вас пока нет сохраненных отчетов.\n\
                     Сгенерируйте месячный или недельный отчет, и он появится здесь.",
                ))
                .await
            }
            Ok(reports) => {
                let mut message = "📚 <b>Сохраненные отчеты:</b>\n\n".to_string();
                for report in &reports {
                    message.push_str(&format!(
                        "{} <b>{}</b>\n   📆 {}\n\n",
                        report.type_icon(),
                        report.name,
                        report.period_description(),
                    ));
                }

                self.edit(EditMessageText::new(chat_id, message_id, message).html())
                    .await
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to list reports");
                self.edit(EditMessageText::new(
                    chat_id,
                    message_id,
                    "❌ Ошибка при получении отчетов",
                ))
                .await
            }
        }
    }
}
