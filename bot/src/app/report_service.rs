//! Report service
//!
//! Builds monthly, weekly and per-category reports, persisting the
//! aggregates as JSON alongside the rendered message.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::app::periods;
use crate::domain::entities::{
    MonthlySummary, NewReport, Report, ReportType, TransactionFilter, TransactionType, User,
};
use crate::domain::ports::{ReportRepository, TransactionRepository, UserRepository};
use crate::error::AppError;

/// Per-day aggregate inside a weekly report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayStats {
    pub income: Decimal,
    pub expense: Decimal,
    pub transactions_count: i64,
}

/// Service for generating and listing reports
pub struct ReportService<UR, TR, RR>
where
    UR: UserRepository,
    TR: TransactionRepository,
    RR: ReportRepository,
{
    users: Arc<UR>,
    transactions: Arc<TR>,
    reports: Arc<RR>,
}

impl<UR, TR, RR> ReportService<UR, TR, RR>
where
    UR: UserRepository,
    TR: TransactionRepository,
    RR: ReportRepository,
{
    pub fn new(users: Arc<UR>, transactions: Arc<TR>, reports: Arc<RR>) -> Self {
        Self {
            users,
            transactions,
            reports,
        }
    }

    /// Build the report for one calendar month (default: the current one),
    /// optionally persisting it.
    pub async fn generate_monthly_report(
        &self,
        telegram_id: i64,
        year: Option<i32>,
        month: Option<u32>,
        save_report: bool,
    ) -> Result<String, AppError> {
        let user = self.require_user(telegram_id).await?;

        let now = Utc::now().naive_utc();
        let target_year = year.unwrap_or_else(|| now.year());
        let target_month = month.unwrap_or_else(|| now.month());

        let (start, end) = periods::month_bounds(target_year, target_month)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid month: {}", target_month)))?;

        let total_income = self
            .transactions
            .total(user.id, start, end, TransactionType::Income)
            .await?;
        let total_expenses = self
            .transactions
            .total(user.id, start, end, TransactionType::Expense)
            .await?;
        let mut top_expense_categories = self
            .transactions
            .sum_by_category(user.id, start, end, TransactionType::Expense)
            .await?;
        top_expense_categories.truncate(5);

        let summary = MonthlySummary {
            year: target_year,
            month: target_month,
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            top_expense_categories,
        };

        if save_report {
            let data = serde_json::to_string(&summary)
                .map_err(|e| AppError::Internal(e.to_string()))?;

            self.reports
                .create(&NewReport {
                    name: format!("Месячный отчет {}-{:02}", target_year, target_month),
                    kind: ReportType::Monthly,
                    user_id: user.id,
                    start_date: start,
                    end_date: end,
                    data: Some(data),
                })
                .await?;
        }

        Ok(format_monthly_report(&summary))
    }

    /// Build and persist the report for the last 7 days
    pub async fn generate_weekly_report(&self, telegram_id: i64) -> Result<String, AppError> {
        let user = self.require_user(telegram_id).await?;

        let end = Utc::now().naive_utc();
        let start = end - Duration::days(7);

        let transactions = self
            .transactions
            .list(&TransactionFilter {
                user_id: user.id,
                start_date: Some(start),
                end_date: Some(end),
                limit: 100,
                ..Default::default()
            })
            .await?;

        let mut daily_stats: BTreeMap<NaiveDate, DayStats> = BTreeMap::new();
        for (transaction, _) in &transactions {
            let stats = daily_stats
                .entry(transaction.transaction_date.date())
                .or_default();

            match transaction.kind {
                TransactionType::Income => stats.income += transaction.amount,
                TransactionType::Expense => stats.expense += transaction.amount,
            }
            stats.transactions_count += 1;
        }

        let serializable: BTreeMap<String, &DayStats> = daily_stats
            .iter()
            .map(|(date, stats)| (date.to_string(), stats))
            .collect();
        let data =
            serde_json::to_string(&serializable).map_err(|e| AppError::Internal(e.to_string()))?;

        self.reports
            .create(&NewReport {
                name: format!(
                    "Недельный отчет {} - {}",
                    start.format("%d.%m"),
                    end.format("%d.%m.%Y")
                ),
                kind: ReportType::Weekly,
                user_id: user.id,
                start_date: start,
                end_date: end,
                data: Some(data),
            })
            .await?;

        Ok(format_weekly_report(&daily_stats, start, end))
    }

    /// Per-category breakdown for the current month, not persisted
    pub async fn generate_categories_report(&self, telegram_id: i64) -> Result<String, AppError> {
        let user = self.require_user(telegram_id).await?;

        let now = Utc::now().naive_utc();
        let (start, end) = periods::month_bounds(now.year(), now.month())
            .ok_or_else(|| AppError::Internal("month out of range".to_string()))?;

        let expense_categories = self
            .transactions
            .sum_by_category(user.id, start, end, TransactionType::Expense)
            .await?;
        let income_categories = self
            .transactions
            .sum_by_category(user.id, start, end, TransactionType::Income)
            .await?;

        let mut message = format!(
            "📊 <b>Отчет по категориям за {}</b>\n\n",
            now.format("%m.%Y")
        );

        if !expense_categories.is_empty() {
            message.push_str("💸 <b>Расходы:</b>\n");
            for category in &expense_categories {
                message.push_str(&format!(
                    "• {}: {} руб.\n",
                    category.category_name, category.total_amount
                ));
            }
            message.push('\n');
        }

        if !income_categories.is_empty() {
            message.push_str("💰 <b>Доходы:</b>\n");
            for category in &income_categories {
                message.push_str(&format!(
                    "• {}: {} руб.\n",
                    category.category_name, category.total_amount
                ));
            }
        }

        if expense_categories.is_empty() && income_categories.is_empty() {
            message.push_str("Транзакций за текущий месяц не найдено.");
        }

        Ok(message)
    }

    /// A user's saved reports, newest first
    pub async fn get_user_reports(
        &self,
        telegram_id: i64,
        limit: usize,
    ) -> Result<Vec<Report>, AppError> {
        let Some(user) = self.users.find_by_telegram_id(telegram_id).await? else {
            return Ok(Vec::new());
        };

        let mut reports = self.reports.list_for_user(user.id, None).await?;
        reports.truncate(limit);
        Ok(reports)
    }

    async fn require_user(&self, telegram_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Пользователь не найден".to_string()))
    }
}

fn format_monthly_report(summary: &MonthlySummary) -> String {
    let mut message = format!(
        "📊 <b>Месячный отчет за {}-{:02}</b>\n\n\
         💰 Доходы: {} руб.\n\
         💸 Расходы: {} руб.\n\
         💵 Баланс: {} руб.\n\n",
        summary.year, summary.month, summary.total_income, summary.total_expenses, summary.balance,
    );

    if summary.balance > Decimal::ZERO {
        message.push_str("✅ Отличный месяц! Доходы превышают расходы.\n\n");
    } else if summary.balance == Decimal::ZERO {
        message.push_str("📊 Доходы и расходы сбалансированы.\n\n");
    } else {
        message.push_str("⚠️ Расходы превышают доходы. Стоит пересмотреть бюджет.\n\n");
    }

    if !summary.top_expense_categories.is_empty() {
        message.push_str("📈 <b>Топ категорий расходов:</b>\n");
        for (i, expense) in summary.top_expense_categories.iter().enumerate() {
            message.push_str(&format!(
                "{}. {}: {} руб.\n",
                i + 1,
                expense.category_name,
                expense.total_amount
            ));
        }
    }

    message
}

fn format_weekly_report(
    daily_stats: &BTreeMap<NaiveDate, DayStats>,
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
) -> String {
    let mut message = format!(
        "📅 <b>Недельный отчет</b>\n📆 {} - {}\n\n",
        start.format("%d.%m"),
        end.format("%d.%m.%Y")
    );

    let total_income: Decimal = daily_stats.values().map(|s| s.income).sum();
    let total_expense: Decimal = daily_stats.values().map(|s| s.expense).sum();
    let total_transactions: i64 = daily_stats.values().map(|s| s.transactions_count).sum();

    message.push_str(&format!(
        "💰 Общие доходы: {} руб.\n\
         💸 Общие расходы: {} руб.\n\
         💵 Баланс: {} руб.\n\
         📊 Всего транзакций: {}\n\n",
        total_income,
        total_expense,
        total_income - total_expense,
        total_transactions,
    ));

    if daily_stats.is_empty() {
        message.push_str("За эту неделю транзакций не было.");
    } else {
        message.push_str("📈 <b>По дням:</b>\n");
        for (date, stats) in daily_stats {
            message.push_str(&format!(
                "• {}: +{} / -{} руб. ({} операций)\n",
                date.format("%d.%m"),
                stats.income,
                stats.expense,
                stats.transactions_count,
            ));
        }
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewTransaction;
    use crate::domain::ports::TransactionRepository as _;
    use crate::test_utils::{
        InMemoryReportRepository, InMemoryTransactionRepository, InMemoryUserRepository, test_user,
    };

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        transactions: Arc<InMemoryTransactionRepository>,
        reports: Arc<InMemoryReportRepository>,
        telegram_id: i64,
        user_id: i64,
    }

    impl Fixture {
        async fn new() -> Self {
            let user = test_user();
            let telegram_id = user.telegram_id;
            let user_id = user.id;
            Self {
                users: Arc::new(InMemoryUserRepository::new().with_user(user)),
                transactions: Arc::new(InMemoryTransactionRepository::new()),
                reports: Arc::new(InMemoryReportRepository::new()),
                telegram_id,
                user_id,
            }
        }

        fn service(
            &self,
        ) -> ReportService<
            InMemoryUserRepository,
            InMemoryTransactionRepository,
            InMemoryReportRepository,
        > {
            ReportService::new(
                self.users.clone(),
                self.transactions.clone(),
                self.reports.clone(),
            )
        }

        async fn spend(&self, amount: i64, kind: TransactionType) {
            self.transactions
                .create(&NewTransaction {
                    amount: Decimal::from(amount),
                    description: None,
                    kind,
                    user_id: self.user_id,
                    category_id: 1,
                    transaction_date: None,
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn monthly_report_requires_known_user() {
        let fixture = Fixture::new().await;
        let service = fixture.service();

        let result = service.generate_monthly_report(999, None, None, true).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Пользователь не найден"));
    }

    #[tokio::test]
    async fn monthly_report_renders_and_persists() {
        let fixture = Fixture::new().await;
        let service = fixture.service();

        fixture.spend(50000, TransactionType::Income).await;
        fixture.spend(30000, TransactionType::Expense).await;

        let message = service
            .generate_monthly_report(fixture.telegram_id, None, None, true)
            .await
            .unwrap();

        assert!(message.contains("💰 Доходы: 50000 руб."));
        assert!(message.contains("💸 Расходы: 30000 руб."));
        assert!(message.contains("✅ Отличный месяц!"));

        let saved = service
            .get_user_reports(fixture.telegram_id, 10)
            .await
            .unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].kind, ReportType::Monthly);

        // Persisted payload is valid JSON
        let summary: MonthlySummary =
            serde_json::from_str(saved[0].data.as_deref().unwrap()).unwrap();
        assert_eq!(summary.total_income, Decimal::from(50000));
    }

    #[tokio::test]
    async fn monthly_report_warns_on_negative_balance() {
        let fixture = Fixture::new().await;
        let service = fixture.service();

        fixture.spend(1000, TransactionType::Income).await;
        fixture.spend(2000, TransactionType::Expense).await;

        let message = service
            .generate_monthly_report(fixture.telegram_id, None, None, false)
            .await
            .unwrap();

        assert!(message.contains("⚠️ Расходы превышают доходы."));
        assert!(service
            .get_user_reports(fixture.telegram_id, 10)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn weekly_report_groups_by_day() {
        let fixture = Fixture::new().await;
        let service = fixture.service();

        fixture.spend(1000, TransactionType::Income).await;
        fixture.spend(400, TransactionType::Expense).await;

        let message = service
            .generate_weekly_report(fixture.telegram_id)
            .await
            .unwrap();

        assert!(message.contains("💰 Общие доходы: 1000 руб."));
        assert!(message.contains("💸 Общие расходы: 400 руб."));
        assert!(message.contains("📊 Всего транзакций: 2"));
        assert!(message.contains("📈 <b>По дням:</b>"));

        let saved = service
            .get_user_reports(fixture.telegram_id, 10)
            .await
            .unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].kind, ReportType::Weekly);
    }

    #[tokio::test]
    async fn weekly_report_without_transactions() {
        let fixture = Fixture::new().await;
        let service = fixture.service();

        let message = service
            .generate_weekly_report(fixture.telegram_id)
            .await
            .unwrap();

        assert!(message.contains("За эту неделю транзакций не было."));
    }

    #[tokio::test]
    async fn categories_report_empty_month() {
        let fixture = Fixture::new().await;
        let service = fixture.service();

        let message = service
            .generate_categories_report(fixture.telegram_id)
            .await
            .unwrap();

        assert!(message.contains("Транзакций за текущий месяц не найдено."));
    }
}
