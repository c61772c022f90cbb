//! Finance Bot entry point
//!
//! Wires the PostgreSQL repositories and services into the update dispatcher
//! and runs the long-polling loop against the Telegram Bot API.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finbot::adapters::{
    PostgresBudgetRepository, PostgresCategoryRepository, PostgresReportRepository,
    PostgresTransactionRepository, PostgresUserRepository, TelegramClientImpl,
};
use finbot::app::{BudgetService, ReportService, TransactionService};
use finbot::domain::ports::TelegramApi;
use finbot::handlers::Dispatcher;
use finbot::{db, Config};

/// Poll timeout for getUpdates
const POLL_TIMEOUT_SECS: u64 = 30;
/// Backoff after a failed poll
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,finbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Finance Bot...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL and make sure the schema exists
    tracing::info!("Connecting to database...");
    let db = db::connect(&config.database_url, config.debug).await?;
    db::create_tables(&db).await?;
    tracing::info!("Database initialized");

    // Create adapters
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
    let category_repo = Arc::new(PostgresCategoryRepository::new(db.clone()));
    let transaction_repo = Arc::new(PostgresTransactionRepository::new(db.clone()));
    let budget_repo = Arc::new(PostgresBudgetRepository::new(db.clone()));
    let report_repo = Arc::new(PostgresReportRepository::new(db.clone()));

    let telegram = Arc::new(TelegramClientImpl::new(&config.telegram_bot_token));

    // Create application services
    let transaction_service = Arc::new(TransactionService::new(
        user_repo.clone(),
        category_repo.clone(),
        transaction_repo.clone(),
    ));

    let budget_service = Arc::new(BudgetService::new(
        user_repo.clone(),
        category_repo.clone(),
        budget_repo.clone(),
        transaction_repo.clone(),
    ));

    let report_service = Arc::new(ReportService::new(
        user_repo.clone(),
        transaction_repo.clone(),
        report_repo.clone(),
    ));

    let dispatcher = Dispatcher::new(
        user_repo,
        category_repo,
        transaction_service,
        budget_service,
        report_service,
        telegram.clone(),
    );

    tracing::info!("Handlers wired, polling for updates");

    // Long-polling loop
    let mut offset: Option<i64> = None;
    loop {
        match telegram.get_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);
                    let update_id = update.update_id;

                    if let Err(e) = dispatcher.dispatch(update).await {
                        tracing::error!(update_id, error = %e, "Failed to handle update");
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "getUpdates failed, retrying");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
            }
        }
    }
}
