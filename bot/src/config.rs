use std::env;

#[derive(Clone)]
pub struct Config {
    /// Token issued by @BotFather
    pub telegram_bot_token: String,
    pub database_url: String,
    pub environment: String,
    /// Enables SQL statement logging
    pub debug: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .expect("TELEGRAM_BOT_TOKEN must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            debug: env::var("DEBUG")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string()),
        }
    }
}
