//! Keyboard builders for the bot's menus and dialogs

use crate::domain::ports::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardMarkup,
};

/// Main-menu button labels, in display order
pub const MAIN_MENU_BUTTONS: [&str; 7] = [
    "➕ Добавить доход",
    "➖ Добавить расход",
    "📊 Мои транзакции",
    "💰 Мои бюджеты",
    "📈 Отчеты",
    "⚙️ Настройки",
    "ℹ️ Помощь",
];

/// Persistent main menu
pub fn main_keyboard() -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup {
        keyboard: vec![
            vec![
                KeyboardButton::new("➕ Добавить доход"),
                KeyboardButton::new("➖ Добавить расход"),
            ],
            vec![
                KeyboardButton::new("📊 Мои транзакции"),
                KeyboardButton::new("💰 Мои бюджеты"),
            ],
            vec![
                KeyboardButton::new("📈 Отчеты"),
                KeyboardButton::new("⚙️ Настройки"),
            ],
            vec![KeyboardButton::new("ℹ️ Помощь")],
        ],
        resize_keyboard: true,
        one_time_keyboard: false,
    }
}

/// Report menu
pub fn reports_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![InlineKeyboardButton::new("📊 Месячный отчет", "report_monthly")],
            vec![InlineKeyboardButton::new("📅 Недельный отчет", "report_weekly")],
            vec![InlineKeyboardButton::new("📋 Мои отчеты", "report_list")],
        ],
    }
}

/// Budget menu
pub fn budget_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![InlineKeyboardButton::new("➕ Создать бюджет", "budget_create")],
            vec![InlineKeyboardButton::new("📊 Мои бюджеты", "budget_list")],
            vec![InlineKeyboardButton::new(
                "🔔 Проверить уведомления",
                "budget_alerts",
            )],
        ],
    }
}

/// Settings menu
pub fn settings_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![InlineKeyboardButton::new(
                "📂 Управление категориями",
                "settings_categories",
            )],
            vec![InlineKeyboardButton::new(
                "🔔 Настройки уведомлений",
                "settings_notifications",
            )],
            vec![InlineKeyboardButton::new(
                "🗑️ Очистить данные",
                "settings_clear_data",
            )],
        ],
    }
}

/// Category picker: one row per category plus "other" and cancel.
/// `prefix` ends with the separator, e.g. "category_" or "budget_cat_".
pub fn categories_keyboard(
    categories: &[String],
    prefix: &str,
    cancel_data: &str,
) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = categories
        .iter()
        .map(|name| {
            vec![InlineKeyboardButton::new(
                name.clone(),
                format!("{}{}", prefix, name),
            )]
        })
        .collect();

    rows.push(vec![InlineKeyboardButton::new(
        "📝 Другая категория",
        format!("{}other", prefix),
    )]);
    rows.push(vec![InlineKeyboardButton::new("❌ Отмена", cancel_data)]);

    InlineKeyboardMarkup {
        inline_keyboard: rows,
    }
}

/// Budget period picker
pub fn period_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![InlineKeyboardButton::new(
                "📅 Текущий месяц",
                "period_current_month",
            )],
            vec![InlineKeyboardButton::new(
                "📆 Следующий месяц",
                "period_next_month",
            )],
            vec![InlineKeyboardButton::new(
                "🗓️ Настроить период",
                "period_custom",
            )],
            vec![InlineKeyboardButton::new("❌ Отмена", "budget_cancel")],
        ],
    }
}

/// Description prompt: skip + cancel
pub fn description_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![InlineKeyboardButton::new("⏭️ Пропустить", "description_skip")],
            vec![InlineKeyboardButton::new("❌ Отмена", "transaction_cancel")],
        ],
    }
}

/// A single cancel button with a flow-specific callback
pub fn cancel_keyboard(cancel_data: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![vec![InlineKeyboardButton::new("❌ Отмена", cancel_data)]],
    }
}
