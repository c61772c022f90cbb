//! Test fixtures
//!
//! Factory functions for test data and incoming Telegram updates.

use chrono::Utc;

use crate::domain::entities::User;
use crate::domain::ports::{CallbackQuery, Chat, Message, TelegramUser, Update};

/// Create a test user with default values
pub fn test_user() -> User {
    let now = Utc::now().naive_utc();
    User {
        id: 1,
        telegram_id: 123456789,
        username: Some("testuser".to_string()),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        language_code: Some("ru".to_string()),
        created_at: now,
        updated_at: now,
        is_active: true,
    }
}

fn sender(telegram_id: i64) -> TelegramUser {
    TelegramUser {
        id: telegram_id,
        first_name: "Test".to_string(),
        last_name: Some("User".to_string()),
        username: Some("testuser".to_string()),
        language_code: Some("ru".to_string()),
    }
}

/// An incoming text message. The chat id equals the sender's Telegram id,
/// as in any private chat with a bot.
pub fn message_update(telegram_id: i64, text: &str) -> Update {
    Update {
        update_id: 1,
        message: Some(Message {
            message_id: 1,
            from: Some(sender(telegram_id)),
            chat: Chat { id: telegram_id },
            text: Some(text.to_string()),
        }),
        callback_query: None,
    }
}

/// An incoming button press on a previously sent message
pub fn callback_update(telegram_id: i64, data: &str) -> Update {
    Update {
        update_id: 1,
        message: None,
        callback_query: Some(CallbackQuery {
            id: "callback-1".to_string(),
            from: sender(telegram_id),
            message: Some(Message {
                message_id: 100,
                from: None,
                chat: Chat { id: telegram_id },
                text: None,
            }),
            data: Some(data.to_string()),
        }),
    }
}
