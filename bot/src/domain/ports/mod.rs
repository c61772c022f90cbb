//! Ports
//!
//! Trait interfaces implemented by adapters.

pub mod repositories;
pub mod telegram;

pub use repositories::{
    BudgetRepository, CategoryRepository, ReportRepository, TransactionRepository, UserRepository,
};
pub use telegram::{
    CallbackQuery, Chat, EditMessageText, InlineKeyboardButton, InlineKeyboardMarkup,
    KeyboardButton, Message, ReplyKeyboardMarkup, ReplyMarkup, SendMessage, TelegramApi,
    TelegramUser, Update,
};
