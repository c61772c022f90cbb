//! Telegram Bot API port
//!
//! The trait abstracts the Bot API methods the bot relies on, together with
//! the wire types they exchange. The reqwest implementation lives in
//! `adapters::telegram`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TelegramError;

/// An incoming update from getUpdates
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// A chat message
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<TelegramUser>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

/// The Telegram account behind an update
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// A button press on an inline keyboard
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: TelegramUser,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

/// Inline keyboard attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// Persistent reply keyboard shown under the input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardButton {
    pub text: String,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Either keyboard variant accepted by sendMessage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Inline(InlineKeyboardMarkup),
    Reply(ReplyKeyboardMarkup),
}

/// Parameters for sendMessage
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            reply_markup: None,
        }
    }

    pub fn html(mut self) -> Self {
        self.parse_mode = Some("HTML".to_string());
        self
    }

    pub fn with_inline_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(ReplyMarkup::Inline(keyboard));
        self
    }

    pub fn with_reply_keyboard(mut self, keyboard: ReplyKeyboardMarkup) -> Self {
        self.reply_markup = Some(ReplyMarkup::Reply(keyboard));
        self
    }
}

/// Parameters for editMessageText
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageText {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageText {
    pub fn new(chat_id: i64, message_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            message_id,
            text: text.into(),
            parse_mode: None,
            reply_markup: None,
        }
    }

    pub fn html(mut self) -> Self {
        self.parse_mode = Some("HTML".to_string());
        self
    }

    pub fn with_inline_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(keyboard);
        self
    }
}

/// Telegram Bot API client
#[async_trait]
pub trait TelegramApi: Send + Sync {
    /// Long-poll for updates after `offset`
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError>;

    /// Send a message to a chat
    async fn send_message(&self, message: &SendMessage) -> Result<Message, TelegramError>;

    /// Replace the text (and inline keyboard) of a previously sent message
    async fn edit_message_text(&self, edit: &EditMessageText) -> Result<(), TelegramError>;

    /// Acknowledge a callback query so the client stops the spinner
    async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), TelegramError>;
}
