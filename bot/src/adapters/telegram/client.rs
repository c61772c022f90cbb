//! Telegram Bot API client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{EditMessageText, Message, SendMessage, TelegramApi, Update};
use crate::error::TelegramError;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Implementation of the Telegram Bot API client
pub struct TelegramClientImpl {
    http: Client,
    /// "<base>/bot<token>"
    bot_url: String,
}

/// Response envelope every Bot API method returns
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
}

#[derive(Serialize)]
struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: &'static [&'static str],
}

#[derive(Serialize)]
struct AnswerCallbackQueryRequest<'a> {
    callback_query_id: &'a str,
}

impl TelegramClientImpl {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(TELEGRAM_API_URL, token)
    }

    /// Point the client at a different API host (used by tests)
    pub fn with_base_url(base_url: &str, token: &str) -> Self {
        Self {
            http: Client::new(),
            bot_url: format!("{}/bot{}", base_url.trim_end_matches('/'), token),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.bot_url, method)
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T, TelegramError>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.method_url(method))
            .json(params)
            .send()
            .await?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| TelegramError::Deserialization(e.to_string()))?;

        if envelope.ok {
            envelope.result.ok_or_else(|| {
                TelegramError::Deserialization(format!("{}: empty result", method))
            })
        } else {
            Err(TelegramError::Api {
                error_code: envelope.error_code.unwrap_or_default(),
                description: envelope.description.unwrap_or_default(),
            })
        }
    }
}

#[async_trait]
impl TelegramApi for TelegramClientImpl {
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        self.call(
            "getUpdates",
            &GetUpdatesRequest {
                offset,
                timeout: timeout_secs,
                allowed_updates: &["message", "callback_query"],
            },
        )
        .await
    }

    async fn send_message(&self, message: &SendMessage) -> Result<Message, TelegramError> {
        self.call("sendMessage", message).await
    }

    async fn edit_message_text(&self, edit: &EditMessageText) -> Result<(), TelegramError> {
        // Returns the edited Message, or `true` for inline-mode messages
        let _: serde_json::Value = self.call("editMessageText", edit).await?;
        Ok(())
    }

    async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), TelegramError> {
        let _: serde_json::Value = self
            .call(
                "answerCallbackQuery",
                &AnswerCallbackQueryRequest { callback_query_id },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_url_includes_token() {
        let client = TelegramClientImpl::new("123:abc");
        assert_eq!(
            client.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn error_envelope_is_parsed() {
        let json = r#"{"ok": false, "error_code": 400, "description": "Bad Request"}"#;
        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();

        assert!(!envelope.ok);
        assert_eq!(envelope.error_code, Some(400));
        assert_eq!(envelope.description.as_deref(), Some("Bad Request"));
    }

    #[test]
    fn result_envelope_is_parsed() {
        let json = r#"{"ok": true, "result": []}"#;
        let envelope: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();

        assert!(envelope.ok);
        assert_eq!(envelope.result.unwrap().len(), 0);
    }
}
