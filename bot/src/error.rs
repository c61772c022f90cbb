//! Unified error types for the Finance Bot
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `TelegramError`: Telegram Bot API client errors
//! - `AppError`: Application layer errors used by the update handlers

use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Telegram Bot API client errors
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {error_code} - {description}")]
    Api { error_code: i64, description: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Application layer errors - used by the update handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Telegram error: {0}")]
    Telegram(#[from] TelegramError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
