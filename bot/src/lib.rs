//! Finance Bot
//!
//! A Telegram bot for personal finance tracking backed by PostgreSQL.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

pub mod adapters;
pub mod app;
pub mod config;
pub mod db;
pub mod domain;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod keyboards;

#[cfg(test)]
mod test_utils;


pub use config::Config;
pub use error::{AppError, DomainError, TelegramError};
