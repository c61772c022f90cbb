//! User domain entity
//!
//! Represents a Telegram user registered with the bot.

use chrono::NaiveDateTime;

/// A registered bot user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    /// Telegram user id, unique per user
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub is_active: bool,
}

impl User {
    /// Human-readable name: "First Last", falling back to the username
    /// and finally to the Telegram id.
    pub fn full_name(&self) -> String {
        let mut parts = Vec::new();
        if let Some(first) = &self.first_name {
            parts.push(first.as_str());
        }
        if let Some(last) = &self.last_name {
            parts.push(last.as_str());
        }

        if !parts.is_empty() {
            parts.join(" ")
        } else if let Some(username) = &self.username {
            username.clone()
        } else {
            format!("User {}", self.telegram_id)
        }
    }
}

/// Data needed to create a new user
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: 1,
            telegram_id: 123456789,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            language_code: Some("ru".to_string()),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
            is_active: true,
        }
    }

    #[test]
    fn full_name_from_first_and_last() {
        assert_eq!(user().full_name(), "Test User");
    }

    #[test]
    fn full_name_falls_back_to_username() {
        let mut u = user();
        u.first_name = None;
        u.last_name = None;
        assert_eq!(u.full_name(), "testuser");
    }

    #[test]
    fn full_name_falls_back_to_telegram_id() {
        let mut u = user();
        u.first_name = None;
        u.last_name = None;
        u.username = None;
        assert_eq!(u.full_name(), "User 123456789");
    }

    #[test]
    fn full_name_first_only() {
        let mut u = user();
        u.last_name = None;
        assert_eq!(u.full_name(), "Test");
    }
}
